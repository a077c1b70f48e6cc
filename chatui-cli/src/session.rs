//! The conversation session state machine

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use chatui_core::transcript::{Conversation, TranscriptStore};
use chatui_providers::ChatProvider;

use crate::command::{self, Command};
use crate::progress::ProgressIndicator;
use crate::ui::{Ui, ASSISTANT_NAME};

/// Session life cycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    /// Session constructed, terminal not yet prepared
    Init,
    /// Blocked on a line of user input
    AwaitingInput,
    /// A backend request is outstanding
    AwaitingBackend,
    /// An assistant reply is ready to print
    Rendering,
    /// No further input is accepted
    Terminated,
}

/// Drives user and backend turns over a single conversation.
///
/// The conversation is owned and mutated here exclusively; the store gets
/// read-only snapshots on save and hands back fresh sequences on load.
pub struct SessionController<'a> {
    state: SessionState,
    conversation: Conversation,
    provider: Arc<dyn ChatProvider>,
    store: TranscriptStore,
    ui: &'a Ui,
    prompt_label: String,
}

impl<'a> SessionController<'a> {
    /// Create a controller whose conversation opens with `system_prompt`
    pub fn new(
        system_prompt: impl Into<String>,
        provider: Arc<dyn ChatProvider>,
        store: TranscriptStore,
        ui: &'a Ui,
    ) -> Self {
        Self {
            state: SessionState::Init,
            conversation: Conversation::with_system_prompt(system_prompt),
            provider,
            store,
            ui,
            prompt_label: std::env::var("USER").unwrap_or_else(|_| "you".to_string()),
        }
    }

    /// Load a transcript file and splice it in after the system message.
    ///
    /// A failed load is reported and leaves the conversation unchanged.
    pub fn load_transcript(&mut self, path: &Path) {
        self.ui
            .info(&format!("Loading conversation from {}...", path.display()));
        match self.store.load(path) {
            Ok(loaded) => {
                info!("Loaded {} messages from {}", loaded.len(), path.display());
                self.conversation.splice(loaded);
            }
            Err(err) => {
                warn!("Failed to load transcript {}: {}", path.display(), err);
                self.ui
                    .report_error(&format!("Error loading conversation: {}", err));
            }
        }
    }

    /// Run the session until it terminates.
    ///
    /// Nothing escapes this loop: every failure is reported and recovered
    /// locally, and only quit or an interrupted read ends it.
    pub async fn run(&mut self) {
        while self.state != SessionState::Terminated {
            self.step().await;
        }
    }

    /// Advance the state machine by one transition
    async fn step(&mut self) {
        self.state = match self.state {
            SessionState::Init => self.enter_session(),
            SessionState::AwaitingInput => self.read_input(),
            SessionState::AwaitingBackend => self.request_completion().await,
            SessionState::Rendering => self.render_reply(),
            SessionState::Terminated => SessionState::Terminated,
        };
    }

    fn enter_session(&self) -> SessionState {
        self.ui.clear_screen();
        SessionState::AwaitingInput
    }

    fn read_input(&mut self) -> SessionState {
        let Some(line) = self.ui.read_line(&self.prompt_label) else {
            // Interrupted read takes the quit path
            self.ui.notice("\nInterrupted");
            return self.quit();
        };

        self.handle_command(command::classify(&line))
    }

    fn handle_command(&mut self, command: Command) -> SessionState {
        match command {
            Command::Quit => self.quit(),
            Command::Memory(file) => {
                match self.store.summarize(&file) {
                    Ok(summary) => self.ui.render_summary(&summary),
                    Err(err) => {
                        warn!("Failed to summarize {}: {}", file, err);
                        self.ui
                            .report_error(&format!("Error reading memory: {}", err));
                    }
                }
                SessionState::AwaitingInput
            }
            Command::Message(text) => {
                self.conversation.push_user(text);
                SessionState::AwaitingBackend
            }
        }
    }

    async fn request_completion(&mut self) -> SessionState {
        let indicator = ProgressIndicator::start(format!("{} is thinking", ASSISTANT_NAME));
        let result = self.provider.complete(self.conversation.messages()).await;
        // The indicator must be fully stopped before anything else is
        // printed or read.
        indicator.stop().await;

        match result {
            Ok(reply) => {
                self.conversation.push_assistant(reply);
                SessionState::Rendering
            }
            Err(err) => {
                warn!("Backend request failed: {}", err);
                self.ui.report_error(&format!("Error: {}", err));
                self.ui.notice("Please try again.");
                SessionState::AwaitingInput
            }
        }
    }

    fn render_reply(&self) -> SessionState {
        if let Some(message) = self.conversation.last() {
            self.ui.render_reply(&message.content);
        }
        SessionState::AwaitingInput
    }

    fn quit(&mut self) -> SessionState {
        if self.ui.confirm_save() {
            let name = self.ui.ask_filename(&TranscriptStore::default_filename());
            match self.store.save(&self.conversation, Some(&name)) {
                Ok(path) => self
                    .ui
                    .success(&format!("\nConversation saved to {}", path.display())),
                Err(err) => {
                    warn!("Failed to save transcript: {}", err);
                    self.ui
                        .report_error(&format!("Error saving conversation: {}", err));
                }
            }
        }
        self.ui.farewell();
        SessionState::Terminated
    }
}
