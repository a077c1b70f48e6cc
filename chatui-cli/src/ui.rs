//! Terminal output context
//!
//! Rendering and prompting go through an explicit `Ui` value instead of
//! ambient console state, so components that need to print receive a
//! handle they can be tested around.

use console::{style, Term};
use dialoguer::{Confirm, Input};

use chatui_core::transcript::{Role, TranscriptSummary};

/// Display name used for assistant output
pub const ASSISTANT_NAME: &str = "ChatUI";

/// Maximum characters of message content shown per summary line
const PREVIEW_CHARS: usize = 100;

/// Terminal output context
pub struct Ui {
    term: Term,
}

impl Ui {
    /// Create a UI bound to stdout
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    /// Clear the whole screen
    pub fn clear_screen(&self) {
        let _ = self.term.clear_screen();
    }

    /// Read one line of input from the user.
    ///
    /// Returns `None` when the read is interrupted (Ctrl-C or closed
    /// input).
    pub fn read_line(&self, prompt_label: &str) -> Option<String> {
        Input::<String>::new()
            .with_prompt(format!("\n{}", style(prompt_label).bold()))
            .allow_empty(true)
            .interact_text()
            .ok()
            .map(|line| line.trim().to_string())
    }

    /// Ask whether the conversation should be saved
    pub fn confirm_save(&self) -> bool {
        Confirm::new()
            .with_prompt("\nWould you like to save the conversation?")
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    /// Ask for a filename, offering `default` as the pre-filled answer
    pub fn ask_filename(&self, default: &str) -> String {
        Input::<String>::new()
            .with_prompt("Enter filename to save conversation")
            .default(default.to_string())
            .interact_text()
            .unwrap_or_else(|_| default.to_string())
    }

    /// Print the assistant reply under its header
    pub fn render_reply(&self, content: &str) {
        println!("\n{}:", style(ASSISTANT_NAME).bold().cyan());
        println!("{}", content);
    }

    /// Print an informational line
    pub fn info(&self, text: &str) {
        println!("{}", style(text).blue());
    }

    /// Print a notice line
    pub fn notice(&self, text: &str) {
        println!("{}", style(text).yellow());
    }

    /// Print a success line
    pub fn success(&self, text: &str) {
        println!("{}", style(text).green().bold());
    }

    /// Print an error line
    pub fn report_error(&self, text: &str) {
        println!("{}", style(text).red().bold());
    }

    /// Render a transcript summary report
    pub fn render_summary(&self, summary: &TranscriptSummary) {
        println!("\n{}", style("Conversation Summary:").bold().blue());
        println!("Total messages: {}", summary.total());
        println!("User messages: {}", summary.user_messages());
        println!("{} messages: {}", ASSISTANT_NAME, summary.assistant_messages());

        if summary.total() > 0 {
            println!("\n{}", style("Last few exchanges:").bold().blue());
            for message in summary.tail() {
                let label = match message.role {
                    Role::User => style("User").green().bold(),
                    Role::Assistant => style(ASSISTANT_NAME).cyan().bold(),
                    Role::System => style("System").blue().bold(),
                };
                println!("{}: {}", label, message.preview(PREVIEW_CHARS));
            }
        }
    }

    /// Print the farewell line
    pub fn farewell(&self) {
        self.success("\nGoodbye!");
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}
