//! Input line classification

/// Literal prefix for the transcript-inspection command
const MEMORY_PREFIX: &str = "memory ";

/// What a line of user input asks the session to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// End the session
    Quit,
    /// Summarize a saved transcript file
    Memory(String),
    /// Send the text to the backend as a chat message
    Message(String),
}

/// Classify a trimmed input line.
///
/// `quit`/`exit` and the `memory ` prefix match case-insensitively;
/// everything else, the empty line included, is a chat message.
pub fn classify(line: &str) -> Command {
    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
        return Command::Quit;
    }

    if let Some(head) = line.get(..MEMORY_PREFIX.len()) {
        if head.eq_ignore_ascii_case(MEMORY_PREFIX) {
            return Command::Memory(line[MEMORY_PREFIX.len()..].trim().to_string());
        }
    }

    Command::Message(line.to_string())
}
