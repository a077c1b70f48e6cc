//! Durable transcript storage

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use super::{Conversation, Message, Role};
use crate::error::{Error, Result};

/// File extension for saved transcripts
const TRANSCRIPT_EXT: &str = ".json";

/// Number of trailing messages shown in a summary
const SUMMARY_TAIL: usize = 4;

/// Loads and saves conversation transcripts on disk.
///
/// The store never aliases live session state: `save` takes a read-only
/// snapshot and `load` returns a freshly built conversation.
#[derive(Debug)]
pub struct TranscriptStore {
    base_dir: PathBuf,
}

impl TranscriptStore {
    /// Create a store rooted at the current directory
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
        }
    }

    /// Create a store rooted at a custom directory
    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            base_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Default transcript filename derived from the current local time
    pub fn default_filename() -> String {
        format!("conversation_{}.json", Local::now().format("%Y%m%d_%H%M%S"))
    }

    /// Save a conversation as a pretty-printed JSON array.
    ///
    /// Without a filename the derived default is used. A filename missing
    /// the `.json` extension gets it appended. Returns the path written.
    pub fn save(&self, conversation: &Conversation, filename: Option<&str>) -> Result<PathBuf> {
        let filename = match filename {
            Some(name) => normalize_filename(name),
            None => Self::default_filename(),
        };
        let path = self.base_dir.join(filename);

        let body = serde_json::to_string_pretty(conversation)?;
        std::fs::write(&path, body)?;
        debug!("Saved {} messages to {}", conversation.len(), path.display());
        Ok(path)
    }

    /// Load a transcript file into a conversation
    pub fn load<P: AsRef<Path>>(&self, filename: P) -> Result<Conversation> {
        let path = self.base_dir.join(filename.as_ref());
        let content = std::fs::read_to_string(&path)?;
        let conversation: Conversation = serde_json::from_str(&content)
            .map_err(|e| Error::Parse(format!("{}: {}", path.display(), e)))?;
        debug!(
            "Loaded {} messages from {}",
            conversation.len(),
            path.display()
        );
        Ok(conversation)
    }

    /// Load a transcript and compute its summary report
    pub fn summarize<P: AsRef<Path>>(&self, filename: P) -> Result<TranscriptSummary> {
        let conversation = self.load(filename)?;
        Ok(TranscriptSummary::new(conversation))
    }

    /// Read a plain-text context file as a system prompt, trimmed
    pub fn load_context<P: AsRef<Path>>(&self, filename: P) -> Result<String> {
        let path = self.base_dir.join(filename.as_ref());
        let content = std::fs::read_to_string(&path)?;
        Ok(content.trim().to_string())
    }
}

impl Default for TranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_filename(name: &str) -> String {
    if name.ends_with(TRANSCRIPT_EXT) {
        name.to_string()
    } else {
        format!("{}{}", name, TRANSCRIPT_EXT)
    }
}

/// Summary report over a stored transcript
#[derive(Debug, Clone)]
pub struct TranscriptSummary {
    conversation: Conversation,
}

impl TranscriptSummary {
    fn new(conversation: Conversation) -> Self {
        Self { conversation }
    }

    /// Total number of messages
    pub fn total(&self) -> usize {
        self.conversation.len()
    }

    /// Number of user messages
    pub fn user_messages(&self) -> usize {
        self.conversation.count_role(Role::User)
    }

    /// Number of assistant messages
    pub fn assistant_messages(&self) -> usize {
        self.conversation.count_role(Role::Assistant)
    }

    /// The trailing messages, oldest of the tail first
    pub fn tail(&self) -> &[Message] {
        let messages = self.conversation.messages();
        let start = messages.len().saturating_sub(SUMMARY_TAIL);
        &messages[start..]
    }

    /// The parsed conversation, for reuse without a second load
    pub fn into_conversation(self) -> Conversation {
        self.conversation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_conversation() -> Conversation {
        let mut conversation = Conversation::with_system_prompt("be brief");
        conversation.push_user("hello");
        conversation.push_assistant("hi there");
        conversation
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = TranscriptStore::with_dir(temp_dir.path());
        let conversation = sample_conversation();

        let path = store.save(&conversation, Some("chat.json")).unwrap();
        let loaded = store.load(path.file_name().unwrap()).unwrap();

        assert_eq!(loaded, conversation);
    }

    #[test]
    fn test_save_appends_missing_extension() {
        let temp_dir = TempDir::new().unwrap();
        let store = TranscriptStore::with_dir(temp_dir.path());

        let path = store.save(&sample_conversation(), Some("notes")).unwrap();
        assert_eq!(path.file_name().unwrap(), "notes.json");

        let path = store
            .save(&sample_conversation(), Some("notes.json"))
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "notes.json");
    }

    #[test]
    fn test_save_without_filename_uses_timestamped_default() {
        let temp_dir = TempDir::new().unwrap();
        let store = TranscriptStore::with_dir(temp_dir.path());

        let path = store.save(&sample_conversation(), None).unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();

        assert!(name.starts_with("conversation_"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn test_save_writes_pretty_printed_array() {
        let temp_dir = TempDir::new().unwrap();
        let store = TranscriptStore::with_dir(temp_dir.path());

        let path = store.save(&sample_conversation(), Some("chat")).unwrap();
        let content = std::fs::read_to_string(path).unwrap();

        assert!(content.starts_with("[\n"));
        assert!(content.contains(r#""role": "system""#));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = TranscriptStore::with_dir(temp_dir.path());

        let err = store.load("nope.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_malformed_json_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("bad.json"), "{not json").unwrap();
        let store = TranscriptStore::with_dir(temp_dir.path());

        let err = store.load("bad.json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_load_unknown_role_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("odd.json"),
            r#"[{"role": "narrator", "content": "once upon a time"}]"#,
        )
        .unwrap();
        let store = TranscriptStore::with_dir(temp_dir.path());

        let err = store.load("odd.json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_summarize_counts_and_tail() {
        let temp_dir = TempDir::new().unwrap();
        let store = TranscriptStore::with_dir(temp_dir.path());

        let mut conversation = Conversation::new();
        for i in 0..5 {
            conversation.push_user(format!("question {}", i));
            conversation.push_assistant(format!("answer {}", i));
        }
        store.save(&conversation, Some("long.json")).unwrap();

        let summary = store.summarize("long.json").unwrap();
        assert_eq!(summary.total(), 10);
        assert_eq!(summary.user_messages(), 5);
        assert_eq!(summary.assistant_messages(), 5);

        let tail: Vec<&str> = summary.tail().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(tail, vec!["question 3", "answer 3", "question 4", "answer 4"]);
    }

    #[test]
    fn test_summarize_short_transcript_tail_is_everything() {
        let temp_dir = TempDir::new().unwrap();
        let store = TranscriptStore::with_dir(temp_dir.path());

        let mut conversation = Conversation::new();
        conversation.push_user("only question");
        store.save(&conversation, Some("short.json")).unwrap();

        let summary = store.summarize("short.json").unwrap();
        assert_eq!(summary.tail().len(), 1);
        assert_eq!(summary.into_conversation().len(), 1);
    }

    #[test]
    fn test_load_context_trims_contents() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("context.txt"), "  act as a pirate \n\n").unwrap();
        let store = TranscriptStore::with_dir(temp_dir.path());

        let prompt = store.load_context("context.txt").unwrap();
        assert_eq!(prompt, "act as a pirate");
    }

    #[test]
    fn test_load_context_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = TranscriptStore::with_dir(temp_dir.path());

        let err = store.load_context("absent.txt").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
