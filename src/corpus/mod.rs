//! Historical conversation corpus
//!
//! The corpus is a JSON document mapping conversation-id to an ordered list of
//! turns, loaded once at startup and shared read-only across all requests.
//! There is no reload mechanism; updating the corpus requires a restart.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Customer,
    Other,
}

/// A single chronological message within a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: String,
    pub turns: Vec<Turn>,
}

/// On-disk record shape: `{"messages": [{sender, text}, ...]}`.
#[derive(Debug, Deserialize)]
struct ConversationRecord {
    #[serde(default)]
    messages: Vec<Turn>,
}

/// The full corpus, in the document order of the source file.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    conversations: Vec<Conversation>,
}

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse corpus: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Corpus {
    /// Load the corpus from a JSON file. Called once at startup; any failure
    /// here is fatal to the process.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a corpus from a JSON string, preserving document order.
    pub fn from_json(content: &str) -> Result<Self, CorpusError> {
        let map: serde_json::Map<String, Value> = serde_json::from_str(content)?;

        let mut conversations = Vec::with_capacity(map.len());
        for (id, value) in map {
            let record: ConversationRecord = serde_json::from_value(value)?;
            conversations.push(Conversation {
                id,
                turns: record.messages,
            });
        }

        Ok(Self { conversations })
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_conversations_in_document_order() {
        let json = r#"{
            "convo_b": {"messages": [{"sender": "customer", "text": "hi"}]},
            "convo_a": {"messages": [
                {"sender": "customer", "text": "can I apply?"},
                {"sender": "other", "text": "Sure, let's get started."}
            ]}
        }"#;

        let corpus = Corpus::from_json(json).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.conversations()[0].id, "convo_b");
        assert_eq!(corpus.conversations()[1].id, "convo_a");
        assert_eq!(corpus.conversations()[1].turns.len(), 2);
        assert_eq!(corpus.conversations()[1].turns[1].sender, Sender::Other);
    }

    #[test]
    fn missing_messages_key_yields_empty_conversation() {
        let corpus = Corpus::from_json(r#"{"convo_1": {}}"#).unwrap();
        assert_eq!(corpus.conversations()[0].turns.len(), 0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = Corpus::from_json("not json").unwrap_err();
        assert!(matches!(err, CorpusError::Parse(_)));
    }

    #[test]
    fn unknown_sender_is_an_error() {
        let json = r#"{"c": {"messages": [{"sender": "robot", "text": "hi"}]}}"#;
        assert!(Corpus::from_json(json).is_err());
    }
}
