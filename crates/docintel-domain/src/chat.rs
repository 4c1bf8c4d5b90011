//! Chat module - caller-owned conversation history for document queries

use std::fmt;

/// Unique identifier for a chat session based on UUIDv7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u128);

impl SessionId {
    /// Generate a new UUIDv7-based SessionId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Parse a SessionId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid session id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Who spoke a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The person asking questions
    User,

    /// The language model's answer
    Assistant,
}

impl Role {
    /// Get the role name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One message in a document conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    /// Speaker
    pub role: Role,

    /// Message text
    pub text: String,
}

impl ChatTurn {
    /// A question from the user
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// An answer from the assistant
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// Append-only conversation about a single document
///
/// The core never stores sessions; callers keep one per open document and
/// thread its turns back into each query.
///
/// # Examples
///
/// ```
/// use docintel_domain::{ChatSession, Role};
///
/// let mut session = ChatSession::new(Some("lease.pdf".to_string()));
/// session.record_exchange("Who is the landlord?", "Acme Properties.");
/// assert_eq!(session.len(), 2);
/// assert_eq!(session.turns()[0].role, Role::User);
/// ```
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: SessionId,
    document_name: Option<String>,
    turns: Vec<ChatTurn>,
}

impl ChatSession {
    /// Start an empty session
    pub fn new(document_name: Option<String>) -> Self {
        Self {
            id: SessionId::new(),
            document_name,
            turns: Vec::new(),
        }
    }

    /// Session identifier
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Name of the document under discussion
    pub fn document_name(&self) -> Option<&str> {
        self.document_name.as_deref()
    }

    /// Append one question/answer pair
    pub fn record_exchange(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(ChatTurn::user(question));
        self.turns.push(ChatTurn::assistant(answer));
    }

    /// All turns, oldest first
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// The last `n` turns, oldest first
    pub fn recent(&self, n: usize) -> &[ChatTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether nothing has been asked yet
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_exchange_appends_pair() {
        let mut session = ChatSession::new(None);
        assert!(session.is_empty());

        session.record_exchange("q1", "a1");
        session.record_exchange("q2", "a2");

        let turns = session.turns();
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[2], ChatTurn::user("q2"));
        assert_eq!(turns[3], ChatTurn::assistant("a2"));
    }

    #[test]
    fn test_recent_clamps() {
        let mut session = ChatSession::new(None);
        session.record_exchange("q1", "a1");

        assert_eq!(session.recent(10).len(), 2);
        assert_eq!(session.recent(1), &[ChatTurn::assistant("a1")]);
        assert!(session.recent(0).is_empty());
    }

    #[test]
    fn test_session_id_round_trip() {
        let id = SessionId::new();
        let parsed = SessionId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_session_ids_are_distinct() {
        let a = ChatSession::new(None);
        let b = ChatSession::new(None);
        assert_ne!(a.id(), b.id());
    }
}
