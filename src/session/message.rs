use chrono::Local;
use uuid::Uuid;

/// One entry of the conversation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub is_user: bool,
    pub timestamp: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text.into(), true)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text.into(), false)
    }

    fn new(text: String, is_user: bool) -> Self {
        Message {
            id: Uuid::new_v4().to_string(),
            text,
            is_user,
            timestamp: Local::now().format("%H:%M").to_string(),
        }
    }
}
