//! Conversation turns and the stored exchanges they are rebuilt from.

use crate::Role;
use serde::{Deserialize, Serialize};

/// One message unit in a conversation history.
///
/// # Examples
///
/// ```
/// use aitutor_core::{Role, Turn};
///
/// let turn = Turn::user("What is a noun?");
/// assert_eq!(*turn.role(), Role::User);
/// assert_eq!(turn.text(), "What is a noun?");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct Turn {
    /// Who produced the turn
    role: Role,
    /// Text content of the turn
    text: String,
}

impl Turn {
    /// Creates a turn with the given role and text.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Creates a `user` turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Creates a `model` turn.
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }
}

/// A prior prompt/response pair as persisted by the caller.
///
/// The response is kept as raw JSON because stored responses may be plain
/// strings or the structured payload a template produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Exchange {
    /// Prompt the student sent
    prompt: String,
    /// Response that was stored for it
    #[serde(default)]
    response: serde_json::Value,
}

impl Exchange {
    /// Creates an exchange from a prompt and a stored response.
    pub fn new(prompt: impl Into<String>, response: impl Into<serde_json::Value>) -> Self {
        Self {
            prompt: prompt.into(),
            response: response.into(),
        }
    }

    /// Stored response rendered as text.
    ///
    /// Strings are returned verbatim, `null` becomes empty, anything else is
    /// serialized as compact JSON.
    pub fn response_text(&self) -> String {
        match &self.response {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_text_for_each_shape() {
        assert_eq!(Exchange::new("p", "plain").response_text(), "plain");
        assert_eq!(Exchange::new("p", serde_json::Value::Null).response_text(), "");
        assert_eq!(
            Exchange::new("p", json!({"response": "hi"})).response_text(),
            r#"{"response":"hi"}"#
        );
    }

    #[test]
    fn test_exchange_deserializes_without_response() {
        let exchange: Exchange = serde_json::from_str(r#"{"prompt": "hello"}"#).unwrap();
        assert_eq!(exchange.prompt(), "hello");
        assert_eq!(exchange.response_text(), "");
    }
}
