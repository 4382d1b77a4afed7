use serde::{Deserialize, Serialize};

/// Body returned by the authentication endpoints.
///
/// Every field is optional: the contract is checked where a field is
/// needed, not at parse time. Older endpoints answer with a `messages`
/// list, newer ones with a single `msg`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl AuthResponse {
    /// Parses a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// The message to show the user: `messages[0]`, else `msg`.
    pub fn first_message(&self) -> Option<&str> {
        self.messages
            .first()
            .or(self.msg.as_ref())
            .map(String::as_str)
    }

    /// All messages in display order.
    pub fn all_messages(&self) -> Vec<&str> {
        if self.messages.is_empty() {
            self.msg.iter().map(String::as_str).collect()
        } else {
            self.messages.iter().map(String::as_str).collect()
        }
    }
}
