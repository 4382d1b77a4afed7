use serde_json::{Map, Value};

const MESSAGES_KEY: &str = "messages";
const MSG_KEY: &str = "msg";

/// Body of a non-2xx answer.
///
/// Endpoints report failures in three shapes: a `messages` list, a single
/// `msg`, or field-keyed errors such as `{"username": "taken"}` and
/// `{"email": ["Not a valid email address."]}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBody(Map<String, Value>);

impl ErrorBody {
    /// Parses a failure body. Anything but a JSON object is an error.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body).map(Self)
    }

    /// `messages[0]`, else `msg`.
    pub fn first_message(&self) -> Option<&str> {
        self.0
            .get(MESSAGES_KEY)
            .and_then(first_text)
            .or_else(|| self.0.get(MSG_KEY).and_then(first_text))
    }

    /// The first field-keyed message, in key order.
    pub fn first_field_message(&self) -> Option<&str> {
        self.0
            .iter()
            .filter(|(key, _)| *key != MESSAGES_KEY && *key != MSG_KEY)
            .find_map(|(_, value)| first_text(value))
    }
}

/// A string, or the first string of a list.
fn first_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(text) => Some(text),
        Value::Array(items) => items.first().and_then(Value::as_str),
        _ => None,
    }
}
