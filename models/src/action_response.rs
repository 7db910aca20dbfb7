use serde::Deserialize;

/// `{success, message?}` acknowledgement returned by login and delete.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ActionResponse {
    /// Server-supplied reason, empty when the server sent none.
    pub fn reason(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}
