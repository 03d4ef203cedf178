use serde::{Deserialize, Serialize};

/// A selectable meme template as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meme {
    pub id: String,
    pub name: String,
    /// Source image address.
    pub url: String,
    pub width: u32,
    pub height: u32,
    /// Number of caption slots the template was designed for (informational).
    #[serde(default)]
    pub box_count: u32,
}

/// Provider envelope: `{ success, error_message, data: { memes: [...] } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct MemeListResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub data: Option<MemeListData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemeListData {
    pub memes: Vec<Meme>,
}

fn default_success() -> bool {
    true
}
