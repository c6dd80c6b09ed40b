use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// File holding the management API bearer token. `None` (or an empty
    /// string) leaves the API unauthenticated.
    #[serde(default)]
    pub token_path: Option<String>,
}

impl AuthConfig {
    pub fn token_path(&self) -> Option<&str> {
        self.token_path.as_deref().filter(|p| !p.is_empty())
    }
}
