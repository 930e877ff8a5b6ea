use std::sync::RwLock;

use skyway_core::services::AccessToken;

/// Where the current bearer token lives between requests.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<AccessToken>;
    fn save(&self, token: AccessToken);
    fn clear(&self);
}

/// Process-local token holder.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<AccessToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: AccessToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<AccessToken> {
        // A poisoned lock still holds a valid Option.
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save(&self, token: AccessToken) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token);
    }

    fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}
