pub mod app_config;
pub mod client;
pub mod session;
pub mod token_store;

pub use client::ApiClient;
pub use session::{AuthSession, SessionState};
pub use token_store::{MemoryTokenStore, TokenStore};
