pub mod backend_api;
pub mod content_api;
pub mod gemini;
pub mod token_store;

pub use backend_api::BackendApiAdapter;
pub use content_api::ContentApiAdapter;
pub use gemini::{GeminiAdapter, UnavailableAi};
pub use token_store::FileTokenStore;
#[cfg(test)]
pub use token_store::MemoryTokenStore;
