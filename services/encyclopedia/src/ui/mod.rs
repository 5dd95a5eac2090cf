pub mod command;
pub mod controller;
pub mod dashboard;
pub mod render;
pub mod search_task;
pub mod state;

#[cfg(test)]
mod fakes;

// Re-export the controller and its state so the binary can wire them up directly.
pub use command::Command;
pub use controller::Encyclopedia;
pub use render::render;
pub use state::{AppState, UiState};
