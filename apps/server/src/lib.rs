pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
mod main_lib;

pub use main_lib::{assemble_state, build_state, init_tracing, AppState, Backends};
