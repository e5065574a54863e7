pub mod api;
pub mod config;
mod main_lib;

pub use main_lib::{build_session, init_tracing, start_watchers};
