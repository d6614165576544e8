//! # postcraft CLI
//!
//! Library half of the `postcraft` binary: configuration, logging and the
//! HTTP facade. Kept out of `main.rs` so the server can be driven in tests.

pub mod config;
pub mod logging;
pub mod server;

pub use config::{Cli, Commands, GenerationConfig, ListenArgs, ProviderArgs};
pub use server::{router, serve, AppState, GenerateRequest, GenerateResponse};
