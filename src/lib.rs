#![recursion_limit = "256"]

pub mod application;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;
pub mod ml;
pub mod server;

pub use config::AppConfig;
pub use error::{ClassifierError, Result};
