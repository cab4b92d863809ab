//! Resume screener library

pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod queue;
pub mod store;

pub use config::Config;
pub use error::{Result, ScreenerError};
