//! Core module - shared infrastructure for Navigator
//!
//! This module contains foundational types, configuration, logging and error
//! handling used throughout the application.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::Config;
pub use error::{NavigatorError, Result};
pub use types::*;
