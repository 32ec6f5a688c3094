//! `phpstorm://` URL handler
//!
//! Deep-links from a browser into a locally installed PhpStorm at a given
//! file, line and column, and keeps the OS protocol registration pointing at
//! the right executable.

pub mod commands;
pub mod error;
pub mod installer;
pub mod locator;
pub mod logging;
pub mod open;
pub mod platform;
pub mod registration;
pub mod settings;
pub mod utils;

pub use error::{HandlerError, Result};
