//! Utility functions for the URL handler

pub mod paths;

pub use paths::*;
