//! Windows-specific functionality
//!
//! - Protocol handler registration (HKEY_CLASSES_ROOT)

pub mod registry;

pub use registry::WindowsRegistry;
