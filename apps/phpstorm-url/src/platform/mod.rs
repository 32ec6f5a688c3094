//! Platform-specific functionality
//!
//! - **Windows**: protocol registration under HKEY_CLASSES_ROOT
//! - **Other platforms**: registration is unsupported; discovery and launching
//!   still work, which keeps the pipeline testable off Windows

use crate::error::{HandlerError, Result};
use crate::registration::{ProtocolRegistry, RegistrationEntries};

#[cfg(target_os = "windows")]
pub mod windows;

/// Registry backend for the current OS
pub fn system_registry() -> Box<dyn ProtocolRegistry> {
    #[cfg(target_os = "windows")]
    {
        Box::new(windows::WindowsRegistry)
    }

    #[cfg(not(target_os = "windows"))]
    {
        Box::new(UnsupportedRegistry)
    }
}

/// Stand-in for platforms without a registry-based URL handler table
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedRegistry;

impl UnsupportedRegistry {
    fn error() -> HandlerError {
        HandlerError::platform(format!(
            "protocol registration is only supported on Windows (running on {})",
            std::env::consts::OS
        ))
    }
}

impl ProtocolRegistry for UnsupportedRegistry {
    fn read_command(&self, _scheme: &str) -> Result<Option<String>> {
        Err(Self::error())
    }

    fn write_registration(&self, _entries: &RegistrationEntries) -> Result<()> {
        Err(Self::error())
    }
}
