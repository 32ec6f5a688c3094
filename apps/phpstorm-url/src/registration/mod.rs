//! Protocol handler registration.
//!
//! The OS routes `<scheme>://` URLs through four hierarchical keys:
//!
//! ```text
//! <scheme>                      @="URL:PhpStorm Protocol", "URL Protocol"=""
//! <scheme>\shell
//! <scheme>\shell\open
//! <scheme>\shell\open\command   @="\"<exe>\" \"%1\""
//! ```
//!
//! Only the command leaf is compared. Registry access goes through the
//! [`ProtocolRegistry`] trait so the compare-then-write logic runs without
//! touching real OS configuration.

use crate::error::Result;
use crate::settings::HandlerSettings;
use std::path::Path;
use tracing::{debug, info};

#[cfg(test)]
pub mod memory;

/// Registry value name for the protocol marker
pub const URL_PROTOCOL_VALUE: &str = "URL Protocol";

/// Command string that makes the OS pass the URL as the sole argument
pub fn expected_command(executable: &Path) -> String {
    format!("\"{}\" \"%1\"", executable.display())
}

/// Registry key holding the open command for `scheme`
pub fn command_key_path(scheme: &str) -> String {
    format!(r"{}\shell\open\command", scheme)
}

/// Everything written when (re)registering the scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationEntries {
    pub scheme: String,
    pub protocol_name: String,
    pub command: String,
}

impl RegistrationEntries {
    pub fn new(settings: &HandlerSettings, command: impl Into<String>) -> Self {
        Self {
            scheme: settings.scheme.clone(),
            protocol_name: settings.protocol_name.clone(),
            command: command.into(),
        }
    }

    /// Entries routing the scheme straight to `executable`
    pub fn for_executable(settings: &HandlerSettings, executable: &Path) -> Self {
        Self::new(settings, expected_command(executable))
    }

    /// The four keys from root to command leaf
    pub fn key_paths(&self) -> [String; 4] {
        [
            self.scheme.clone(),
            format!(r"{}\shell", self.scheme),
            format!(r"{}\shell\open", self.scheme),
            command_key_path(&self.scheme),
        ]
    }
}

/// Read/write access to the OS protocol-handler association.
pub trait ProtocolRegistry {
    /// Current open command for `scheme`, `None` when it is not registered.
    ///
    /// Access errors are [`crate::error::HandlerError::RegistrationRead`].
    fn read_command(&self, scheme: &str) -> Result<Option<String>>;

    /// Create or overwrite all four keys.
    fn write_registration(&self, entries: &RegistrationEntries) -> Result<()>;
}

/// Current registration compared against the expected command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStatus {
    /// No registration for the scheme
    Missing,
    /// Registered command equals the expected one
    Current(String),
    /// Registered, but with a different command
    Outdated { current: String },
}

impl RegistrationStatus {
    pub fn needs_update(&self) -> bool {
        !matches!(self, RegistrationStatus::Current(_))
    }
}

/// What [`verify_and_update`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    AlreadyCorrect,
    Updated,
    Declined,
}

/// Compare the stored command with `entries.command` by exact string equality
pub fn check_registration(
    registry: &dyn ProtocolRegistry,
    entries: &RegistrationEntries,
) -> Result<RegistrationStatus> {
    let Some(current) = registry.read_command(&entries.scheme)? else {
        debug!("No registration for {}", entries.scheme);
        return Ok(RegistrationStatus::Missing);
    };

    if current == entries.command {
        Ok(RegistrationStatus::Current(current))
    } else {
        Ok(RegistrationStatus::Outdated { current })
    }
}

/// Check the registration and rewrite it if it differs and `confirm` agrees.
///
/// `confirm` is only consulted when an update is needed.
pub fn verify_and_update<F>(
    registry: &dyn ProtocolRegistry,
    entries: &RegistrationEntries,
    confirm: F,
) -> Result<RegistrationOutcome>
where
    F: FnOnce(&RegistrationStatus) -> bool,
{
    let status = check_registration(registry, entries)?;
    if !status.needs_update() {
        return Ok(RegistrationOutcome::AlreadyCorrect);
    }

    if !confirm(&status) {
        info!("Registration update for {} declined", entries.scheme);
        return Ok(RegistrationOutcome::Declined);
    }

    registry.write_registration(entries)?;
    info!("Registered {} -> {}", entries.scheme, entries.command);
    Ok(RegistrationOutcome::Updated)
}
