//! Handler Settings Module
//!
//! Loads handler settings from an optional JSONC file and snapshots the
//! environment variables the locator consumes.

use crate::error::{HandlerError, Result};
use serde::Deserialize;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

// =============================================================================
// Settings Types
// =============================================================================

/// Names and layout details for the target IDE and its URL scheme
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HandlerSettings {
    /// Custom URL scheme routed to this tool, without `://`
    pub scheme: String,
    /// Default value of the scheme's root registration key
    pub protocol_name: String,
    /// File name of the IDE launcher executable
    pub executable_name: String,
    /// Vendor directory under each program-files root
    pub vendor_directory: String,
    /// Prefix of versioned install directories (e.g. `PhpStorm 2024.2`)
    pub install_prefix: String,
    /// Product directory in the Toolbox `apps` tree
    pub toolbox_product: String,
    /// Toolbox release channel directory
    pub toolbox_channel: String,
    /// Environment variable holding an explicit executable path
    pub override_variable: String,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            scheme: "phpstorm".to_string(),
            protocol_name: "URL:PhpStorm Protocol".to_string(),
            executable_name: "phpstorm64.exe".to_string(),
            vendor_directory: "JetBrains".to_string(),
            install_prefix: "PhpStorm".to_string(),
            toolbox_product: "PhpStorm".to_string(),
            toolbox_channel: "ch-0".to_string(),
            override_variable: "PHPSTORM_PATH".to_string(),
        }
    }
}

// =============================================================================
// Settings File
// =============================================================================

const SETTINGS_FILENAME: &str = "settings.jsonc";

/// Get the path to the user settings file
pub fn default_settings_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "phpstorm-url")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILENAME))
}

/// Parse a JSONC string (JSON with comments) into settings
fn parse_jsonc(content: &str) -> Result<HandlerSettings> {
    let stripped = json_comments::StripComments::new(content.as_bytes());
    serde_json::from_reader(stripped)
        .map_err(|e| HandlerError::config(format!("Failed to parse settings: {}", e)))
}

impl HandlerSettings {
    /// Load settings from `path`, falling back to defaults when the file
    /// does not exist or is blank
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Settings file does not exist: {:?}", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| HandlerError::config(format!("Failed to read {:?}: {}", path, e)))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings = parse_jsonc(&content)?;
        debug!("Loaded settings from {:?}", path);
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from an explicit path, or the per-user default location
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => match default_settings_path() {
                Some(p) => Self::load(&p),
                None => Ok(Self::default()),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.scheme.is_empty() || self.scheme.contains(':') {
            return Err(HandlerError::config(format!(
                "Invalid scheme '{}'",
                self.scheme
            )));
        }
        if self.executable_name.is_empty() {
            return Err(HandlerError::config("executableName cannot be empty"));
        }
        Ok(())
    }
}

// =============================================================================
// Environment Snapshot
// =============================================================================

const DEFAULT_PROGRAM_FILES: &str = r"C:\Program Files";
const DEFAULT_PROGRAM_FILES_X86: &str = r"C:\Program Files (x86)";

/// The environment values consumed by executable discovery, read once per run
#[derive(Debug, Clone, Default)]
pub struct HostEnvironment {
    /// 64-bit program-files root
    pub program_files: PathBuf,
    /// 32-bit program-files root
    pub program_files_x86: PathBuf,
    /// Per-user local application data root
    pub local_app_data: Option<PathBuf>,
    /// Executable search path
    pub search_path: Option<OsString>,
    /// Value of the tool-specific override variable
    pub executable_override: Option<PathBuf>,
}

impl HostEnvironment {
    /// Snapshot the current process environment
    pub fn from_process(settings: &HandlerSettings) -> Self {
        Self {
            program_files: env::var_os("PROGRAMFILES")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROGRAM_FILES)),
            program_files_x86: env::var_os("PROGRAMFILES(X86)")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROGRAM_FILES_X86)),
            local_app_data: non_empty_var("LOCALAPPDATA").map(PathBuf::from),
            search_path: non_empty_var("PATH"),
            executable_override: non_empty_var(&settings.override_variable).map(PathBuf::from),
        }
    }

    /// Program-files roots in search order (64-bit first)
    pub fn program_files_roots(&self) -> [&Path; 2] {
        [&self.program_files, &self.program_files_x86]
    }
}

fn non_empty_var(name: &str) -> Option<OsString> {
    env::var_os(name).filter(|v| !v.is_empty())
}
