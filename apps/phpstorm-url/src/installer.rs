//! `.reg` installer artifacts
//!
//! Renders the scheme registration in the Registry Editor export format so it
//! can be imported by double-clicking, without running this tool elevated.

use crate::error::Result;
use crate::registration::{RegistrationEntries, URL_PROTOCOL_VALUE};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const REG_HEADER: &str = "Windows Registry Editor Version 5.00";
const REG_ROOT: &str = "HKEY_CLASSES_ROOT";

/// Which command the generated registration points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegFileKind {
    /// The discovered IDE executable, given the URL as `%1`
    Direct,
    /// This tool, which parses the URL before launching the IDE
    Handler,
}

impl RegFileKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            RegFileKind::Direct => "setupReg-auto.reg",
            RegFileKind::Handler => "setupReg-handler.reg",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RegFileKind::Direct => "direct to PhpStorm",
            RegFileKind::Handler => "via URL handler",
        }
    }
}

/// Escape a value for a `.reg` string literal
pub fn escape_reg_string(value: &str) -> String {
    value.replace('\\', r"\\").replace('"', "\\\"")
}

/// Render the four registration keys in `.reg` format
pub fn render_reg_file(entries: &RegistrationEntries) -> String {
    let [root, shell, open, command] = entries.key_paths();

    format!(
        "{REG_HEADER}\r\n\
         \r\n\
         [{REG_ROOT}\\{root}]\r\n\
         @=\"{name}\"\r\n\
         \"{URL_PROTOCOL_VALUE}\"=\"\"\r\n\
         \r\n\
         [{REG_ROOT}\\{shell}]\r\n\
         \r\n\
         [{REG_ROOT}\\{open}]\r\n\
         \r\n\
         [{REG_ROOT}\\{command}]\r\n\
         @=\"{value}\"\r\n",
        name = escape_reg_string(&entries.protocol_name),
        value = escape_reg_string(&entries.command),
    )
}

/// A rendered artifact written to disk
#[derive(Debug, Clone)]
pub struct GeneratedRegFile {
    pub kind: RegFileKind,
    pub path: PathBuf,
    pub content: String,
}

/// Render and write one artifact into `out_dir`
pub fn write_reg_file(
    kind: RegFileKind,
    entries: &RegistrationEntries,
    out_dir: &Path,
) -> Result<GeneratedRegFile> {
    fs::create_dir_all(out_dir)?;

    let path = out_dir.join(kind.file_name());
    let content = render_reg_file(entries);
    fs::write(&path, &content)?;
    info!("Wrote {:?}", path);

    Ok(GeneratedRegFile {
        kind,
        path,
        content,
    })
}
