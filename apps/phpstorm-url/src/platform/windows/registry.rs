//! HKEY_CLASSES_ROOT protocol registration

use crate::error::{HandlerError, Result};
use crate::registration::{
    command_key_path, ProtocolRegistry, RegistrationEntries, URL_PROTOCOL_VALUE,
};
use windows_registry::{Value, CLASSES_ROOT};

/// HRESULT_FROM_WIN32(ERROR_FILE_NOT_FOUND)
const HRESULT_FILE_NOT_FOUND: i32 = 0x8007_0002_u32 as i32;

/// Registry-backed protocol handler table
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsRegistry;

/// Error code and message of a failed registry call
type Failure = (i32, String);

/// A missing key or value means "not registered"; anything else is an error
fn read_result<T>(path: &str, result: std::result::Result<T, Failure>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err((code, _)) if code == HRESULT_FILE_NOT_FOUND => Ok(None),
        Err((_, message)) => Err(HandlerError::registration_read(format!(
            r"HKEY_CLASSES_ROOT\{}: {}",
            path, message
        ))),
    }
}

fn write_error(path: &str, message: String) -> HandlerError {
    HandlerError::registration_write(format!(r"HKEY_CLASSES_ROOT\{}: {}", path, message))
}

impl ProtocolRegistry for WindowsRegistry {
    fn read_command(&self, scheme: &str) -> Result<Option<String>> {
        let path = command_key_path(scheme);
        let opened = CLASSES_ROOT
            .open(&path)
            .map_err(|e| (e.code().0, e.message()));
        let Some(key) = read_result(&path, opened)? else {
            return Ok(None);
        };

        let value = key.get_string("").map_err(|e| (e.code().0, e.message()));
        read_result(&path, value)
    }

    fn write_registration(&self, entries: &RegistrationEntries) -> Result<()> {
        let [root, shell, open, command] = entries.key_paths();

        let scheme_key = CLASSES_ROOT
            .create(&root)
            .map_err(|e| write_error(&root, e.message()))?;
        scheme_key
            .set_value("", &Value::from(entries.protocol_name.as_str()))
            .and_then(|_| scheme_key.set_value(URL_PROTOCOL_VALUE, &Value::from("")))
            .map_err(|e| write_error(&root, e.message()))?;

        for path in [&shell, &open] {
            CLASSES_ROOT.create(path).map_err(|e| write_error(path, e.message()))?;
        }

        let command_key = CLASSES_ROOT
            .create(&command)
            .map_err(|e| write_error(&command, e.message()))?;
        command_key
            .set_value("", &Value::from(entries.command.as_str()))
            .map_err(|e| write_error(&command, e.message()))?;

        Ok(())
    }
}
