//! In-process registry used by tests

use super::{command_key_path, ProtocolRegistry, RegistrationEntries, URL_PROTOCOL_VALUE};
use crate::error::{HandlerError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Keys map to their named values; `""` is the default value.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    keys: RefCell<HashMap<String, HashMap<String, String>>>,
    writes: Cell<usize>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryRegistry {
    pub fn with_command(scheme: &str, command: &str) -> Self {
        let registry = Self::default();
        registry
            .keys
            .borrow_mut()
            .entry(command_key_path(scheme))
            .or_default()
            .insert(String::new(), command.to_string());
        registry
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn has_key(&self, path: &str) -> bool {
        self.keys.borrow().contains_key(path)
    }

    pub fn value(&self, path: &str, name: &str) -> Option<String> {
        self.keys.borrow().get(path)?.get(name).cloned()
    }
}

impl ProtocolRegistry for MemoryRegistry {
    fn read_command(&self, scheme: &str) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(HandlerError::registration_read("access denied"));
        }

        Ok(self.value(&command_key_path(scheme), ""))
    }

    fn write_registration(&self, entries: &RegistrationEntries) -> Result<()> {
        if self.fail_writes {
            return Err(HandlerError::registration_write("access denied"));
        }

        let [root, shell, open, command] = entries.key_paths();
        let mut keys = self.keys.borrow_mut();

        let root_values = keys.entry(root).or_default();
        root_values.insert(String::new(), entries.protocol_name.clone());
        root_values.insert(URL_PROTOCOL_VALUE.to_string(), String::new());
        keys.entry(shell).or_default();
        keys.entry(open).or_default();
        keys.entry(command)
            .or_default()
            .insert(String::new(), entries.command.clone());

        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
