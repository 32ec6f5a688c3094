//! PATH-based discovery

use super::{DiscoverySource, ExecutableCandidate, SourceKind};
use crate::utils::existing_file;
use std::ffi::OsString;
use tracing::debug;

/// Resolves the executable name against the search path.
pub struct PathLookupSource {
    executable_name: String,
    search_path: Option<OsString>,
}

impl PathLookupSource {
    pub fn new(executable_name: impl Into<String>, search_path: Option<OsString>) -> Self {
        Self {
            executable_name: executable_name.into(),
            search_path,
        }
    }
}

impl DiscoverySource for PathLookupSource {
    fn kind(&self) -> SourceKind {
        SourceKind::PathLookup
    }

    fn discover(&self) -> Option<ExecutableCandidate> {
        let search_path = self.search_path.as_ref()?;
        let cwd = std::env::current_dir().ok()?;

        let resolved = match which::which_in(&self.executable_name, Some(search_path), cwd) {
            Ok(path) => path,
            Err(e) => {
                debug!("PATH lookup for {} failed: {}", self.executable_name, e);
                return None;
            }
        };

        // which may hand back a stale entry; only accept what is really there
        existing_file(&resolved).map(|path| ExecutableCandidate::new(path, SourceKind::PathLookup))
    }
}
