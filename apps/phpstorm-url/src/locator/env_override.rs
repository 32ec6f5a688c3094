//! Explicit path from the override environment variable

use super::{DiscoverySource, ExecutableCandidate, SourceKind};
use crate::utils::existing_file;
use std::path::PathBuf;

pub struct EnvOverrideSource {
    path: Option<PathBuf>,
}

impl EnvOverrideSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl DiscoverySource for EnvOverrideSource {
    fn kind(&self) -> SourceKind {
        SourceKind::EnvironmentOverride
    }

    fn discover(&self) -> Option<ExecutableCandidate> {
        let path = existing_file(self.path.as_deref()?)?;
        Some(ExecutableCandidate::new(path, SourceKind::EnvironmentOverride))
    }
}
