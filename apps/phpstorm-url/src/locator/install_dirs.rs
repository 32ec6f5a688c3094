//! Program-files install discovery
//!
//! Scans `<root>/<vendor>/<prefix>*` under both program-files roots. Matching
//! directories are tried newest-first by descending lexical name, which works
//! because install directories embed a year-based version
//! (`PhpStorm 2024.2` sorts after `PhpStorm 2023.3`).

use super::{DiscoverySource, ExecutableCandidate, SourceKind};
use crate::settings::{HandlerSettings, HostEnvironment};
use crate::utils::existing_file;
use std::fs;
use std::path::{Path, PathBuf};

pub struct InstallDirSource {
    roots: Vec<PathBuf>,
    vendor_directory: String,
    install_prefix: String,
    executable_name: String,
}

impl InstallDirSource {
    pub fn new(settings: &HandlerSettings, env: &HostEnvironment) -> Self {
        Self {
            roots: env
                .program_files_roots()
                .iter()
                .map(|root| root.to_path_buf())
                .collect(),
            vendor_directory: settings.vendor_directory.clone(),
            install_prefix: settings.install_prefix.clone(),
            executable_name: settings.executable_name.clone(),
        }
    }

    /// Install directories under one root, newest-first
    fn install_dirs(&self, root: &Path) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(root.join(&self.vendor_directory)) else {
            return Vec::new();
        };

        let mut dirs: Vec<PathBuf> = entries
            .flatten()
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.starts_with(&self.install_prefix))
            })
            .map(|entry| entry.path())
            .collect();

        dirs.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        dirs
    }
}

impl DiscoverySource for InstallDirSource {
    fn kind(&self) -> SourceKind {
        SourceKind::InstallDirectory
    }

    fn discover(&self) -> Option<ExecutableCandidate> {
        self.roots.iter().find_map(|root| {
            self.install_dirs(root).into_iter().find_map(|dir| {
                existing_file(&dir.join("bin").join(&self.executable_name))
                    .map(|path| ExecutableCandidate::new(path, SourceKind::InstallDirectory))
            })
        })
    }
}
