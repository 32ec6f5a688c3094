//! Per-user install discovery
//!
//! Covers two layouts under local app data:
//! - JetBrains Toolbox: `JetBrains/Toolbox/apps/<product>/<channel>/<build>/bin/<exe>`
//! - Flat per-user installs: `Programs/<prefix>*/bin/<exe>`
//!
//! Matches from both layouts are pooled and the most recently created wins.

use super::{pick_most_recent, DiscoverySource, ExecutableCandidate, SourceKind};
use crate::settings::{HandlerSettings, HostEnvironment};
use crate::utils::file_recency;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct UserInstallSource {
    local_app_data: Option<PathBuf>,
    toolbox_product: String,
    toolbox_channel: String,
    install_prefix: String,
    executable_name: String,
}

impl UserInstallSource {
    pub fn new(settings: &HandlerSettings, env: &HostEnvironment) -> Self {
        Self {
            local_app_data: env.local_app_data.clone(),
            toolbox_product: settings.toolbox_product.clone(),
            toolbox_channel: settings.toolbox_channel.clone(),
            install_prefix: settings.install_prefix.clone(),
            executable_name: settings.executable_name.clone(),
        }
    }

    /// Glob patterns for both layouts, rooted at `base`
    fn patterns(&self, base: &Path) -> [String; 2] {
        let base = glob::Pattern::escape(&base.to_string_lossy());
        let exe = glob::Pattern::escape(&self.executable_name);
        let sep = std::path::MAIN_SEPARATOR;

        [
            format!(
                "{base}{sep}JetBrains{sep}Toolbox{sep}apps{sep}{product}{sep}{channel}{sep}*{sep}bin{sep}{exe}",
                product = glob::Pattern::escape(&self.toolbox_product),
                channel = glob::Pattern::escape(&self.toolbox_channel),
            ),
            format!(
                "{base}{sep}Programs{sep}{prefix}*{sep}bin{sep}{exe}",
                prefix = glob::Pattern::escape(&self.install_prefix),
            ),
        ]
    }

    /// Every existing match across both layouts
    fn matches(&self, base: &Path) -> Vec<ExecutableCandidate> {
        let mut found = Vec::new();

        for pattern in self.patterns(base) {
            let paths = match glob::glob(&pattern) {
                Ok(paths) => paths,
                Err(e) => {
                    debug!("Invalid glob pattern {}: {}", pattern, e);
                    continue;
                }
            };

            // Unreadable entries are skipped rather than aborting the scan
            for path in paths.flatten().filter(|p| p.is_file()) {
                let recency = file_recency(&path);
                found.push(
                    ExecutableCandidate::new(path, SourceKind::UserInstall).with_recency(recency),
                );
            }
        }

        found
    }
}

impl DiscoverySource for UserInstallSource {
    fn kind(&self) -> SourceKind {
        SourceKind::UserInstall
    }

    fn discover(&self) -> Option<ExecutableCandidate> {
        let base = self.local_app_data.as_deref()?;
        pick_most_recent(self.matches(base))
    }
}
