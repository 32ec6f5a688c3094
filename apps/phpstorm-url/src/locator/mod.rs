//! Executable discovery.
//!
//! The locator tries a fixed list of discovery sources in priority order
//! and returns the first executable that exists on disk:
//!
//! 1. PATH lookup
//! 2. Known install directories under the program-files roots
//! 3. Per-user installs (JetBrains Toolbox and flat per-user installs)
//! 4. The override environment variable
//!
//! Sources never fail. Any OS-level error inside a source means "no match"
//! and the locator moves on to the next one.

use crate::error::{HandlerError, Result};
use crate::settings::{HandlerSettings, HostEnvironment};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

pub mod env_override;
pub mod install_dirs;
pub mod path_lookup;
pub mod user_install;

pub use env_override::EnvOverrideSource;
pub use install_dirs::InstallDirSource;
pub use path_lookup::PathLookupSource;
pub use user_install::UserInstallSource;

/// Where a candidate executable was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Resolved through the executable search path
    PathLookup,
    /// Versioned directory under a program-files root
    InstallDirectory,
    /// Toolbox or flat per-user install under local app data
    UserInstall,
    /// Explicit path from the override environment variable
    EnvironmentOverride,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::PathLookup => "PATH",
            SourceKind::InstallDirectory => "Program Files",
            SourceKind::UserInstall => "AppData",
            SourceKind::EnvironmentOverride => "environment override",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A discovered executable and the source that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableCandidate {
    pub path: PathBuf,
    pub source: SourceKind,
    /// Ranks matches from the same source; newer wins
    pub recency: Option<SystemTime>,
}

impl ExecutableCandidate {
    pub fn new(path: impl Into<PathBuf>, source: SourceKind) -> Self {
        Self {
            path: path.into(),
            source,
            recency: None,
        }
    }

    pub fn with_recency(mut self, recency: Option<SystemTime>) -> Self {
        self.recency = recency;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Pick the most recent candidate.
///
/// Candidates without a timestamp rank below any timestamped one; equal
/// timestamps fall back to the lexically greatest path so the choice does
/// not depend on directory iteration order.
pub fn pick_most_recent(
    candidates: impl IntoIterator<Item = ExecutableCandidate>,
) -> Option<ExecutableCandidate> {
    candidates
        .into_iter()
        .max_by(|a, b| (a.recency, &a.path).cmp(&(b.recency, &b.path)))
}

/// One independent strategy for finding the executable.
pub trait DiscoverySource {
    /// Which source this is, for logging and the returned candidate.
    fn kind(&self) -> SourceKind;

    /// Look for the executable. `None` covers both "not installed this way"
    /// and any OS error encountered while looking.
    fn discover(&self) -> Option<ExecutableCandidate>;
}

/// Ordered list of discovery sources with first-match-wins semantics.
pub struct ExecutableLocator {
    executable_name: String,
    sources: Vec<Box<dyn DiscoverySource>>,
}

impl ExecutableLocator {
    /// The four standard sources in priority order.
    pub fn standard(settings: &HandlerSettings, env: &HostEnvironment) -> Self {
        let sources: Vec<Box<dyn DiscoverySource>> = vec![
            Box::new(PathLookupSource::new(
                &settings.executable_name,
                env.search_path.clone(),
            )),
            Box::new(InstallDirSource::new(settings, env)),
            Box::new(UserInstallSource::new(settings, env)),
            Box::new(EnvOverrideSource::new(env.executable_override.clone())),
        ];

        Self::with_sources(&settings.executable_name, sources)
    }

    /// Build a locator over arbitrary sources, tried in the given order.
    pub fn with_sources(
        executable_name: impl Into<String>,
        sources: Vec<Box<dyn DiscoverySource>>,
    ) -> Self {
        Self {
            executable_name: executable_name.into(),
            sources,
        }
    }

    /// Return the first candidate found, trying sources in order.
    pub fn locate(&self) -> Result<ExecutableCandidate> {
        self.sources
            .iter()
            .find_map(|source| {
                let found = source.discover();
                match &found {
                    Some(candidate) => info!(
                        "Found {} via {}: {}",
                        self.executable_name,
                        candidate.source,
                        candidate.path.display()
                    ),
                    None => debug!("No {} via {}", self.executable_name, source.kind()),
                }
                found
            })
            .ok_or_else(|| HandlerError::not_found(&self.executable_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    /// Fake source that counts how often it was consulted
    struct FakeSource {
        kind: SourceKind,
        result: Option<PathBuf>,
        calls: Rc<Cell<usize>>,
    }

    impl FakeSource {
        fn boxed(
            kind: SourceKind,
            result: Option<&str>,
        ) -> (Box<dyn DiscoverySource>, Rc<Cell<usize>>) {
            let calls = Rc::new(Cell::new(0));
            let source = FakeSource {
                kind,
                result: result.map(PathBuf::from),
                calls: calls.clone(),
            };
            (Box::new(source), calls)
        }
    }

    impl DiscoverySource for FakeSource {
        fn kind(&self) -> SourceKind {
            self.kind
        }

        fn discover(&self) -> Option<ExecutableCandidate> {
            self.calls.set(self.calls.get() + 1);
            self.result
                .as_ref()
                .map(|p| ExecutableCandidate::new(p.clone(), self.kind))
        }
    }

    #[test]
    fn test_path_hit_skips_lower_priority_sources() {
        let (path, path_calls) =
            FakeSource::boxed(SourceKind::PathLookup, Some("/usr/bin/phpstorm"));
        let (install, install_calls) =
            FakeSource::boxed(SourceKind::InstallDirectory, Some("/opt/PhpStorm/bin/phpstorm"));
        let (user, user_calls) = FakeSource::boxed(SourceKind::UserInstall, None);
        let (env, env_calls) = FakeSource::boxed(SourceKind::EnvironmentOverride, None);

        let locator = ExecutableLocator::with_sources("phpstorm", vec![path, install, user, env]);
        let found = locator.locate().unwrap();

        assert_eq!(found.source, SourceKind::PathLookup);
        assert_eq!(found.path, PathBuf::from("/usr/bin/phpstorm"));
        assert_eq!(path_calls.get(), 1);
        assert_eq!(install_calls.get(), 0);
        assert_eq!(user_calls.get(), 0);
        assert_eq!(env_calls.get(), 0);
    }

    #[test]
    fn test_falls_through_to_first_hit() {
        let (path, _) = FakeSource::boxed(SourceKind::PathLookup, None);
        let (install, _) = FakeSource::boxed(SourceKind::InstallDirectory, None);
        let (user, user_calls) = FakeSource::boxed(SourceKind::UserInstall, Some("/home/u/ps"));
        let (env, env_calls) = FakeSource::boxed(SourceKind::EnvironmentOverride, Some("/x/ps"));

        let locator = ExecutableLocator::with_sources("phpstorm", vec![path, install, user, env]);
        let found = locator.locate().unwrap();

        assert_eq!(found.source, SourceKind::UserInstall);
        assert_eq!(user_calls.get(), 1);
        assert_eq!(env_calls.get(), 0);
    }

    #[test]
    fn test_not_found_after_all_sources() {
        let (path, path_calls) = FakeSource::boxed(SourceKind::PathLookup, None);
        let (env, env_calls) = FakeSource::boxed(SourceKind::EnvironmentOverride, None);

        let locator = ExecutableLocator::with_sources("phpstorm64.exe", vec![path, env]);
        let err = locator.locate().unwrap_err();

        assert!(matches!(
            err,
            HandlerError::ExecutableNotFound { ref name } if name == "phpstorm64.exe"
        ));
        assert_eq!(path_calls.get(), 1);
        assert_eq!(env_calls.get(), 1);
    }

    #[test]
    fn test_pick_most_recent_selects_latest_timestamp() {
        let base = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let candidates = vec![
            ExecutableCandidate::new("/a/233.1/bin/phpstorm64.exe", SourceKind::UserInstall)
                .with_recency(Some(base)),
            ExecutableCandidate::new("/a/242.2/bin/phpstorm64.exe", SourceKind::UserInstall)
                .with_recency(Some(base + Duration::from_secs(3600))),
            ExecutableCandidate::new("/a/241.1/bin/phpstorm64.exe", SourceKind::UserInstall)
                .with_recency(Some(base + Duration::from_secs(60))),
        ];

        let picked = pick_most_recent(candidates).unwrap();
        assert_eq!(picked.path, PathBuf::from("/a/242.2/bin/phpstorm64.exe"));
    }

    #[test]
    fn test_pick_most_recent_untimed_ranks_last() {
        let candidates = vec![
            ExecutableCandidate::new("/z/untimed", SourceKind::UserInstall),
            ExecutableCandidate::new("/a/timed", SourceKind::UserInstall)
                .with_recency(Some(SystemTime::UNIX_EPOCH)),
        ];

        assert_eq!(pick_most_recent(candidates).unwrap().path, PathBuf::from("/a/timed"));
    }

    #[test]
    fn test_pick_most_recent_tie_prefers_greatest_path() {
        let t = Some(SystemTime::UNIX_EPOCH);
        let candidates = vec![
            ExecutableCandidate::new("/b", SourceKind::UserInstall).with_recency(t),
            ExecutableCandidate::new("/c", SourceKind::UserInstall).with_recency(t),
            ExecutableCandidate::new("/a", SourceKind::UserInstall).with_recency(t),
        ];

        assert_eq!(pick_most_recent(candidates).unwrap().path, PathBuf::from("/c"));
    }

    #[test]
    fn test_pick_most_recent_empty() {
        assert!(pick_most_recent(Vec::new()).is_none());
    }

    #[test]
    fn test_standard_locator_env_override_last_resort() {
        let dir = tempfile::TempDir::new().unwrap();
        let exe = dir.path().join("phpstorm64.exe");
        std::fs::write(&exe, b"").unwrap();

        let settings = HandlerSettings::default();
        let env = HostEnvironment {
            program_files: dir.path().join("pf"),
            program_files_x86: dir.path().join("pf86"),
            local_app_data: Some(dir.path().join("appdata")),
            search_path: Some(dir.path().join("empty-bin").into_os_string()),
            executable_override: Some(exe.clone()),
        };

        let found = ExecutableLocator::standard(&settings, &env).locate().unwrap();
        assert_eq!(found.source, SourceKind::EnvironmentOverride);
        assert_eq!(found.path, exe);
    }
}
