//! URL to editor pipeline
//!
//! - `request`: parse a `phpstorm://` URL into an [`OpenRequest`]
//! - `command`: turn executable + request into a [`LaunchCommand`]
//! - `launcher`: spawn the command

pub mod command;
pub mod launcher;
pub mod request;

pub use command::LaunchCommand;
pub use launcher::{Launcher, ProcessLauncher};
pub use request::{parse_open_url, OpenOption, OpenRequest};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::{DiscoverySource, ExecutableCandidate, ExecutableLocator, SourceKind};

    struct FixedSource(&'static str);

    impl DiscoverySource for FixedSource {
        fn kind(&self) -> SourceKind {
            SourceKind::PathLookup
        }

        fn discover(&self) -> Option<ExecutableCandidate> {
            Some(ExecutableCandidate::new(self.0, SourceKind::PathLookup))
        }
    }

    #[test]
    fn test_url_to_launch_tokens() {
        let locator =
            ExecutableLocator::with_sources("app", vec![Box::new(FixedSource("/opt/app/bin/app"))]);
        let exe = locator.locate().unwrap();
        let url = "phpstorm://open?file=%2Fhome%2Fuser%2Fa.txt&line=10&column=5";
        let request = parse_open_url(url, "phpstorm").unwrap();

        let command = LaunchCommand::build(exe.path(), &request);
        assert_eq!(
            command.tokens(),
            &["/opt/app/bin/app", "--line", "10", "--column", "5", "/home/user/a.txt"]
        );
    }
}
