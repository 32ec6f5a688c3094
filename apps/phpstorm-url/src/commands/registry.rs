//! Check the scheme registration and update it on confirmation

use super::HandlerContext;
use crate::error::Result;
use crate::registration::{
    verify_and_update, ProtocolRegistry, RegistrationEntries, RegistrationOutcome,
    RegistrationStatus,
};

/// Result of a registry check
#[derive(Debug, Clone)]
pub struct RegistryReport {
    pub entries: RegistrationEntries,
    pub outcome: RegistrationOutcome,
}

/// Compare the registered command with the one for the current executable.
///
/// `confirm` sees the expected entries and the current status and is only
/// called when the registration is missing or outdated.
pub fn check_registry<F>(
    ctx: &HandlerContext,
    registry: &dyn ProtocolRegistry,
    confirm: F,
) -> Result<RegistryReport>
where
    F: FnOnce(&RegistrationEntries, &RegistrationStatus) -> bool,
{
    let executable = ctx.locator().locate()?;
    let entries = RegistrationEntries::for_executable(&ctx.settings, executable.path());

    let outcome = verify_and_update(registry, &entries, |status| confirm(&entries, status))?;
    Ok(RegistryReport { entries, outcome })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context_with_executable, empty_context};
    use crate::error::HandlerError;
    use crate::registration::expected_command;
    use crate::registration::memory::MemoryRegistry;
    use tempfile::TempDir;

    #[test]
    fn test_already_correct() {
        let dir = TempDir::new().unwrap();
        let (ctx, exe) = context_with_executable(dir.path());
        let registry = MemoryRegistry::with_command("phpstorm", &expected_command(&exe));

        let report = check_registry(&ctx, &registry, |_, _| panic!("should not prompt")).unwrap();
        assert_eq!(report.outcome, RegistrationOutcome::AlreadyCorrect);
        assert_eq!(registry.write_count(), 0);
    }

    #[test]
    fn test_outdated_updated_after_confirmation() {
        let dir = TempDir::new().unwrap();
        let (ctx, exe) = context_with_executable(dir.path());
        let registry =
            MemoryRegistry::with_command("phpstorm", r#""C:\gone\phpstorm64.exe" "%1""#);

        let report = check_registry(&ctx, &registry, |entries, status| {
            assert_eq!(entries.command, expected_command(&exe));
            assert_eq!(
                status,
                &RegistrationStatus::Outdated {
                    current: r#""C:\gone\phpstorm64.exe" "%1""#.to_string()
                }
            );
            true
        })
        .unwrap();

        assert_eq!(report.outcome, RegistrationOutcome::Updated);
        assert_eq!(
            registry.read_command("phpstorm").unwrap(),
            Some(expected_command(&exe))
        );
    }

    #[test]
    fn test_executable_not_found_skips_registry() {
        let dir = TempDir::new().unwrap();
        let ctx = empty_context(dir.path());
        let registry = MemoryRegistry::default();

        let err = check_registry(&ctx, &registry, |_, _| true).unwrap_err();
        assert!(matches!(err, HandlerError::ExecutableNotFound { .. }));
        assert_eq!(registry.write_count(), 0);
    }
}
