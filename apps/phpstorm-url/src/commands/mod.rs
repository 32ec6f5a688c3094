//! Command handlers for the CLI actions
//!
//! Each handler returns a `Result`; the entrypoint turns errors into
//! printed diagnostics.

pub mod generate;
pub mod open;
pub mod registry;

use crate::error::Result;
use crate::locator::{ExecutableCandidate, ExecutableLocator};
use crate::settings::{HandlerSettings, HostEnvironment};

/// Settings and environment snapshot shared by every command in one run
#[derive(Debug, Clone)]
pub struct HandlerContext {
    pub settings: HandlerSettings,
    pub env: HostEnvironment,
}

impl HandlerContext {
    pub fn new(settings: HandlerSettings, env: HostEnvironment) -> Self {
        Self { settings, env }
    }

    /// Context backed by the real process environment
    pub fn from_process(settings: HandlerSettings) -> Self {
        let env = HostEnvironment::from_process(&settings);
        Self::new(settings, env)
    }

    pub fn locator(&self) -> ExecutableLocator {
        ExecutableLocator::standard(&self.settings, &self.env)
    }
}

/// Find the IDE executable
pub fn locate_executable(ctx: &HandlerContext) -> Result<ExecutableCandidate> {
    ctx.locator().locate()
}
