//! Open a `phpstorm://` URL in the IDE

use super::HandlerContext;
use crate::error::Result;
use crate::open::{parse_open_url, LaunchCommand, Launcher};
use tracing::{info, warn};

/// Locate the IDE, parse `url`, and launch the resulting command.
///
/// A target file that does not exist is only logged; the IDE decides what
/// to do with it.
pub fn open_url(ctx: &HandlerContext, url: &str, launcher: &dyn Launcher) -> Result<LaunchCommand> {
    let executable = ctx.locator().locate()?;
    let request = parse_open_url(url, &ctx.settings.scheme)?;
    let command = LaunchCommand::build(executable.path(), &request);

    if !request.file.exists() {
        warn!("Target file does not exist: {}", request.file.display());
    }

    let pid = launcher.launch(&command)?;
    info!("Opened {} (pid {})", request.url, pid);
    Ok(command)
}
