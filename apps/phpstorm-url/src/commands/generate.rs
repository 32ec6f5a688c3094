//! Generate `.reg` installer artifacts

use super::HandlerContext;
use crate::error::Result;
use crate::installer::{write_reg_file, GeneratedRegFile, RegFileKind};
use crate::registration::RegistrationEntries;
use std::path::{Path, PathBuf};

/// Write the requested artifacts into `out_dir`.
///
/// `handler` is this tool's own executable, used by [`RegFileKind::Handler`].
/// The IDE is only located when a [`RegFileKind::Direct`] file is requested.
pub fn generate_reg_files(
    ctx: &HandlerContext,
    kinds: &[RegFileKind],
    handler: &Path,
    out_dir: &Path,
) -> Result<Vec<GeneratedRegFile>> {
    let mut editor: Option<PathBuf> = None;
    let mut generated = Vec::with_capacity(kinds.len());

    for &kind in kinds {
        let target = match kind {
            RegFileKind::Direct => match &editor {
                Some(path) => path.clone(),
                None => {
                    let path = ctx.locator().locate()?.path;
                    editor = Some(path.clone());
                    path
                }
            },
            RegFileKind::Handler => handler.to_path_buf(),
        };

        let entries = RegistrationEntries::for_executable(&ctx.settings, &target);
        generated.push(write_reg_file(kind, &entries, out_dir)?);
    }

    Ok(generated)
}
