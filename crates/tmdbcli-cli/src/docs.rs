//! Man page generation for the `docs` subcommand.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Command;
use tracing::instrument;

/// Prefix of the directory created when no target is given.
const TEMP_DIR_PREFIX: &str = "tmdbcli";

/// Writes one man page per command into `dir` and reports where they went.
///
/// Without `dir` a new directory under the system temp dir is created and
/// kept after the process exits.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a page cannot be
/// written.
#[instrument(skip_all)]
pub fn run_docs<W: Write>(cmd: Command, dir: Option<&Path>, out: &mut W) -> Result<PathBuf> {
    let dir = match dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            dir.to_path_buf()
        }
        None => tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir()
            .context("failed to create documentation directory")?
            .keep(),
    };

    let pages = write_man_pages(cmd, &dir)?;
    tracing::debug!(count = pages.len(), dir = %dir.display(), "wrote man pages");

    writeln!(out, "Documentation successfully created in {}", dir.display())?;
    Ok(dir)
}

/// Renders `cmd` and every visible subcommand as `<dir>/<name>.1`.
///
/// Subcommand pages are named after their full path, e.g.
/// `tmdbcli-account-favorite-add.1`.
///
/// # Errors
///
/// Returns an error if a page cannot be written.
pub fn write_man_pages(cmd: Command, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut cmd = cmd.disable_help_subcommand(true);
    cmd.build();

    let mut written = Vec::new();
    write_tree(&cmd, dir, &mut written)?;
    Ok(written)
}

fn write_tree(cmd: &Command, dir: &Path, written: &mut Vec<PathBuf>) -> Result<()> {
    let name = cmd.get_display_name().unwrap_or_else(|| cmd.get_name());
    let path = dir.join(format!("{name}.1"));
    let mut file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    clap_mangen::Man::new(cmd.clone())
        .render(&mut file)
        .with_context(|| format!("failed to write {}", path.display()))?;
    written.push(path);

    for sub in cmd.get_subcommands().filter(|sub| !sub.is_hide_set()) {
        write_tree(sub, dir, written)?;
    }
    Ok(())
}
