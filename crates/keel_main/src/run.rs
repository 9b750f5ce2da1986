use std::io::Write;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use chrono::DateTime;
use colored::Colorize;
use keel_api::{Filesystem, FILE_SIZE_UNKNOWN};

use crate::cli::Command;

fn stat(fs: &Filesystem, path: &Path, out: &mut impl Write) -> Result<()> {
    if !fs.exists(path) {
        bail!("No such file or directory: {}", path.display());
    }

    let kind = if fs.is_directory(path) {
        "directory"
    } else if fs.is_regular_file(path) {
        "file"
    } else {
        "other"
    };
    writeln!(out, "path:     {}", path.display())?;
    writeln!(out, "kind:     {kind}")?;

    let size = fs.file_size(path);
    if size != FILE_SIZE_UNKNOWN {
        writeln!(out, "size:     {size}")?;
    }

    let modified = fs.last_write_time(path);
    if let Some(time) = DateTime::from_timestamp(modified, 0).filter(|_| modified != 0) {
        writeln!(out, "modified: {}", time.to_rfc3339())?;
    }
    Ok(())
}

fn list(fs: &Filesystem, path: &Path, out: &mut impl Write) -> Result<()> {
    let mut it = fs.read_dir(path);
    while let Some(name) = it.name() {
        if it.is_directory() {
            writeln!(out, "{}", format!("{name}/").blue().bold())?;
        } else {
            writeln!(out, "{name}")?;
        }
        it.advance();
    }
    Ok(())
}

/// Executes one command, writing its output to `out`. A failed filesystem
/// operation becomes an error naming the paths involved.
pub fn run(fs: &Filesystem, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Exists { path } => writeln!(out, "{}", fs.exists(&path))?,
        Command::Stat { path } => stat(fs, &path, out)?,
        Command::Ls { path } => list(fs, path.as_deref().unwrap_or(Path::new("")), out)?,
        Command::Cat { path } => {
            let contents = fs
                .read_file(&path)
                .with_context(|| format!("Failed to read file {}", path.display()))?;
            out.write_all(&contents)?;
        }
        Command::Cp { from, to, overwrite } => ensure!(
            fs.copy_file_with(&from, &to, overwrite),
            "Failed to copy {} to {}",
            from.display(),
            to.display()
        ),
        Command::Mv { from, to } => ensure!(
            fs.rename(&from, &to),
            "Failed to move {} to {}",
            from.display(),
            to.display()
        ),
        Command::Rm { path, recursive } => {
            let removed = if recursive {
                fs.remove_all(&path)
            } else {
                fs.remove(&path)
            };
            ensure!(removed, "Failed to remove {}", path.display());
        }
        Command::Mkdir { path, parents } => {
            let created = if parents {
                fs.create_directories(&path)
            } else {
                fs.create_directory(&path)
            };
            ensure!(created, "Failed to create dir {}", path.display());
        }
    }
    Ok(())
}
