use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version = env!("CARGO_PKG_VERSION"), about = "Inspect and change files through keel")]
pub struct Cli {
    /// Serve requests from an empty in-memory filesystem.
    ///
    /// Overrides KEEL_BACKEND. Useful for checking how a command behaves
    /// without touching the host.
    #[arg(long, global = true, default_value_t = false)]
    pub memory: bool,

    /// Enable verbose output mode.
    ///
    /// Logs the cause of every failed filesystem operation to stderr.
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print whether anything exists at a path
    Exists { path: PathBuf },

    /// Show the kind, size and modification time of a path
    Stat { path: PathBuf },

    /// List a directory, the current one by default
    Ls { path: Option<PathBuf> },

    /// Print the contents of a file
    Cat { path: PathBuf },

    /// Copy a regular file
    Cp {
        from: PathBuf,
        to: PathBuf,

        /// Replace the destination if it already exists
        #[arg(long, short = 'f')]
        overwrite: bool,
    },

    /// Move or rename a file or directory; never replaces the destination
    Mv { from: PathBuf, to: PathBuf },

    /// Remove a file or empty directory
    Rm {
        path: PathBuf,

        /// Remove a directory and everything below it
        #[arg(long, short = 'r')]
        recursive: bool,
    },

    /// Create a directory
    Mkdir {
        path: PathBuf,

        /// Create missing parent directories as well
        #[arg(long, short = 'p')]
        parents: bool,
    },
}
