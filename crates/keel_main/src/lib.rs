mod cli;
mod log;
mod run;

pub use cli::{Cli, Command};
pub use log::{init_tracing, Guard, LOG_VAR};
pub use run::run;
