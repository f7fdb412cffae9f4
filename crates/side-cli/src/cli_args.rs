use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "side-runner")]
#[command(about = "Run a recorded script against the built-in command set")]
pub(crate) struct Cli {
    /// Script file, one command per line: name|arg|arg
    pub(crate) script: PathBuf,
    /// Inter-command delay in milliseconds
    #[arg(long = "speed-ms", default_value_t = 0)]
    pub(crate) speed_ms: u64,
    /// Seed variable, repeatable: --set name=value
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub(crate) set: Vec<String>,
    /// Effective base URL recorded on the test case
    #[arg(long = "base-url", default_value = "")]
    pub(crate) base_url: String,
    /// Print per-command records as JSON instead of the plain log
    #[arg(long = "log-json")]
    pub(crate) log_json: bool,
}
