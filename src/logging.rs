//! Log setup. The TUI owns the terminal, so `env_logger` is piped into a file
//! in the state directory instead of stderr.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use chrono::Local;
use env_logger::{Builder, Env, Target, WriteStyle};

pub const LEVEL_ENV: &str = "BRAINSCREEN_LOG";

/// Opens the log file for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log dir {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}

fn builder(env: Env, file: File) -> Builder {
    let mut builder = Builder::from_env(env);
    builder
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        });
    builder
}

/// Installs the global logger writing to `path`. The level comes from
/// `BRAINSCREEN_LOG` (env_logger filter syntax), `info` when unset.
pub fn init(path: &Path) -> anyhow::Result<()> {
    let file = open_log_file(path)?;
    builder(Env::new().filter_or(LEVEL_ENV, "info"), file)
        .try_init()
        .context("installing logger")
}
