use std::io::Write;

use anyhow::{Context, Result};
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Logger speaking the Actions runner's workflow-command syntax, so error
/// and debug lines get annotated and filtered by the platform. Workflow
/// commands are only parsed from stdout.
struct ActionsLogger;

impl Log for ActionsLogger {
  fn enabled(&self, _metadata: &Metadata) -> bool {
    true
  }

  fn log(&self, record: &Record) {
    match record.level() {
      Level::Error => println!("::error::{}", record.args()),
      Level::Warn => println!("::warning::{}", record.args()),
      Level::Info => println!("{}", record.args()),
      Level::Debug | Level::Trace => println!("::debug::{}", record.args()),
    }
  }

  fn flush(&self) {}
}

/// Workflow-command logging under the Actions runner, env_logger elsewhere.
/// The runner hides `::debug::` lines unless step debugging is on, so debug
/// is always emitted there.
pub fn init_logging() {
  if running_in_actions() {
    if log::set_boxed_logger(Box::new(ActionsLogger)).is_ok() {
      log::set_max_level(LevelFilter::Debug);
    }
  } else {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
  }
}

fn running_in_actions() -> bool {
  std::env::var("GITHUB_ACTIONS").map(|v| v == "true").unwrap_or(false)
}

/// Append a step output for downstream workflow steps. Logged instead when
/// no output file is available (local runs).
pub fn set_output(name: &str, value: impl std::fmt::Display) -> Result<()> {
  match std::env::var("GITHUB_OUTPUT") {
    Ok(path) if !path.is_empty() => {
      let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {path}"))?;
      writeln!(file, "{name}={value}").with_context(|| format!("writing {path}"))?;
    }
    _ => log::info!("{name}={value}"),
  }
  Ok(())
}
