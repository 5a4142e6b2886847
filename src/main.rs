use anyhow::Result;
use clap::Parser;

mod args;
mod cleanup;
mod cli;
mod error;
mod gha;
mod gitio;
mod prepare;
mod resolve;
mod sync;
mod util;

use crate::cli::{Cli, normalize};
use crate::error::SyncError;

fn main() {
  let cli = Cli::parse();

  if cli.gen_man {
    match util::render_man_page::<Cli>() {
      Ok(page) => {
        print!("{}", page);
        std::process::exit(0);
      }
      Err(err) => {
        eprintln!("{err:#}");
        std::process::exit(1);
      }
    }
  }

  gha::init_logging();

  let code = match run(cli) {
    Ok(()) => 0,
    Err(err) => report(&err),
  };

  // Normal-exit and error-exit cleanup; the interrupt path runs the same
  // actions from the signal handler.
  cleanup::run_all();
  std::process::exit(code);
}

fn run(cli: Cli) -> Result<()> {
  // Phase 1: normalize CLI/env inputs into one immutable config
  let cfg = normalize(cli)?;
  log::debug!("effective config: {}", serde_json::to_string(&cfg)?);

  cleanup::install_interrupt_handler()?;

  // Phase 2: shared generator arguments (fatal on unsupported format)
  let base = args::build_base(&cfg)?;

  // Phase 3: git identity, trust, tags
  prepare::prepare_repo(&cfg)?;

  // Phase 4: targets, per-directory sync, final decision
  let targets = resolve::resolve_targets(&cfg)?;
  let num_changed = sync::sync_all(&cfg, &base, &targets)?;
  gha::set_output("num_changed", num_changed)?;

  sync::finish(&cfg, num_changed)
}

fn report(err: &anyhow::Error) -> i32 {
  match err.downcast_ref::<SyncError>() {
    Some(known) => {
      log::error!("{known}");
      known.exit_code()
    }
    None => {
      log::error!("{err:#}");
      1
    }
  }
}
