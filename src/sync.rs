// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Run terraform-docs per target directory, stage results, count changes, and apply the final commit/push/fail-on-diff decision
// role: processing/orchestrator
// inputs: EffectiveConfig, BasePlan, resolved target directories
// outputs: Staged files, change count, optional commit and push
// side_effects: Spawns terraform-docs with inherited stdio; mutates the git index; may create a commit and push it
// invariants:
// - per-directory argv is a fresh clone of the shared prefix, never an in-place mutation
// - a failing generator aborts the run before any later directory is touched and before any commit
// - the change count is computed after the loop, independent of the final decision taken
// errors: GeneratorFailed carries the generator's exit code; DiffDetected reports staged-but-uncommitted docs
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

use crate::args::BasePlan;
use crate::cli::{EffectiveConfig, OutputMethod};
use crate::error::SyncError;
use crate::gitio;

/// Process every target in order, then report the staged change count.
pub fn sync_all(cfg: &EffectiveConfig, base: &BasePlan, targets: &[String]) -> Result<usize> {
  for dir in targets {
    update_doc(cfg, base, dir)?;
  }

  let num_changed = gitio::staged_change_count(&cfg.root)?;
  log::info!("{num_changed} documentation file(s) changed");
  Ok(num_changed)
}

fn update_doc(cfg: &EffectiveConfig, base: &BasePlan, dir: &str) -> Result<()> {
  let argv = dir_args(cfg, base, dir);
  log::info!("generating docs for `{dir}`");
  log::debug!("terraform-docs {:?}", argv);

  // Inherited stdio: the generator's own output belongs in the run log.
  let status = Command::new("terraform-docs")
    .args(&argv)
    .current_dir(&cfg.root)
    .status()
    .context("spawning terraform-docs (is it installed and on PATH?)")?;

  if !status.success() {
    return Err(
      SyncError::GeneratorFailed {
        dir: dir.to_string(),
        code: status.code().unwrap_or(1),
      }
      .into(),
    );
  }

  if matches!(cfg.output_method, OutputMethod::Inject | OutputMethod::Replace) {
    gitio::stage(&cfg.root, &format!("{}/{}", dir, cfg.output_file))?;
  }

  Ok(())
}

/// Per-directory argument list: the shared prefix plus directory-specific
/// flags, with the target directory as the final positional.
fn dir_args(cfg: &EffectiveConfig, base: &BasePlan, dir: &str) -> Vec<String> {
  let mut argv = base.args.clone();

  if cfg.config_file != "disabled" {
    let at_root = Path::new(&cfg.root).join(&cfg.config_file);
    let config_path = if at_root.is_file() {
      at_root.to_string_lossy().to_string()
    } else {
      format!("{}/{}", dir, cfg.config_file)
    };
    argv.push("--config".to_string());
    argv.push(config_path);
  }

  match cfg.output_method {
    OutputMethod::Inject | OutputMethod::Replace => {
      argv.push("--output-mode".to_string());
      argv.push(cfg.output_method.as_str().to_string());
      argv.push("--output-file".to_string());
      argv.push(cfg.output_file.clone());
    }
    OutputMethod::None => {}
  }

  if let Some(template) = &base.template {
    argv.push("--output-template".to_string());
    argv.push(template.clone());
  }

  if cfg.recursive && !cfg.recursive_path.is_empty() {
    argv.push("--recursive".to_string());
    argv.push("--recursive-path".to_string());
    argv.push(cfg.recursive_path.clone());
  }

  argv.push(dir.to_string());
  argv
}

/// The mutually exclusive end states: push, fail on diff, or plain success.
pub fn finish(cfg: &EffectiveConfig, num_changed: usize) -> Result<()> {
  if cfg.git_push {
    if num_changed == 0 {
      log::info!("no documentation changes; nothing to commit");
      return Ok(());
    }
    gitio::commit(&cfg.root, &cfg.git_commit_message, cfg.git_push_sign_off)?;
    gitio::push(&cfg.root)?;
    log::info!("pushed {num_changed} documentation change(s)");
    return Ok(());
  }

  if cfg.fail_on_diff && num_changed > 0 {
    return Err(SyncError::DiffDetected { count: num_changed }.into());
  }

  Ok(())
}
