use anyhow::Result;

use crate::cleanup;
use crate::cli::EffectiveConfig;
use crate::gitio;

/// Put the repository in a state the sync loop can stage and commit from:
/// trusted directory, deterministic identity, tags available for the
/// generator's version interpolation.
pub fn prepare_repo(cfg: &EffectiveConfig) -> Result<()> {
  gitio::add_safe_directory(&cfg.root)?;

  ensure_identity(&cfg.root, "user.name", &cfg.git_push_user_name)?;
  ensure_identity(&cfg.root, "user.email", &cfg.git_push_user_email)?;

  if let Err(err) = gitio::fetch_tags_shallow(&cfg.root) {
    log::warn!("tag fetch failed (continuing): {err:#}");
  }

  Ok(())
}

/// Override one global identity attribute when it differs from the wanted
/// value, and register a restore action for every exit path. The original
/// value (or its absence) is captured before the override.
fn ensure_identity(root: &str, key: &str, wanted: &str) -> Result<()> {
  let original = gitio::config_get_global(root, key)?;
  if original.as_deref() == Some(wanted) {
    return Ok(());
  }

  gitio::config_set_global(root, key, wanted)?;
  log::debug!("global {key} set to `{wanted}`; original restored on exit");

  let root = root.to_string();
  let key = key.to_string();
  cleanup::register(move || {
    let restored = match &original {
      Some(value) => gitio::config_set_global(&root, &key, value),
      None => gitio::config_unset_global(&root, &key),
    };
    if let Err(err) = restored {
      log::warn!("failed to restore global {key}: {err:#}");
    }
  });

  Ok(())
}
