// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Resolve the list of target directories via atlantis file, recursive search, or an explicit list
// role: processing/resolver
// inputs: EffectiveConfig (atlantis_file, find_dir, working_dir, root)
// outputs: Ordered Vec of directory paths relative to the repository root
// side_effects: Reads the atlantis file; walks the find-dir tree
// invariants:
// - exactly one strategy runs per invocation; atlantis > find-dir > working-dir
// - atlantis entries keep file order and are not deduplicated
// - find-dir results are deduplicated in first-seen order
// errors: Unreadable atlantis file or broken walk entries are fatal
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use walkdir::WalkDir;

use crate::cli::EffectiveConfig;

#[derive(Debug, Deserialize)]
struct AtlantisFile {
  #[serde(default)]
  projects: Vec<AtlantisProject>,
}

#[derive(Debug, Deserialize)]
struct AtlantisProject {
  dir: String,
}

pub fn resolve_targets(cfg: &EffectiveConfig) -> Result<Vec<String>> {
  if !cfg.atlantis_file.is_empty() {
    let path = Path::new(&cfg.root).join(&cfg.atlantis_file);
    if path.is_file() {
      let targets = atlantis_dirs(&path)?;
      log::info!("resolved {} target(s) from {}", targets.len(), cfg.atlantis_file);
      return Ok(targets);
    }
  }

  if cfg.find_dir != "disabled" {
    let targets = find_tf_dirs(&cfg.root, &cfg.find_dir)?;
    log::info!("resolved {} target(s) under {}", targets.len(), cfg.find_dir);
    return Ok(targets);
  }

  let targets = split_working_dirs(&cfg.working_dir);
  log::info!("resolved {} target(s) from the working-dir list", targets.len());
  Ok(targets)
}

/// Every `projects[].dir`, in file order. Atlantis repeats a dir once per
/// workspace; each repeat gets its own generator run.
fn atlantis_dirs(path: &Path) -> Result<Vec<String>> {
  let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
  let parsed: AtlantisFile =
    serde_yaml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
  Ok(parsed.projects.into_iter().map(|p| p.dir).collect())
}

/// Directories under `find_dir` containing at least one `*.tf` file, walked
/// in file-name order for deterministic output.
fn find_tf_dirs(root: &str, find_dir: &str) -> Result<Vec<String>> {
  let base = Path::new(root).join(find_dir);
  let mut seen: HashSet<String> = HashSet::new();
  let mut dirs: Vec<String> = Vec::new();

  for entry in WalkDir::new(&base).follow_links(false).sort_by_file_name() {
    let entry = entry.with_context(|| format!("walking {}", base.display()))?;
    if !entry.file_type().is_file() {
      continue;
    }
    if entry.path().extension().and_then(|e| e.to_str()) != Some("tf") {
      continue;
    }
    let Some(parent) = entry.path().parent() else { continue };
    let rel = parent.strip_prefix(root).unwrap_or(parent);
    let mut dir = rel.to_string_lossy().to_string();
    if dir.is_empty() {
      dir = ".".to_string();
    }
    if seen.insert(dir.clone()) {
      dirs.push(dir);
    }
  }

  Ok(dirs)
}

fn split_working_dirs(working_dir: &str) -> Vec<String> {
  working_dir
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_string)
    .collect()
}
