use std::process::Command;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Porcelain lines that count as a documentation change: added or modified
/// entries only. Deletions and renames are deliberately excluded, matching
/// the change-count semantics this tool has always had.
static CHANGED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([MA]\W).+").expect("static pattern"));

pub fn run_git(repo: &str, args: &[String]) -> Result<String> {
  let out = Command::new("git")
    .args(args)
    .current_dir(repo)
    .output()
    .with_context(|| format!("spawning git {:?}", args))?;

  if out.status.success() {
    Ok(String::from_utf8_lossy(&out.stdout).to_string())
  } else {
    let stderr = String::from_utf8_lossy(&out.stderr);
    anyhow::bail!("git {:?} failed: {}", args, stderr)
  }
}

/// Global config lookup. A missing key is `None` (git exits 1 for that);
/// anything else non-zero is a real failure.
pub fn config_get_global(repo: &str, key: &str) -> Result<Option<String>> {
  let args: Vec<String> = vec!["config".into(), "--global".into(), "--get".into(), key.into()];
  let out = Command::new("git")
    .args(&args)
    .current_dir(repo)
    .output()
    .with_context(|| format!("spawning git {:?}", args))?;

  if out.status.success() {
    let value = String::from_utf8_lossy(&out.stdout).trim().to_string();
    return Ok(Some(value));
  }
  if out.status.code() == Some(1) {
    return Ok(None);
  }
  let stderr = String::from_utf8_lossy(&out.stderr);
  anyhow::bail!("git {:?} failed: {}", args, stderr)
}

pub fn config_set_global(repo: &str, key: &str, value: &str) -> Result<()> {
  run_git(repo, &["config".into(), "--global".into(), key.into(), value.into()])?;
  Ok(())
}

pub fn config_unset_global(repo: &str, key: &str) -> Result<()> {
  run_git(repo, &["config".into(), "--global".into(), "--unset".into(), key.into()])?;
  Ok(())
}

/// Trust the checkout even when its owner differs from the uid running us;
/// CI containers hit this constantly.
pub fn add_safe_directory(repo: &str) -> Result<()> {
  run_git(
    repo,
    &["config".into(), "--global".into(), "--add".into(), "safe.directory".into(), repo.into()],
  )?;
  Ok(())
}

/// Shallow tag fetch so the generator can interpolate version information.
/// Callers tolerate failure; a missing remote must not kill the run.
pub fn fetch_tags_shallow(repo: &str) -> Result<()> {
  run_git(
    repo,
    &["fetch".into(), "--depth=1".into(), "origin".into(), "+refs/tags/*:refs/tags/*".into()],
  )?;
  Ok(())
}

/// Stage one path. Re-adding an unchanged file is a no-op for git, which is
/// what makes repeated sync runs converge on a zero change count.
pub fn stage(repo: &str, path: &str) -> Result<()> {
  run_git(repo, &["add".into(), path.into()])?;
  Ok(())
}

pub fn staged_change_count(repo: &str) -> Result<usize> {
  let out = run_git(repo, &["status".into(), "--porcelain".into()])?;
  Ok(count_changed_lines(&out))
}

fn count_changed_lines(porcelain: &str) -> usize {
  porcelain.lines().filter(|line| CHANGED_LINE.is_match(line)).count()
}

pub fn commit(repo: &str, message: &str, sign_off: bool) -> Result<()> {
  let mut args: Vec<String> = vec!["commit".into(), "-m".into(), message.into()];
  if sign_off {
    args.push("-s".into());
  }
  run_git(repo, &args)?;
  Ok(())
}

pub fn push(repo: &str) -> Result<()> {
  run_git(repo, &["push".into()])?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn run_git_failure_is_error() {
    let err = run_git(".", &["definitely-not-a-real-subcommand".into()]).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("git"));
  }

  #[test]
  fn counts_added_and_modified_only() {
    let porcelain = "M  modules/vpc/README.md\nA  modules/dns/README.md\nD  gone.md\nR  old.md -> new.md\n?? scratch.txt\n";
    assert_eq!(count_changed_lines(porcelain), 2);
  }

  #[test]
  fn worktree_modifications_count_too() {
    // unstaged edits sit in column two; the pattern is position-agnostic
    assert_eq!(count_changed_lines(" M modules/vpc/README.md\n"), 1);
  }

  #[test]
  fn clean_tree_counts_zero() {
    assert_eq!(count_changed_lines(""), 0);
  }
}
