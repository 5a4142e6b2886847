use std::path::Path;
use std::process::Command;

#[allow(dead_code)]
pub fn git(repo: &Path, args: &[&str]) {
  let status = Command::new("git").args(args).current_dir(repo).status().unwrap();
  assert!(status.success(), "git {:?} failed", args);
}

#[allow(dead_code)]
pub fn git_output(repo: &Path, args: &[&str]) -> String {
  let out = Command::new("git").args(args).current_dir(repo).output().unwrap();
  assert!(out.status.success(), "git {:?} failed", args);
  String::from_utf8_lossy(&out.stdout).to_string()
}

/// Commit everything with a fixture identity that never leaks into the
/// repo's local config (the tool under test must supply its own).
#[allow(dead_code)]
pub fn commit_all(repo: &Path, message: &str) {
  git(repo, &["add", "."]);
  git(
    repo,
    &[
      "-c",
      "user.name=Fixture Bot",
      "-c",
      "user.email=fixture@example.com",
      "commit",
      "-q",
      "-m",
      message,
    ],
  );
}

/// Terraform module skeleton with a marker-wrapped README at `rel`.
#[allow(dead_code)]
pub fn add_module(root: &Path, rel: &str) {
  let dir = root.join(rel);
  std::fs::create_dir_all(&dir).unwrap();
  std::fs::write(dir.join("main.tf"), "variable \"name\" {\n  type = string\n}\n").unwrap();
  std::fs::write(
    dir.join("README.md"),
    "# module\n<!-- BEGIN_TF_DOCS -->\n<!-- END_TF_DOCS -->\n",
  )
  .unwrap();
}

/// Throwaway repo with one Terraform module at its root.
#[allow(dead_code)]
pub fn init_repo() -> tempfile::TempDir {
  let dir = tempfile::TempDir::new().unwrap();
  git(dir.path(), &["init", "-q", "-b", "main"]);
  git(dir.path(), &["config", "commit.gpgsign", "false"]);
  add_module(dir.path(), ".");
  commit_all(dir.path(), "init");
  dir
}

/// Bare remote wired up as origin, with main already pushed.
#[allow(dead_code)]
pub fn init_remote(repo: &Path) -> tempfile::TempDir {
  let remote = tempfile::TempDir::new().unwrap();
  git(remote.path(), &["init", "-q", "--bare", "-b", "main"]);
  git(repo, &["remote", "add", "origin", remote.path().to_str().unwrap()]);
  git(repo, &["push", "-q", "-u", "origin", "main"]);
  remote
}

/// A stand-in generator. Appends one marker line to the target directory's
/// README unless it is already there, so repeat runs converge. Knobs:
/// - FAKE_TFDOCS_FAIL_DIR: exit 3 when pointed at that directory
/// - FAKE_TFDOCS_ALWAYS_APPEND: append unconditionally (counts invocations)
#[allow(dead_code)]
pub fn fake_terraform_docs() -> tempfile::TempDir {
  let dir = tempfile::TempDir::new().unwrap();
  let script = r#"#!/bin/sh
for arg in "$@"; do dir="$arg"; done
if [ -n "$FAKE_TFDOCS_FAIL_DIR" ] && [ "$dir" = "$FAKE_TFDOCS_FAIL_DIR" ]; then
  echo "fake terraform-docs: induced failure in $dir" >&2
  exit 3
fi
out="$dir/README.md"
if [ -n "$FAKE_TFDOCS_ALWAYS_APPEND" ]; then
  echo "generated by fake terraform-docs" >> "$out"
elif ! grep -q "generated by fake terraform-docs" "$out" 2>/dev/null; then
  echo "generated by fake terraform-docs" >> "$out"
fi
exit 0
"#;
  let path = dir.path().join("terraform-docs");
  std::fs::write(&path, script).unwrap();

  use std::os::unix::fs::PermissionsExt;
  let mut perms = std::fs::metadata(&path).unwrap().permissions();
  perms.set_mode(0o755);
  std::fs::set_permissions(&path, perms).unwrap();

  dir
}

/// Scratch global git config for one test; lives next to the fake binary,
/// outside the repo, so identity overrides neither touch the developer's
/// real config nor show up in the repo's status.
#[allow(dead_code)]
pub fn scratch_gitconfig(fake_bin: &Path) -> std::path::PathBuf {
  fake_bin.join("gitconfig")
}

/// Binary under test, isolated from the host: the fake generator leads
/// PATH, and GIT_CONFIG_GLOBAL points at the scratch config file.
#[allow(dead_code)]
pub fn sync_cmd(repo: &Path, fake_bin: &Path) -> assert_cmd::Command {
  let mut cmd = assert_cmd::Command::cargo_bin("terraform-docs-sync").unwrap();
  let path = match std::env::var("PATH") {
    Ok(p) => format!("{}:{}", fake_bin.display(), p),
    Err(_) => fake_bin.display().to_string(),
  };
  cmd.env("PATH", path);
  cmd.env("GIT_CONFIG_GLOBAL", scratch_gitconfig(fake_bin));
  cmd.env_remove("GITHUB_ACTIONS");
  cmd.env_remove("GITHUB_OUTPUT");
  cmd.env_remove("GITHUB_WORKSPACE");
  cmd.env_remove("RUST_LOG");
  cmd.arg("--root").arg(repo);
  cmd
}
