use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::util;

/// Identity used for commits when none is configured.
pub const BOT_NAME: &str = "github-actions[bot]";
pub const BOT_EMAIL: &str = "github-actions[bot]@users.noreply.github.com";

/// How generated documentation lands in the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMethod {
  /// Leave files alone; the generator prints to stdout only.
  None,
  /// Rewrite the content between the template markers, keeping the rest.
  Inject,
  /// Replace the whole output file.
  Replace,
}

impl OutputMethod {
  pub fn as_str(&self) -> &'static str {
    match self {
      OutputMethod::None => "none",
      OutputMethod::Inject => "inject",
      OutputMethod::Replace => "replace",
    }
  }
}

/// Every option doubles as the `INPUT_*` environment variable the Actions
/// runner sets for action steps, so the binary works unchanged as an action
/// entrypoint or from a shell.
#[derive(Parser, Debug)]
#[command(
    name = "terraform-docs-sync",
    version,
    about = "Keep terraform-docs generated documentation in sync across Terraform projects",
    long_about = None
)]
pub struct Cli {
  /// Repository root (default: current dir, or the CI workspace)
  #[arg(long, env = "GITHUB_WORKSPACE", default_value = ".")]
  pub root: PathBuf,

  /// Comma-separated list of directories to generate docs for
  #[arg(long, env = "INPUT_WORKING_DIR", default_value = ".")]
  pub working_dir: String,

  /// Atlantis projects file; when it exists, its projects[].dir entries
  /// override --find-dir and --working-dir
  #[arg(long, env = "INPUT_ATLANTIS_FILE", default_value = "")]
  pub atlantis_file: String,

  /// Root for a recursive *.tf search ("disabled" turns the search off)
  #[arg(long, env = "INPUT_FIND_DIR", default_value = "disabled")]
  pub find_dir: String,

  /// Pass --recursive to terraform-docs
  #[arg(long, env = "INPUT_RECURSIVE")]
  pub recursive: bool,

  /// Submodule path for --recursive runs
  #[arg(long, env = "INPUT_RECURSIVE_PATH", default_value = "modules")]
  pub recursive_path: String,

  /// terraform-docs format words, e.g. "markdown table"
  #[arg(long, env = "INPUT_OUTPUT_FORMAT", default_value = "markdown table")]
  pub output_format: String,

  /// What to do with the generated content
  #[arg(long, env = "INPUT_OUTPUT_METHOD", value_enum, default_value = "inject")]
  pub output_method: OutputMethod,

  /// File the generator writes into each target directory
  #[arg(long, env = "INPUT_OUTPUT_FILE", default_value = "README.md")]
  pub output_file: String,

  /// Output template; defaults to the marker wrapper when no config file drives the run
  #[arg(long, env = "INPUT_TEMPLATE", default_value = "")]
  pub template: String,

  /// Free-form extra terraform-docs arguments
  #[arg(long = "args", env = "INPUT_ARGS", default_value = "", allow_hyphen_values = true)]
  pub extra_args: String,

  /// Indentation level for generated headers (upstream input name kept)
  #[arg(long, env = "INPUT_INDENTION", default_value_t = 2)]
  pub indention: u8,

  /// terraform-docs config file, or "disabled"
  #[arg(long, env = "INPUT_CONFIG_FILE", default_value = "disabled")]
  pub config_file: String,

  /// Commit staged documentation changes and push them
  #[arg(long, env = "INPUT_GIT_PUSH")]
  pub git_push: bool,

  /// Commit message used with --git-push
  #[arg(long, env = "INPUT_GIT_COMMIT_MESSAGE", default_value = "terraform-docs: automated action")]
  pub git_commit_message: String,

  /// Commit author name (default: the github-actions bot)
  #[arg(long, env = "INPUT_GIT_PUSH_USER_NAME", default_value = "")]
  pub git_push_user_name: String,

  /// Commit author email (default: the github-actions bot)
  #[arg(long, env = "INPUT_GIT_PUSH_USER_EMAIL", default_value = "")]
  pub git_push_user_email: String,

  /// Add a Signed-off-by trailer to the commit
  #[arg(long, env = "INPUT_GIT_PUSH_SIGN_OFF")]
  pub git_push_sign_off: bool,

  /// Exit non-zero when documentation changed and --git-push is off
  #[arg(long, env = "INPUT_FAIL_ON_DIFF")]
  pub fail_on_diff: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub root: String, // absolute path for stability
  pub working_dir: String,
  pub atlantis_file: String,
  pub find_dir: String,
  pub recursive: bool,
  pub recursive_path: String,
  pub output_format: String,
  pub output_method: OutputMethod,
  pub output_file: String,
  pub template: String,
  pub extra_args: String,
  pub indention: u8,
  pub config_file: String,
  pub git_push: bool,
  pub git_commit_message: String,
  pub git_push_user_name: String,
  pub git_push_user_email: String,
  pub git_push_sign_off: bool,
  pub fail_on_diff: bool,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let root = util::canonicalize_lossy(&cli.root);

  let git_push_user_name = if cli.git_push_user_name.is_empty() {
    BOT_NAME.to_string()
  } else {
    cli.git_push_user_name
  };
  let git_push_user_email = if cli.git_push_user_email.is_empty() {
    BOT_EMAIL.to_string()
  } else {
    cli.git_push_user_email
  };

  Ok(EffectiveConfig {
    root,
    working_dir: cli.working_dir,
    atlantis_file: cli.atlantis_file,
    find_dir: cli.find_dir,
    recursive: cli.recursive,
    recursive_path: cli.recursive_path,
    output_format: cli.output_format,
    output_method: cli.output_method,
    output_file: cli.output_file,
    template: cli.template,
    extra_args: cli.extra_args,
    indention: cli.indention,
    config_file: cli.config_file,
    git_push: cli.git_push,
    git_commit_message: cli.git_commit_message,
    git_push_user_name,
    git_push_user_email,
    git_push_sign_off: cli.git_push_sign_off,
    fail_on_diff: cli.fail_on_diff,
  })
}
