use anyhow::Result;

use crate::cli::EffectiveConfig;
use crate::error::SyncError;

/// Formats that accept `--indent` when no config file drives the run.
pub const SUPPORTED_FORMATS: [&str; 6] = [
  "asciidoc",
  "asciidoc table",
  "asciidoc document",
  "markdown",
  "markdown table",
  "markdown document",
];

/// Wrapper used when neither a template nor a config file is given.
pub const DEFAULT_TEMPLATE: &str = "<!-- BEGIN_TF_DOCS -->\n{{ .Content }}\n<!-- END_TF_DOCS -->";

/// The invariant part of every terraform-docs invocation. Per-directory
/// argument lists are cloned from `args`, never built by mutating it.
#[derive(Debug, Clone)]
pub struct BasePlan {
  pub args: Vec<String>,
  pub template: Option<String>,
}

pub fn build_base(cfg: &EffectiveConfig) -> Result<BasePlan> {
  let mut args: Vec<String> = Vec::new();

  // Format words first, extra args second: a flag present in both is won
  // by the extra args.
  args.extend(cfg.output_format.split_whitespace().map(str::to_string));
  args.extend(cfg.extra_args.split_whitespace().map(str::to_string));

  let mut template = if cfg.template.is_empty() {
    None
  } else {
    Some(cfg.template.clone())
  };

  if cfg.config_file == "disabled" {
    if !SUPPORTED_FORMATS.contains(&cfg.output_format.as_str()) {
      return Err(SyncError::UnsupportedFormat(cfg.output_format.clone()).into());
    }
    args.push("--indent".to_string());
    args.push(cfg.indention.to_string());

    if template.is_none() {
      template = Some(DEFAULT_TEMPLATE.to_string());
    }
  }

  log::debug!("base terraform-docs args: {:?}", args);
  Ok(BasePlan { args, template })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cli::{Cli, normalize};
  use clap::Parser;

  fn cfg_from(argv: &[&str]) -> EffectiveConfig {
    let mut full = vec!["terraform-docs-sync"];
    full.extend_from_slice(argv);
    normalize(Cli::parse_from(full)).unwrap()
  }

  #[test]
  fn supported_format_gets_indent() {
    let cfg = cfg_from(&["--output-format", "markdown table", "--indention", "4"]);
    let base = build_base(&cfg).unwrap();
    let pos = base.args.iter().position(|a| a == "--indent").expect("indent flag");
    assert_eq!(base.args[pos + 1], "4");
    assert_eq!(&base.args[..2], &["markdown", "table"]);
  }

  #[test]
  fn unsupported_format_without_config_file_fails() {
    let cfg = cfg_from(&["--output-format", "json"]);
    let err = build_base(&cfg).unwrap_err();
    match err.downcast_ref::<SyncError>() {
      Some(SyncError::UnsupportedFormat(f)) => assert_eq!(f, "json"),
      other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
  }

  #[test]
  fn any_format_allowed_with_config_file() {
    let cfg = cfg_from(&["--output-format", "json", "--config-file", ".terraform-docs.yml"]);
    let base = build_base(&cfg).unwrap();
    assert!(!base.args.iter().any(|a| a == "--indent"));
    assert_eq!(base.template, None);
  }

  #[test]
  fn default_template_is_marker_wrapper() {
    let cfg = cfg_from(&[]);
    let base = build_base(&cfg).unwrap();
    assert_eq!(
      base.template.as_deref(),
      Some("<!-- BEGIN_TF_DOCS -->\n{{ .Content }}\n<!-- END_TF_DOCS -->")
    );
  }

  #[test]
  fn explicit_template_survives() {
    let cfg = cfg_from(&["--template", "{{ .Content }}"]);
    let base = build_base(&cfg).unwrap();
    assert_eq!(base.template.as_deref(), Some("{{ .Content }}"));
  }

  #[test]
  fn extra_args_follow_format_words() {
    let cfg = cfg_from(&["--args", "--sort-by required --lockfile=false"]);
    let base = build_base(&cfg).unwrap();
    assert_eq!(
      &base.args[..5],
      &["markdown", "table", "--sort-by", "required", "--lockfile=false"]
    );
  }
}
