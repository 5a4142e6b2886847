use thiserror::Error;

/// Failures that decide the process exit code.
///
/// Everything else propagates as a plain `anyhow` chain and exits 1.
#[derive(Debug, Error)]
pub enum SyncError {
  #[error("unsupported output format `{0}` (use an asciidoc/markdown format, or set --config-file)")]
  UnsupportedFormat(String),

  #[error("terraform-docs failed in `{dir}` (exit code {code})")]
  GeneratorFailed { dir: String, code: i32 },

  #[error("documentation out of date: {count} file(s) changed; run terraform-docs and commit the result")]
  DiffDetected { count: usize },
}

impl SyncError {
  /// A failing generator takes the whole run down with its own exit code.
  pub fn exit_code(&self) -> i32 {
    match self {
      SyncError::GeneratorFailed { code, .. } => *code,
      _ => 1,
    }
  }
}
