/* src/cli/codegen/src/error.rs */

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MacroError>;

/// Build-time failures. Every variant aborts the module being transformed.
#[derive(Debug, Error)]
pub enum MacroError {
  #[error("configuration error: {0}")]
  Configuration(String),

  #[error("structural error: {0}")]
  Structural(String),

  #[error("{macro_name}: argument {position} must be a string literal, got `{found}`")]
  ArgumentType { macro_name: String, position: usize, found: String },

  #[error("resolveRoute called from {} which is not inside any loaded pages tree", .0.display())]
  UnregisteredCallSite(PathBuf),

  #[error("resolveRoute: parameters supplied but path \"{0}\" has no :param segment")]
  MissingParameter(String),

  #[error("use translations before load it (namespace \"{0}\")")]
  NamespaceNotLoaded(String),

  #[error("failed to read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid glob pattern \"{pattern}\": {source}")]
  Pattern {
    pattern: String,
    #[source]
    source: glob::PatternError,
  },
}

impl MacroError {
  pub fn configuration(msg: impl Into<String>) -> Self {
    Self::Configuration(msg.into())
  }

  pub fn structural(msg: impl Into<String>) -> Self {
    Self::Structural(msg.into())
  }

  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io { path: path.into(), source }
  }

  /// Short machine-readable kind, used in CLI reports.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Configuration(_) => "ConfigurationError",
      Self::Structural(_) => "StructuralError",
      Self::ArgumentType { .. } => "ArgumentTypeError",
      Self::UnregisteredCallSite(_) => "UnregisteredCallSiteError",
      Self::MissingParameter(_) => "MissingParameterError",
      Self::NamespaceNotLoaded(_) => "NamespaceNotLoadedError",
      Self::Io { .. } => "IoError",
      Self::Pattern { .. } => "ConfigurationError",
    }
  }
}
