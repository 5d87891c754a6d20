//! Error types for publish-on-tag with contextual messages and exit codes
//!
//! The expected failure conditions of a run (no tag, unparsable tag, no
//! manifest file) are not errors: the run routine reports them through its
//! log capability and returns an exit code directly. This type covers the
//! unexpected failures only: I/O, malformed manifests, and subprocesses
//! that could not be executed at all.

use std::fmt;
use std::io;

/// Main error type for publish-on-tag
#[derive(Debug)]
pub enum PublishError {
  /// I/O errors (reading or writing the manifest)
  Io(io::Error),

  /// The manifest file exists but could not be edited
  Manifest { path: String, message: String },

  /// A subprocess could not be executed
  Spawn { command: String, source: io::Error },

  /// Unknown value passed to --mode
  InvalidMode { value: String },
}

impl PublishError {
  /// Get the process exit code for this error
  ///
  /// All unexpected failures exit 1. The distinguished codes (2 for a
  /// missing manifest, a forwarded publish status) are returned by the run
  /// routine itself, not through this type.
  pub fn exit_code(&self) -> i32 {
    1
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      PublishError::Spawn { command, .. } => {
        Some(format!("Check that '{}' is installed and on PATH.", command))
      }
      PublishError::InvalidMode { .. } => Some(
        "Valid modes are 'commit' (edit the manifest and commit it) and 'flag' (pass --set-version to the publish command)."
          .to_string(),
      ),
      _ => None,
    }
  }
}

impl fmt::Display for PublishError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PublishError::Io(e) => write!(f, "I/O error: {}", e),
      PublishError::Manifest { path, message } => {
        write!(f, "Failed to update {}: {}", path, message)
      }
      PublishError::Spawn { command, source } => {
        write!(f, "Failed to run '{}': {}", command, source)
      }
      PublishError::InvalidMode { value } => {
        write!(f, "Invalid mode: '{}'", value)
      }
    }
  }
}

impl std::error::Error for PublishError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      PublishError::Io(e) => Some(e),
      PublishError::Spawn { source, .. } => Some(source),
      _ => None,
    }
  }
}

impl From<io::Error> for PublishError {
  fn from(err: io::Error) -> Self {
    PublishError::Io(err)
  }
}

/// Result type alias for publish-on-tag
pub type PublishResult<T> = Result<T, PublishError>;

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &PublishError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
