//! Injected effects bundle
//!
//! Every effectful operation the run routine performs (environment lookup,
//! logging, file probing and I/O, subprocess spawning, client identity) goes
//! through this trait instead of ambient global state, so tests substitute a
//! deterministic fake that records the full action sequence.

use crate::error::{PublishError, PublishResult};
use std::path::Path;
use std::process::Command;

/// Effectful capabilities injected into the run routine
pub trait Effects {
  /// Look up an environment variable
  fn env_var(&self, name: &str) -> Option<String>;

  /// Log a user-visible message
  ///
  /// CI pipelines scrape these lines, so callers pass exact wording.
  fn log(&mut self, message: &str);

  /// Check whether a file exists in the working directory
  fn file_exists(&self, path: &str) -> bool;

  /// Read a file as UTF-8 text
  fn read_file(&self, path: &str) -> PublishResult<String>;

  /// Replace a file's contents
  fn write_file(&mut self, path: &str, text: &str) -> PublishResult<()>;

  /// Run a subprocess to completion and return its exit code
  fn spawn(&mut self, command: &str, args: &[String]) -> PublishResult<i32>;

  /// Client identifier of the calling runtime (e.g. `Deno/2.1.0`)
  fn user_agent(&self) -> &str;
}

/// Production implementation backed by the process environment,
/// stderr, the filesystem, and system subprocesses
pub struct SystemEffects {
  user_agent: String,
}

impl SystemEffects {
  pub fn new(user_agent: String) -> Self {
    Self { user_agent }
  }
}

impl Effects for SystemEffects {
  fn env_var(&self, name: &str) -> Option<String> {
    std::env::var(name).ok()
  }

  fn log(&mut self, message: &str) {
    eprintln!("{}", message);
  }

  fn file_exists(&self, path: &str) -> bool {
    Path::new(path).is_file()
  }

  fn read_file(&self, path: &str) -> PublishResult<String> {
    Ok(std::fs::read_to_string(path)?)
  }

  fn write_file(&mut self, path: &str, text: &str) -> PublishResult<()> {
    Ok(std::fs::write(path, text)?)
  }

  fn spawn(&mut self, command: &str, args: &[String]) -> PublishResult<i32> {
    // Echo the command line so CI logs show what ran
    eprintln!("$ {} {}", command, args.join(" "));

    let status = Command::new(command)
      .args(args)
      .status()
      .map_err(|source| PublishError::Spawn {
        command: command.to_string(),
        source,
      })?;

    // Killed by signal: no code, treat as generic failure
    Ok(status.code().unwrap_or(1))
  }

  fn user_agent(&self) -> &str {
    &self.user_agent
  }
}
