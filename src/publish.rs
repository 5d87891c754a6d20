//! Publish command construction
//!
//! Builds the terminal `publish` invocation. The client identifier decides
//! the binary: a native Deno runtime gets `deno publish`, anything else
//! falls back to `npx jsr publish`. Forwarded arguments pass through
//! verbatim and are never interpreted here.

/// Client identifier prefix that selects the native `deno` binary
pub const DENO_AGENT_PREFIX: &str = "Deno/";

/// A fully constructed subprocess invocation
#[derive(Debug, PartialEq, Eq)]
pub struct PublishCommand {
  pub program: String,
  pub args: Vec<String>,
}

/// Build the publish invocation
///
/// `set_version` adds `--set-version <v>` (flag mode); `dry_run` appends
/// `--dry-run` after the forwarded args (the no-tag dry publish).
pub fn publish_command(
  user_agent: &str,
  set_version: Option<&str>,
  forwarded: &[String],
  dry_run: bool,
) -> PublishCommand {
  let mut args = vec!["publish".to_string()];
  if let Some(version) = set_version {
    args.push("--set-version".to_string());
    args.push(version.to_string());
  }
  args.extend(forwarded.iter().cloned());
  if dry_run {
    args.push("--dry-run".to_string());
  }

  if user_agent.starts_with(DENO_AGENT_PREFIX) {
    PublishCommand {
      program: "deno".to_string(),
      args,
    }
  } else {
    let mut npx_args = vec!["jsr".to_string()];
    npx_args.extend(args);
    PublishCommand {
      program: "npx".to_string(),
      args: npx_args,
    }
  }
}
