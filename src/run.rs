//! The publish-on-tag run routine
//!
//! Control flows linearly: resolve the tag from `GITHUB_REF`, validate it as
//! a semantic version, get the version to the publish step (manifest edit +
//! commit, or a `--set-version` flag, depending on the mode), then spawn the
//! publish command. Each step short-circuits with an early return and an
//! exact log line on its expected failure condition.

use crate::effects::Effects;
use crate::error::{PublishError, PublishResult};
use crate::manifest::{self, CONFIG_FILE_NAMES};
use crate::publish::publish_command;
use crate::tag::{tag_from_ref, version_from_tag};

/// Exit code when no manifest candidate exists (commit mode)
pub const EXIT_NO_MANIFEST: i32 = 2;

/// How the derived version reaches the publish step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// Edit the manifest's `version` field, `git add` + `git commit` it,
  /// then publish
  Commit,
  /// Pass `--set-version` to the publish command; no filesystem mutation,
  /// no commit. Non-tag pushes run a dry publish instead of returning.
  Flag,
}

impl Mode {
  pub fn parse(value: &str) -> PublishResult<Self> {
    match value {
      "commit" => Ok(Mode::Commit),
      "flag" => Ok(Mode::Flag),
      _ => Err(PublishError::InvalidMode {
        value: value.to_string(),
      }),
    }
  }
}

/// Run the publish-on-tag task and return the process exit code
///
/// The expected early-out conditions (no tag, unparsable tag, no manifest)
/// are reported through `effects.log` and the returned code; `Err` is
/// reserved for unexpected failures.
pub fn run(mode: Mode, forwarded: &[String], effects: &mut dyn Effects) -> PublishResult<i32> {
  let git_ref = effects.env_var("GITHUB_REF");
  let Some(tag) = tag_from_ref(git_ref.as_deref()) else {
    return run_without_tag(mode, forwarded, effects);
  };

  let Some(version) = version_from_tag(tag) else {
    effects.log(&format!("Could not parse tag as version: {}", tag));
    return Ok(0);
  };
  let version = version.to_string();

  let set_version = match mode {
    Mode::Commit => {
      if !update_first_manifest(&version, effects)? {
        effects.log("No deno.json(c) or jsr.json(c) found.");
        return Ok(EXIT_NO_MANIFEST);
      }
      None
    }
    Mode::Flag => Some(version.as_str()),
  };

  let cmd = publish_command(effects.user_agent(), set_version, forwarded, false);
  // Publish failures propagate as the process exit code
  effects.spawn(&cmd.program, &cmd.args)
}

/// No-tag fallback: commit mode logs and stops; flag mode exercises the
/// publish path with a placeholder version and --dry-run so non-tag CI runs
/// still validate the package
fn run_without_tag(mode: Mode, forwarded: &[String], effects: &mut dyn Effects) -> PublishResult<i32> {
  match mode {
    Mode::Commit => {
      effects.log("No tag found.");
      Ok(0)
    }
    Mode::Flag => {
      effects.log("No tag found. Running dry publish...");
      let cmd = publish_command(effects.user_agent(), Some("0.0.0"), forwarded, true);
      effects.spawn(&cmd.program, &cmd.args)
    }
  }
}

/// Edit the first existing manifest candidate and commit the change
///
/// Returns false when no candidate exists. Later candidates are neither
/// checked nor touched once a match is found. The git statuses are not
/// inspected: staging only the manifest keeps `publish` from demanding
/// --allow-dirty while still failing on unrelated working-tree changes.
fn update_first_manifest(version: &str, effects: &mut dyn Effects) -> PublishResult<bool> {
  for file_name in CONFIG_FILE_NAMES {
    if !effects.file_exists(file_name) {
      continue;
    }

    effects.log(&format!("Setting version to {} in {}", version, file_name));
    let text = effects.read_file(file_name)?;
    let new_text = manifest::set_version(file_name, &text, version)?;
    effects.write_file(file_name, &new_text)?;

    effects.spawn("git", &["add".to_string(), file_name.to_string()])?;
    effects.spawn("git", &["commit".to_string(), "-m".to_string(), version.to_string()])?;
    return Ok(true);
  }
  Ok(false)
}
