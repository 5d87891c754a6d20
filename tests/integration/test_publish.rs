//! Integration tests for the publish-on-tag binary
//!
//! Early-return paths run against the real binary directly. Paths that
//! spawn a publish tool run with stub `deno`/`npx` executables on a
//! private PATH so nothing reaches a registry.

use crate::helpers::{TestWorkspace, run_publish_on_tag, stderr};
use anyhow::Result;

const MANIFEST: &str = "{\n  \"name\": \"@scope/pkg\",\n  \"version\": \"1.2.2\"\n}";

#[test]
fn test_no_tag_exits_zero() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_manifest("deno.json", MANIFEST)?;

  let output = run_publish_on_tag(&ws, &[], &[])?;

  assert_eq!(output.status.code(), Some(0));
  assert!(stderr(&output).contains("No tag found.\n"));
  assert_eq!(ws.read_file("deno.json")?, MANIFEST);
  Ok(())
}

#[test]
fn test_branch_ref_is_not_a_tag() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_manifest("deno.json", MANIFEST)?;

  let output = run_publish_on_tag(&ws, &[], &[("GITHUB_REF", "refs/heads/main")])?;

  assert_eq!(output.status.code(), Some(0));
  assert!(stderr(&output).contains("No tag found.\n"));
  Ok(())
}

#[test]
fn test_unparsable_tag_exits_zero_without_touching_manifest() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_manifest("deno.json", MANIFEST)?;

  let output = run_publish_on_tag(&ws, &[], &[("GITHUB_REF", "refs/tags/vasdfasdf4325151235")])?;

  assert_eq!(output.status.code(), Some(0));
  assert!(stderr(&output).contains("Could not parse tag as version: vasdfasdf4325151235\n"));
  assert_eq!(ws.read_file("deno.json")?, MANIFEST);
  Ok(())
}

#[test]
fn test_missing_manifest_exits_two() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_publish_on_tag(&ws, &[], &[("GITHUB_REF", "refs/tags/v1.2.3")])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("No deno.json(c) or jsr.json(c) found.\n"));
  Ok(())
}

#[test]
fn test_invalid_mode_exits_one() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_publish_on_tag(&ws, &["--mode", "auto"], &[])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Invalid mode: 'auto'"));
  Ok(())
}

#[cfg(unix)]
mod with_stub_publishers {
  use super::*;

  fn path_with(bin_dir: &std::path::Path) -> String {
    format!(
      "{}:{}",
      bin_dir.display(),
      std::env::var("PATH").unwrap_or_default()
    )
  }

  #[test]
  fn test_commit_mode_updates_manifest_commits_and_publishes() -> Result<()> {
    let ws = TestWorkspace::with_git()?;
    let manifest = "{\n  // package identity\n  \"name\": \"@scope/pkg\",\n  \"version\": \"1.2.2\"\n}";
    ws.write_manifest("deno.jsonc", manifest)?;
    crate::helpers::git(&ws.path, &["add", "."])?;
    crate::helpers::git(&ws.path, &["commit", "-m", "Add manifest"])?;

    let bin_dir = ws.stub_bin("deno", 0)?;
    let path = path_with(&bin_dir);
    let output = run_publish_on_tag(
      &ws,
      &[],
      &[
        ("GITHUB_REF", "refs/tags/v1.2.3"),
        ("PUBLISH_ON_TAG_CLIENT", "Deno/2.1.0"),
        ("PATH", &path),
      ],
    )?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Setting version to 1.2.3 in deno.jsonc\n"));

    // Comment and formatting survive, only the version value changed
    assert_eq!(
      ws.read_file("deno.jsonc")?,
      "{\n  // package identity\n  \"name\": \"@scope/pkg\",\n  \"version\": \"1.2.3\"\n}"
    );

    // The edit was committed with the stripped version as the message
    assert_eq!(ws.git_log(1)?, vec!["1.2.3".to_string()]);

    // The publish step ran through the stub
    assert_eq!(ws.stub_argv("deno")?, "publish");
    Ok(())
  }

  #[test]
  fn test_publish_exit_status_is_propagated() -> Result<()> {
    let ws = TestWorkspace::with_git()?;
    ws.write_manifest("deno.json", MANIFEST)?;
    crate::helpers::git(&ws.path, &["add", "."])?;
    crate::helpers::git(&ws.path, &["commit", "-m", "Add manifest"])?;

    let bin_dir = ws.stub_bin("deno", 7)?;
    let path = path_with(&bin_dir);
    let output = run_publish_on_tag(
      &ws,
      &[],
      &[
        ("GITHUB_REF", "refs/tags/v1.2.3"),
        ("PUBLISH_ON_TAG_CLIENT", "Deno/2.1.0"),
        ("PATH", &path),
      ],
    )?;

    assert_eq!(output.status.code(), Some(7));
    Ok(())
  }

  #[test]
  fn test_flag_mode_without_tag_runs_dry_publish_via_npx() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_manifest("deno.json", MANIFEST)?;

    let bin_dir = ws.stub_bin("npx", 0)?;
    let path = path_with(&bin_dir);
    let output = run_publish_on_tag(
      &ws,
      &["--mode", "flag"],
      &[("PUBLISH_ON_TAG_CLIENT", "Node.js/21"), ("PATH", &path)],
    )?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("No tag found. Running dry publish...\n"));
    assert_eq!(ws.stub_argv("npx")?, "jsr publish --set-version 0.0.0 --dry-run");

    // Flag mode leaves the manifest alone
    assert_eq!(ws.read_file("deno.json")?, MANIFEST);
    Ok(())
  }

  #[test]
  fn test_flag_mode_with_tag_passes_set_version() -> Result<()> {
    let ws = TestWorkspace::new()?;

    let bin_dir = ws.stub_bin("deno", 0)?;
    let path = path_with(&bin_dir);
    let output = run_publish_on_tag(
      &ws,
      &["--mode", "flag", "--", "--allow-slow-types"],
      &[
        ("GITHUB_REF", "refs/tags/v2.0.0-rc.1"),
        ("PUBLISH_ON_TAG_CLIENT", "Deno/2.1.0"),
        ("PATH", &path),
      ],
    )?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
      ws.stub_argv("deno")?,
      "publish --set-version 2.0.0-rc.1 --allow-slow-types"
    );
    Ok(())
  }
}
