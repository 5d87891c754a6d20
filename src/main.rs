mod effects;
mod error;
mod manifest;
mod publish;
mod run;
mod tag;

use clap::Parser;
use effects::SystemEffects;
use error::{PublishError, print_error};
use run::Mode;

/// Publish a package to JSR with a version based on the current tag
///
/// Intended to run in CI on tag-push events: reads GITHUB_REF, derives a
/// semantic version from the tag, writes it into deno.json(c)/jsr.json(c),
/// commits the change, and runs the publish command.
#[derive(Parser)]
#[command(name = "publish-on-tag")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// How the version reaches the publish step: "commit" edits the manifest
  /// and commits it, "flag" passes --set-version to the publish command
  #[arg(long, default_value = "commit")]
  mode: String,

  /// Additional arguments forwarded verbatim to the publish command
  #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
  publish_args: Vec<String>,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let mode = match Mode::parse(&cli.mode) {
    Ok(mode) => mode,
    Err(err) => handle_error(err),
  };

  let mut effects = SystemEffects::new(detect_user_agent());
  match run::run(mode, &cli.publish_args, &mut effects) {
    Ok(0) => {}
    Ok(code) => std::process::exit(code),
    Err(err) => handle_error(err),
  }
}

fn handle_error(err: PublishError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code());
}

/// Resolve the client identifier string that selects the publish binary
///
/// PUBLISH_ON_TAG_CLIENT overrides detection (CI can pin the decision).
/// Otherwise a `deno` binary on PATH selects the native publish path; an
/// empty identifier falls back to `npx jsr`.
fn detect_user_agent() -> String {
  if let Ok(agent) = std::env::var("PUBLISH_ON_TAG_CLIENT") {
    return agent;
  }
  match which::which("deno") {
    Ok(path) => format!("Deno/{}", path.display()),
    Err(_) => String::new(),
  }
}
