//! JSONC manifest editing
//!
//! Sets the top-level `version` field of a deno/jsr config file while
//! leaving every other byte alone: comments, key order, indentation, and
//! trailing commas all survive the edit. The file is parsed to an AST with
//! byte ranges and only the span of the `version` value is spliced.

use crate::error::{PublishError, PublishResult};
use jsonc_parser::ast::{Object, Value};
use jsonc_parser::common::Range;
use jsonc_parser::{CollectOptions, ParseOptions, parse_to_ast};

/// Candidate manifest filenames, in priority order (first match wins)
pub const CONFIG_FILE_NAMES: [&str; 4] = ["deno.json", "deno.jsonc", "jsr.json", "jsr.jsonc"];

/// Return `text` with the top-level `version` field set to `version`
///
/// An existing `version` value is replaced in place; a missing one is
/// inserted as the first property, reusing the file's own indentation.
pub fn set_version(path: &str, text: &str, version: &str) -> PublishResult<String> {
  let parsed = parse_to_ast(text, &CollectOptions::default(), &ParseOptions::default())
    .map_err(|e| manifest_error(path, e.to_string()))?;

  let root = match parsed.value {
    Some(Value::Object(obj)) => obj,
    _ => return Err(manifest_error(path, "root value is not an object".to_string())),
  };

  // serde_json handles JSON string escaping for us
  let version_json = serde_json::Value::String(version.to_string()).to_string();

  let new_text = match root.get("version") {
    Some(prop) => {
      let range = value_range(&prop.value);
      format!("{}{}{}", &text[..range.start], version_json, &text[range.end..])
    }
    None => insert_version(text, &root, &version_json),
  };

  Ok(new_text)
}

/// Insert `"version": <value>` as the first property of the root object
fn insert_version(text: &str, root: &Object, version_json: &str) -> String {
  match root.properties.first() {
    Some(first) => {
      let at = first.range.start;
      // Reuse the whitespace between `{` and the first property so the new
      // line matches the file's indentation
      let leading = &text[root.range.start + 1..at];
      let separator = match leading.rfind('\n') {
        Some(idx) => format!("\n{}", &leading[idx + 1..]),
        None => " ".to_string(),
      };
      format!(
        "{}\"version\": {},{}{}",
        &text[..at],
        version_json,
        separator,
        &text[at..]
      )
    }
    None => {
      let after_brace = root.range.start + 1;
      format!(
        "{}\"version\": {}{}",
        &text[..after_brace],
        version_json,
        &text[after_brace..]
      )
    }
  }
}

fn value_range(value: &Value) -> Range {
  match value {
    Value::StringLit(v) => v.range,
    Value::NumberLit(v) => v.range,
    Value::BooleanLit(v) => v.range,
    Value::Object(v) => v.range,
    Value::Array(v) => v.range,
    Value::NullKeyword(v) => v.range,
  }
}

fn manifest_error(path: &str, message: String) -> PublishError {
  PublishError::Manifest {
    path: path.to_string(),
    message,
  }
}
