//! Tool-call wire-syntax parser.
//!
//! The model-to-loop contract is the literal text `TOOL: <name>(<args>)`.
//! `<args>` is either a JSON-like object or a bare quoted/unquoted string;
//! multiple invocations may appear in one output and argument text may span
//! lines. The scan is non-greedy up to the first close-parenthesis.
//!
//! Because an unreliable text channel is the only input, argument resolution
//! is a fallback chain rather than a strict parse:
//!
//! 1. Parse as a JSON object, retrying after single→double quote
//!    normalization.
//! 2. Treat the text as a bare string and map it into the tool's primary
//!    parameter by name convention (`fact` for save_fact, `query` for
//!    search, and so on).
//! 3. Otherwise wrap as `{"raw": <text>}`.

use liteclaw_core::tool::ToolInvocation;
use regex_lite::Regex;
use std::sync::OnceLock;

fn tool_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // (?s) lets argument text span lines; .*? stops at the first ')'.
    RE.get_or_init(|| {
        Regex::new(r"(?s)TOOL:\s*([A-Za-z_][A-Za-z0-9_]*)\s*\((.*?)\)")
            .expect("tool-call pattern is valid")
    })
}

/// Scan model output for tool invocations, in left-to-right order.
pub fn parse_tool_calls(output: &str) -> Vec<ToolInvocation> {
    tool_call_re()
        .captures_iter(output)
        .map(|caps| ToolInvocation {
            name: caps[1].to_string(),
            raw_args: caps[2].to_string(),
        })
        .collect()
}

/// The parameter a bare-string argument maps into, by tool name convention.
fn primary_param(tool_name: &str) -> Option<&'static str> {
    match tool_name {
        "search" => Some("query"),
        "save_fact" => Some("fact"),
        "browse" => Some("url"),
        "save_skill" | "retrieve_skill" => Some("name"),
        _ => None,
    }
}

fn wrap_bare_string(tool_name: &str, text: &str) -> serde_json::Value {
    match primary_param(tool_name) {
        Some(param) => serde_json::json!({ param: text }),
        None => serde_json::json!({ "raw": text }),
    }
}

/// Strip one layer of matching surrounding quotes, if present.
fn strip_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Resolve raw argument text into a JSON object for dispatch.
pub fn resolve_arguments(tool_name: &str, raw_args: &str) -> serde_json::Value {
    let trimmed = raw_args.trim();

    for candidate in [trimmed.to_string(), trimmed.replace('\'', "\"")] {
        match serde_json::from_str::<serde_json::Value>(&candidate) {
            Ok(value) if value.is_object() => return value,
            Ok(serde_json::Value::String(s)) => return wrap_bare_string(tool_name, &s),
            _ => {}
        }
    }

    wrap_bare_string(tool_name, strip_quotes(trimmed))
}
