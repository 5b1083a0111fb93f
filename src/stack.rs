//! @ai:module:intent Turn raw stack trace text into structured frames
//! @ai:module:layer infrastructure
//! @ai:module:public_api StackFrame, parse_stack
//! @ai:module:stateless true

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// @ai:intent One frame of a formatted stack trace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

/// `   3: crate::module::function`, as printed by `std::backtrace::Backtrace`.
fn symbol_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\d+:\s+(\S.*?)\s*$").expect("Invalid regex pattern"))
}

/// `at file:line:col` (Rust location line, V8 anonymous frame) or `at fn (file:line:col)` (V8).
fn location_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*at\s+(?:(.+?)\s+\()?(.+?):(\d+)(?::(\d+))?\)?\s*$")
            .expect("Invalid regex pattern")
    })
}

/// @ai:intent Parse a Rust backtrace or V8 stack string into frames
/// @ai:post lines that match neither format are skipped
/// @ai:example ("disabled backtrace") -> []
/// @ai:effects pure
pub fn parse_stack(raw: &str) -> Vec<StackFrame> {
    let mut frames: Vec<StackFrame> = Vec::new();
    // Rust prints the symbol and its location on separate lines.
    let mut awaiting_location = false;

    for line in raw.lines() {
        if let Some(captures) = symbol_pattern().captures(line) {
            frames.push(StackFrame {
                function: Some(captures[1].to_string()),
                ..Default::default()
            });
            awaiting_location = true;
            continue;
        }

        let Some(captures) = location_pattern().captures(line) else {
            if !line.trim().is_empty() {
                tracing::trace!(line, "skipping unrecognized stack line");
            }
            awaiting_location = false;
            continue;
        };

        let function = captures.get(1).map(|m| m.as_str().to_string());
        let file = Some(captures[2].to_string());
        let line_no = captures[3].parse().ok();
        let column = captures.get(4).and_then(|m| m.as_str().parse().ok());

        match frames.last_mut() {
            Some(frame) if awaiting_location && function.is_none() => {
                frame.file = file;
                frame.line = line_no;
                frame.column = column;
            }
            _ => frames.push(StackFrame {
                function,
                file,
                line: line_no,
                column,
            }),
        }
        awaiting_location = false;
    }

    frames
}
