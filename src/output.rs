//! @ai:module:intent Format API errors and the kind table for different outputs (JSON, text)
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_error, format_taxonomy, to_json
//! @ai:module:depends_on api_error, kind, wire
//! @ai:module:stateless true

use crate::api_error::ApiError;
use crate::kind::ErrorKind;
use crate::wire::{kebab_case, JsonOptions};
use colored::Colorize;
use serde::Serialize;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent One row of the kind table as printed by `apierr kinds`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KindRow {
    kind: ErrorKind,
    name: String,
    status_code: u16,
    message: Option<&'static str>,
}

/// @ai:intent Format an API error as a string
/// @ai:effects pure
pub fn format_error(error: &ApiError, format: OutputFormat, options: &JsonOptions) -> String {
    match format {
        OutputFormat::Json => to_json(&error.to_json(options), false),
        OutputFormat::JsonPretty => to_json(&error.to_json(options), true),
        OutputFormat::Text => format_error_text(error, options),
    }
}

/// @ai:intent Format an API error as human-readable text
/// @ai:effects pure
fn format_error_text(error: &ApiError, options: &JsonOptions) -> String {
    let wire = error.to_json(options);
    let mut output = String::new();

    let status = error.status_code();
    let status_str = if status.is_server_error() {
        status.to_string().red().bold()
    } else {
        status.to_string().yellow().bold()
    };

    output.push_str(&format!(
        "{} {} - {}\n",
        status_str,
        wire.name.cyan(),
        wire.message
    ));

    if let Some(entity) = &wire.entity {
        output.push_str(&format!("  entity: {}\n", entity));
    }

    if let Some(key_path) = &wire.key_path {
        output.push_str(&format!("  keyPath: {}\n", key_path));
    }

    if let Some(origin) = error.origin() {
        output.push_str(&format!("  origin: {}\n", origin.dimmed()));
    }

    if let Some(frames) = &wire.stack {
        output.push_str(&format!("  stack ({} frames):\n", frames.len()));

        for frame in frames {
            let function = frame.function.as_deref().unwrap_or("<anonymous>");
            match (&frame.file, frame.line) {
                (Some(file), Some(line)) => output.push_str(&format!(
                    "    at {} ({}:{})\n",
                    function,
                    file.dimmed(),
                    line
                )),
                _ => output.push_str(&format!("    at {}\n", function)),
            }
        }
    }

    output
}

/// @ai:intent Format the table of built-in kinds
/// @ai:effects pure
pub fn format_taxonomy(format: OutputFormat) -> String {
    let rows: Vec<KindRow> = ErrorKind::ALL
        .into_iter()
        .map(|kind| {
            let defaults = kind.defaults();
            KindRow {
                kind,
                name: kebab_case(defaults.name),
                status_code: defaults.status_code.as_u16(),
                message: defaults.message,
            }
        })
        .collect();

    match format {
        OutputFormat::Json => to_json(&rows, false),
        OutputFormat::JsonPretty => to_json(&rows, true),
        OutputFormat::Text => format_taxonomy_text(&rows),
    }
}

/// @ai:intent Format the kind table as aligned text
/// @ai:effects pure
fn format_taxonomy_text(rows: &[KindRow]) -> String {
    let mut output = String::new();

    for row in rows {
        output.push_str(&format!(
            "{} {:<20} {:<22} {}\n",
            row.status_code.to_string().bold(),
            row.kind.id().cyan(),
            row.name,
            row.message.unwrap_or("(message required)").dimmed()
        ));
    }

    output
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        serde_json::to_string(value).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ErrorOptions;

    #[test]
    fn test_format_error_json() {
        let err = ApiError::not_found(("Widget missing", ErrorOptions::new().entity("widget")));
        let out = format_error(&err, OutputFormat::Json, &JsonOptions::default());
        assert_eq!(
            out,
            r#"{"name":"not-found","message":"Widget missing","entity":"widget"}"#
        );
    }

    #[test]
    fn test_format_error_text() {
        colored::control::set_override(false);
        let err = ApiError::bad_request(
            ErrorOptions::new().key_path("items.0.id").origin("checkout"),
        );
        let out = format_error(&err, OutputFormat::Text, &JsonOptions::default());

        assert!(out.starts_with("400 bad-request - Bad request."));
        assert!(out.contains("keyPath: items.0.id"));
        assert!(out.contains("origin: checkout"));
        assert!(!out.contains("stack"));
    }

    #[test]
    fn test_format_taxonomy_json() {
        let out = format_taxonomy(OutputFormat::Json);
        let rows: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();

        assert_eq!(rows.len(), ErrorKind::ALL.len());
        let conflict = rows.iter().find(|r| r["kind"] == "conflict").unwrap();
        assert_eq!(conflict["statusCode"], 409);
        assert_eq!(conflict["name"], "already-exists");
    }

    #[test]
    fn test_taxonomy_kind_matches_cli_id() {
        let out = format_taxonomy(OutputFormat::Json);
        let rows: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();

        for (row, kind) in rows.iter().zip(ErrorKind::ALL) {
            assert_eq!(row["kind"], kind.id());
            assert_eq!(row["kind"].as_str().unwrap().parse::<ErrorKind>().unwrap(), kind);
        }
    }
}
