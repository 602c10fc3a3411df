//! The `// tsConfig: {...}` overlay header.
//!
//! A snippet may carry, within its leading comment block, a single line
//!
//! ```text
//! // tsConfig: {"strictNullChecks": false}
//! ```
//!
//! whose JSON object overrides checker options for that snippet only.

use snip_diagnostic::HarnessError;
use snip_ir::{OptionValue, Overlay};

use crate::comment::line_comment;
use crate::line_number;

/// Key that introduces the overlay inside the comment.
pub const OVERLAY_KEY: &str = "tsConfig:";

/// 0-based index of the overlay line, if the leading comment block has one.
///
/// The leading block ends at the first line that is neither blank nor a
/// whole-line `//` comment.
pub fn overlay_line_index(text: &str) -> Option<usize> {
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let comment = line_comment(line)?;
        if comment.body.trim_start().starts_with(OVERLAY_KEY) {
            return Some(index);
        }
    }
    None
}

/// Parse the overlay header, if present.
///
/// Only the JSON shape is checked here (an object of booleans and
/// strings). Option names are validated by the checker, which owns the
/// list of recognized options.
pub fn parse_overlay(text: &str) -> Result<Option<Overlay>, HarnessError> {
    let Some(index) = overlay_line_index(text) else {
        return Ok(None);
    };
    let line = line_number(index);
    let json = text
        .lines()
        .nth(index)
        .and_then(line_comment)
        .and_then(|c| c.body.trim().strip_prefix(OVERLAY_KEY))
        .map(str::trim)
        .unwrap_or_default();

    let value: serde_json::Value = serde_json::from_str(json).map_err(|e| {
        HarnessError::invocation(format!("invalid tsConfig overlay at line {line}: {e}"))
    })?;

    let serde_json::Value::Object(map) = value else {
        return Err(HarnessError::invocation(format!(
            "tsConfig overlay at line {line} must be a JSON object"
        )));
    };

    map.into_iter()
        .map(|(name, value)| match value {
            serde_json::Value::Bool(b) => Ok((name, OptionValue::Bool(b))),
            serde_json::Value::String(s) => Ok((name, OptionValue::Str(s))),
            other => Err(HarnessError::invocation(format!(
                "tsConfig option `{name}` at line {line} must be a boolean or string, found {other}"
            ))),
        })
        .collect::<Result<Overlay, _>>()
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use snip_diagnostic::ErrorKind;

    #[test]
    fn finds_overlay_in_leading_block() {
        let text = "// Item 7\n\n// tsConfig: {\"strictNullChecks\":false}\nlet x = 1;\n";
        assert_eq!(overlay_line_index(text), Some(2));
    }

    #[test]
    fn ignores_overlay_after_code() {
        let text = "let x = 1;\n// tsConfig: {\"strictNullChecks\":false}\n";
        assert_eq!(overlay_line_index(text), None);
    }

    #[test]
    fn parses_overlay_values() {
        let text = "// tsConfig: {\"strictNullChecks\":false,\"target\":\"es5\"}\nlet x = 1;\n";
        let overlay = parse_overlay(text).ok().flatten();
        let overlay = overlay.unwrap_or_default();
        assert_eq!(
            overlay.get("strictNullChecks"),
            Some(&OptionValue::Bool(false))
        );
        assert_eq!(
            overlay.get("target"),
            Some(&OptionValue::Str("es5".to_string()))
        );
    }

    #[test]
    fn no_overlay_is_none() {
        assert_eq!(parse_overlay("let x = 1;\n"), Ok(None));
    }

    #[test]
    fn invalid_json_is_invocation_error() {
        let err = parse_overlay("// tsConfig: {strictNullChecks: false}\n").err();
        assert_eq!(
            err.map(|e| e.kind()),
            Some(ErrorKind::CheckerInvocationError)
        );
    }

    #[test]
    fn numeric_value_is_rejected() {
        let err = parse_overlay("// tsConfig: {\"maxNodeModuleJsDepth\": 2}\n").err();
        assert!(err.is_some_and(|e| e.to_string().contains("maxNodeModuleJsDepth")));
    }
}
