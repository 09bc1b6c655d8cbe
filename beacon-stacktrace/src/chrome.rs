//! V8-style frame builder (Chrome, Internet Explorer).
//!
//! ```text
//! TypeError: boom
//!     at foo (http://host/app.js:10:5)
//!     at http://host/app.js:1:1
//! ```
//!
//! The first line is the error header and carries no frame. Every following
//! non-empty line is one frame: the leading `at` marker is discarded, the
//! last remaining token is the location (parentheses stripped), and the
//! token before it, if any, is the function name.

use crate::frame::StackFrame;
use crate::location::{Location, extract_location};

pub(crate) fn parse_frames(stack: &str) -> Vec<StackFrame> {
    stack
        .split('\n')
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(level, line)| {
            let mut tokens: Vec<&str> = line.trim_start().split_whitespace().skip(1).collect();

            let location = match tokens.pop() {
                Some(token) => extract_location(&token.replace(['(', ')'], "")),
                // No location-shaped token at all; emit placeholders rather
                // than failing the whole parse.
                None => Location::unknown(),
            };

            let function_name = match tokens.first() {
                Some(&name) if !name.is_empty() && name != "Anonymous" => name.to_owned(),
                _ => "unknown".to_owned(),
            };

            StackFrame {
                function_name: Some(function_name),
                args: None,
                file_name: location.file,
                line_number: location.line,
                column_number: location.column,
                level,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(stack: &str) -> Vec<StackFrame> {
        parse_frames(stack)
    }

    #[test]
    fn named_and_bare_location_frames() {
        let frames = parse(
            "Error: boom\n    at foo (app.js:10:5)\n    at app.js:1:1",
        );

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].function_name.as_deref(), Some("foo"));
        assert_eq!(frames[0].file_name.as_deref(), Some("app.js"));
        assert_eq!(frames[0].line_number.as_deref(), Some("10"));
        assert_eq!(frames[0].column_number.as_deref(), Some("5"));
        assert_eq!(frames[0].level, 0);

        // Location-only frame: the single token is the location, so the
        // function name normalizes to "unknown".
        assert_eq!(frames[1].function_name.as_deref(), Some("unknown"));
        assert_eq!(frames[1].file_name.as_deref(), Some("app.js"));
        assert_eq!(frames[1].level, 1);
    }

    #[test]
    fn anonymous_placeholder_normalizes_to_unknown() {
        let frames = parse("Error: x\n    at Anonymous (app.js:2:3)");
        assert_eq!(frames[0].function_name.as_deref(), Some("unknown"));
    }

    #[test]
    fn missing_column_is_absent() {
        let frames = parse("Error: x\n    at bar (app.js:1)");
        assert_eq!(frames[0].line_number.as_deref(), Some("1"));
        assert_eq!(frames[0].column_number, None);
    }

    #[test]
    fn native_frame_degrades_to_empty_location() {
        let frames = parse("Error: x\n    at foo (native)");
        assert_eq!(frames[0].function_name.as_deref(), Some("foo"));
        assert_eq!(frames[0].file_name, None);
        assert_eq!(frames[0].line_number, None);
    }

    #[test]
    fn trailing_newline_produces_no_phantom_frame() {
        let frames = parse("Error: x\n    at foo (app.js:1:2)\n");
        assert_eq!(frames.len(), 1);
    }
}
