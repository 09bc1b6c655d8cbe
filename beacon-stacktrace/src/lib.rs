//! # `beacon-stacktrace`
//!
//! Converts the free-form, engine-specific text found in an error's stack
//! property into a normalized sequence of call-frame records.
//!
//! Browsers never agreed on a stack-trace text format. V8 indents frames with
//! `    at `, SpiderMonkey and JavaScriptCore join name and location with `@`,
//! and legacy Opera went through three different line-oriented formats of its
//! own. This crate classifies an error-like value by the shape of its fields
//! and the signature of its stack text, then dispatches to exactly one
//! format-specific frame builder.
//!
//! The parser is best-effort by design: an unrecognized format yields
//! [`None`], a malformed location token degrades to `"unknown"` placeholders,
//! and a line that doesn't match its format's pattern is skipped. Nothing in
//! here ever returns an error to the caller: a failure to parse a stack
//! trace must not itself become an unhandled error in the exception-tracking
//! pipeline that calls it.
//!
//! ## Basic Usage
//!
//! ```rust
//! use beacon_stacktrace::{ErrorLike, parse};
//!
//! let error = ErrorLike {
//!     stack: Some("Error: boom\n    at foo (app.js:10:5)\n    at bar (app.js:1)"),
//!     ..ErrorLike::default()
//! };
//!
//! let frames = parse(&error).expect("recognized V8-style trace");
//! assert_eq!(frames.len(), 2);
//! assert_eq!(frames[0].function_name.as_deref(), Some("foo"));
//! assert_eq!(frames[0].line_number.as_deref(), Some("10"));
//! ```
//!
//! ## Output contract
//!
//! [`parse`] returning [`None`] means "format unrecognized"; callers use this
//! to decide whether a full stack was available at all. A `Some` result with
//! zero frames means the format was recognized but no frame lines were
//! present. The two cases are deliberately distinct.

#![forbid(unsafe_code)]

mod chrome;
mod classify;
mod error_like;
mod firefox;
mod frame;
mod location;
mod opera;

pub use classify::{StackFormat, classify};
pub use error_like::ErrorLike;
pub use frame::StackFrame;
pub use location::{Location, extract_location};

/// Extracts as much structured information as possible from an error-like
/// value.
///
/// Classifies the input (see [`classify`]) and runs the matching
/// format-specific frame builder. Frames are emitted in the order they appear
/// in the source text, top of the call stack first, with strictly increasing
/// `level` indices within one call (except for the two oldest legacy Opera
/// generations, which preserve the numbering observed in production; see
/// [`StackFrame::level`]).
///
/// Returns [`None`] when the input carries none of the recognized stack
/// fields or its stack text matches no known signature.
///
/// This is a pure function: no I/O, no shared state, reparsing the same
/// input yields a structurally identical result.
pub fn parse(error: &ErrorLike<'_>) -> Option<Vec<StackFrame>> {
    Some(match classify(error)? {
        StackFormat::Opera => opera::parse_frames(error),
        StackFormat::ChromeIe => chrome::parse_frames(error.stack.unwrap_or_default()),
        StackFormat::FirefoxSafari => firefox::parse_frames(error.stack.unwrap_or_default()),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn absent_stack_fields_yield_none() {
        assert!(parse(&ErrorLike::default()).is_none());

        let message_only = ErrorLike {
            message: Some("boom"),
            ..ErrorLike::default()
        };
        assert!(parse(&message_only).is_none());
    }

    #[test]
    fn reparsing_is_idempotent() {
        let error = ErrorLike {
            stack: Some("Error: x\n    at foo (app.js:10:5)\nfoo@app.js:3:2"),
            ..ErrorLike::default()
        };

        assert_eq!(parse(&error), parse(&error));
    }

    #[test]
    fn header_only_trace_parses_to_zero_frames() {
        // Recognized format, no frame lines: distinct from an unrecognized
        // input, which yields None.
        let error = ErrorLike {
            stack: Some("Error: thrown at startup"),
            ..ErrorLike::default()
        };

        assert_eq!(classify(&error), Some(StackFormat::ChromeIe));
        let frames = parse(&error).expect("classified as V8-style");
        assert_eq!(frames, Vec::new());
    }
}
