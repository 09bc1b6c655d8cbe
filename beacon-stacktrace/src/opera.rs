//! Legacy Opera frame builders, covering the three generations of the
//! format.
//!
//! The oldest generation (Opera 9 era) embedded frame lines in the error
//! message itself; the next one moved them to a dedicated `stacktrace`
//! field; from 10.65 on the `stack` text is nearly SpiderMonkey-shaped but
//! wraps anonymous functions in `<anonymous function: NAME>` and includes
//! argument lists. Which generation applies is decided by which fields are
//! populated and how their line counts compare.
//!
//! Lines that don't match their generation's pattern contribute no frame;
//! the parse itself never fails.

use std::sync::LazyLock;

use regex::Regex;

use crate::classify::FIREFOX_SAFARI_SIGNATURE;
use crate::error_like::ErrorLike;
use crate::frame::StackFrame;
use crate::location::extract_location;

// The textual patterns of the two line-oriented generations, kept exactly as
// tuned against observed traces.
static LINE_V9: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Line (\d+).*script (?:in )?(\S+)").expect("valid pattern"));
static LINE_V10: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Line (\d+).*script (?:in )?(\S+)(?:: In function (\S+))?$")
        .expect("valid pattern")
});

static ERROR_CREATED_AT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Error created at").expect("valid pattern"));
static ANONYMOUS_WRAPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<anonymous function(: (\w+))?>").expect("valid pattern"));
static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]*)\)").expect("valid pattern"));
static CALL_WITH_ARGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^(]+\(([^)]*)\)$").expect("valid pattern"));

/// Dispatches among the three generations.
///
/// More message lines than stacktrace lines means the frames live in the
/// message (oldest generation). A populated `stacktrace` without `stack`
/// is the middle generation; both fields populated is the newest.
pub(crate) fn parse_frames(error: &ErrorLike<'_>) -> Vec<StackFrame> {
    let message = error.message.unwrap_or_default();

    match error.stacktrace {
        None => parse_generation_9(message),
        Some(stacktrace)
            if message.contains('\n')
                && message.split('\n').count() > stacktrace.split('\n').count() =>
        {
            parse_generation_9(message)
        }
        Some(stacktrace) => match error.stack {
            None => parse_generation_10(stacktrace),
            Some(stack) => parse_generation_11(stack),
        },
    }
}

/// Oldest generation: frame lines interleaved in the message, starting at
/// line 2, one frame every second line.
fn parse_generation_9(message: &str) -> Vec<StackFrame> {
    let lines: Vec<&str> = message.split('\n').collect();
    let mut result = Vec::new();

    for line in lines.iter().skip(2).step_by(2) {
        if let Some(captures) = LINE_V9.captures(line) {
            // This generation has always numbered every frame 0; the counter
            // reset is kept as observed since consumers may depend on it.
            result.push(StackFrame {
                function_name: None,
                args: None,
                file_name: Some(captures[2].to_owned()),
                line_number: Some(captures[1].to_owned()),
                column_number: None,
                level: 0,
            });
        }
    }

    result
}

/// Middle generation: frames in the dedicated `stacktrace` field, one frame
/// every second line starting at the first.
fn parse_generation_10(stacktrace: &str) -> Vec<StackFrame> {
    let lines: Vec<&str> = stacktrace.split('\n').collect();
    let mut result = Vec::new();

    for line in lines.iter().step_by(2) {
        if let Some(captures) = LINE_V10.captures(line) {
            // Same observed frame numbering as the oldest generation.
            result.push(StackFrame {
                function_name: captures.get(3).map(|name| name.as_str().to_owned()),
                args: None,
                file_name: Some(captures[2].to_owned()),
                line_number: Some(captures[1].to_owned()),
                column_number: None,
                level: 0,
            });
        }
    }

    result
}

/// Newest generation (Opera 10.65+): `stack` text very close to the
/// SpiderMonkey shape, with extra normalization of the name segment and
/// argument-list extraction. The only strategy that ever populates `args`.
fn parse_generation_11(stack: &str) -> Vec<StackFrame> {
    stack
        .split('\n')
        .filter(|line| {
            FIREFOX_SAFARI_SIGNATURE.is_match(line) && !ERROR_CREATED_AT.is_match(line)
        })
        .enumerate()
        .map(|(level, line)| {
            let mut tokens: Vec<&str> = line.split('@').collect();

            let location = tokens.pop().map(extract_location).unwrap_or_default();
            let function_call = tokens.first().copied().unwrap_or("");

            let function_name = {
                let unwrapped = ANONYMOUS_WRAPPER.replace(function_call, "$2");
                let stripped = PARENTHESIZED.replace_all(unwrapped.as_ref(), "");
                (!stripped.is_empty()).then(|| stripped.into_owned())
            };

            let args_raw = PARENTHESIZED.is_match(function_call).then(|| {
                match CALL_WITH_ARGS.captures(function_call) {
                    Some(captures) => captures[1].to_owned(),
                    None => function_call.to_owned(),
                }
            });
            let args = match args_raw.as_deref() {
                None | Some("[arguments not available]") => None,
                Some("") => Some(Vec::new()),
                Some(raw) => Some(raw.split(',').map(str::to_owned).collect()),
            };

            StackFrame {
                function_name,
                args,
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
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn oldest_generation_walks_message_lines() {
        let error = ErrorLike {
            message: Some(indoc! {"
                Statement on line 44: Type mismatch
                Backtrace:
                  Line 44 of linked script http://host/app.js
                    discarded detail line
                  Line 31 of linked script http://host/main.js: In function dispatch
            "}),
            ..ErrorLike::default()
        };

        let frames = parse_frames(&error);

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].file_name.as_deref(), Some("http://host/app.js"));
        assert_eq!(frames[0].line_number.as_deref(), Some("44"));
        assert_eq!(frames[0].function_name, None);
        // Observed numbering: the counter resets for every frame.
        assert_eq!(frames[0].level, 0);
        assert_eq!(frames[1].level, 0);
    }

    #[test]
    fn message_with_more_lines_than_stacktrace_selects_oldest_generation() {
        let error = ErrorLike {
            message: Some("a\nb\nLine 3 of linked script app.js\nd"),
            stacktrace: Some("Line 3 of linked script app.js"),
            ..ErrorLike::default()
        };

        let frames = parse_frames(&error);

        // Frames came from the message walk, not the stacktrace field.
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].function_name, None);
        assert_eq!(frames[0].line_number.as_deref(), Some("3"));
    }

    #[test]
    fn middle_generation_reads_stacktrace_field() {
        let error = ErrorLike {
            message: Some("boom"),
            stacktrace: Some(indoc! {"
                Line 27 of linked script http://host/app.js: In function f
                  skipped
                Line 18 of inline script http://host/index.html
            "}),
            ..ErrorLike::default()
        };

        let frames = parse_frames(&error);

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].function_name.as_deref(), Some("f"));
        assert_eq!(frames[0].file_name.as_deref(), Some("http://host/app.js"));
        assert_eq!(frames[0].line_number.as_deref(), Some("27"));
        assert_eq!(frames[1].function_name, None);
        assert_eq!(frames[1].file_name.as_deref(), Some("http://host/index.html"));
        assert_eq!(frames[1].level, 0);
    }

    #[test]
    fn newest_generation_extracts_args_and_unwraps_anonymous_names() {
        let error = ErrorLike {
            message: Some("boom"),
            stack: Some(indoc! {"
                f(1,2)@http://host/app.js:21
                <anonymous function: g>([arguments not available])@http://host/app.js:8
                h()@http://host/app.js:3
                Error created at main@http://host/app.js:1
            "}),
            stacktrace: Some("boom trace"),
            ..ErrorLike::default()
        };

        let frames = parse_frames(&error);

        // The "Error created at" marker line is filtered out entirely.
        assert_eq!(frames.len(), 3);

        assert_eq!(frames[0].function_name.as_deref(), Some("f"));
        assert_eq!(
            frames[0].args,
            Some(vec!["1".to_owned(), "2".to_owned()])
        );
        assert_eq!(frames[0].line_number.as_deref(), Some("21"));
        assert_eq!(frames[0].level, 0);

        assert_eq!(frames[1].function_name.as_deref(), Some("g"));
        // "[arguments not available]" means absent, not empty.
        assert_eq!(frames[1].args, None);

        assert_eq!(frames[2].function_name.as_deref(), Some("h"));
        // Empty parens mean an explicitly empty argument list.
        assert_eq!(frames[2].args, Some(Vec::new()));
        assert_eq!(frames[2].level, 2);
    }

    #[test]
    fn unmatched_lines_contribute_no_frames() {
        let error = ErrorLike {
            message: Some("boom"),
            stacktrace: Some("nothing useful here\nat all"),
            ..ErrorLike::default()
        };

        assert_eq!(parse_frames(&error), Vec::new());
    }
}
