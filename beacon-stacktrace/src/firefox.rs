//! SpiderMonkey/WebKit-style frame builder (Firefox, Safari).
//!
//! ```text
//! foo@http://host/app.js:10:5
//! bar@http://host/app.js:1
//! @http://host/app.js:42:1
//! ```
//!
//! Some engines interleave non-frame lines, so only lines carrying a
//! `file:line`-shaped token are kept. Everything after the last `@` is the
//! location token; the segment before the first `@` is the function name,
//! defaulting to `"unknown"` when empty.

use crate::classify::FIREFOX_SAFARI_SIGNATURE;
use crate::frame::StackFrame;
use crate::location::extract_location;

pub(crate) fn parse_frames(stack: &str) -> Vec<StackFrame> {
    stack
        .split('\n')
        .filter(|line| FIREFOX_SAFARI_SIGNATURE.is_match(line))
        .enumerate()
        .map(|(level, line)| {
            let mut tokens: Vec<&str> = line.split('@').collect();

            let location = tokens.pop().map(extract_location).unwrap_or_default();
            let function_name = match tokens.first() {
                Some(&name) if !name.is_empty() => name.to_owned(),
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
