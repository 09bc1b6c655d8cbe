use std::sync::LazyLock;

use regex::Regex;

use crate::ErrorLike;

/// Signature of a V8-style trace: frame lines indented and introduced by a
/// literal `at` marker.
///
/// These patterns are pattern-matches over observed engine output, not a
/// specification. They are kept exactly as tuned against production traces;
/// changing them changes which strategy an input reaches.
pub(crate) static CHROME_IE_SIGNATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+at ").expect("valid pattern"));

/// Signature of a SpiderMonkey/WebKit-style trace: a bare `file:line` token,
/// with `@` separating name from location instead of indentation.
pub(crate) static FIREFOX_SAFARI_SIGNATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+:\d+").expect("valid pattern"));

/// The stack-trace text conventions this crate can parse.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StackFormat {
    /// Legacy Opera, any of its three generations (dedicated `stacktrace`
    /// field or `opera#sourceloc` marker present).
    Opera,

    /// V8-style (`Chrome`, Internet Explorer): `    at name (file:line:col)`.
    ChromeIe,

    /// SpiderMonkey/WebKit-style (Firefox, Safari): `name@file:line:col`.
    FirefoxSafari,
}

/// Decides which parsing strategy applies to an error-like value.
///
/// First match wins, and the order matters because the signatures are not
/// mutually exclusive (a V8 trace also contains `file:line` shaped tokens):
///
/// 1. the legacy `stacktrace` field or source-location marker → [`StackFormat::Opera`],
/// 2. `stack` matching the indented-`at` signature → [`StackFormat::ChromeIe`],
/// 3. `stack` matching the bare `file:line` signature → [`StackFormat::FirefoxSafari`],
/// 4. otherwise [`None`], unrecognized.
///
/// Pure function of its input; no side effects.
///
/// # Examples
///
/// ```rust
/// use beacon_stacktrace::{ErrorLike, StackFormat, classify};
///
/// let error = ErrorLike::from_stack("foo@app.js:10:5");
/// assert_eq!(classify(&error), Some(StackFormat::FirefoxSafari));
///
/// assert_eq!(classify(&ErrorLike::default()), None);
/// ```
pub fn classify(error: &ErrorLike<'_>) -> Option<StackFormat> {
    if error.stacktrace.is_some() || error.source_location.is_some() {
        return Some(StackFormat::Opera);
    }

    let stack = error.stack?;
    if CHROME_IE_SIGNATURE.is_match(stack) {
        Some(StackFormat::ChromeIe)
    } else if FIREFOX_SAFARI_SIGNATURE.is_match(stack) {
        Some(StackFormat::FirefoxSafari)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn legacy_fields_win_over_stack_text() {
        // Opera 11 carries both a stacktrace field and an @-style stack; the
        // field decides, not the text.
        let error = ErrorLike {
            stack: Some("foo@app.js:10:5"),
            stacktrace: Some("called from line 1"),
            ..ErrorLike::default()
        };
        assert_eq!(classify(&error), Some(StackFormat::Opera));

        let error = ErrorLike {
            stack: Some("foo@app.js:10:5"),
            source_location: Some("app.js:10"),
            ..ErrorLike::default()
        };
        assert_eq!(classify(&error), Some(StackFormat::Opera));
    }

    #[test]
    fn indented_at_wins_over_bare_location_tokens() {
        // A V8 trace also contains file:line tokens; decision order keeps it
        // out of the SpiderMonkey strategy.
        let error =
            ErrorLike::from_stack("Error: x\n    at foo (app.js:10:5)\n    at app.js:1:1");
        assert_eq!(classify(&error), Some(StackFormat::ChromeIe));
    }

    #[test]
    fn unmatched_stack_text_is_unrecognized() {
        assert_eq!(classify(&ErrorLike::from_stack("no frames here")), None);
    }
}
