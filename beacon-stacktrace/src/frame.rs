use serde::{Deserialize, Serialize};

/// One entry in a parsed call stack, representing a single function
/// invocation.
///
/// Frames serialize with camelCase field names and absent fields omitted,
/// matching the wire schema the surrounding telemetry payload embeds them in.
///
/// # Examples
///
/// ```rust
/// use beacon_stacktrace::{ErrorLike, parse};
///
/// let frames = parse(&ErrorLike::from_stack(
///     "Error: x\n    at foo (app.js:10:5)",
/// ))
/// .unwrap();
///
/// let json = serde_json::to_value(&frames[0]).unwrap();
/// assert_eq!(json["functionName"], "foo");
/// assert_eq!(json["columnNumber"], "5");
/// assert_eq!(json["level"], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    /// The unqualified function or method name. Strategies that cannot
    /// recover a name either normalize it to `"unknown"` (V8-style,
    /// SpiderMonkey/WebKit-style) or leave it absent (legacy Opera).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,

    /// Argument expressions as they appeared in the source line.
    ///
    /// `None` means the engine did not include an argument list at all;
    /// `Some(vec![])` means it included an explicitly empty one. Only the
    /// newest legacy Opera generation ever populates this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    /// The file or URL component of the location token; the literal
    /// `"unknown"` when no location-shaped token was found on the line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// The line number, kept string-encoded as extracted from the text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<String>,

    /// The column number, absent for formats that omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_number: Option<String>,

    /// Zero-based index of the frame in the trace, outermost call first.
    ///
    /// Strictly increasing within one parse, with one deliberate exception:
    /// the two oldest legacy Opera generations reset the counter for every
    /// frame, so all of their frames report 0. That matches the numbering
    /// those generations have always produced, which downstream consumers
    /// may rely on.
    pub level: usize,
}
