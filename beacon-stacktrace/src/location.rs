/// The file, line, and column components of a location token, any of which
/// may be absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    /// The path or URL portion of the token.
    pub file: Option<String>,

    /// The line number, string-encoded.
    pub line: Option<String>,

    /// The column number, string-encoded.
    pub column: Option<String>,
}

impl Location {
    /// The placeholder emitted when a frame line carried no location-shaped
    /// token at all.
    pub(crate) fn unknown() -> Self {
        Self {
            file: Some("unknown".to_owned()),
            line: Some("unknown".to_owned()),
            column: Some("unknown".to_owned()),
        }
    }
}

/// Separates line and column numbers from a URL-like token.
///
/// Splits `token` on `:` and works backwards from the end: the last segment
/// is popped as a candidate trailing number, and the segment before it
/// decides how to interpret it. If that segment parses as a finite decimal
/// number it must be the line, making the popped segment the column;
/// otherwise the popped segment is itself the line and there is no column.
/// This asymmetric lookback exists because some formats omit the column.
///
/// Tokens without any `:` (such as `"(native)"`) short-circuit to an empty
/// [`Location`].
///
/// # Examples
///
/// ```rust
/// use beacon_stacktrace::extract_location;
///
/// let location = extract_location("http://host/app.js:10:5");
/// assert_eq!(location.file.as_deref(), Some("http://host/app.js"));
/// assert_eq!(location.line.as_deref(), Some("10"));
/// assert_eq!(location.column.as_deref(), Some("5"));
///
/// assert_eq!(extract_location("(native)"), Default::default());
/// ```
pub fn extract_location(token: &str) -> Location {
    // Guard against tokens like "(native)".
    if !token.contains(':') {
        return Location::default();
    }

    let mut parts: Vec<&str> = token.split(':').collect();
    let Some(last_number) = parts.pop() else {
        return Location::default();
    };

    let is_line_column = parts
        .last()
        .is_some_and(|segment| segment.parse::<f64>().is_ok_and(f64::is_finite));

    if is_line_column {
        let line = parts.pop().unwrap_or_default();
        Location {
            file: Some(parts.join(":")),
            line: Some(line.to_owned()),
            column: Some(last_number.to_owned()),
        }
    } else {
        Location {
            file: Some(parts.join(":")),
            line: Some(last_number.to_owned()),
            column: None,
        }
    }
}
