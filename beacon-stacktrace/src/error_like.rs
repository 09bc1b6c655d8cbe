/// A borrowed view of an error-like value, as surfaced by a JavaScript
/// engine.
///
/// Which fields are populated depends entirely on the engine that produced
/// the error: V8 and SpiderMonkey put their trace text in `stack`, legacy
/// Opera used a separate `stacktrace` field (and, in its oldest generation,
/// embedded frame lines in the `message` itself) alongside an
/// `opera#sourceloc` marker.
///
/// The parser only ever reads these fields; it never mutates the input.
///
/// # Examples
///
/// ```rust
/// use beacon_stacktrace::ErrorLike;
///
/// let error = ErrorLike {
///     message: Some("boom"),
///     stack: Some("Error: boom\n    at foo (app.js:10:5)"),
///     ..ErrorLike::default()
/// };
/// assert!(error.stacktrace.is_none());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ErrorLike<'a> {
    /// The error message. May itself be multi-line; the oldest legacy Opera
    /// generation is parsed out of this field.
    pub message: Option<&'a str>,

    /// Engine-specific, multi-line, free-form stack text.
    pub stack: Option<&'a str>,

    /// Legacy Opera's alternate stack field.
    pub stacktrace: Option<&'a str>,

    /// Legacy Opera's source-location marker (`opera#sourceloc`). Only its
    /// presence is significant.
    pub source_location: Option<&'a str>,
}

impl<'a> ErrorLike<'a> {
    /// Creates an [`ErrorLike`] carrying only stack text, the common case
    /// for modern engines.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use beacon_stacktrace::ErrorLike;
    ///
    /// let error = ErrorLike::from_stack("Error: x\n    at foo (app.js:1:1)");
    /// assert!(error.stack.is_some());
    /// ```
    pub fn from_stack(stack: &'a str) -> Self {
        Self {
            stack: Some(stack),
            ..Self::default()
        }
    }
}
