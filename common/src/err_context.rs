//! A module for attaching a human readable context to an error.

/// Some context, and the error (E) it describes.
#[derive(Debug)]
pub struct ErrorContext<E>(pub String, pub E);

/// Extends `Result` with `context` methods, so that lower level errors can be turned into
/// one of our error enums with `?`, provided that enum implements `From<ErrorContext<E>>`.
pub trait ErrorContextExt<T, E> {
    fn context<C: AsRef<str>>(self, c: C) -> Result<T, ErrorContext<E>>;

    /// Same as `context`, but the context is only built on the error path.
    fn with_context<C: AsRef<str>, F: FnOnce() -> C>(self, f: F) -> Result<T, ErrorContext<E>>;
}

impl<T, E> ErrorContextExt<T, E> for Result<T, E> {
    fn context<C: AsRef<str>>(self, c: C) -> Result<T, ErrorContext<E>> {
        self.map_err(|e| ErrorContext(c.as_ref().to_string(), e))
    }

    fn with_context<C: AsRef<str>, F: FnOnce() -> C>(self, f: F) -> Result<T, ErrorContext<E>> {
        self.map_err(|e| ErrorContext(f().as_ref().to_string(), e))
    }
}
