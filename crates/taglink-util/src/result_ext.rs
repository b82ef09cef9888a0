use std::fmt::Display;

pub trait ResultExt<T, InitialError> {
    /// Map an error to a string-based error variant
    ///
    /// Converts `Result<T, InitialError>` to `Result<T, FinalError>` where `FinalError` has a variant
    /// that takes a String, using the Display implementation of `InitialError`.
    ///
    /// # Example
    /// ```rust
    /// use taglink_util::result_ext::ResultExt;
    ///
    /// #[derive(Debug, thiserror::Error)]
    /// enum PayloadError {
    ///     #[error("payload is not utf8: {0}")]
    ///     NotUtf8(String),
    /// }
    ///
    /// fn payload_text(payload: Vec<u8>) -> Result<String, PayloadError> {
    ///     String::from_utf8(payload).map_err_str(PayloadError::NotUtf8)
    /// }
    ///
    /// assert!(payload_text(vec![0xC3, 0x28]).is_err());
    /// ```
    fn map_err_str<FinalError, F>(self, f: F) -> Result<T, FinalError>
    where
        InitialError: Display,
        F: FnOnce(String) -> FinalError;
}

impl<Type, InitialError> ResultExt<Type, InitialError> for Result<Type, InitialError> {
    fn map_err_str<FinalError, F>(self, f: F) -> Result<Type, FinalError>
    where
        InitialError: Display,
        F: FnOnce(String) -> FinalError,
    {
        self.map_err(|e| f(e.to_string()))
    }
}
