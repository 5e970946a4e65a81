/// Domain-level errors raised while interpreting client input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A required field is missing or a field cannot be read as its declared type.
    #[error("Invalid parameter format: {field}")]
    InvalidParameter { field: &'static str },

    /// The create operation requires an image and none was supplied.
    #[error("An image file is required")]
    MissingImage,
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidParameter`].
    pub fn invalid(field: &'static str) -> Self {
        Self::InvalidParameter { field }
    }
}
