use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckTreeError>;

/// Failures at the text boundary of the state model.
///
/// Building, cascading and enriching never fail: unknown keys degrade to
/// "unchecked" or a no-op. Only decoding a forest from text and encoding a
/// snapshot to text can go wrong.
#[derive(Debug, Error)]
pub enum CheckTreeError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::CheckTreeError;

    #[test]
    fn json_error_is_wrapped_with_context() {
        let inner = serde_json::from_str::<Vec<u8>>("nope").expect_err("invalid json");
        let error = CheckTreeError::from(inner);
        assert!(error.to_string().starts_with("JSON error: "));
    }
}
