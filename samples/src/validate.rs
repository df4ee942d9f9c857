use std::path::PathBuf;

/// Rejections raised while parsing command-line values, before any remote call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("must refer to a gs:// path")]
    NotGcsPath,
    #[error("must refer to an existing file")]
    FileNotFound,
    #[error("should be a positive integer (found {0})")]
    NotPositiveInteger(String),
    #[error("must be 'UTF-8' or 'ISO-8859-1' (found {0})")]
    UnsupportedEncoding(String),
}

/// Cloud Storage source of a load job.
pub fn gcs_uri(value: &str) -> Result<String, ValidationError> {
    if value.is_empty() || !value.starts_with("gs://") {
        return Err(ValidationError::NotGcsPath);
    }
    Ok(value.to_string())
}

pub fn existing_file(value: &str) -> Result<PathBuf, ValidationError> {
    let path = PathBuf::from(value);
    if value.is_empty() || !path.exists() {
        return Err(ValidationError::FileNotFound);
    }
    Ok(path)
}

/// Accepts zero and above.
pub fn positive_integer(value: &str) -> Result<i64, ValidationError> {
    match value.trim().parse::<i64>() {
        Ok(v) if v >= 0 => Ok(v),
        _ => Err(ValidationError::NotPositiveInteger(value.to_string())),
    }
}

pub fn encoding(value: &str) -> Result<String, ValidationError> {
    match value {
        "UTF-8" | "ISO-8859-1" => Ok(value.to_string()),
        _ => Err(ValidationError::UnsupportedEncoding(value.to_string())),
    }
}
