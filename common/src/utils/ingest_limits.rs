use std::path::Path;

use super::config::AppConfig;

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/gif",
];

pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "pptx", "png", "jpg", "jpeg", "webp", "gif"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestValidationError {
    PayloadTooLarge(String),
    UnsupportedType(String),
    BadRequest(String),
}

pub fn validate_material_upload(
    config: &AppConfig,
    file_name: &str,
    mime_type: &str,
    size_bytes: usize,
) -> Result<(), IngestValidationError> {
    if size_bytes == 0 {
        return Err(IngestValidationError::BadRequest(
            "Uploaded file is empty".to_string(),
        ));
    }

    if size_bytes > config.max_material_bytes {
        return Err(IngestValidationError::PayloadTooLarge(format!(
            "File is too large. Maximum allowed is {} bytes",
            config.max_material_bytes
        )));
    }

    let mime = mime_type.trim().to_ascii_lowercase();
    if !ALLOWED_MIME_TYPES.contains(&mime.as_str()) {
        return Err(IngestValidationError::UnsupportedType(format!(
            "Unsupported file type '{mime_type}'"
        )));
    }

    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(IngestValidationError::UnsupportedType(format!(
            "Unsupported file extension for '{file_name}'"
        )));
    }

    Ok(())
}
