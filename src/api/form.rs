//! Multipart form collection shared by the upload endpoints.

use std::collections::HashMap;

use axum::extract::{multipart::MultipartRejection, Multipart};

use crate::errors::AppError;

/// A file part of a multipart submission.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Text fields and file parts of a multipart submission, keyed by field name.
///
/// When a name repeats, the first occurrence wins.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// Collect a submission. A body that is not multipart yields an empty form,
    /// leaving the handler to report what is missing.
    pub async fn read(
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Self, AppError> {
        let mut form = FormData::default();

        let mut multipart = match multipart {
            Ok(multipart) => multipart,
            Err(rejection) => {
                tracing::debug!("Not a multipart body: {}", rejection.body_text());
                return Ok(form);
            }
        };

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::warn!("Multipart parsing error: {}", e);
            AppError::BadRequest(format!("Invalid multipart body: {}", e))
        })? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if let Some(file_name) = field.file_name().map(str::to_string) {
                let bytes = field.bytes().await.map_err(|e| {
                    tracing::warn!("Error reading file {}: {}", name, e);
                    AppError::BadRequest(format!("Invalid upload {}: {}", name, e))
                })?;
                form.files.entry(name).or_insert(UploadedFile {
                    file_name: Some(file_name),
                    bytes: bytes.to_vec(),
                });
            } else {
                let text = field.text().await.map_err(|e| {
                    tracing::warn!("Error reading field {}: {}", name, e);
                    AppError::BadRequest(format!("Invalid field {}: {}", name, e))
                })?;
                form.fields.entry(name).or_insert(text);
            }
        }

        Ok(form)
    }

    /// Non-empty text field.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).filter(|v| !v.is_empty()).cloned()
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

/// Parse an optional JSON-encoded list of strings, absent or empty meaning `[]`.
pub fn parse_string_list(field: &str, raw: Option<&str>) -> Result<Vec<String>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(raw).map_err(|e| {
            AppError::BadRequest(format!("{} must be a JSON array of strings: {}", field, e))
        }),
    }
}
