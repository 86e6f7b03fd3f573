//! Multipart extraction for upload handlers.
//!
//! Isolates the named binary field, validates its declared content type
//! against the endpoint's allowlist, and spools the bytes: payloads stay in
//! memory up to a configured threshold, then spill to a scratch file and
//! continue streaming to disk. The whole request body is separately capped
//! by the router's body limit before this code runs.

use axum::extract::multipart::{Field, Multipart};
use bytes::Bytes;
use cliphost_core::AppError;
use cliphost_processing::StagedMedia;

/// An extracted upload payload together with its declared media type.
pub enum SpooledPayload {
    Memory {
        data: Bytes,
        content_type: String,
    },
    Staged {
        media: StagedMedia,
        content_type: String,
    },
}

impl SpooledPayload {
    pub fn content_type(&self) -> &str {
        match self {
            SpooledPayload::Memory { content_type, .. } => content_type,
            SpooledPayload::Staged { content_type, .. } => content_type,
        }
    }

    pub fn len(&self) -> u64 {
        match self {
            SpooledPayload::Memory { data, .. } => data.len() as u64,
            SpooledPayload::Staged { media, .. } => media.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materialize the full payload in memory (reads spilled bytes back).
    pub async fn into_bytes(self) -> Result<(Vec<u8>, String), AppError> {
        match self {
            SpooledPayload::Memory { data, content_type } => Ok((data.to_vec(), content_type)),
            SpooledPayload::Staged { media, content_type } => {
                Ok((media.read_all().await?, content_type))
            }
        }
    }

    /// Ensure the payload is staged on disk (the prober needs a file path).
    pub async fn into_staged(self) -> Result<(StagedMedia, String), AppError> {
        match self {
            SpooledPayload::Staged { media, content_type } => Ok((media, content_type)),
            SpooledPayload::Memory { data, content_type } => {
                let mut media = StagedMedia::create().await?;
                media.write_chunk(&data).await?;
                media.finish().await?;
                Ok((media, content_type))
            }
        }
    }
}

/// Normalize a MIME type by stripping parameters
/// (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}

/// Validate the declared content type of a field against an allowlist.
fn validate_field_content_type(
    field: &Field<'_>,
    field_name: &str,
    allowed_types: &[String],
) -> Result<String, AppError> {
    let declared = field
        .content_type()
        .map(normalize_media_type)
        .filter(|ct| !ct.is_empty())
        .ok_or_else(|| AppError::MissingContentType(field_name.to_string()))?;

    if !allowed_types.iter().any(|ct| declared == ct.to_lowercase()) {
        return Err(AppError::UnsupportedMediaType(format!(
            "Content type '{}' is not allowed for '{}'. Allowed types: {}",
            declared,
            field_name,
            allowed_types.join(", ")
        )));
    }

    Ok(declared)
}

/// Extract and spool the named file field from a multipart body.
///
/// Fields with other names are skipped. Content-type validation happens
/// before a single payload byte is buffered, so unsupported uploads are
/// rejected without staging or storage side effects.
pub async fn spool_media_field(
    multipart: &mut Multipart,
    field_name: &str,
    allowed_types: &[String],
    memory_threshold: usize,
    max_bytes: usize,
) -> Result<SpooledPayload, AppError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::MalformedMultipart(format!("Failed to read multipart body: {}", e)))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let content_type = validate_field_content_type(&field, field_name, allowed_types)?;

        let mut buffer: Vec<u8> = Vec::new();
        let mut staged: Option<StagedMedia> = None;
        let mut total: usize = 0;

        while let Some(chunk) = field.chunk().await.map_err(|e| {
            AppError::MalformedMultipart(format!("Failed to read field '{}': {}", field_name, e))
        })? {
            total += chunk.len();
            if total > max_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "Field '{}' exceeds the maximum of {} bytes",
                    field_name, max_bytes
                )));
            }

            match staged.as_mut() {
                Some(media) => media.write_chunk(&chunk).await?,
                None => {
                    buffer.extend_from_slice(&chunk);
                    if buffer.len() > memory_threshold {
                        let mut media = StagedMedia::create().await?;
                        media.write_chunk(&buffer).await?;
                        buffer.clear();
                        staged = Some(media);
                    }
                }
            }
        }

        return match staged {
            Some(mut media) => {
                media.finish().await?;
                tracing::debug!(
                    field = field_name,
                    size_bytes = total,
                    "Multipart field spilled to scratch file"
                );
                Ok(SpooledPayload::Staged {
                    media,
                    content_type,
                })
            }
            None => Ok(SpooledPayload::Memory {
                data: Bytes::from(buffer),
                content_type,
            }),
        };
    }

    Err(AppError::MalformedMultipart(format!(
        "Multipart body has no field named '{}'",
        field_name
    )))
}
