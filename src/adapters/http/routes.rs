use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::StatusCode,
    Json,
};

use crate::adapters::http::{error::ApiError, state::HttpState};
use crate::application::dto::{DetectQuery, DetectResponse};
use crate::domain::errors::DomainError;

/// Campo multipart que trae la imagen.
pub const FILE_FIELD: &str = "file";

/// `POST /detect`: sube una imagen, devuelve las cajas de gatos y perros.
pub async fn detect(
    State(st): State<HttpState>,
    Query(query): Query<DetectQuery>,
    multipart: Multipart,
) -> Result<Json<DetectResponse>, ApiError> {
    let filter = query.filter()?;
    let bytes = read_upload(multipart, st.detection.max_upload_bytes()).await?;
    let response = st.detection.detect(Vec::from(bytes), filter).await?;
    Ok(Json(response))
}

/// El campo `file`, o si no existe, el primero que tenga nombre de archivo.
async fn read_upload(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<Bytes, ApiError> {
    let mut fallback: Option<Bytes> = None;
    let limit = |err: MultipartError| upload_error(err, max_upload_bytes);

    while let Some(field) = multipart.next_field().await.map_err(limit)? {
        let is_file_field = field.name() == Some(FILE_FIELD);
        let has_filename = field.file_name().is_some();

        if is_file_field {
            return field.bytes().await.map_err(limit);
        }
        if has_filename && fallback.is_none() {
            fallback = Some(field.bytes().await.map_err(limit)?);
        }
    }

    fallback.ok_or_else(|| {
        DomainError::InvalidInput(format!("multipart field '{FILE_FIELD}' is required")).into()
    })
}

/// Cuando el cuerpo supera el `DefaultBodyLimit`, axum solo dice "failed to read stream".
fn upload_error(err: MultipartError, max_upload_bytes: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("payload too large: upload exceeds {max_upload_bytes} bytes"),
        )
    } else {
        err.into()
    }
}
