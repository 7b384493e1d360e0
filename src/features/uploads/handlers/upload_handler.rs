use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Html,
};
use tracing::debug;

use crate::core::error::AppError;
use crate::features::uploads::models::{StoredFile, UploadOutcome};
use crate::features::uploads::routes::UploadState;
use crate::features::uploads::services::UploadService;
use crate::modules::storage::naming::client_basename;
use crate::shared::constants::UPLOAD_FIELD;

/// Upload form page
pub async fn index_page(State(state): State<UploadState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.pages.render_index()?))
}

/// Upload a file
///
/// Accepts multipart/form-data with:
/// - `file`: The file to upload
///
/// A request without a file (or without a multipart body at all) renders the
/// "no file uploaded" page with a success status.
pub async fn upload_file(
    State(state): State<UploadState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Html<String>, AppError> {
    let outcome = match multipart {
        Ok(mut multipart) => receive_upload(&state.uploads, &mut multipart).await?,
        Err(rejection) => {
            debug!("Request body is not multipart: {}", rejection);
            UploadOutcome::NoFile
        }
    };

    match &outcome {
        UploadOutcome::Stored(file) => debug!(
            "Upload stored at {} ({} bytes, original name {:?})",
            file.storage_path.display(),
            file.size,
            file.original_filename
        ),
        UploadOutcome::NoFile => debug!("Upload request carried no file"),
    }

    Ok(Html(state.pages.render_upload(&outcome)?))
}

/// Walk the multipart body and store the single `file` part.
///
/// If the request is rejected after the file was written, the file is
/// removed again.
async fn receive_upload(
    service: &UploadService,
    multipart: &mut Multipart,
) -> Result<UploadOutcome, AppError> {
    let mut stored: Option<StoredFile> = None;

    if let Err(e) = collect_file_part(service, multipart, &mut stored).await {
        if let Some(file) = stored.take() {
            service.discard(&file).await;
        }
        return Err(e);
    }

    Ok(match stored {
        Some(file) => UploadOutcome::Stored(file),
        None => UploadOutcome::NoFile,
    })
}

async fn collect_file_part(
    service: &UploadService,
    multipart: &mut Multipart,
    stored: &mut Option<StoredFile>,
) -> Result<(), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::from(e)
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        let file_name = match field.file_name() {
            Some(name) if !client_basename(name).is_empty() => name.to_string(),
            Some(_) => {
                // Browsers send an empty filename when nothing was chosen
                debug!("Skipping file field without a filename: {}", field_name);
                continue;
            }
            None => {
                debug!("Ignoring text field: {}", field_name);
                continue;
            }
        };

        if field_name != UPLOAD_FIELD || stored.is_some() {
            return Err(AppError::BadRequest(format!(
                "Unexpected field: {}",
                field_name
            )));
        }

        *stored = Some(service.store(&file_name, field).await?);
    }

    Ok(())
}
