use std::io;
use std::sync::Arc;

use axum::body::Bytes;
use futures::{Stream, StreamExt};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::core::error::{AppError, Result};
use crate::features::uploads::models::StoredFile;
use crate::modules::storage::naming::{client_basename, extension_of, generate_name};
use crate::modules::storage::{LocalDiskStorage, RandomSource};

/// Service for storing uploaded files under generated names
pub struct UploadService {
    storage: LocalDiskStorage,
    random: Arc<dyn RandomSource>,
    url_prefix: String,
}

impl UploadService {
    /// Fresh names drawn before giving up when every candidate is taken
    const MAX_NAME_ATTEMPTS: usize = 8;

    pub fn new(
        storage: LocalDiskStorage,
        random: Arc<dyn RandomSource>,
        url_prefix: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            random,
            url_prefix: url_prefix.into(),
        }
    }

    pub fn storage(&self) -> &LocalDiskStorage {
        &self.storage
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Public URL a stored file name is served under
    pub fn access_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.url_prefix, file_name)
    }

    /// Stream an uploaded file to disk under a generated name
    ///
    /// # Arguments
    /// * `original_filename` - The filename supplied by the client
    /// * `data` - The file content as a stream of chunks
    ///
    /// # Returns
    /// The stored file once every chunk has been written and flushed
    pub async fn store<S, E>(&self, original_filename: &str, data: S) -> Result<StoredFile>
    where
        S: Stream<Item = std::result::Result<Bytes, E>>,
        AppError: From<E>,
    {
        let basename = client_basename(original_filename);
        let extension = extension_of(basename);

        self.storage.ensure_root().await?;
        let (generated_name, mut file) = self.create_unique(extension).await?;
        let file_name = format!("{}{}", generated_name, extension);

        let size = match write_stream(&mut file, data).await {
            Ok(size) => size,
            Err(e) => {
                drop(file);
                self.storage.discard(&file_name).await;
                return Err(e);
            }
        };

        info!(
            "File stored: name={}, original={}, size={}",
            file_name, basename, size
        );

        Ok(StoredFile {
            storage_path: self.storage.path_for(&file_name),
            access_url: self.access_url(&file_name),
            generated_name,
            extension: extension.to_string(),
            original_filename: basename.to_string(),
            size,
        })
    }

    /// Remove a file stored earlier in a request that was then rejected
    pub async fn discard(&self, file: &StoredFile) {
        self.storage.discard(&file.file_name()).await;
    }

    /// Draw names until one is free on disk and open it for writing
    async fn create_unique(&self, extension: &str) -> Result<(String, File)> {
        for attempt in 1..=Self::MAX_NAME_ATTEMPTS {
            let generated_name = generate_name(self.random.as_ref());
            let file_name = format!("{}{}", generated_name, extension);

            match self.storage.create_new(&file_name).await {
                Ok(file) => return Ok((generated_name, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    warn!(
                        "Generated name already taken: {} (attempt {}/{})",
                        file_name,
                        attempt,
                        Self::MAX_NAME_ATTEMPTS
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::Internal(format!(
            "No free file name after {} attempts",
            Self::MAX_NAME_ATTEMPTS
        )))
    }
}

/// Write every chunk, then flush. Returns the number of bytes written.
async fn write_stream<S, E>(file: &mut File, data: S) -> Result<u64>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    AppError: From<E>,
{
    let mut data = std::pin::pin!(data);
    let mut written: u64 = 0;

    while let Some(chunk) = data.next().await {
        let chunk = chunk.map_err(|e| {
            let err = AppError::from(e);
            debug!("Failed to read file chunk: {}", err);
            err
        })?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}
