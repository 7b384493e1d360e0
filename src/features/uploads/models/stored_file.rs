use std::path::PathBuf;

/// A file written to the storage directory by one upload request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Lowercase hex identifier, independent of the client filename
    pub generated_name: String,
    /// Extension of the client filename, leading dot included (may be empty)
    pub extension: String,
    /// Client basename as submitted; informational only
    pub original_filename: String,
    pub size: u64,
    pub storage_path: PathBuf,
    pub access_url: String,
}

impl StoredFile {
    /// Name of the file inside the storage directory
    pub fn file_name(&self) -> String {
        format!("{}{}", self.generated_name, self.extension)
    }
}

/// What an upload request produced.
///
/// A request without a file part is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Stored(StoredFile),
    NoFile,
}
