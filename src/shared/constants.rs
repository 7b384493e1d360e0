/// Multipart field name carrying the uploaded file
pub const UPLOAD_FIELD: &str = "file";

/// Random bytes per generated file name (7 bytes = 14 hex characters)
pub const GENERATED_NAME_BYTES: usize = 7;

/// Shown on the upload page when the request carried no file
pub const NO_FILE_MESSAGE: &str = "No file uploaded.";
