use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub storage: StorageConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for the upload request body. `None` disables the limit.
    pub upload_body_limit: Option<usize>,
}

/// Local disk storage for uploaded files
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Flat directory holding every stored file
    pub upload_dir: PathBuf,
    /// URL prefix the upload directory is mounted under (e.g. "/files")
    pub url_prefix: String,
    /// Directory with stylesheet, script and background image
    pub public_dir: PathBuf,
}

/// Presentation settings for the rendered pages
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub title: String,
    pub background_image: String,
    pub background_blur: String,
}

impl Config {
    /// Read configuration from the process environment. `.env` is loaded
    /// by the caller before logging starts.
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            app: AppConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            site: SiteConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let upload_body_limit = match env::var("UPLOAD_BODY_LIMIT") {
            Ok(value) if !value.trim().is_empty() => Some(
                value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| "UPLOAD_BODY_LIMIT must be a valid number".to_string())?,
            ),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            upload_body_limit,
        })
    }

    /// `host:port`, with IPv6 hosts bracketed so the result parses as a socket address
    pub fn server_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl StorageConfig {
    const DEFAULT_UPLOAD_DIR: &'static str = "files";
    const DEFAULT_URL_PREFIX: &'static str = "/files";
    const DEFAULT_PUBLIC_DIR: &'static str = "public";

    pub fn from_env() -> Result<Self, String> {
        let upload_dir = env::var("UPLOAD_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_UPLOAD_DIR.to_string());

        let url_prefix = normalize_url_prefix(
            &env::var("UPLOAD_URL_PREFIX").unwrap_or_else(|_| Self::DEFAULT_URL_PREFIX.to_string()),
        )?;

        let public_dir = env::var("PUBLIC_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_PUBLIC_DIR.to_string());

        Ok(Self {
            upload_dir: PathBuf::from(upload_dir),
            url_prefix,
            public_dir: PathBuf::from(public_dir),
        })
    }
}

impl SiteConfig {
    pub fn from_env() -> Result<Self, String> {
        let title = env::var("SITE_TITLE").unwrap_or_else(|_| "FarizGD Uploader".to_string());
        let background_image =
            env::var("BACKGROUND_IMAGE").unwrap_or_else(|_| "/bg.jpg".to_string());
        let background_blur = env::var("BACKGROUND_BLUR").unwrap_or_else(|_| "5px".to_string());

        Ok(Self {
            title,
            background_image,
            background_blur,
        })
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "FarizGD Uploader".to_string(),
            background_image: "/bg.jpg".to_string(),
            background_blur: "5px".to_string(),
        }
    }
}

/// Force a leading slash and strip trailing ones: "files/" -> "/files"
fn normalize_url_prefix(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err("UPLOAD_URL_PREFIX must not be empty or '/'".to_string());
    }
    Ok(format!("/{}", trimmed))
}
