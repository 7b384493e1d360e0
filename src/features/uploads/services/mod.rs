mod page_service;
mod upload_service;

pub use page_service::PageService;
pub use upload_service::UploadService;
