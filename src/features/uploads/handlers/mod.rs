mod upload_handler;

pub use upload_handler::{index_page, upload_file};
