mod page_dto;

pub use page_dto::{PageDto, SiteDto};
