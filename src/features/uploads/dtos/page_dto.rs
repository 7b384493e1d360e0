use serde::Serialize;

use crate::core::config::SiteConfig;

/// Site-wide values shared by every page
#[derive(Debug, Serialize)]
pub struct SiteDto<'a> {
    pub title: &'a str,
    pub background_image: &'a str,
    pub background_blur: &'a str,
}

impl<'a> From<&'a SiteConfig> for SiteDto<'a> {
    fn from(site: &'a SiteConfig) -> Self {
        Self {
            title: &site.title,
            background_image: &site.background_image,
            background_blur: &site.background_blur,
        }
    }
}

/// Template context for the form page and the upload result page
#[derive(Debug, Serialize)]
pub struct PageDto<'a> {
    pub site: SiteDto<'a>,
    pub upload_action: &'a str,
    pub field_name: &'a str,
    pub choose_label: &'a str,
    pub form_class: &'a str,
    pub access_url: Option<&'a str>,
    pub error: Option<&'a str>,
}
