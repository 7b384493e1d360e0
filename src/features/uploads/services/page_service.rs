use crate::core::config::SiteConfig;
use crate::features::uploads::dtos::{PageDto, SiteDto};
use crate::features::uploads::models::UploadOutcome;
use crate::features::uploads::routes::UPLOAD_PATH;
use crate::shared::constants::{NO_FILE_MESSAGE, UPLOAD_FIELD};
use crate::shared::templates::{TemplateEngine, TemplateError};

/// Renders the upload form and the upload result pages
pub struct PageService {
    templates: TemplateEngine,
    site: SiteConfig,
}

impl PageService {
    pub fn new(templates: TemplateEngine, site: SiteConfig) -> Self {
        Self { templates, site }
    }

    pub fn render_index(&self) -> Result<String, TemplateError> {
        let page = self.page("Choose File", "", None, None);
        self.templates.render("index.html", &page)
    }

    /// Render the page shown after a POST to the upload endpoint
    pub fn render_upload(&self, outcome: &UploadOutcome) -> Result<String, TemplateError> {
        let page = match outcome {
            UploadOutcome::Stored(file) => {
                self.page("Choose Another File", "mt-20", Some(&file.access_url), None)
            }
            UploadOutcome::NoFile => self.page("Choose File", "", None, Some(NO_FILE_MESSAGE)),
        };
        self.templates.render("upload.html", &page)
    }

    fn page<'a>(
        &'a self,
        choose_label: &'a str,
        form_class: &'a str,
        access_url: Option<&'a str>,
        error: Option<&'a str>,
    ) -> PageDto<'a> {
        PageDto {
            site: SiteDto::from(&self.site),
            upload_action: UPLOAD_PATH,
            field_name: UPLOAD_FIELD,
            choose_label,
            form_class,
            access_url,
            error,
        }
    }
}
