use askama::Template;

use crate::generator::{FormState, View};
use crate::render::SectionBody;

/// The form page, with whatever banner and result the instance currently shows.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage<'a> {
    pub form: &'a FormState,
    pub view: View,
    pub loading_label: &'static str,
}
