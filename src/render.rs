use crate::output::GenerationResult;

pub const NO_SITE_MAP: &str = "No site map available";
pub const NO_BLOG_IDEAS: &str = "No blog ideas available";
pub const NO_SEO_TERMS: &str = "No SEO terms available";

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Text(String),
    List(Vec<String>),
    Fallback(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection {
    pub heading: &'static str,
    pub body: SectionBody,
}

/// Display tree for one generation result, always five sections in order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedOutput {
    pub sections: Vec<RenderedSection>,
}

impl RenderedOutput {
    #[cfg(test)]
    pub(crate) fn section(&self, heading: &str) -> Option<&SectionBody> {
        self.sections
            .iter()
            .find(|s| s.heading == heading)
            .map(|s| &s.body)
    }
}

pub fn render(result: &GenerationResult) -> RenderedOutput {
    RenderedOutput {
        sections: vec![
            text_section("One-liner", &result.one_liner),
            text_section("Value Proposition", &result.value_proposition),
            list_section("Suggested Site Map", &result.site_map, NO_SITE_MAP),
            list_section("Blog Ideas", &result.blog_ideas, NO_BLOG_IDEAS),
            list_section("SEO Terms", &result.seo_terms, NO_SEO_TERMS),
        ],
    }
}

// Absent text renders empty, there is no placeholder for it.
fn text_section(heading: &'static str, value: &Option<String>) -> RenderedSection {
    RenderedSection {
        heading,
        body: SectionBody::Text(value.clone().unwrap_or_default()),
    }
}

fn list_section(heading: &'static str, items: &Option<Vec<String>>, fallback: &'static str) -> RenderedSection {
    let body = match items {
        Some(items) => SectionBody::List(items.clone()),
        None => SectionBody::Fallback(fallback),
    };
    RenderedSection { heading, body }
}
