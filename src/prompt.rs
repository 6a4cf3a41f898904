use crate::generator::FormState;
use crate::llm::ChatMessage;

const SYSTEM_PROMPT: &str = "Generate the json with following attributes\n\n\
One liner (string)\n\
Value Proposition (string)\n\
Site Map (string array)\n\
Blog Ideas (string array)\n\
SEO Terms (string array)\n\n\
Scrape the website pages to provide meaningful response";

/// Builds the system and user messages for one submission.
///
/// Inputs are interpolated verbatim. Nothing is escaped or truncated here; an
/// oversized prompt is left for the provider to reject.
pub fn build_messages(form: &FormState) -> [ChatMessage; 2] {
    [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_user_prompt(form)),
    ]
}

fn build_user_prompt(form: &FormState) -> String {
    let mut result = String::with_capacity(
        form.url.len() + form.keywords.len() + form.business_info.len() + 400,
    );
    result.push_str("I want to autogenerate content for my website and other channels based on the trending SEO terms to show how your product fits into what's currently popular\n\n");
    result.push_str("Website: ");
    result.push_str(&form.url);
    result.push_str("\nProposed SEO key terms: ");
    result.push_str(&form.keywords);
    result.push_str(" - add trending SEO terms too from your side\nBusiness information: ");
    result.push_str(&form.business_info);
    result.push_str("\n\nI need the response in this format:\nOne liner (max 10 words):\nValue Proposition:\nSite Map:\nBlog Ideas:\nSEO Terms:\n\n\n");
    result
}
