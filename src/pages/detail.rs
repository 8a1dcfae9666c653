use serde_json::json;

use super::RenderResult;
use crate::services::{ClaimForm, PledgeForm, ResearchDetail};

/// Outcome of a claim or pledge post, shown above the forms
#[derive(Debug, Clone, Default)]
pub struct Feedback {
    pub notice: Option<String>,
    pub error: Option<String>,
}

impl Feedback {
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            notice: Some(message.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            notice: None,
            error: Some(message.into()),
        }
    }
}

/// Render a research record with its claims and the claim/pledge forms. The forms
/// are pre-filled with `claim` and `pledge` so a rejected post keeps its input.
pub fn render(
    detail: &ResearchDetail,
    feedback: &Feedback,
    claim: &ClaimForm,
    pledge: &PledgeForm,
) -> RenderResult {
    let handlebars = crate::common::get_handlebars();
    handlebars.render_template(
        &get_template(),
        &json!({
            "research": detail.research,
            "co_pi_names": detail.co_pi_names,
            "programs": detail.programs,
            "program_element_codes": detail.program_element_codes,
            "program_reference_codes": detail.program_reference_codes,
            "claims": detail.claims,
            "notice": feedback.notice,
            "error": feedback.error,
            "claim": claim,
            "pledge": pledge,
        }),
    )
}

pub fn get_template() -> String {
    include_str!("detail.hbs").to_string()
}
