use serde_json::json;

use super::{grant_type_options, RenderResult};
use crate::database::entities::research;
use crate::services::NewResearchForm;

/// Render the add-research form. After a successful post `created` links to the new
/// record and the form comes back empty.
pub fn render(
    form: &NewResearchForm,
    error: Option<&str>,
    created: Option<&research::Model>,
) -> RenderResult {
    let handlebars = crate::common::get_handlebars();
    handlebars.render_template(
        &get_template(),
        &json!({
            "form": form,
            "error": error,
            "created": created,
            "grant_types": grant_type_options(&form.award_instrument),
        }),
    )
}

pub fn get_template() -> String {
    include_str!("add_research.hbs").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::forms::tests::research_form;

    #[test]
    fn empty_form_lists_grant_types() {
        let html = render(&NewResearchForm::default(), None, None).unwrap();
        assert!(html.contains(r#"<option value="Cooperative Agreement">"#));
        assert!(html.contains(r#"name="awarded_amount_to_date""#));
        assert!(!html.contains(r#"class="error""#));
    }

    #[test]
    fn rejected_form_keeps_values() {
        let form = research_form("2400009");
        let html = render(&form, Some("Program manager is required"), None).unwrap();
        assert!(html.contains("Program manager is required"));
        assert!(html.contains(r#"value="2400009""#));
    }
}
