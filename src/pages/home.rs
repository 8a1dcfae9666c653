use serde_json::json;

use super::{grant_type_options, BrowseState, RenderResult};
use crate::database::entities::research;
use crate::services::{AmountRange, Page, PageSize};

/// Render the research table. `page` is `None` when the query itself was rejected,
/// in which case `error` explains why.
pub fn render(
    state: &BrowseState,
    page: Option<&Page<research::Model>>,
    error: Option<&str>,
) -> RenderResult {
    let amount_ranges: Vec<_> = AmountRange::ALL
        .iter()
        .map(|range| {
            json!({
                "value": range.key(),
                "label": range.label(),
                "selected": range.key().eq_ignore_ascii_case(&state.amount_range),
            })
        })
        .collect();

    let page_sizes: Vec<_> = PageSize::OPTIONS
        .iter()
        .map(|size| json!({"value": size, "selected": *size == state.page_size}))
        .collect();

    let total_count = page.map_or(0, |p| p.total_count);
    let total_pages = page.map_or(0, |p| p.total_pages);

    let handlebars = crate::common::get_handlebars();
    handlebars.render_template(
        &get_template(),
        &json!({
            "state": state,
            "error": error,
            "rows": page.map(|p| &p.items),
            "total_count": total_count,
            "total_pages": total_pages.max(1),
            "grant_types": grant_type_options(&state.award_instrument),
            "amount_ranges": amount_ranges,
            "page_sizes": page_sizes,
            "has_previous": state.has_previous(),
            "previous_href": state.href_for_page(state.page.saturating_sub(1).max(1)),
            "has_next": state.has_next(total_pages),
            "next_href": state.href_for_page(state.page.saturating_add(1)),
        }),
    )
}

pub fn get_template() -> String {
    include_str!("home.hbs").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(award_number: &str, title: &str, amount: Option<f64>) -> research::Model {
        research::Model {
            id: 1,
            award_number: award_number.to_string(),
            title: title.to_string(),
            title_search: title.to_lowercase(),
            abstract_text: None,
            principal_investigator: Some("Ada Lovelace".to_string()),
            pi_email_address: Some("ada@example.edu".to_string()),
            co_pi_names: "[]".to_string(),
            organization: None,
            organization_street: None,
            organization_city: None,
            organization_state: None,
            organization_zip: None,
            organization_phone: None,
            state: None,
            award_instrument: Some("Standard Grant".to_string()),
            program_manager: None,
            awarded_amount_to_date: amount,
            arra_amount: None,
            start_date: None,
            end_date: None,
            last_amendment_date: None,
            nsf_organization: None,
            nsf_directorate: None,
            programs: "[]".to_string(),
            program_element_codes: "[]".to_string(),
            program_reference_codes: "[]".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn renders_rows_with_formatted_amounts() {
        let state = BrowseState::default();
        let page = Page::new(vec![row("2400001", "Coral <Reef> Survey", Some(1_250_000.0))], 1, 1, 25);

        let html = render(&state, Some(&page), None).unwrap();
        assert!(html.contains("2400001"));
        assert!(html.contains("Coral &lt;Reef&gt; Survey"));
        assert!(html.contains("mailto:ada@example.edu"));
        assert!(html.contains("$1,250,000"));
        assert!(html.contains("Page 1 of 1"));
        assert!(html.contains("1 results"));
    }

    #[test]
    fn marks_selected_filters() {
        let mut state = BrowseState::default();
        state.set_award_instrument("Continuing Grant");
        state.set_amount_range("1m-5m");
        state.set_page_size(PageSize::new(50).unwrap());

        let html = render(&state, Some(&Page::new(Vec::new(), 0, 1, 50)), None).unwrap();
        assert!(html.contains(r#"<option value="Continuing Grant" selected>"#));
        assert!(html.contains(r#"<option value="1m-5m" selected>"#));
        assert!(html.contains(r#"<option value="50" selected>"#));
        assert!(html.contains("No research matches"));
    }

    #[test]
    fn shows_query_errors_inline() {
        let state = BrowseState::default();
        let html = render(&state, None, Some("Unknown amount range: huge")).unwrap();
        assert!(html.contains("Unknown amount range: huge"));
    }

    #[test]
    fn next_link_only_when_more_pages() {
        let state = BrowseState::default();
        let page = Page::new(vec![row("2400001", "Coral Survey", None)], 30, 1, 25);
        let html = render(&state, Some(&page), None).unwrap();
        assert!(html.contains("Page 1 of 2"));
        assert!(html.contains(r#"href="/?page=2&page_size=25""#));
        assert!(!html.contains("Previous</a>"));
    }
}
