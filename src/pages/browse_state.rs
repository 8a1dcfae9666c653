use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::errors::ResearchResult;
use crate::services::research_query::total_pages;
use crate::services::{PageSize, ResearchQuery, ResearchQueryParams};

/// Query string of the home table. `goto` carries the page-number box and is only
/// honoured when it names an existing page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrowseParams {
    pub search: Option<String>,
    pub award_instrument: Option<String>,
    pub amount_range: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub goto: Option<String>,
}

impl BrowseParams {
    pub fn research_params(&self) -> ResearchQueryParams {
        ResearchQueryParams {
            search: self.search.clone(),
            award_instrument: self.award_instrument.clone(),
            amount_range: self.amount_range.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// What the visitor has typed and selected on the research table.
///
/// Changing the search term, a filter or the page size always returns to page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseState {
    pub search: String,
    pub award_instrument: String,
    pub amount_range: String,
    pub page: u64,
    pub page_size: u64,
    pub page_input: String,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self::with_page_size(PageSize::default())
    }
}

impl BrowseState {
    pub fn with_page_size(page_size: PageSize) -> Self {
        Self {
            search: String::new(),
            award_instrument: String::new(),
            amount_range: String::new(),
            page: 1,
            page_size: page_size.get(),
            page_input: "1".to_string(),
        }
    }

    /// Rebuild the state carried in a table URL
    pub fn from_params(params: &ResearchQueryParams, default_page_size: PageSize) -> Self {
        let page = params.page.unwrap_or(1);
        Self {
            search: params.search.clone().unwrap_or_default(),
            award_instrument: params.award_instrument.clone().unwrap_or_default(),
            amount_range: params.amount_range.clone().unwrap_or_default(),
            page,
            page_size: params.page_size.unwrap_or(default_page_size.get()),
            page_input: page.to_string(),
        }
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.reset_page();
    }

    pub fn set_award_instrument(&mut self, instrument: &str) {
        self.award_instrument = instrument.to_string();
        self.reset_page();
    }

    pub fn set_amount_range(&mut self, range: &str) {
        self.amount_range = range.to_string();
        self.reset_page();
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size.get();
        self.reset_page();
    }

    pub fn previous(&mut self) {
        self.move_to(self.page.saturating_sub(1).max(1));
    }

    pub fn next(&mut self, total_pages: u64) {
        self.move_to(self.page.saturating_add(1).min(total_pages).max(1));
    }

    /// Jump to a typed page number. Input outside `1..=total_pages` is kept in the
    /// box but does not move the table. Returns whether the page changed.
    pub fn go_to(&mut self, input: &str, total_pages: u64) -> bool {
        self.page_input = input.to_string();
        match input.trim().parse::<u64>() {
            Ok(page) if page >= 1 && page <= total_pages => {
                self.page = page;
                true
            }
            _ => false,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self, total_pages: u64) -> bool {
        self.page < total_pages
    }

    pub fn total_pages(&self, total_count: u64) -> u64 {
        total_pages(total_count, self.page_size)
    }

    pub fn to_params(&self) -> ResearchQueryParams {
        ResearchQueryParams {
            search: Some(self.search.clone()),
            award_instrument: Some(self.award_instrument.clone()),
            amount_range: Some(self.amount_range.clone()),
            page: Some(self.page),
            page_size: Some(self.page_size),
        }
    }

    pub fn to_query(&self, default_page_size: PageSize) -> ResearchResult<ResearchQuery> {
        ResearchQuery::from_params(&self.to_params(), default_page_size)
    }

    /// Query string for a link to `page` keeping every other setting
    pub fn href_for_page(&self, page: u64) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.search.is_empty() {
            serializer.append_pair("search", &self.search);
        }
        if !self.award_instrument.is_empty() {
            serializer.append_pair("award_instrument", &self.award_instrument);
        }
        if !self.amount_range.is_empty() {
            serializer.append_pair("amount_range", &self.amount_range);
        }
        serializer.append_pair("page", &page.to_string());
        serializer.append_pair("page_size", &self.page_size.to_string());
        format!("/?{}", serializer.finish())
    }

    fn move_to(&mut self, page: u64) {
        self.page = page;
        self.page_input = page.to_string();
    }

    fn reset_page(&mut self) {
        self.move_to(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(page: u64) -> BrowseState {
        let mut state = BrowseState::default();
        state.go_to(&page.to_string(), 100);
        state
    }

    #[test]
    fn changing_page_size_resets_to_first_page() {
        let mut state = on_page(4);
        assert_eq!(state.page, 4);

        state.set_page_size(PageSize::new(50).unwrap());
        assert_eq!(state.page, 1);
        assert_eq!(state.page_input, "1");
        assert_eq!(state.page_size, 50);
    }

    #[test]
    fn new_search_and_filters_reset_to_first_page() {
        let mut state = on_page(3);
        state.set_search("ocean");
        assert_eq!(state.page, 1);

        let mut state = on_page(3);
        state.set_award_instrument("Standard Grant");
        assert_eq!(state.page, 1);

        let mut state = on_page(3);
        state.set_amount_range("5m-10m");
        assert_eq!(state.page, 1);
    }

    #[test]
    fn previous_and_next_clamp_to_available_pages() {
        let mut state = BrowseState::default();
        state.previous();
        assert_eq!(state.page, 1);
        assert!(!state.has_previous());

        state.next(2);
        assert_eq!(state.page, 2);
        state.next(2);
        assert_eq!(state.page, 2);
        assert!(!state.has_next(2));
        assert_eq!(state.page_input, "2");

        let mut empty = BrowseState::default();
        empty.next(0);
        assert_eq!(empty.page, 1);

        let mut last = BrowseState::default();
        last.page = u64::MAX;
        last.next(u64::MAX);
        assert_eq!(last.page, u64::MAX);
    }

    #[test]
    fn out_of_range_page_input_is_ignored() {
        let mut state = BrowseState::default();
        assert!(!state.go_to("7", 5));
        assert_eq!(state.page, 1);
        assert_eq!(state.page_input, "7");

        assert!(!state.go_to("0", 5));
        assert!(!state.go_to("two", 5));
        assert_eq!(state.page, 1);

        assert!(state.go_to("5", 5));
        assert_eq!(state.page, 5);
    }

    #[test]
    fn page_links_keep_filters() {
        let mut state = BrowseState::default();
        state.set_search("ocean & sea");
        state.set_amount_range("1m-5m");
        assert_eq!(
            state.href_for_page(2),
            "/?search=ocean+%26+sea&amount_range=1m-5m&page=2&page_size=25"
        );
    }

    #[test]
    fn state_round_trips_through_params() {
        let mut state = BrowseState::default();
        state.set_award_instrument("Continuing Grant");
        state.set_page_size(PageSize::new(10).unwrap());
        state.go_to("3", 9);

        let restored = BrowseState::from_params(&state.to_params(), PageSize::default());
        assert_eq!(restored, state);

        let query = restored.to_query(PageSize::default()).unwrap();
        assert_eq!(query.page, 3);
        assert_eq!(query.page_size.get(), 10);
        assert_eq!(query.award_instrument.as_deref(), Some("Continuing Grant"));
    }
}
