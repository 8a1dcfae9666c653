//! Server-rendered HTML pages. Each page module exposes a `render` function that
//! fills its embedded handlebars template.

pub mod add_research;
pub mod browse_state;
pub mod detail;
pub mod home;

use serde_json::{json, Value};

pub use browse_state::{BrowseParams, BrowseState};

pub type RenderResult = Result<String, handlebars::RenderError>;

/// Grant types offered by the filter and the add-research form
pub const GRANT_TYPES: [&str; 3] = [
    "Standard Grant",
    "Continuing Grant",
    "Cooperative Agreement",
];

fn grant_type_options(selected: &str) -> Vec<Value> {
    GRANT_TYPES
        .iter()
        .map(|grant_type| {
            json!({
                "value": grant_type,
                "label": grant_type,
                "selected": *grant_type == selected,
            })
        })
        .collect()
}
