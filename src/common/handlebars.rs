use handlebars::{handlebars_helper, Handlebars};
use serde_json::Value;

pub fn get_handlebars() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();

    handlebars_helper!(exists: |v: Value| {
        match v {
            serde_json::Value::Null => false,
            serde_json::Value::String(s) => {
                let trimmed = s.trim();
                !trimmed.is_empty() && trimmed != "null"
            }
            _ => true,
        }
    });
    handlebars.register_helper("exists", Box::new(exists));

    handlebars_helper!(stringeq: |s1: String, s2: String| s1.eq(&s2));
    handlebars.register_helper("stringeq", Box::new(stringeq));

    handlebars_helper!(is_empty: |v: Value| {
        match v {
            serde_json::Value::Array(arr) => arr.is_empty(),
            _ => false,
        }
    });
    handlebars.register_helper("is_empty", Box::new(is_empty));

    handlebars_helper!(usd: |v: Value| {
        match v.as_f64() {
            Some(amount) => format_usd(amount),
            None => format_usd(0.0),
        }
    });
    handlebars.register_helper("usd", Box::new(usd));

    handlebars_helper!(join: |v: Value| {
        match v {
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            _ => String::new(),
        }
    });
    handlebars.register_helper("join", Box::new(join));

    handlebars
}

/// Whole-dollar USD with thousands separators, e.g. `$1,250,000`.
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
