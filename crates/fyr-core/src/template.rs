//! Flat `{{ key }}` template rendering and the widget's built-in templates.
//!
//! Substitution is minimal: keys are flat (no dotted paths), an
//! unknown key renders as the empty string, and so does any *falsy* value:
//! `null`, `false`, `0` and `""` are all treated exactly like a missing key.
//! Callers that need a literal `0` in the output must pass it as the string
//! `"0"`.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::types::DisplayRecord;

/// Initial form, rendered into the host surface on load and on reset.
pub const FORM_TEMPLATE: &str = concat!(
    "<div class='find-your-rep fyr-container' id='fyr{{ idx }}' data-apis='{{ apis }}'>",
    "<h3>{{ title }}</h3>",
    "<p>{{ text }}</p>",
    "<div class='fyr-controls'>",
    "<textarea placeholder='Enter your address'>{{ defaultValue }}</textarea>",
    "<button class='fyr-submit'>{{ action }}</button>",
    "</div>",
    "<small>Powered by <a href='http://sunlightfoundation.com'>The Sunlight Foundation</a></small>",
    "</div>",
);

/// Results shell rendered into the form container once an address is submitted.
/// Each provider section starts hidden and is revealed on its first append.
pub const RESULTS_TEMPLATE: &str = concat!(
    "<div class='fyr-results'>",
    "<h3>Your Representatives</h3>",
    "<div class='fyr-congress cf' style='display:none;'>",
    "<h4>In Congress</h4>",
    "<ul class='fyr-reps'></ul>",
    "</div>",
    "<div class='fyr-openstates cf' style='display:none;'>",
    "<h4>State Representatives</h4>",
    "<ul class='fyr-reps'></ul>",
    "</div>",
    "<a href='#' class='fyr-back'>&laquo; start over</a>",
    "<small>Powered by <a href='http://sunlightfoundation.com'>The Sunlight Foundation</a></small>",
    "</div>",
);

/// A single legislator entry.
pub const RESULT_TEMPLATE: &str = concat!(
    "<li class='fyr-rep cf'>",
    "<a href='{{ resultUrl }}' target='_top'>",
    "<img src='{{ photoUrl }}' alt='photo of'>",
    "<h4>{{ name }}</h4>",
    "<p class='fyr-details'>{{ details }}</p>",
    "</a>",
    "</li>",
);

/// Placeholder appended to a provider section that returned nothing usable.
pub const NO_RESULTS_ITEM: &str = "<li class='fyr-rep'>No results found.</li>";

/// Keys are ASCII word characters only; any other token stays literal.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{ ?([A-Za-z0-9_]+) ?\}\}").expect("valid placeholder regex"));

/// Key/value pairs substituted into a template. Values are JSON scalars so
/// that numbers and booleans keep their falsy semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateContext(Map<String, Value>);

impl TemplateContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The rendered text for `key`, or `""` when absent or falsy.
    #[must_use]
    pub fn resolve(&self, key: &str) -> String {
        self.0
            .get(key)
            .filter(|v| is_truthy(v))
            .map(display_value)
            .unwrap_or_default()
    }
}

impl From<&DisplayRecord> for TemplateContext {
    fn from(record: &DisplayRecord) -> Self {
        TemplateContext::new()
            .with("name", record.name.as_str())
            .with("details", record.details.as_str())
            .with("photoUrl", record.photo_url.as_str())
            .with("resultUrl", record.result_url.as_str())
    }
}

/// Substitute every `{{ key }}` token in `template` from `context`.
#[must_use]
pub fn render(template: &str, context: &TemplateContext) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| context.resolve(&caps[1]))
        .into_owned()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of a scalar value: strings verbatim, integral numbers without a
/// trailing `.0`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or_default();
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    (f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> TemplateContext {
        TemplateContext::new()
            .with("title", "Find Your Representatives")
            .with("count", 3)
    }

    #[test]
    fn substitutes_keys_with_and_without_spaces() {
        let out = render("<h3>{{ title }}</h3>{{count}}", &ctx());
        assert_eq!(out, "<h3>Find Your Representatives</h3>3");
    }

    #[test]
    fn only_one_optional_space_is_allowed() {
        let out = render("{{  title  }}", &ctx());
        assert_eq!(out, "{{  title  }}");
    }

    #[test]
    fn missing_keys_render_empty() {
        assert_eq!(render("a{{ nope }}b", &ctx()), "ab");
    }

    #[test]
    fn falsy_values_render_empty() {
        let c = TemplateContext::new()
            .with("zero", 0)
            .with("no", false)
            .with("blank", "")
            .with("null", Value::Null);
        assert_eq!(render("[{{ zero }}|{{ no }}|{{ blank }}|{{ null }}]", &c), "[|||]");
    }

    #[test]
    fn string_zero_is_truthy() {
        let c = TemplateContext::new().with("district", "0");
        assert_eq!(render("{{ district }}", &c), "0");
    }

    #[test]
    fn integral_floats_render_without_fraction() {
        let c = TemplateContext::new().with("id", 400_123.0).with("lat", 39.5);
        assert_eq!(render("{{ id }} {{ lat }}", &c), "400123 39.5");
    }

    #[test]
    fn non_ascii_keys_stay_literal() {
        let c = TemplateContext::new().with("café", "x").with("ключ", "y");
        assert_eq!(
            render("a{{ café }}b{{ ключ }}c", &c),
            "a{{ café }}b{{ ключ }}c"
        );
        assert_eq!(render("{{ ti\u{212a}le }}", &ctx()), "{{ ti\u{212a}le }}");
    }

    #[test]
    fn keys_are_case_sensitive() {
        assert_eq!(render("{{ Title }}", &ctx()), "");
    }

    #[test]
    fn rendering_is_idempotent() {
        let c = ctx();
        let first = render(FORM_TEMPLATE, &c);
        let second = render(FORM_TEMPLATE, &c);
        assert_eq!(first, second);
    }

    #[test]
    fn form_template_leaves_no_tokens() {
        let out = render(FORM_TEMPLATE, &ctx());
        assert!(!out.contains("{{"));
        assert!(out.contains("id='fyr'"));
        assert!(out.contains("<textarea placeholder='Enter your address'></textarea>"));
    }

    #[test]
    fn result_template_uses_display_record() {
        let record = DisplayRecord {
            name: "Sen. Jane Doe".to_string(),
            details: "Democrat, Ohio".to_string(),
            photo_url: "http://img/x.jpg".to_string(),
            result_url: "http://people/1".to_string(),
            chamber: "senate".to_string(),
        };
        let out = render(RESULT_TEMPLATE, &TemplateContext::from(&record));
        assert_eq!(
            out,
            "<li class='fyr-rep cf'><a href='http://people/1' target='_top'>\
             <img src='http://img/x.jpg' alt='photo of'><h4>Sen. Jane Doe</h4>\
             <p class='fyr-details'>Democrat, Ohio</p></a></li>"
        );
        assert!(!out.contains("senate"));
    }
}
