//! The host element the widget renders into.

use std::collections::BTreeMap;

use fyr_core::ProviderId;

const EMPTY_REPS_LIST: &str = "<ul class='fyr-reps'></ul>";
const REPS_LIST_OPEN: &str = "<ul class='fyr-reps'>";

/// Receives fully-formed HTML from the widget.
pub trait Surface: Send {
    /// Replace the whole element with the form.
    fn show_form(&mut self, html: String);

    /// Replace the contents of the form container with the results shell.
    fn show_results_shell(&mut self, html: String);

    /// Reveal `provider`'s section and append one list item to it.
    fn append_to_section(&mut self, provider: ProviderId, item_html: String);
}

/// In-memory surface that composes the current document on demand.
#[derive(Debug, Clone, Default)]
pub struct HtmlSurface {
    form: String,
    results: Option<String>,
    sections: BTreeMap<ProviderId, Vec<String>>,
}

impl HtmlSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Items appended to `provider`'s section since the last shell render.
    #[must_use]
    pub fn section_items(&self, provider: ProviderId) -> &[String] {
        self.sections
            .get(&provider)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_section_visible(&self, provider: ProviderId) -> bool {
        self.sections.contains_key(&provider)
    }

    #[must_use]
    pub fn showing_results(&self) -> bool {
        self.results.is_some()
    }

    /// The element's current markup.
    #[must_use]
    pub fn html(&self) -> String {
        match &self.results {
            None => self.form.clone(),
            Some(shell) => {
                replace_container_contents(&self.form, &compose_results(shell, &self.sections))
            }
        }
    }
}

impl Surface for HtmlSurface {
    fn show_form(&mut self, html: String) {
        self.form = html;
        self.results = None;
        self.sections.clear();
    }

    fn show_results_shell(&mut self, html: String) {
        self.results = Some(html);
        self.sections.clear();
    }

    fn append_to_section(&mut self, provider: ProviderId, item_html: String) {
        // Sections only exist inside the results shell.
        if self.results.is_none() {
            return;
        }
        self.sections.entry(provider).or_default().push(item_html);
    }
}

/// Un-hide each populated section and fill its list.
fn compose_results(shell: &str, sections: &BTreeMap<ProviderId, Vec<String>>) -> String {
    let mut html = shell.to_string();
    for (provider, items) in sections {
        let class = provider.section_class();
        let hidden = format!("<div class='{class} cf' style='display:none;'>");
        let Some(start) = html.find(&hidden) else {
            continue;
        };
        html.replace_range(start..start + hidden.len(), &format!("<div class='{class} cf'>"));
        if let Some(offset) = html[start..].find(EMPTY_REPS_LIST) {
            html.insert_str(start + offset + REPS_LIST_OPEN.len(), &items.concat());
        }
    }
    html
}

/// Keep the container's opening and closing tags, swap everything between.
fn replace_container_contents(container: &str, inner: &str) -> String {
    match (container.find('>'), container.rfind("</div>")) {
        (Some(open_end), Some(close)) if open_end < close => {
            format!("{}{inner}{}", &container[..=open_end], &container[close..])
        }
        _ => inner.to_string(),
    }
}
