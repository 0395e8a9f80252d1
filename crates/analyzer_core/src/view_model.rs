use crate::{AnalysisResult, LinkTally, Phase, UiState};

pub const SUBMIT_LABEL: &str = "Analyze";
pub const SUBMIT_LABEL_BUSY: &str = "Analyzing...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub input: String,
    pub input_enabled: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub error: Option<String>,
    pub result: Option<ResultView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub rows: Vec<ResultRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub label: &'static str,
    pub value: RowValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowValue {
    Text(String),
    Link(String),
    /// Short highlighted tokens, e.g. `H1: 2` or `Yes`.
    Badges(Vec<String>),
    /// Link count followed by the URLs the backend listed.
    LinkList { count: u64, urls: Vec<String> },
    /// Placeholder shown when the backend had nothing for this field.
    Missing(&'static str),
}

/// Decides what the screen shows for a lifecycle state. Pure; the result only
/// depends on `ui`.
pub fn present(ui: &UiState) -> AppViewModel {
    let busy = ui.phase() == Phase::Loading;
    AppViewModel {
        phase: ui.phase(),
        input: String::new(),
        input_enabled: !busy,
        submit_enabled: !busy,
        submit_label: if busy { SUBMIT_LABEL_BUSY } else { SUBMIT_LABEL },
        error: ui.error_message(),
        result: ui.result().map(result_view),
        dirty: false,
    }
}

fn result_view(result: &AnalysisResult) -> ResultView {
    let rows = vec![
        ResultRow {
            label: "URL",
            value: RowValue::Link(result.source_url.clone()),
        },
        ResultRow {
            label: "Title",
            value: text_or(result.title.as_deref(), "No Title Found"),
        },
        ResultRow {
            label: "HTML Version",
            value: text_or(result.html_version.as_deref(), "No HTML Version Found"),
        },
        ResultRow {
            label: "Login Form",
            value: if result.has_login_form {
                RowValue::Badges(vec!["Yes".to_string()])
            } else {
                RowValue::Missing("No Login Form Found")
            },
        },
        ResultRow {
            label: "Headings",
            value: headings_value(result),
        },
        ResultRow {
            label: "Accessible Links",
            value: links_or(&result.accessible_links, "No Accessible Links Found"),
        },
        ResultRow {
            label: "Inaccessible Links",
            value: links_or(&result.inaccessible_links, "No Inaccessible Links Found"),
        },
    ];
    ResultView { rows }
}

fn text_or(text: Option<&str>, placeholder: &'static str) -> RowValue {
    match text {
        Some(text) => RowValue::Text(text.to_string()),
        None => RowValue::Missing(placeholder),
    }
}

fn links_or(links: &LinkTally, placeholder: &'static str) -> RowValue {
    let count = links.count();
    if count == 0 {
        return RowValue::Missing(placeholder);
    }
    match links.urls() {
        [] => RowValue::Text(count.to_string()),
        urls => RowValue::LinkList {
            count,
            urls: urls.to_vec(),
        },
    }
}

fn headings_value(result: &AnalysisResult) -> RowValue {
    if !result.heading_counts.is_empty() {
        return RowValue::Badges(
            result
                .heading_counts
                .iter()
                .map(|(tag, count)| format!("{}: {}", tag.to_uppercase(), count))
                .collect(),
        );
    }
    match &result.headings_summary {
        Some(summary) => RowValue::Text(summary.clone()),
        None => RowValue::Missing("No Headings Found"),
    }
}
