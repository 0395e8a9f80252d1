use analyzer_core::{AppViewModel, Phase, ResultView, RowValue};

use super::layout::RESULT_HEADING;

const LABEL_WIDTH: usize = 20;

/// Turns the view model into terminal lines. Idle renders nothing.
pub fn render(view: &AppViewModel) -> Vec<String> {
    match view.phase {
        Phase::Idle => Vec::new(),
        Phase::Loading => vec![view.submit_label.to_string()],
        Phase::Failed => vec![format!(
            "Error: {}",
            view.error.as_deref().unwrap_or_default()
        )],
        Phase::Success => view.result.as_ref().map(render_result).unwrap_or_default(),
    }
}

fn render_result(result: &ResultView) -> Vec<String> {
    let mut lines = Vec::with_capacity(result.rows.len() + 1);
    lines.push(RESULT_HEADING.to_string());
    for row in &result.rows {
        lines.push(format!(
            "  {label:<width$}{value}",
            label = row.label,
            width = LABEL_WIDTH,
            value = format_value(&row.value)
        ));
        if let RowValue::LinkList { urls, .. } = &row.value {
            for url in urls {
                lines.push(format!("  {:<width$}- {url}", "", width = LABEL_WIDTH));
            }
        }
    }
    lines
}

fn format_value(value: &RowValue) -> String {
    match value {
        RowValue::Text(text) | RowValue::Link(text) => text.clone(),
        RowValue::LinkList { count, .. } => count.to_string(),
        RowValue::Badges(badges) => badges
            .iter()
            .map(|badge| format!("[{badge}]"))
            .collect::<Vec<_>>()
            .join(" "),
        RowValue::Missing(placeholder) => format!("({placeholder})"),
    }
}

#[cfg(test)]
mod tests {
    use analyzer_core::{present, AnalysisError, AnalysisResult, LinkTally, UiState};

    use super::*;

    #[test]
    fn idle_renders_nothing() {
        assert!(render(&present(&UiState::Idle)).is_empty());
    }

    #[test]
    fn loading_and_failure_are_single_lines() {
        assert_eq!(render(&present(&UiState::Loading)), vec!["Analyzing..."]);
        assert_eq!(
            render(&present(&UiState::Failed(AnalysisError::Validation))),
            vec!["Error: URL is required"]
        );
    }

    #[test]
    fn success_renders_one_line_per_row() {
        let mut result = AnalysisResult {
            source_url: "https://example.com".into(),
            title: Some("Example".into()),
            has_login_form: true,
            accessible_links: LinkTally::Count(3),
            ..AnalysisResult::default()
        };
        result.heading_counts.insert("h1".into(), 1);
        result.heading_counts.insert("h2".into(), 2);

        let lines = render(&present(&UiState::Success(result)));

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], RESULT_HEADING);
        assert_eq!(lines[1], format!("  {:<20}https://example.com", "URL"));
        assert_eq!(lines[3], format!("  {:<20}(No HTML Version Found)", "HTML Version"));
        assert_eq!(lines[4], format!("  {:<20}[Yes]", "Login Form"));
        assert_eq!(lines[5], format!("  {:<20}[H1: 1] [H2: 2]", "Headings"));
        assert_eq!(lines[6], format!("  {:<20}3", "Accessible Links"));
    }

    #[test]
    fn listed_links_follow_their_count() {
        let result = AnalysisResult {
            source_url: "https://example.com".into(),
            inaccessible_links: LinkTally::Urls(vec![
                "https://a.example/gone".into(),
                "https://b.example/down".into(),
            ]),
            ..AnalysisResult::default()
        };

        let lines = render(&present(&UiState::Success(result)));

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[7], format!("  {:<20}2", "Inaccessible Links"));
        assert_eq!(lines[8], format!("  {:<20}- https://a.example/gone", ""));
        assert_eq!(lines[9], format!("  {:<20}- https://b.example/down", ""));
    }
}
