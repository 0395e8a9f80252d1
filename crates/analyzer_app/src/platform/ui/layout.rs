pub const HEADING: &str = "Analyze Any Web Page";
pub const HINT: &str = "Enter the URL of the web page you want to analyze.";
pub const PROMPT: &str = "URL> ";
pub const RESULT_HEADING: &str = "Web Page Analysis Result";

/// Lines printed once before the first prompt.
pub fn banner(backend: &str) -> Vec<String> {
    vec![
        HEADING.to_string(),
        HINT.to_string(),
        format!("Backend: {backend} (Ctrl-D to quit)"),
    ]
}
