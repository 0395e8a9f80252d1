use std::io::Write;

use analyzer_core::AppState;
use analyzer_engine::TransitionSink;

use super::ui::render::render;

/// Prints every lifecycle transition to stdout.
pub struct TerminalSink;

impl TransitionSink for TerminalSink {
    fn emit(&self, state: &AppState) {
        let mut out = std::io::stdout().lock();
        for line in render(&state.view()) {
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
    }
}
