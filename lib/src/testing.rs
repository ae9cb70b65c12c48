//! Test doubles

use crate::config::{RenderConfig, STANDARD_FONT};
use crate::error::RenderError;
use crate::renderer::GlyphRenderer;
use crossbeam_channel::{Receiver, Sender, bounded};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// Longest a gated line waits to be released
const GATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Renders `line` as `[line]` and records every call
///
/// Lines listed in `fail_on` fail with `RenderError::UnknownFont(line)` so
/// tests can tell which line caused the failure. Gated lines block until
/// their gate is released.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Mutex<Vec<(String, RenderConfig)>>,
    fail_on: Vec<String>,
    gates: HashMap<String, Receiver<()>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(lines: &[&str]) -> Self {
        Self {
            fail_on: lines.iter().map(|l| l.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Hold renders of `line` until the returned sender fires
    pub fn gate(&mut self, line: &str) -> Sender<()> {
        let (tx, rx) = bounded(1);
        self.gates.insert(line.to_string(), rx);
        tx
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Rendered lines, in call order
    pub fn lines(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(l, _)| l.clone()).collect()
    }

    pub fn configs(&self) -> Vec<RenderConfig> {
        self.calls.lock().iter().map(|(_, c)| c.clone()).collect()
    }
}

impl GlyphRenderer for RecordingRenderer {
    fn render_line(&self, line: &str, config: &RenderConfig) -> Result<String, RenderError> {
        self.calls.lock().push((line.to_string(), config.clone()));
        if let Some(gate) = self.gates.get(line) {
            let _ = gate.recv_timeout(GATE_TIMEOUT);
        }
        if self.fail_on.iter().any(|l| l == line) {
            return Err(RenderError::UnknownFont(line.to_string()));
        }
        Ok(format!("[{line}]"))
    }

    fn font_names(&self) -> Vec<String> {
        vec![STANDARD_FONT.to_string()]
    }
}
