//! Copy buttons on rendered code blocks.
//!
//! Uses the arboard crate for system clipboard access. Hosts without a
//! system clipboard supply their own [`Clipboard`].

use anyhow::{Context, Result};
use std::time::{Duration, Instant};

use super::mount::CodeBlockView;
use crate::markdown::COPY_LABEL;

/// Label shown after a successful copy.
pub const COPIED_LABEL: &str = "Copied!";

/// How long the copied label stays before reverting.
pub const FEEDBACK_DURATION: Duration = Duration::from_millis(1500);

/// Destination for copied code.
pub trait Clipboard {
    /// Replaces clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns error if the platform refuses access or has no clipboard.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard.
///
/// arboard handles are not shareable on every platform, so one is opened
/// per write. On X11 and Wayland the copied text is served by this process
/// and disappears when it exits unless a clipboard manager takes it over.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("Failed to access clipboard")?;
        clipboard
            .set_text(text)
            .context("Failed to write to clipboard")
    }
}

/// Text a copy button puts on the clipboard.
///
/// Only code cells are read, never the line number gutter. Each line is
/// trimmed at the end, a single trailing blank line is dropped while blank
/// lines inside the block are kept, and the joined result is trimmed at
/// the end.
pub fn copy_payload(block: &CodeBlockView) -> String {
    let mut lines: Vec<&str> = block
        .rows()
        .iter()
        .map(|row| row.code_text.trim_end())
        .collect();

    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines.join("\n").trim_end().to_string()
}

/// Result of clicking a copy button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

/// Bound copy button for one code block.
#[derive(Debug, Clone)]
pub struct CopyButton {
    block: usize,
    copied_until: Option<Instant>,
}

impl CopyButton {
    pub(crate) fn new(block: usize) -> Self {
        Self {
            block,
            copied_until: None,
        }
    }

    /// Index of the code block this button copies.
    pub fn block(&self) -> usize {
        self.block
    }

    /// Label displayed at `now`.
    pub fn label(&self, now: Instant) -> &'static str {
        match self.copied_until {
            Some(until) if now < until => COPIED_LABEL,
            _ => COPY_LABEL,
        }
    }

    /// Copies the block and starts the feedback window.
    ///
    /// A clipboard failure is logged and leaves the label as it was.
    pub(crate) fn click(
        &mut self,
        block: &CodeBlockView,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> CopyOutcome {
        let payload = copy_payload(block);

        match clipboard.write_text(&payload) {
            Ok(()) => {
                log::debug!(
                    "Copied code block {} ({} bytes)",
                    self.block,
                    payload.len()
                );
                self.copied_until = Some(now + FEEDBACK_DURATION);
                CopyOutcome::Copied
            }
            Err(e) => {
                log::error!("Copy failed: {:#}", e);
                CopyOutcome::Failed
            }
        }
    }
}
