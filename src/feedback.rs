//! Clipboard copy with a short visual pulse.
//!
//! Copying is a side path: the engine hands the report to a [`Clipboard`]
//! backend and remembers which pulse to show on the copy button and until when.

use std::time::Duration;

use web_time::Instant;

use crate::error::ClipboardError;

/// Clipboard backend provided by the host.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that keeps the last written text in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    /// When set, every write is rejected
    pub fail: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Rejected("write refused".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Which pulse the copy button shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPulse {
    /// Nothing to copy
    Empty,
    Copied,
    Failed,
}

impl CopyPulse {
    /// How long the pulse stays visible.
    pub fn duration(&self) -> Duration {
        match self {
            CopyPulse::Empty => Duration::from_millis(1200),
            CopyPulse::Copied | CopyPulse::Failed => Duration::from_millis(1500),
        }
    }

    /// Button glyph while the pulse is visible.
    pub fn icon(&self) -> &'static str {
        match self {
            CopyPulse::Empty => "💬",
            CopyPulse::Copied => "✅",
            CopyPulse::Failed => "❌",
        }
    }
}

/// The live copy pulse, if any.
#[derive(Debug, Clone, Default)]
pub struct CopyFeedback {
    pulse: Option<(CopyPulse, Instant)>,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, pulse: CopyPulse) {
        self.show_at(pulse, Instant::now());
    }

    pub fn show_at(&mut self, pulse: CopyPulse, now: Instant) {
        self.pulse = Some((pulse, now + pulse.duration()));
    }

    /// The pulse still visible at `now`, or `None` once it has expired.
    pub fn current_at(&self, now: Instant) -> Option<CopyPulse> {
        self.pulse
            .filter(|(_, until)| now < *until)
            .map(|(pulse, _)| pulse)
    }

    pub fn current(&self) -> Option<CopyPulse> {
        self.current_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_expires() {
        let start = Instant::now();
        let mut feedback = CopyFeedback::new();
        feedback.show_at(CopyPulse::Copied, start);

        assert_eq!(
            feedback.current_at(start + Duration::from_millis(1499)),
            Some(CopyPulse::Copied)
        );
        assert_eq!(feedback.current_at(start + Duration::from_millis(1500)), None);
    }

    #[test]
    fn test_empty_pulse_is_shorter() {
        let start = Instant::now();
        let mut feedback = CopyFeedback::new();
        feedback.show_at(CopyPulse::Empty, start);
        assert_eq!(feedback.current_at(start + Duration::from_millis(1300)), None);
    }

    #[test]
    fn test_memory_clipboard() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.write_text("hello").unwrap();
        assert_eq!(clipboard.contents(), Some("hello"));

        clipboard.fail = true;
        assert!(clipboard.write_text("again").is_err());
        assert_eq!(clipboard.contents(), Some("hello"));
    }
}
