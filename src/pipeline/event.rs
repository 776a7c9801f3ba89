//! Recognized-text events delivered by the text-recognition producer.

/// The text recognized in one analyzed frame.
///
/// Events carry no identity; their order of arrival is the frame order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedTextEvent {
    text: String,
}

impl RecognizedTextEvent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl From<&str> for RecognizedTextEvent {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for RecognizedTextEvent {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
