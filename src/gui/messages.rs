//! Message types for the HalTalks window

/// Messages that drive the application
#[derive(Debug, Clone)]
pub enum Message {
    /// The input field changed
    InputChanged(String),
    /// Enter pressed in the input field
    Submit,
    /// Timer tick for alert narration
    Tick,
}
