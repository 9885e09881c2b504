use thiserror::Error;

/// Errors raised while reading the event schedule.
///
/// None of these are fatal: a boundary that fails to parse is treated as
/// unreachable and the countdown keeps running.
#[derive(Error, Debug)]
pub enum CountdownError {
    #[error("Invalid timestamp for {field}: {value:?}")]
    ConfigParse { field: &'static str, value: String },
}

/// Errors a rendering port reports back to the countdown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The port has nowhere to put this piece of output. The countdown skips
    /// the field and moves on to the next one.
    #[error("Render target missing: {0}")]
    MissingElement(&'static str),
}
