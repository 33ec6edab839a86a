use crate::api::stage::Stage;

/// Errors raised by the headless core.
///
/// None of these are fatal to the host page: the web bridge logs them and
/// leaves the canvas untouched.
#[derive(Debug, thiserror::Error)]
pub enum StardustError {
    /// The configuration JSON could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Config(#[source] serde_json::Error),

    /// The configuration parsed but holds values the simulation cannot use.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A stage change that the narrative does not allow.
    #[error("cannot move from stage '{from}' to stage '{to}'")]
    InvalidTransition { from: Stage, to: Stage },

    /// The drawing surface (or one of its contexts) could not be acquired.
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The embedded stroke font table is malformed.
    #[error("failed to parse stroke font: {0}")]
    Font(#[source] serde_json::Error),
}
