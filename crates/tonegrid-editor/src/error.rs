//! Errors raised while assembling a sequencer.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by [`crate::IntervalSequencerBuilder::build`].
#[derive(Debug, Error)]
pub enum ControllerError {
    /// A required host collaborator was not supplied.
    #[error("missing required collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
