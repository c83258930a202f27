use thiserror::Error;

/// Failures from the crate's fallible constructors.
///
/// Runtime problems inside a battle never surface here: bad casts fizzle and
/// detector trouble only changes the perception status.
#[derive(Debug, Error)]
pub enum BattleError {
    #[error("invalid battle data: {0}")]
    Config(#[from] serde_json::Error),
    #[error("could not decode portrait: {0}")]
    Portrait(#[from] image::ImageError),
}
