//! Errors raised while reading chart data.

/// Failure to interpret externally supplied chart data.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("unknown body: {0}")]
    UnknownBody(String),
    #[error("unknown sign: {0}")]
    UnknownSign(String),
    #[error("unknown aspect kind: {0}")]
    UnknownAspect(String),
    #[error("unknown rulership scheme: {0}")]
    UnknownScheme(String),
    #[error("degree {degree} for {body} is outside 0..30")]
    DegreeOutOfRange { body: String, degree: f64 },
    #[error("house {house} for {body} is outside 1..=12")]
    HouseOutOfRange { body: String, house: u8 },
}
