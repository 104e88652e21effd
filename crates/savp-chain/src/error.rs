use savp_core::zodiac::Body;

/// Errors raised while building a dispositor graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// A body in scope, or a ruler reached from one, has no occupied sign.
    #[error("no sign data for {body}")]
    DataIncomplete { body: Body },
}
