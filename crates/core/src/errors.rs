use thiserror::Error;

/// Errors surfaced at host boundaries.
///
/// Engine queries never fail on well-formed snapshots: unknown users fall
/// back to trending results and unknown product ids yield empty lists. The
/// variants here exist for hosts that want to distinguish "no result" from
/// "you asked about something that is not in the snapshot".
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown product id: {0}")]
    UnknownProduct(String),
}
