//! Error types for container access.
//!
//! All failures in this crate are local and synchronous: an operation either
//! completes or reports its precondition violation immediately. Nothing is
//! retried and nothing is swallowed - callers either guard with an emptiness
//! or existence check first, or treat the error as the canonical
//! "not available" signal.

/// Error returned when a container or cursor access cannot be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// Read or removal from an empty container, or from an exhausted cursor.
    Empty,
    /// The cursor's node was removed out from under it by a structural
    /// operation. The handle is permanently invalid; take a fresh snapshot.
    Stale,
    /// An overlapping mutation of the same shared chain was detected.
    ///
    /// The containers are single-threaded and carry no locking; this arises
    /// only from reentrant use of aliased handles and is always a caller
    /// error, reported instead of corrupting state.
    Contended,
}

impl core::fmt::Display for AccessError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccessError::Empty => write!(f, "container is empty"),
            AccessError::Stale => write!(f, "cursor references a removed node"),
            AccessError::Contended => write!(f, "overlapping mutation of a shared chain"),
        }
    }
}

impl std::error::Error for AccessError {}

/// Error returned by direct indexed `get` on a map for an absent key.
///
/// `get_or` and `contains` never produce this; they are the caller's tools
/// for probing safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyNotFound;

impl core::fmt::Display for KeyNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "key not found")
    }
}

impl std::error::Error for KeyNotFound {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(AccessError::Empty.to_string(), "container is empty");
        assert_eq!(
            AccessError::Stale.to_string(),
            "cursor references a removed node"
        );
        assert_eq!(KeyNotFound.to_string(), "key not found");
    }
}
