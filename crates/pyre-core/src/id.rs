//! Handler identifiers

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for generating unique handler IDs
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one connected handler so it can be disconnected later.
///
/// IDs are unique across every signal and store in the process, so a handler
/// id can never accidentally disconnect a handler on another object.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct HandlerId(u64);

impl HandlerId {
    /// Allocate a new unique HandlerId
    pub fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandlerId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = HandlerId::next();
        let b = HandlerId::next();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }
}
