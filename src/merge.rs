//! Last-write-wins conflict resolution.
//!
//! The one rule every backend runs before mutating its store: a write lands
//! only if the key has no record yet, or the incoming timestamp is strictly
//! newer than the stored one. Equal timestamps keep the existing record.

/// Decide whether an incoming write should replace the existing record.
///
/// `existing` is the stored record's timestamp, or `None` when the key has
/// never been written. Pure and infallible. Ties go to the record already in
/// the store, so replaying the same write twice is a no-op.
#[must_use]
pub fn should_update(existing: Option<u64>, incoming: u64) -> bool {
    match existing {
        None => true,
        Some(ts) => incoming > ts,
    }
}

#[cfg(test)]
mod tests {
    use super::should_update;

    #[test]
    fn absent_always_accepts() {
        assert!(should_update(None, 0));
        assert!(should_update(None, u64::MAX));
    }

    #[test]
    fn newer_wins() {
        assert!(should_update(Some(100), 101));
        assert!(should_update(Some(0), 1));
    }

    #[test]
    fn tie_keeps_existing() {
        assert!(!should_update(Some(100), 100));
        assert!(!should_update(Some(0), 0));
    }

    #[test]
    fn older_rejected() {
        assert!(!should_update(Some(100), 99));
        assert!(!should_update(Some(u64::MAX), 0));
    }
}
