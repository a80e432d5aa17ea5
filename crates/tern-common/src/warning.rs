//! Parser warnings routed through the [`log`] facade.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the tokenizer and tree builder to report contract violations and
//! recoverable-but-suspicious situations.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Emit a warning once per unique `(component, message)` pair.
///
/// Returns `true` if the warning was emitted, `false` if it had already been
/// seen since the last [`clear_warnings`].
///
/// # Example
/// ```
/// use tern_common::warning::warn_once;
///
/// let _ = warn_once("HTML Parser", "resume() called while not suspended");
/// // The second identical warning is swallowed.
/// assert!(!warn_once("HTML Parser", "resume() called while not suspended"));
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    // A poisoned lock only means another thread panicked mid-insert; the set
    // itself is still usable.
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    let should_emit = guard.get_or_insert_with(HashSet::new).insert(key);
    drop(guard);

    if should_emit {
        log::warn!(target: "tern", "[{component}] {message}");
    }
    should_emit
}

/// Clear all recorded warnings (call between unrelated parses).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_warning_is_suppressed() {
        let message = "duplicate warning test message";
        let _ = warn_once("Test", message);
        assert!(!warn_once("Test", message));
    }

    #[test]
    fn test_distinct_components_are_tracked_separately() {
        let _ = warn_once("ComponentA", "shared message for component test");
        assert!(warn_once("ComponentB", "shared message for component test"));
    }
}
