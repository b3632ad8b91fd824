use ahash::AHashMap;
use parking_lot::Mutex;
use tracing::trace;

/// Resource key claimed by every pan/expand/brush gesture.
pub const GLOBAL_PAN: &str = "globalPan";

/// Global interaction mutex: only one gesture (brushing, roaming,
/// axis-expand drag) may claim pointer events at a time. Acquired on
/// gesture start, released on gesture end or component disposal.
pub struct InteractionMutex {
    taken: Mutex<AHashMap<String, String>>,
}

impl InteractionMutex {
    pub fn new() -> Self {
        Self {
            taken: Mutex::new(AHashMap::new()),
        }
    }

    /// Claim `resource` for `holder`. Re-taking by the same holder is
    /// allowed; returns `false` if another holder owns the resource.
    pub fn take(&self, resource: &str, holder: &str) -> bool {
        let mut taken = self.taken.lock();
        match taken.get(resource) {
            Some(current) if current != holder => {
                trace!(resource, holder, owner = %current, "interaction resource busy");
                false
            }
            _ => {
                taken.insert(resource.to_string(), holder.to_string());
                true
            }
        }
    }

    /// Release `resource` if `holder` owns it.
    pub fn release(&self, resource: &str, holder: &str) {
        let mut taken = self.taken.lock();
        if taken.get(resource).map(|h| h.as_str()) == Some(holder) {
            taken.remove(resource);
        }
    }

    /// Whether `resource` is currently held by someone other than `holder`.
    pub fn is_taken_by_other(&self, resource: &str, holder: &str) -> bool {
        self.taken
            .lock()
            .get(resource)
            .map_or(false, |h| h != holder)
    }
}

impl Default for InteractionMutex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_holder() {
        let mutex = InteractionMutex::new();
        assert!(mutex.take(GLOBAL_PAN, "axis-expand"));
        assert!(!mutex.take(GLOBAL_PAN, "brush"));
        assert!(mutex.is_taken_by_other(GLOBAL_PAN, "brush"));
        assert!(!mutex.is_taken_by_other(GLOBAL_PAN, "axis-expand"));
    }

    #[test]
    fn test_release_by_owner_only() {
        let mutex = InteractionMutex::new();
        assert!(mutex.take(GLOBAL_PAN, "axis-expand"));
        mutex.release(GLOBAL_PAN, "brush");
        assert!(mutex.is_taken_by_other(GLOBAL_PAN, "brush"));
        mutex.release(GLOBAL_PAN, "axis-expand");
        assert!(mutex.take(GLOBAL_PAN, "brush"));
    }

    #[test]
    fn test_retake_by_same_holder() {
        let mutex = InteractionMutex::new();
        assert!(mutex.take(GLOBAL_PAN, "axis-expand"));
        assert!(mutex.take(GLOBAL_PAN, "axis-expand"));
    }
}
