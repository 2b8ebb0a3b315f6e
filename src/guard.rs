//! Rehash suppression state.
//!
//! A rehash reinserts every live entry through the normal insert path; each
//! of those inserts would otherwise re-evaluate the load factor and could
//! trigger a nested rehash. The same applies while a map constructor seeds
//! its initial batch. `RehashState` is the instance-scoped flag that
//! suppresses dynamic evaluation for the duration of such a pass. This is a
//! logical-recursion guard only, not a thread-safety mechanism.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-map suppression tracker. Embed in a struct and bracket bulk
/// reinsertion passes with `let _g = self.rehash_state.begin();`.
#[derive(Debug)]
pub(crate) struct RehashState {
    active: Cell<bool>,
    // Keep !Send + !Sync in line with single-threaded design.
    _nosend: PhantomData<*mut ()>,
}

impl RehashState {
    pub(crate) const fn new() -> Self {
        Self {
            active: Cell::new(false),
            _nosend: PhantomData,
        }
    }

    /// True while a suppression pass is running.
    #[inline]
    pub(crate) fn in_progress(&self) -> bool {
        self.active.get()
    }

    /// Begin a suppression pass. Nested activation indicates a logic error
    /// in the caller and panics in debug builds.
    #[inline]
    pub(crate) fn begin(&self) -> SuppressionGuard<'_> {
        debug_assert!(
            !self.active.get(),
            "nested rehash: a rehash triggered another rehash"
        );
        self.active.set(true);
        SuppressionGuard { owner: self }
    }
}

impl Default for RehashState {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard returned by [`RehashState::begin`]; clears the flag on drop
/// so early returns cannot leave suppression stuck on.
pub(crate) struct SuppressionGuard<'a> {
    owner: &'a RehashState,
}

impl Drop for SuppressionGuard<'_> {
    fn drop(&mut self) {
        self.owner.active.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::RehashState;

    #[test]
    fn flag_tracks_guard_lifetime() {
        let state = RehashState::new();
        assert!(!state.in_progress());
        {
            let _g = state.begin();
            assert!(state.in_progress());
        }
        assert!(!state.in_progress());
    }

    #[test]
    fn flag_clears_on_early_exit() {
        let state = RehashState::new();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _g = state.begin();
            panic!("mid-pass failure");
        }));
        assert!(res.is_err());
        assert!(!state.in_progress(), "guard drop must clear the flag");
    }

    #[cfg(debug_assertions)]
    #[test]
    fn nested_begin_panics_in_debug() {
        let state = RehashState::new();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _g1 = state.begin();
            let _g2 = state.begin();
        }));
        assert!(res.is_err(), "expected nested begin to panic in debug builds");
    }
}
