//! Single-flight coordination for the forced sign-in redirect.
//!
//! When several in-flight requests all come back 401, only the first
//! may clear the session and push the user to sign-in; the rest fail
//! quietly. The claim is a compare-exchange on an atomic flag, taken
//! without any await between the check and the set, and released by an
//! RAII guard so the flag resets on every exit path, including a failed
//! or cancelled navigation.

use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether a sign-in redirect episode is currently in flight.
pub struct RedirectGuard {
    in_flight: AtomicBool,
}

impl RedirectGuard {
    pub const fn new() -> Self {
        Self {
            in_flight: AtomicBool::new(false),
        }
    }

    /// Claim the current episode.
    ///
    /// Returns `Some` for exactly one caller per episode; the episode
    /// ends when the returned guard drops.
    pub fn try_begin(&self) -> Option<EpisodeGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| EpisodeGuard { flag: &self.in_flight })
    }
}

impl Default for RedirectGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Live claim on a redirect episode. Dropping it ends the episode.
pub struct EpisodeGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for EpisodeGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};

    #[test]
    fn test_only_one_claim_per_episode() {
        let guard = RedirectGuard::new();

        let episode = guard.try_begin();
        assert!(episode.is_some());
        assert!(guard.try_begin().is_none());
    }

    #[test]
    fn test_drop_ends_the_episode() {
        let guard = RedirectGuard::new();

        {
            let _episode = guard.try_begin().unwrap();
            assert!(guard.try_begin().is_none());
        }

        assert!(guard.try_begin().is_some());
    }

    #[test]
    fn test_concurrent_claims_yield_a_single_winner() {
        let guard = Arc::new(RedirectGuard::new());
        let barrier = Arc::new(Barrier::new(16));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let guard = Arc::clone(&guard);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    // Hold the claim until the end of the thread so the
                    // losers observe a busy episode.
                    let claimed = guard.try_begin();
                    std::thread::sleep(std::time::Duration::from_millis(20));
                    claimed.is_some()
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
