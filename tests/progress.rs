//! Progress counter and cancellation tests.

use std::sync::Mutex;
use std::thread;

use filmstripe::{CancellationToken, ProgressCounter, ProgressInfo};

// ── ProgressInfo ───────────────────────────────────────────────────

#[test]
fn percentage_reflects_completion() {
    let info = ProgressInfo {
        completed: 5,
        total: 10,
    };
    assert_eq!(info.percentage(), 50.0);
    assert_eq!(info.to_string(), "50.0%");
}

#[test]
fn zero_total_reports_complete() {
    let info = ProgressInfo {
        completed: 0,
        total: 0,
    };
    assert_eq!(info.percentage(), 100.0);
}

// ── ProgressCounter ────────────────────────────────────────────────

#[test]
fn advance_returns_post_increment_values() {
    let counter = ProgressCounter::new(3);

    assert_eq!(counter.completed(), 0);
    assert_eq!(counter.advance().completed, 1);
    assert_eq!(counter.advance().completed, 2);
    assert_eq!(counter.advance().completed, 3);
    assert_eq!(counter.completed(), 3);
    assert_eq!(counter.total(), 3);
}

#[test]
fn concurrent_increments_never_skip_or_duplicate() {
    const THREADS: u64 = 8;
    const PER_THREAD: u64 = 250;

    let counter = ProgressCounter::new(THREADS * PER_THREAD);
    let observed = Mutex::new(Vec::new());

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                let mut local = Vec::with_capacity(PER_THREAD as usize);
                for _ in 0..PER_THREAD {
                    local.push(counter.advance().completed);
                }
                observed.lock().unwrap().extend(local);
            });
        }
    });

    assert_eq!(counter.completed(), THREADS * PER_THREAD);

    // Every post-increment value is seen exactly once.
    let mut observed = observed.into_inner().unwrap();
    observed.sort_unstable();
    let expected: Vec<u64> = (1..=THREADS * PER_THREAD).collect();
    assert_eq!(observed, expected);
}

// ── CancellationToken ──────────────────────────────────────────────

#[test]
fn cancellation_token_default_not_cancelled() {
    let token = CancellationToken::new();
    assert!(!token.is_cancelled());

    let token = CancellationToken::default();
    assert!(!token.is_cancelled());
}

#[test]
fn cancellation_token_cancel() {
    let token = CancellationToken::new();
    token.cancel();
    assert!(token.is_cancelled());
}

#[test]
fn cancellation_token_clone_shares_state() {
    let token = CancellationToken::new();
    let clone = token.clone();
    assert!(!clone.is_cancelled());

    token.cancel();
    assert!(clone.is_cancelled());
}
