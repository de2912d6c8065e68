use std::time::{Duration, Instant};

use featherview_core::cursor::{CursorShape, IdleTimer, PointerCursor};
use featherview_core::deferred::Deferred;

// ---------------------------------------------------------------------------
// PointerCursor
// ---------------------------------------------------------------------------

#[test]
fn test_override_stack() {
    let mut cursor = PointerCursor::default();
    assert_eq!(cursor.shape(), CursorShape::Default);

    cursor.push_override(CursorShape::Move);
    assert!(cursor.has_override());
    assert_eq!(cursor.shape(), CursorShape::Move);

    cursor.pop_override();
    assert!(!cursor.has_override());
    assert_eq!(cursor.shape(), CursorShape::Default);
}

#[test]
fn test_hidden_wins_over_override() {
    let mut cursor = PointerCursor::default();
    cursor.push_override(CursorShape::Move);
    cursor.hide();
    assert_eq!(cursor.shape(), CursorShape::Hidden);

    cursor.show();
    assert_eq!(cursor.shape(), CursorShape::Move);
}

#[test]
fn test_release_restores_default() {
    let mut cursor = PointerCursor::default();
    cursor.push_override(CursorShape::Move);
    cursor.push_override(CursorShape::Move);
    cursor.hide();

    cursor.release();
    assert!(!cursor.is_hidden());
    assert!(!cursor.has_override());
    assert_eq!(cursor.shape(), CursorShape::Default);
}

// ---------------------------------------------------------------------------
// IdleTimer
// ---------------------------------------------------------------------------

#[test]
fn test_timer_fires_once() {
    let t0 = Instant::now();
    let mut timer = IdleTimer::new(Duration::from_millis(100));
    assert!(!timer.expire(t0 + Duration::from_secs(5)));

    timer.restart(t0);
    assert!(!timer.expire(t0 + Duration::from_millis(99)));
    assert!(timer.expire(t0 + Duration::from_millis(100)));
    assert!(!timer.expire(t0 + Duration::from_millis(200)));
}

#[test]
fn test_restart_pushes_deadline() {
    let t0 = Instant::now();
    let mut timer = IdleTimer::new(Duration::from_millis(100));
    timer.restart(t0);
    timer.restart(t0 + Duration::from_millis(80));
    assert!(!timer.expire(t0 + Duration::from_millis(150)));
    assert_eq!(timer.deadline(), Some(t0 + Duration::from_millis(180)));
}

#[test]
fn test_stop_cancels() {
    let t0 = Instant::now();
    let mut timer = IdleTimer::new(Duration::from_millis(100));
    timer.restart(t0);
    timer.stop();
    assert_eq!(timer.deadline(), None);
    assert!(!timer.expire(t0 + Duration::from_secs(1)));
}

// ---------------------------------------------------------------------------
// Deferred
// ---------------------------------------------------------------------------

#[test]
fn test_deferred_runs_once() {
    let mut deferred = Deferred::post(|n: &mut u32| *n += 5);
    assert!(deferred.is_pending());

    let mut value = 1;
    if let Some(task) = deferred.take() {
        task(&mut value);
    }
    assert_eq!(value, 6);
    assert!(!deferred.is_pending());
    assert!(deferred.take().is_none());
}

#[test]
fn test_deferred_empty() {
    let mut deferred = Deferred::<String>::default();
    assert!(!deferred.is_pending());
    assert!(deferred.take().is_none());
    assert_eq!(format!("{deferred:?}"), "Deferred { pending: false }");
}
