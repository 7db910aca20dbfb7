use crate::controller::in_flight::{InFlightGuard, InFlightSet};

/// **VALUE**: Verifies a second run is refused while the first ticket is held.
///
/// **BUG THIS CATCHES**: Would catch `try_begin` using `store` instead of `swap`, which
/// would admit overlapping submits.
#[test]
fn given_ticket_held_when_beginning_again_then_refused() {
    let guard = InFlightGuard::new();

    let first = guard.try_begin();
    let second = guard.try_begin();

    assert!(first.is_some());
    assert!(second.is_none());
    assert!(guard.is_busy());
}

#[test]
fn given_ticket_dropped_when_beginning_again_then_admitted() {
    let guard = InFlightGuard::new();

    drop(guard.try_begin());

    assert!(!guard.is_busy());
    assert!(guard.try_begin().is_some());
}

/// **VALUE**: Verifies per-key admission keeps different records independent.
#[test]
fn given_different_keys_when_beginning_then_both_admitted() {
    let set = InFlightSet::new();

    let one = set.try_begin(1);
    let two = set.try_begin(2);
    let one_again = set.try_begin(1);

    assert!(one.is_some());
    assert!(two.is_some());
    assert!(one_again.is_none());
    assert!(set.contains(1));

    drop(one);
    assert!(!set.contains(1));
    assert!(set.contains(2));
}
