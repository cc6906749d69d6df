use super::*;

#[test]
fn fresh_debouncer_settles_its_first_ticket() {
    let mut d = Debouncer::new();
    let t = d.trigger();
    assert!(d.settle(t));
}

#[test]
fn single_trigger_settles_once() {
    let mut d = Debouncer::new();
    let t = d.trigger();
    assert!(d.settle(t));
    assert!(!d.settle(t));
}

#[test]
fn burst_settles_only_latest() {
    let mut d = Debouncer::new();
    let first = d.trigger();
    let second = d.trigger();
    let third = d.trigger();
    assert!(!d.settle(first));
    assert!(!d.settle(second));
    assert!(d.settle(third));
}

#[test]
fn stale_ticket_after_settle_is_ignored() {
    let mut d = Debouncer::new();
    let old = d.trigger();
    let new = d.trigger();
    assert!(d.settle(new));
    assert!(!d.settle(old));
}

#[test]
fn tickets_are_distinct() {
    let mut d = Debouncer::new();
    let a = d.trigger();
    let b = d.trigger();
    assert_ne!(a, b);
}
