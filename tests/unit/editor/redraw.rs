use super::*;

#[test]
fn requests_coalesce_until_taken() {
    let mut r = RedrawScheduler::default();
    assert!(!r.is_pending());
    assert!(r.request());
    assert!(!r.request());
    assert!(!r.request());
    assert_eq!(r.coalesced(), 2);

    assert!(r.take());
    assert!(!r.take());
    assert!(r.request());
}
