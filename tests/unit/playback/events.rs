use super::*;

#[test]
fn drain_returns_events_in_order() {
    let (tx, rx) = event_channel();
    assert!(tx.emit(BackendEvent::Prepared));
    assert!(tx.emit(BackendEvent::FrameReady(3)));
    assert_eq!(
        rx.drain(),
        vec![BackendEvent::Prepared, BackendEvent::FrameReady(3)]
    );
    assert!(rx.drain().is_empty());
}

#[test]
fn emit_reports_closed_receiver() {
    let (tx, rx) = event_channel();
    drop(rx);
    assert!(!tx.emit(BackendEvent::Error("gone".to_string())));
}
