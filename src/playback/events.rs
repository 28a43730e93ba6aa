use std::sync::mpsc;

#[derive(Clone, Debug, PartialEq)]
/// Notification raised by a video backend after the corresponding state change.
pub enum BackendEvent {
    /// The current URL finished preparing and can report time.
    Prepared,
    /// A decoded frame is available.
    FrameReady(u64),
    /// The backend hit an error; playback should be re-requested.
    Error(String),
}

#[derive(Clone, Debug)]
/// Producer half held by a backend.
pub struct EventSender(mpsc::Sender<BackendEvent>);

impl EventSender {
    /// Deliver `event`. Returns `false` once the receiver is gone.
    pub fn emit(&self, event: BackendEvent) -> bool {
        self.0.send(event).is_ok()
    }
}

#[derive(Debug)]
/// Single consumer half, polled once per frame by the host.
pub struct EventReceiver(mpsc::Receiver<BackendEvent>);

impl EventReceiver {
    /// All events received since the last call, in emission order.
    pub fn drain(&self) -> Vec<BackendEvent> {
        self.0.try_iter().collect()
    }
}

/// Create a connected sender/receiver pair.
pub fn event_channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::channel();
    (EventSender(tx), EventReceiver(rx))
}

#[cfg(test)]
#[path = "../../tests/unit/playback/events.rs"]
mod tests;
