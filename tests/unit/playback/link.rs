use super::*;
use crate::playback::memory::InMemoryBackend;

fn clip(url: &str, offset: f64) -> PlaybackRequest {
    PlaybackRequest::new(url, offset)
}

#[test]
fn empty_url_is_rejected() {
    let mut link = TimelineLink::new(InMemoryBackend::new());
    assert!(!link.request_clip(&clip("", 0.0)));
    assert!(link.active_clip().is_none());
    assert_eq!(link.tick(), LinkTick::Idle);
}

#[test]
fn negative_offset_is_clamped() {
    let mut link = TimelineLink::new(InMemoryBackend::new());
    assert!(link.request_clip(&clip("a.mp4", -3.0)));
    assert_eq!(link.active_clip().map(|c| c.start_offset_secs), Some(0.0));
}

#[test]
fn same_request_is_issued_once() {
    let mut link = TimelineLink::new(InMemoryBackend::new());
    assert!(link.request_clip(&clip("a.mp4", 1.0)));
    assert!(link.request_clip(&clip("a.mp4", 1.0)));
    link.tick();
    assert_eq!(link.backend().play_calls.len(), 1);
}

#[test]
fn offset_seek_waits_for_prepare() {
    let mut link = TimelineLink::new(InMemoryBackend::new());
    link.request_clip(&clip("a.mp4", 2.0));
    assert_eq!(link.pending_seek(), Some(2.0));
    assert_eq!(link.tick(), LinkTick::AwaitingVideoTime);

    link.backend_mut().advance(0.0);
    let tick = link.tick();
    assert_eq!(link.pending_seek(), None);
    assert_eq!(
        tick,
        LinkTick::Playing {
            timeline_secs: 0.0,
            progress: None
        }
    );

    link.backend_mut().advance(1.5);
    assert_eq!(
        link.tick(),
        LinkTick::Playing {
            timeline_secs: 1.5,
            progress: None
        }
    );
}

#[test]
fn paused_backend_pauses_timeline() {
    let mut link = TimelineLink::new(InMemoryBackend::new());
    link.request_clip(&clip("a.mp4", 0.0));
    link.backend_mut().advance(0.0);
    link.backend_mut().pause();
    assert_eq!(link.tick(), LinkTick::Paused);
}

#[test]
fn progress_reported_while_playing() {
    let mut link = TimelineLink::new(InMemoryBackend::new().with_duration(10.0));
    link.request_clip(&clip("a.mp4", 0.0));
    link.backend_mut().advance(0.0);
    link.tick();
    link.backend_mut().advance(5.0);
    assert_eq!(
        link.tick(),
        LinkTick::Playing {
            timeline_secs: 5.0,
            progress: Some(0.5)
        }
    );

    link.backend_mut().set_seeking(true);
    // Seeking backends do not report playing.
    assert_eq!(link.tick(), LinkTick::Paused);
}

#[test]
fn rejected_play_is_retried_on_tick() {
    let mut backend = InMemoryBackend::new();
    backend.set_reject_play(true);
    let mut link = TimelineLink::new(backend);

    assert!(!link.request_clip(&clip("a.mp4", 0.0)));
    assert!(link.backend().play_calls.is_empty());

    link.backend_mut().set_reject_play(false);
    link.tick();
    assert_eq!(link.backend().play_calls.len(), 1);
}

#[test]
fn link_can_be_driven_as_a_backend() {
    use crate::playback::driver::ClockDriver;

    let mut link = TimelineLink::new(InMemoryBackend::new());
    let mut driver = ClockDriver::new();
    let req = clip("a.mp4", 0.5);

    let out = driver.drive(Some(&req), 1.0, Some(&mut link));
    assert!(out.driving);
    assert_eq!(out.effective_time_secs, 1.5);
    assert_eq!(driver.bound_backend(), Some(link.id()));
    assert_eq!(link.backend().play_calls.len(), 1);
}
