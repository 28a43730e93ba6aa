use super::*;
use crate::playback::memory::InMemoryBackend;

fn req(url: &str, offset: f64) -> PlaybackRequest {
    PlaybackRequest::new(url, offset)
}

#[test]
fn effective_time_adds_clip_offset() {
    let mut backend = InMemoryBackend::new();
    let mut driver = ClockDriver::new();

    let out = driver.drive(Some(&req("a", 0.0)), 5.0, Some(&mut backend));
    assert!(out.driving);
    assert_eq!(out.effective_time_secs, 5.0);

    let out = driver.drive(Some(&req("a", 2.0)), 5.0, Some(&mut backend));
    assert!(out.driving);
    assert_eq!(out.effective_time_secs, 7.0);
}

#[test]
fn identical_requests_issue_one_play() {
    let mut backend = InMemoryBackend::new();
    let mut driver = ClockDriver::new();

    let first = driver.drive(Some(&req("a", 1.0)), 0.0, Some(&mut backend));
    let second = driver.drive(Some(&req("a", 1.0 + 5e-5)), 0.1, Some(&mut backend));

    assert!(first.issued_play);
    assert!(!second.issued_play);
    assert!(second.driving);
    assert_eq!(backend.play_calls.len(), 1);
    assert_eq!(
        driver.state(),
        &DriverState::Requested {
            url: "a".to_string(),
            offset_secs: 1.0
        }
    );
}

#[test]
fn changed_url_or_offset_reissues() {
    let mut backend = InMemoryBackend::new();
    let mut driver = ClockDriver::new();

    driver.drive(Some(&req("a", 0.0)), 0.0, Some(&mut backend));
    driver.drive(Some(&req("a", 0.5)), 0.0, Some(&mut backend));
    driver.drive(Some(&req("b", 0.5)), 0.0, Some(&mut backend));
    assert_eq!(backend.play_calls.len(), 3);
    assert_eq!(backend.play_calls[2].url, "b");
}

#[test]
fn no_backend_reports_not_driving_but_keeps_time() {
    let mut driver = ClockDriver::new();
    let out = driver.drive(Some(&req("a", 2.0)), 1.0, None);
    assert!(!out.driving);
    assert_eq!(out.effective_time_secs, 3.0);
    assert_eq!(driver.state(), &DriverState::Idle);
    assert_eq!(driver.bound_backend(), None);
}

#[test]
fn missing_or_blank_request_is_a_no_op() {
    let mut backend = InMemoryBackend::new();
    let mut driver = ClockDriver::new();

    let out = driver.drive(None, 4.0, Some(&mut backend));
    assert_eq!(out, DriveOutcome::NOT_DRIVING);

    let out = driver.drive(Some(&req("   ", 1.0)), 4.0, Some(&mut backend));
    assert!(!out.driving);
    assert_eq!(out.effective_time_secs, 0.0);
    assert!(backend.play_calls.is_empty());
}

#[test]
fn backend_change_resets_session() {
    let mut first = InMemoryBackend::new();
    let mut second = InMemoryBackend::new();
    let mut driver = ClockDriver::new();

    driver.drive(Some(&req("a", 0.0)), 0.0, Some(&mut first));
    driver.drive(Some(&req("a", 0.0)), 0.0, Some(&mut second));

    assert_eq!(first.play_calls.len(), 1);
    assert_eq!(second.play_calls.len(), 1);
    assert_eq!(driver.bound_backend(), Some(second.id()));
}

#[test]
fn failed_play_retries_on_next_frame() {
    let mut backend = InMemoryBackend::new();
    backend.set_reject_play(true);
    let mut driver = ClockDriver::new();

    let out = driver.drive(Some(&req("a", 0.0)), 0.0, Some(&mut backend));
    assert!(out.driving);
    assert!(out.issued_play);
    assert_eq!(driver.state(), &DriverState::Idle);

    backend.set_reject_play(false);
    let out = driver.drive(Some(&req("a", 0.0)), 0.1, Some(&mut backend));
    assert!(out.issued_play);
    assert_eq!(backend.play_calls.len(), 1);
    assert!(matches!(driver.state(), DriverState::Requested { .. }));
}

#[test]
fn reset_forgets_issued_request() {
    let mut backend = InMemoryBackend::new();
    let mut driver = ClockDriver::new();

    driver.drive(Some(&req("a", 0.0)), 0.0, Some(&mut backend));
    driver.reset();
    assert_eq!(driver.state(), &DriverState::Idle);
    assert_eq!(driver.bound_backend(), None);

    driver.drive(Some(&req("a", 0.0)), 0.0, Some(&mut backend));
    assert_eq!(backend.play_calls.len(), 2);
}

#[test]
fn relative_urls_are_resolved_before_issue() {
    let mut backend = InMemoryBackend::new();
    let mut driver = ClockDriver::with_opts(DriverOpts {
        roots: UrlRoots {
            streaming: Some("https://cdn.example.com/media/".to_string()),
            ..UrlRoots::default()
        },
        ..DriverOpts::default()
    });

    driver.drive(Some(&req("clips/intro.mp4", 0.0)), 0.0, Some(&mut backend));
    assert_eq!(
        backend.play_calls[0].url,
        "https://cdn.example.com/media/clips/intro.mp4"
    );
}
