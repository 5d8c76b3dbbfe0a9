//! Voice memo control tests
//!
//! Several controls sharing one context, as in a transactions table where
//! every audio row renders its own play button.

use ledger_playback::{
    AudioControl, ControlState, NativeEvent, PlaybackConfig, PlaybackContext, PlaybackCoordinator,
    PlaybackError, ResourceLocator,
};
use std::rc::Rc;
use url::Url;

use test_helpers::{init_tracing, MockHandle, RenderCounter};

fn context() -> PlaybackContext {
    let config = PlaybackConfig {
        audio_base_url: "https://api.example.com".to_string(),
        ..PlaybackConfig::default()
    };
    PlaybackContext::new(&config).unwrap()
}

fn deliver(handle: &MockHandle, control: &AudioControl) {
    for event in handle.take_events() {
        control.handle_event(&event);
    }
}

fn mounted(
    context: &PlaybackContext,
    path: &str,
    renders: &RenderCounter,
) -> (AudioControl, Rc<MockHandle>) {
    let control = AudioControl::new(context, Some(path.to_string()), None, renders.callback());
    let handle = MockHandle::shared();
    control.mount(handle.clone());
    (control, handle)
}

#[tokio::test]
async fn test_playing_another_memo_resets_first_button() {
    init_tracing();
    let context = context();
    let first_renders = RenderCounter::new();
    let second_renders = RenderCounter::new();
    let (first, first_handle) = mounted(&context, "/uploads/1.webm", &first_renders);
    let (second, second_handle) = mounted(&context, "/uploads/2.webm", &second_renders);

    assert_eq!(
        first.url().map(Url::as_str),
        Some("https://api.example.com/uploads/1.webm")
    );

    first.toggle().await.unwrap();
    deliver(&first_handle, &first);
    assert_eq!(first.state(), ControlState::Playing);
    assert_eq!(second.state(), ControlState::Idle);

    second_renders.reset();
    second.toggle().await.unwrap();
    deliver(&first_handle, &first);
    deliver(&second_handle, &second);

    assert_eq!(first.state(), ControlState::Idle);
    assert_eq!(second.state(), ControlState::Playing);
    // The idle row re-rendered without polling
    assert!(first_renders.get() > 0);
    assert!(second_renders.get() > 0);
}

#[tokio::test]
async fn test_failed_memo_reports_error_and_blocks_retries() {
    init_tracing();
    let context = context();
    let renders = RenderCounter::new();
    let (control, handle) = mounted(&context, "/uploads/broken.webm", &renders);

    handle.fail_next_play(PlaybackError::Unsupported(
        "no supported source was found".to_string(),
    ));

    let err = control.toggle().await.unwrap_err();
    assert!(matches!(err, PlaybackError::Unsupported(_)));
    assert_eq!(control.state(), ControlState::Failed);
    assert!(!control.state().accepts_input());
    assert_eq!(context.coordinator().current_owner(), None);

    assert!(matches!(
        control.toggle().await,
        Err(PlaybackError::Disabled(_))
    ));
}

#[tokio::test]
async fn test_pending_play_interrupted_by_other_memo_stays_usable() {
    init_tracing();
    let context = context();
    let first_renders = RenderCounter::new();
    let second_renders = RenderCounter::new();
    let (first, first_handle) = mounted(&context, "/uploads/a.webm", &first_renders);
    let (second, second_handle) = mounted(&context, "/uploads/b.webm", &second_renders);
    first_handle.hold_play();

    // Second memo clicked while the first one's play request is still pending
    let (first_result, ()) = tokio::join!(first.toggle(), async {
        deliver(&first_handle, &first);
        second.toggle().await.unwrap();
        first_handle.open_gate();
    });

    assert!(matches!(first_result, Err(PlaybackError::Aborted(_))));
    deliver(&first_handle, &first);
    deliver(&second_handle, &second);
    assert_eq!(first.state(), ControlState::Idle);
    assert_eq!(second.state(), ControlState::Playing);
    assert_eq!(
        context.coordinator().current_owner().as_deref(),
        Some("/uploads/b.webm")
    );

    // The interrupted memo can still be played
    first.toggle().await.unwrap();
    deliver(&first_handle, &first);
    deliver(&second_handle, &second);
    assert_eq!(first.state(), ControlState::Playing);
    assert_eq!(second.state(), ControlState::Idle);
}

#[tokio::test]
async fn test_load_error_while_playing_releases_slot() {
    init_tracing();
    let context = context();
    let renders = RenderCounter::new();
    let (control, handle) = mounted(&context, "/uploads/1.webm", &renders);

    control.toggle().await.unwrap();
    deliver(&handle, &control);

    control.handle_event(&NativeEvent::Error {
        message: "media error 2".to_string(),
    });

    assert_eq!(control.state(), ControlState::Failed);
    assert_eq!(context.coordinator().current_owner(), None);
}

#[tokio::test]
async fn test_changing_path_releases_old_identity() {
    init_tracing();
    let context = context();
    let renders = RenderCounter::new();
    let (mut control, handle) = mounted(&context, "/uploads/1.webm", &renders);

    control.toggle().await.unwrap();
    assert_eq!(
        context.coordinator().current_owner().as_deref(),
        Some("/uploads/1.webm")
    );

    assert!(control.set_audio_path(Some("/uploads/2.webm".to_string())));
    assert_eq!(context.coordinator().current_owner(), None);
    assert_eq!(handle.stop_commands(), 1);
    assert_eq!(context.coordinator().subscriber_count(), 1);

    // Nothing mounted for the new URL yet
    control.toggle().await.unwrap();
    assert_eq!(context.coordinator().current_owner(), None);

    control.mount(MockHandle::shared());
    control.toggle().await.unwrap();
    assert_eq!(
        context.coordinator().current_owner().as_deref(),
        Some("/uploads/2.webm")
    );
}

#[tokio::test]
async fn test_dropping_playing_control_releases_slot() {
    init_tracing();
    let context = context();
    let renders = RenderCounter::new();
    let (control, handle) = mounted(&context, "/uploads/1.webm", &renders);

    control.toggle().await.unwrap();
    drop(control);

    assert_eq!(context.coordinator().current_owner(), None);
    assert_eq!(context.coordinator().subscriber_count(), 0);
    assert!(!handle.is_playing());
}

#[tokio::test]
async fn test_memo_without_path_shows_transcript_only() {
    init_tracing();
    let context = context();
    let control = AudioControl::new(
        &context,
        None,
        Some("lunch with team 32.00".to_string()),
        || {},
    );

    assert_eq!(control.state(), ControlState::Unavailable);
    assert_eq!(control.transcript(), Some("lunch with team 32.00"));
    control.toggle().await.unwrap();
    assert_eq!(context.coordinator().current_owner(), None);
}

struct SignedLocator;

impl ResourceLocator for SignedLocator {
    fn locate(&self, path: Option<&str>) -> Option<Url> {
        let mut url = Url::parse("https://cdn.example.com").ok()?.join(path?).ok()?;
        url.query_pairs_mut().append_pair("sig", "test");
        Some(url)
    }
}

#[tokio::test]
async fn test_custom_locator() {
    init_tracing();
    let context =
        PlaybackContext::with_locator(PlaybackCoordinator::new(), Rc::new(SignedLocator), "none");
    let control = AudioControl::new(&context, Some("memos/7.ogg".to_string()), None, || {});

    assert_eq!(
        control.url().map(Url::as_str),
        Some("https://cdn.example.com/memos/7.ogg?sig=test")
    );

    let empty = AudioControl::new(&context, None, None, || {});
    assert_eq!(empty.id(), "none");
    assert_eq!(empty.state(), ControlState::Unavailable);
}
