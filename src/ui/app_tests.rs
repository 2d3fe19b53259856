//! Application-level tests driving `MediaApp` against the fakes.

use std::{sync::Arc, time::Duration};

use tokio::{spawn, task::yield_now, time::sleep};

use crate::{
    api::{DeleteResponse, Picture},
    config::ClientSettings,
    error::{ApiError, UiError},
    playback::{EndOutcome, PlayOutcome, PlaybackState},
    state::{FontSize, Tab},
    testing::{FakeBackend, FakeMedia, sample_tracks},
    ui::{
        application::{Key, MediaApp},
        fragment::Action,
    },
};

type TestApp = MediaApp<FakeBackend, FakeMedia>;

fn app_with(backend: FakeBackend) -> TestApp {
    MediaApp::new(backend, FakeMedia::default(), ClientSettings::default())
}

async fn loaded_app(tracks: usize) -> TestApp {
    let app = app_with(FakeBackend::with_music(sample_tracks(tracks)));
    app.fetch_all().await;
    app
}

fn pictures(count: usize) -> Vec<Picture> {
    (0..count)
        .map(|i| Picture {
            url: format!("/pictures/{i}.jpg"),
            thumbnail_url: format!("/thumbnails/{i}.jpg"),
            title: format!("Picture {i}"),
            width: 800,
            height: 600,
            ..Picture::default()
        })
        .collect()
}

async fn settle() {
    for _ in 0..10 {
        yield_now().await;
    }
}

#[tokio::test]
async fn test_fetch_all_sets_ready_and_count() {
    let backend = FakeBackend::with_music(sample_tracks(3));
    backend.set_pictures(Ok(pictures(2)));
    let app = app_with(backend);
    assert!(app.state().snapshot().loading);

    app.fetch_all().await;

    let view = app.state().snapshot();
    assert_eq!(view.status, "Ready");
    assert!(!view.loading);
    assert_eq!(app.file_count_text().as_deref(), Some("5 files"));

    let fragment = app.fragment().unwrap();
    assert_eq!(fragment.tab, Tab::Music);
    assert!(fragment.actions.contains(&Action::PlayTrack(2)));
}

#[tokio::test]
async fn test_fetch_all_tolerates_partial_failure() {
    let backend = FakeBackend::with_music(sample_tracks(2));
    backend.set_documents(Err(ApiError::Status { code: 500 }));
    let app = app_with(backend);

    app.fetch_all().await;

    assert_eq!(app.state().snapshot().status, "Ready");
    assert_eq!(app.file_count_text().as_deref(), Some("2 files"));
}

#[tokio::test]
async fn test_failed_fetch_keeps_collection() {
    let app = loaded_app(3).await;
    app.backend()
        .set_music(Err(ApiError::Transport("connection refused".to_string())));

    assert!(app.fetch_music().await.is_err());
    assert_eq!(app.collections().music.len(), 3);
    assert!(app.banner_text().is_none(), "background fetches stay quiet");
}

#[tokio::test]
async fn test_load_music_failure_raises_banner() {
    let app = app_with(FakeBackend::default());
    app.backend().set_music(Err(ApiError::Status { code: 500 }));

    assert!(app.load_music().await.is_err());
    assert_eq!(
        app.banner_text().as_deref(),
        Some("Failed to load music: HTTP error! status: 500")
    );
}

#[tokio::test]
async fn test_stale_response_is_dropped() {
    let app = Arc::new(app_with(FakeBackend::with_music(sample_tracks(1))));
    let gate = app.backend().gate_next_music();

    let slow = spawn({
        let app = Arc::clone(&app);
        async move { app.fetch_music().await }
    });
    while app.backend().music_calls() == 0 {
        yield_now().await;
    }

    app.backend().set_music(Ok(sample_tracks(3)));
    app.fetch_music().await.unwrap();
    assert_eq!(app.collections().music.len(), 3);

    gate.send(()).unwrap();
    slow.await.unwrap().unwrap();
    assert_eq!(
        app.collections().music.len(),
        3,
        "older response must not overwrite the newer one"
    );
}

#[tokio::test]
async fn test_play_pause_resume() {
    let app = loaded_app(3).await;

    assert_eq!(app.play_track(0), PlayOutcome::Started(0));
    assert_eq!(app.state().snapshot().status, "Playing");
    assert_eq!(app.state().now_playing().as_deref(), Some("track_0.mp3"));
    assert_eq!(app.now_playing_track().unwrap().title, "Track 0");
    assert!(app.fragment().unwrap().html.contains("track-item playing"));

    assert_eq!(app.play_track(0), PlayOutcome::Paused);
    assert_eq!(app.state().snapshot().status, "Paused");
    assert!(app.with_media(|media| media.paused));

    assert_eq!(app.play_track(0), PlayOutcome::Resumed);
    assert_eq!(app.state().snapshot().status, "Playing");
    assert_eq!(app.with_media(|media| media.sources_assigned), 1);
}

#[tokio::test]
async fn test_play_out_of_range_is_noop() {
    let app = loaded_app(3).await;

    assert_eq!(app.play_track(-1), PlayOutcome::Ignored);
    assert_eq!(app.play_track(3), PlayOutcome::Ignored);
    assert_eq!(app.playback_state(), PlaybackState::Stopped);
    assert_eq!(app.state().snapshot().status, "Ready");
    assert!(app.with_media(|media| media.source.is_none()));
}

#[tokio::test]
async fn test_play_failure_shows_banner_and_keeps_index() {
    let media = FakeMedia {
        fail_with: Some("unsupported format".to_string()),
        ..FakeMedia::default()
    };
    let app = MediaApp::new(
        FakeBackend::with_music(sample_tracks(2)),
        media,
        ClientSettings::default(),
    );
    app.fetch_all().await;

    assert!(matches!(app.play_track(1), PlayOutcome::Failed { index: 1, .. }));
    assert_eq!(app.state().snapshot().status, "Playing");
    assert_eq!(
        app.banner_text().as_deref(),
        Some("Failed to play track: unsupported format")
    );
    assert_eq!(app.state().now_playing().as_deref(), Some("track_1.mp3"));
}

#[tokio::test]
async fn test_track_end_advances_then_stops() {
    let app = loaded_app(2).await;
    app.play_track(0);

    assert_eq!(
        app.on_track_ended(),
        EndOutcome::Advanced(PlayOutcome::Started(1))
    );
    assert_eq!(
        app.with_media(|media| media.source.clone()).as_deref(),
        Some("/music/track_1.mp3")
    );

    assert_eq!(app.now_playing_index(), 1);

    assert_eq!(app.on_track_ended(), EndOutcome::PlaylistEnded);
    assert_eq!(app.now_playing_index(), -1);
    assert_eq!(app.state().snapshot().status, "Playlist ended");
    assert_eq!(app.playback_state(), PlaybackState::Stopped);
    assert!(app.state().now_playing().is_none());
}

#[tokio::test]
async fn test_media_events() {
    let app = loaded_app(1).await;
    app.on_media_paused(true);
    assert_eq!(app.state().snapshot().status, "Ready", "ignored while stopped");

    app.play_track(0);
    app.on_media_paused(true);
    assert_eq!(app.state().snapshot().status, "Paused");
    assert!(matches!(app.playback_state(), PlaybackState::Paused { .. }));

    app.on_media_error();
    assert_eq!(app.banner_text().as_deref(), Some("Audio playback error"));
}

#[tokio::test]
async fn test_refetch_reconciles_now_playing() {
    let app = loaded_app(3).await;
    app.play_track(2);

    let mut tracks = sample_tracks(3);
    tracks.remove(0);
    app.backend().set_music(Ok(tracks));
    app.fetch_music().await.unwrap();
    assert!(matches!(
        app.playback_state(),
        PlaybackState::Playing { index: 1, .. }
    ));
    assert_eq!(app.now_playing_track().unwrap().filename, "track_2.mp3");

    app.backend().set_music(Ok(sample_tracks(2)));
    app.fetch_music().await.unwrap();
    assert!(
        !app.fragment().unwrap().html.contains("track-item playing"),
        "vanished track is no longer marked"
    );
}

#[tokio::test]
async fn test_cancel_delete_sends_nothing() {
    let app = loaded_app(3).await;

    assert!(app.confirm_delete(2));
    assert_eq!(
        app.delete_dialog_text().as_deref(),
        Some("Are you sure you want to delete \"Track 2\" by Artist?")
    );
    app.cancel_delete();

    assert!(app.delete_dialog_text().is_none());
    assert!(app.state().snapshot().pending_delete.is_none());
    assert_eq!(app.delete_track().await, Ok(false));
    assert!(app.backend().deleted.lock().is_empty());
}

#[tokio::test]
async fn test_confirm_delete_out_of_range() {
    let app = loaded_app(3).await;
    assert!(!app.confirm_delete(3));
    assert!(app.delete_dialog_text().is_none());
}

#[tokio::test]
async fn test_delete_success_refetches_once() {
    let app = loaded_app(3).await;
    let calls_before = app.backend().music_calls();

    app.confirm_delete(2);
    app.backend().set_music(Ok(sample_tracks(2)));
    assert_eq!(app.delete_track().await, Ok(true));

    assert_eq!(*app.backend().deleted.lock(), vec!["track_2.mp3".to_string()]);
    assert_eq!(app.backend().music_calls(), calls_before + 1);
    assert_eq!(app.state().snapshot().status, "Track deleted");
    assert_eq!(app.collections().music.len(), 2);
    assert!(app.delete_dialog_text().is_none());
    assert!(app.state().snapshot().pending_delete.is_none());
}

#[tokio::test]
async fn test_delete_uses_staged_filename() {
    let app = loaded_app(3).await;
    app.confirm_delete(0);

    let mut reordered = sample_tracks(3);
    reordered.reverse();
    app.backend().set_music(Ok(reordered));
    app.fetch_music().await.unwrap();

    app.delete_track().await.unwrap();
    assert_eq!(*app.backend().deleted.lock(), vec!["track_0.mp3".to_string()]);
}

#[tokio::test]
async fn test_delete_keeps_dialog_staged_during_request() {
    let app = Arc::new(loaded_app(3).await);
    app.confirm_delete(0);
    let gate = app.backend().gate_next_delete();

    let first = spawn({
        let app = Arc::clone(&app);
        async move { app.delete_track().await }
    });
    while app.backend().deleted.lock().is_empty() {
        yield_now().await;
    }

    assert!(app.confirm_delete(1));
    gate.send(()).unwrap();
    assert_eq!(first.await.unwrap(), Ok(true));

    assert_eq!(
        app.delete_dialog_text().as_deref(),
        Some("Are you sure you want to delete \"Track 1\" by Artist?")
    );
    assert_eq!(
        app.state().pending_delete_filename().as_deref(),
        Some("track_1.mp3")
    );

    app.handle_key(Key::Escape);
    assert!(app.delete_dialog_text().is_none());
    assert!(app.state().pending_delete_filename().is_none());
    assert_eq!(*app.backend().deleted.lock(), vec!["track_0.mp3".to_string()]);
}

#[tokio::test]
async fn test_delete_rejected_keeps_collection() {
    let app = loaded_app(3).await;
    let calls_before = app.backend().music_calls();
    app.backend().set_delete(Ok(DeleteResponse {
        status: "error".to_string(),
        message: Some("Permission denied".to_string()),
    }));

    app.confirm_delete(1);
    assert!(app.delete_track().await.is_err());

    assert_eq!(
        app.banner_text().as_deref(),
        Some("Failed to delete track: Permission denied")
    );
    assert_eq!(app.collections().music.len(), 3);
    assert_eq!(app.backend().music_calls(), calls_before);
    assert!(app.delete_dialog_text().is_none());
}

#[tokio::test]
async fn test_delete_rejected_without_message() {
    let app = loaded_app(1).await;
    app.backend().set_delete(Ok(DeleteResponse {
        status: "error".to_string(),
        message: None,
    }));

    app.confirm_delete(0);
    assert!(app.delete_track().await.is_err());
    assert_eq!(
        app.banner_text().as_deref(),
        Some("Failed to delete track: Delete failed")
    );
}

#[tokio::test]
async fn test_refresh() {
    let app = loaded_app(1).await;
    app.refresh().await.unwrap();
    assert_eq!(app.state().snapshot().status, "Updated");

    *app.backend().refresh.lock() = Err(ApiError::Transport("down".to_string()));
    assert!(app.refresh().await.is_err());
    assert_eq!(
        app.banner_text().as_deref(),
        Some("Failed to refresh: Network error: down")
    );
}

#[tokio::test]
async fn test_lyrics_overlay() {
    let mut tracks = sample_tracks(2);
    tracks[1].lyrics = Some("La la la".to_string());
    let app = app_with(FakeBackend::with_music(tracks));
    app.fetch_all().await;

    assert!(app.show_lyrics(0));
    assert_eq!(app.lyrics().unwrap().lyrics, "No lyrics available");
    assert_eq!(app.lyrics_larger(), FontSize::Large);
    assert_eq!(app.lyrics_font_size(), FontSize::Large);

    assert!(app.dispatch(Action::ShowLyrics(1)));
    assert_eq!(app.lyrics().unwrap().lyrics, "La la la");
    assert_eq!(app.lyrics_font_size(), FontSize::Medium);

    assert!(!app.show_lyrics(2));
    app.hide_lyrics();
    assert!(app.lyrics().is_none());
}

#[tokio::test]
async fn test_image_viewer_keys() {
    let backend = FakeBackend::default();
    backend.set_pictures(Ok(pictures(3)));
    let app = app_with(backend);
    app.fetch_all().await;
    app.select_tab(Tab::Pictures);

    app.handle_key(Key::ArrowRight);
    assert!(app.image_view().is_none(), "arrows do nothing while closed");

    assert!(app.show_image(0));
    assert_eq!(app.image_view().unwrap().meta, "800x600 • Unknown date");
    app.handle_key(Key::ArrowRight);
    app.handle_key(Key::ArrowRight);
    app.handle_key(Key::ArrowRight);
    assert_eq!(app.current_image(), Some(2));
    assert!(!app.image_view().unwrap().next_enabled);

    app.handle_key(Key::ArrowLeft);
    assert_eq!(app.image_view().unwrap().url, "/pictures/1.jpg");

    app.handle_key(Key::Escape);
    assert!(app.image_view().is_none());
    assert!(app.current_image().is_none());
}

#[tokio::test]
async fn test_escape_closes_dialog_before_lyrics() {
    let app = loaded_app(2).await;
    app.show_lyrics(0);
    app.confirm_delete(1);

    app.handle_key(Key::Escape);
    assert!(app.delete_dialog_text().is_none());
    assert!(app.lyrics().is_some());

    app.handle_key(Key::Escape);
    assert!(app.lyrics().is_none());
}

#[tokio::test]
async fn test_dispatch_from_data_attributes() {
    let app = loaded_app(2).await;

    assert_eq!(app.dispatch_data("play", "1"), Ok(true));
    assert_eq!(app.state().now_playing().as_deref(), Some("track_1.mp3"));
    assert_eq!(app.dispatch_data("play", "9"), Ok(false));
    assert!(matches!(
        app.dispatch_data("explode", "0"),
        Err(UiError::UnknownAction(_))
    ));
    assert!(matches!(
        "Tab".parse::<Key>(),
        Err(UiError::UnknownAction(_))
    ));
    assert_eq!("Escape".parse::<Key>(), Ok(Key::Escape));
}

#[tokio::test]
async fn test_select_tab_renders_active_tab() {
    let app = loaded_app(1).await;
    let fragment = app.select_tab(Tab::Documents);
    assert_eq!(fragment.tab, Tab::Documents);
    assert!(fragment.html.contains("No documents found"));
    assert_eq!(app.state().current_tab(), Tab::Documents);
}

#[tokio::test]
async fn test_fetch_rerenders_only_its_active_tab() {
    let app = loaded_app(1).await;
    app.select_tab(Tab::Pictures);
    assert!(app.fragment().unwrap().html.contains("No pictures found"));

    app.backend().set_pictures(Ok(pictures(2)));
    app.fetch_pictures().await.unwrap();
    let fragment = app.fragment().unwrap();
    assert_eq!(fragment.tab, Tab::Pictures);
    assert_eq!(fragment.actions, [Action::ShowImage(0), Action::ShowImage(1)]);

    app.backend().set_music(Ok(sample_tracks(3)));
    app.fetch_music().await.unwrap();
    assert_eq!(app.fragment().unwrap().tab, Tab::Pictures);
    assert_eq!(app.collections().music.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_polling_refetches_music() {
    let app = Arc::new(app_with(FakeBackend::with_music(sample_tracks(1))));
    let poller = app.start_polling();

    sleep(Duration::from_millis(6500)).await;
    settle().await;
    assert_eq!(app.backend().music_calls(), 2);

    poller.stop().await;
    sleep(Duration::from_millis(10_000)).await;
    settle().await;
    assert_eq!(app.backend().music_calls(), 2);
}
