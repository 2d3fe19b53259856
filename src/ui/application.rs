//! The application controller.
//!
//! `MediaApp` owns every piece of client state: the three collections, the
//! view state, playback, the overlays and the error banner. Hosts call its
//! operations in response to user input and media events, and read back the
//! rendered fragment and overlay contents.
//!
//! Locks are only held for synchronous sections and never across an
//! `.await`, so a poll fetch and a user-triggered fetch can be in flight at
//! the same time. When more than one lock is needed they are taken in the
//! order collections, playback, overlays.

use std::{future::Future, str::FromStr, sync::Arc, time::Instant};

use {
    chrono::Local,
    parking_lot::{Mutex, RwLock},
    tokio::join,
    tracing::{debug, info},
};

use crate::{
    api::{Backend, Track},
    config::ClientSettings,
    error::{ApiError, ErrorReporter, UiError},
    library::{Feed, MediaCollections, Poller},
    playback::{EndOutcome, MediaElement, PlayOutcome, PlaybackController, PlaybackState},
    state::{AppState, AppStateEvent, FontSize, PendingDelete, Tab},
    ui::{
        components::{
            DeleteDialog, ErrorBanner, ImageView, ImageViewer, LyricsContent, LyricsOverlay,
        },
        fragment::{Action, Fragment},
        views::{MusicListOptions, NowPlaying, documents_list, music_list, pictures_grid},
    },
};

/// Keys the application reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Closes the topmost overlay.
    Escape,
    /// Previous image.
    ArrowLeft,
    /// Next image.
    ArrowRight,
}

impl FromStr for Key {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Escape" => Ok(Key::Escape),
            "ArrowLeft" => Ok(Key::ArrowLeft),
            "ArrowRight" => Ok(Key::ArrowRight),
            other => Err(UiError::UnknownAction(other.to_string())),
        }
    }
}

/// Playback controller and the media element it drives.
struct Playback<M> {
    controller: PlaybackController,
    media: M,
}

/// Overlays that sit above the tab content.
#[derive(Default)]
struct Overlays {
    lyrics: LyricsOverlay,
    viewer: ImageViewer,
    delete_dialog: DeleteDialog,
}

/// Client application state and operations.
pub struct MediaApp<B: Backend, M: MediaElement> {
    /// Media server access.
    backend: B,
    /// Settings captured at start-up.
    settings: ClientSettings,
    /// Music, pictures and documents.
    collections: RwLock<MediaCollections>,
    /// Observable view state.
    state: AppState,
    /// Playback state machine and the shared media element.
    playback: Mutex<Playback<M>>,
    /// Lyrics overlay, image viewer and delete dialog.
    overlays: Mutex<Overlays>,
    /// Transient error banner.
    banner: Mutex<ErrorBanner>,
    /// Last rendered fragment of the active tab.
    fragment: RwLock<Option<Fragment>>,
}

impl<B: Backend, M: MediaElement> MediaApp<B, M> {
    /// Creates the application with empty collections on the music tab.
    ///
    /// # Arguments
    ///
    /// * `backend` - Media server access.
    /// * `media` - The single media element used for playback.
    /// * `settings` - Client settings.
    pub fn new(backend: B, media: M, settings: ClientSettings) -> Self {
        let banner = ErrorBanner::new(settings.error_banner_duration());
        Self {
            backend,
            settings,
            collections: RwLock::new(MediaCollections::default()),
            state: AppState::new(),
            playback: Mutex::new(Playback {
                controller: PlaybackController::new(),
                media,
            }),
            overlays: Mutex::new(Overlays::default()),
            banner: Mutex::new(banner),
            fragment: RwLock::new(None),
        }
    }

    /// The backend in use.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Observable view state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Copy of the current collections.
    pub fn collections(&self) -> MediaCollections {
        self.collections.read().clone()
    }

    /// Fetches the music collection.
    ///
    /// On success the collection is replaced, the playback position is
    /// re-resolved by filename and the music tab re-renders if active. On
    /// failure the previous collection is kept.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of a failed request. Failures are only logged
    /// at debug level here, callers decide how loud to be.
    pub async fn fetch_music(&self) -> Result<(), ApiError> {
        self.fetch_feed(Feed::Music, || self.backend.music(), MediaCollections::apply_music)
            .await
            .map(drop)
    }

    /// Fetches the picture collection.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of a failed request.
    pub async fn fetch_pictures(&self) -> Result<(), ApiError> {
        self.fetch_feed(Feed::Pictures, || self.backend.pictures(), MediaCollections::apply_pictures)
            .await
            .map(drop)
    }

    /// Fetches the document collection.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of a failed request.
    pub async fn fetch_documents(&self) -> Result<(), ApiError> {
        self.fetch_feed(
            Feed::Documents,
            || self.backend.documents(),
            MediaCollections::apply_documents,
        )
        .await
        .map(drop)
    }

    /// Runs one request for `feed` under a fresh epoch.
    ///
    /// An applied response is followed by `feed_updated`.
    ///
    /// # Returns
    ///
    /// Whether the response was applied (`false` when it was stale).
    async fn fetch_feed<T, F, Fut>(
        &self,
        feed: Feed,
        request: F,
        apply: fn(&mut MediaCollections, u64, Vec<T>) -> bool,
    ) -> Result<bool, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        let epoch = self.collections.write().begin_fetch(feed);

        match request().await {
            Ok(items) => {
                let count = items.len();
                let applied = apply(&mut *self.collections.write(), epoch, items);
                if applied {
                    debug!(?feed, epoch, count, "Collection updated");
                    self.feed_updated(feed);
                }
                Ok(applied)
            }
            Err(e) => {
                ErrorReporter::debug(
                    &e,
                    &format!("Fetching {feed:?}, keeping previous collection"),
                );
                Err(e)
            }
        }
    }

    /// Re-resolves the playback position after a music update, then
    /// re-renders the feed's tab if it is the active one.
    fn feed_updated(&self, feed: Feed) {
        if feed == Feed::Music {
            let collections = self.collections.read();
            self.playback.lock().controller.reconcile(&collections.music);
        }
        self.rerender_if_active(feed.tab());
    }

    /// Loads the music collection on its own, raising the banner on failure.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of a failed request.
    pub async fn load_music(&self) -> Result<(), ApiError> {
        self.fetch_music().await.inspect_err(|e| {
            ErrorReporter::warn(e, "Error loading music");
            self.show_banner(ErrorReporter::to_user_message("load music", e));
        })
    }

    /// Fetches all three collections concurrently.
    ///
    /// Partial failures are logged and tolerated. Once every request has
    /// settled the status reads "Ready" and the file count is updated.
    pub async fn fetch_all(&self) {
        let (music, pictures, documents) = join!(
            self.fetch_music(),
            self.fetch_pictures(),
            self.fetch_documents()
        );

        for (feed, result) in [
            (Feed::Music, music),
            (Feed::Pictures, pictures),
            (Feed::Documents, documents),
        ] {
            if let Err(e) = result {
                ErrorReporter::warn(&e, &format!("Error fetching {feed:?}"));
            }
        }

        let total = self.collections.read().total_files();
        info!(total, "Collections loaded");
        self.state.set_status("Ready");
        self.state.set_file_count(total);
        self.render();
    }

    /// Asks the server to rescan, then re-fetches everything.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the refresh request. The banner has
    /// already been raised when this returns an error.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.state.set_status("Refreshing...");

        match self.backend.refresh().await {
            Ok(()) => {
                self.fetch_all().await;
                self.state.set_status("Updated");
                Ok(())
            }
            Err(e) => {
                ErrorReporter::warn(&e, "Error refreshing");
                self.show_banner(ErrorReporter::to_user_message("refresh", &e));
                Err(e)
            }
        }
    }

    /// Renders the active tab and stores the result.
    pub fn render(&self) -> Fragment {
        let tab = self.state.current_tab();
        let now = Local::now().naive_local();

        let fragment = {
            let collections = self.collections.read();
            match tab {
                Tab::Music => {
                    let playback = self.playback.lock();
                    let now_playing =
                        playback
                            .controller
                            .current_filename()
                            .map(|filename| NowPlaying {
                                filename,
                                paused: playback.media.is_paused(),
                            });
                    music_list::render(
                        &collections.music,
                        MusicListOptions {
                            now_playing,
                            preview_chars: self.settings.lyrics_preview_chars,
                            now,
                        },
                    )
                }
                Tab::Pictures => pictures_grid::render(&collections.pictures),
                Tab::Documents => documents_list::render(&collections.documents, now),
            }
        };

        *self.fragment.write() = Some(fragment.clone());
        self.state.finish_loading();
        self.state.notify(AppStateEvent::FragmentRendered(tab));
        fragment
    }

    fn rerender_if_active(&self, tab: Tab) {
        if self.state.current_tab() == tab {
            self.render();
        }
    }

    /// Last rendered fragment.
    pub fn fragment(&self) -> Option<Fragment> {
        self.fragment.read().clone()
    }

    /// Switches to `tab` and renders it.
    pub fn select_tab(&self, tab: Tab) -> Fragment {
        if self.state.set_tab(tab) {
            debug!(%tab, "Tab selected");
        }
        self.render()
    }

    /// Combined file count as shown in the header, e.g. `"12 files"`.
    pub fn file_count_text(&self) -> Option<String> {
        self.state
            .snapshot()
            .file_count
            .map(|total| format!("{total} files"))
    }

    /// Plays, pauses or resumes the track at `index`.
    ///
    /// Out-of-range indices, including negative ones, are ignored.
    pub fn play_track(&self, index: isize) -> PlayOutcome {
        let outcome = {
            let collections = self.collections.read();
            let mut playback = self.playback.lock();
            let Playback { controller, media } = &mut *playback;
            controller.play_track(&collections.music, index, media, |filename| {
                self.backend.stream_url(filename)
            })
        };

        self.apply_play_outcome(&outcome);
        outcome
    }

    fn apply_play_outcome(&self, outcome: &PlayOutcome) {
        match outcome {
            PlayOutcome::Ignored => return,
            PlayOutcome::Paused => self.state.set_status("Paused"),
            PlayOutcome::Resumed | PlayOutcome::Started(_) => self.state.set_status("Playing"),
            PlayOutcome::Failed { reason, .. } => {
                self.state.set_status("Playing");
                self.show_banner(format!("Failed to play track: {reason}"));
            }
        }
        self.sync_now_playing();
        self.rerender_if_active(Tab::Music);
    }

    fn sync_now_playing(&self) {
        let filename = self
            .playback
            .lock()
            .controller
            .current_filename()
            .map(str::to_string);
        self.state.set_now_playing(filename);
    }

    /// Handles the media element reaching the end of the current track.
    pub fn on_track_ended(&self) -> EndOutcome {
        let outcome = {
            let collections = self.collections.read();
            let mut playback = self.playback.lock();
            let Playback { controller, media } = &mut *playback;
            controller.on_track_ended(&collections.music, media, |filename| {
                self.backend.stream_url(filename)
            })
        };

        match &outcome {
            EndOutcome::Advanced(play) => self.apply_play_outcome(play),
            EndOutcome::PlaylistEnded => {
                self.state.set_status("Playlist ended");
                self.sync_now_playing();
                self.rerender_if_active(Tab::Music);
            }
            EndOutcome::Idle => {}
        }
        outcome
    }

    /// Handles a decode or network error reported by the media element.
    pub fn on_media_error(&self) {
        self.show_banner("Audio playback error");
    }

    /// Mirrors a pause or resume done through the host's own controls.
    pub fn on_media_paused(&self, paused: bool) {
        {
            let mut playback = self.playback.lock();
            if matches!(playback.controller.state(), PlaybackState::Stopped) {
                return;
            }
            playback.controller.sync_paused(paused);
        }
        self.state.set_status(if paused { "Paused" } else { "Playing" });
        self.rerender_if_active(Tab::Music);
    }

    /// Current playback state.
    pub fn playback_state(&self) -> PlaybackState {
        self.playback.lock().controller.state().clone()
    }

    /// Index of the current track, `-1` when stopped.
    pub fn now_playing_index(&self) -> isize {
        self.playback
            .lock()
            .controller
            .current_index()
            .and_then(|index| isize::try_from(index).ok())
            .unwrap_or(-1)
    }

    /// The now-playing track resolved against the current collection.
    pub fn now_playing_track(&self) -> Option<Track> {
        let collections = self.collections.read();
        let playback = self.playback.lock();
        let index = collections.track_index(playback.controller.current_filename()?)?;
        collections.music.get(index).cloned()
    }

    /// Runs `f` with exclusive access to the media element.
    pub fn with_media<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        f(&mut self.playback.lock().media)
    }

    /// Opens the lyrics overlay on the track at `index`.
    ///
    /// # Returns
    ///
    /// `false` if `index` is out of range.
    pub fn show_lyrics(&self, index: usize) -> bool {
        let collections = self.collections.read();
        self.overlays.lock().lyrics.show(&collections.music, index)
    }

    /// Closes the lyrics overlay.
    pub fn hide_lyrics(&self) {
        self.overlays.lock().lyrics.hide();
    }

    /// Lyrics overlay content, when open.
    pub fn lyrics(&self) -> Option<LyricsContent> {
        self.overlays.lock().lyrics.content().cloned()
    }

    /// Current lyrics font size.
    pub fn lyrics_font_size(&self) -> FontSize {
        self.overlays.lock().lyrics.font_size()
    }

    /// Steps the lyrics font down.
    pub fn lyrics_smaller(&self) -> FontSize {
        self.overlays.lock().lyrics.smaller()
    }

    /// Steps the lyrics font up.
    pub fn lyrics_larger(&self) -> FontSize {
        self.overlays.lock().lyrics.larger()
    }

    /// Opens the image viewer on the picture at `index`.
    ///
    /// # Returns
    ///
    /// `false` if `index` is out of range.
    pub fn show_image(&self, index: usize) -> bool {
        let collections = self.collections.read();
        self.overlays.lock().viewer.show(&collections.pictures, index)
    }

    /// Moves the image viewer forward, clamping at the last picture.
    pub fn next_image(&self) -> bool {
        let collections = self.collections.read();
        self.overlays.lock().viewer.next(&collections.pictures)
    }

    /// Moves the image viewer back, clamping at the first picture.
    pub fn prev_image(&self) -> bool {
        let collections = self.collections.read();
        self.overlays.lock().viewer.prev(&collections.pictures)
    }

    /// Closes the image viewer.
    pub fn close_image(&self) {
        self.overlays.lock().viewer.close();
    }

    /// Index of the picture shown by the image viewer.
    pub fn current_image(&self) -> Option<usize> {
        self.overlays.lock().viewer.index()
    }

    /// Image viewer content, when open.
    pub fn image_view(&self) -> Option<ImageView> {
        self.overlays.lock().viewer.view().cloned()
    }

    /// Stages the track at `index` for deletion and opens the dialog.
    ///
    /// # Returns
    ///
    /// `false` if `index` is out of range.
    pub fn confirm_delete(&self, index: usize) -> bool {
        let collections = self.collections.read();
        let Some(track) = collections.music.get(index) else {
            debug!(index, "confirm_delete ignored, index out of range");
            return false;
        };

        let mut overlays = self.overlays.lock();
        overlays.delete_dialog.open(track);
        self.state.set_pending_delete(Some(PendingDelete {
            index,
            filename: track.filename.clone(),
        }));
        true
    }

    /// Closes the dialog without sending anything.
    pub fn cancel_delete(&self) {
        let mut overlays = self.overlays.lock();
        overlays.delete_dialog.close();
        self.state.set_pending_delete(None);
    }

    /// Delete dialog text, when open.
    pub fn delete_dialog_text(&self) -> Option<String> {
        self.overlays.lock().delete_dialog.text().map(str::to_string)
    }

    /// Deletes the staged track.
    ///
    /// The request is keyed on the filename captured when the deletion was
    /// staged. On success the music collection is re-fetched once. The
    /// dialog closes whatever the outcome, unless another deletion was
    /// staged while the request was in flight.
    ///
    /// # Returns
    ///
    /// `Ok(false)` if nothing was staged, `Ok(true)` once the server has
    /// removed the track.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of a failed or rejected deletion, after the
    /// banner has been raised.
    pub async fn delete_track(&self) -> Result<bool, ApiError> {
        let Some(pending) = self.state.take_pending_delete() else {
            debug!("delete_track called with nothing staged");
            return Ok(false);
        };

        let result = match self.backend.delete_track(&pending.filename).await {
            Ok(response) if response.is_success() => Ok(()),
            Ok(response) => Err(ApiError::Rejected {
                message: response
                    .message
                    .unwrap_or_else(|| "Delete failed".to_string()),
            }),
            Err(e) => Err(e),
        };
        {
            let mut overlays = self.overlays.lock();
            if self.state.pending_delete_filename().is_none() {
                overlays.delete_dialog.close();
            }
        }

        match result {
            Ok(()) => {
                info!(filename = %pending.filename, "Track deleted");
                self.state.set_status("Track deleted");
                if let Err(e) = self.fetch_music().await {
                    ErrorReporter::warn(&e, "Error reloading music after delete");
                }
                Ok(true)
            }
            Err(e) => {
                ErrorReporter::warn(&e, "Error deleting track");
                self.show_banner(ErrorReporter::to_user_message("delete track", &e));
                Err(e)
            }
        }
    }

    /// Handles a key press.
    ///
    /// Escape closes the delete dialog when it is open and the lyrics
    /// overlay otherwise. It always closes the image viewer. The arrow keys
    /// navigate the image viewer while it is open.
    pub fn handle_key(&self, key: Key) {
        match key {
            Key::Escape => {
                let (dialog_open, lyrics_open) = {
                    let overlays = self.overlays.lock();
                    (overlays.delete_dialog.is_open(), overlays.lyrics.is_open())
                };
                if dialog_open {
                    self.cancel_delete();
                } else if lyrics_open {
                    self.hide_lyrics();
                }
                self.close_image();
            }
            Key::ArrowLeft | Key::ArrowRight => {
                if !self.overlays.lock().viewer.is_open() {
                    return;
                }
                if key == Key::ArrowLeft {
                    self.prev_image();
                } else {
                    self.next_image();
                }
            }
        }
    }

    /// Runs a rendered action.
    ///
    /// # Returns
    ///
    /// Whether the action changed anything.
    pub fn dispatch(&self, action: Action) -> bool {
        match action {
            Action::PlayTrack(index) => isize::try_from(index)
                .is_ok_and(|index| self.play_track(index) != PlayOutcome::Ignored),
            Action::ShowLyrics(index) => self.show_lyrics(index),
            Action::ConfirmDelete(index) => self.confirm_delete(index),
            Action::ShowImage(index) => self.show_image(index),
        }
    }

    /// Runs the action described by a clicked element's data attributes.
    ///
    /// # Errors
    ///
    /// Returns `UiError::UnknownAction` for attributes the renderer never
    /// emits.
    pub fn dispatch_data(&self, name: &str, index: &str) -> Result<bool, UiError> {
        Action::from_data(name, index).map(|action| self.dispatch(action))
    }

    /// Raises the error banner.
    pub fn show_banner(&self, message: impl Into<String>) {
        let message = message.into();
        self.banner.lock().show(message.clone(), Instant::now());
        self.state.notify(AppStateEvent::ErrorShown(message));
    }

    /// Banner message, while it is still visible.
    pub fn banner_text(&self) -> Option<String> {
        self.banner
            .lock()
            .visible(Instant::now())
            .map(str::to_string)
    }
}

impl<B, M> MediaApp<B, M>
where
    B: Backend + 'static,
    M: MediaElement + 'static,
{
    /// Starts re-fetching the music collection on the configured interval.
    ///
    /// Poll failures are logged at debug level and otherwise ignored.
    pub fn start_polling(self: &Arc<Self>) -> Poller {
        let app = Arc::clone(self);
        Poller::start(self.settings.poll_interval(), move || {
            let app = Arc::clone(&app);
            async move {
                if let Err(e) = app.fetch_music().await {
                    ErrorReporter::debug(&e, "Polling music");
                }
            }
        })
    }
}
