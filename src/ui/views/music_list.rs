//! Music tab: one row per track with play, lyrics and delete actions.

use chrono::NaiveDateTime;

use crate::{
    api::Track,
    state::Tab,
    ui::{
        fragment::{Action, Fragment},
        utils::{escape_html, format_date, format_duration, lyrics_preview},
    },
};

/// The track currently selected for playback, as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NowPlaying<'a> {
    /// Identity of the track.
    pub filename: &'a str,
    /// Whether the media element is paused.
    pub paused: bool,
}

/// Rendering options for the music list.
#[derive(Debug, Clone, Copy)]
pub struct MusicListOptions<'a> {
    /// Now-playing marker, matched against rows by filename.
    pub now_playing: Option<NowPlaying<'a>>,
    /// Number of lyric characters in the row preview.
    pub preview_chars: usize,
    /// Reference time for relative dates.
    pub now: NaiveDateTime,
}

/// Renders the music list.
///
/// # Arguments
///
/// * `tracks` - Current music snapshot.
/// * `options` - Now-playing marker, preview length and reference time.
///
/// # Returns
///
/// The fragment for the music tab.
#[must_use]
pub fn render(tracks: &[Track], options: MusicListOptions<'_>) -> Fragment {
    if tracks.is_empty() {
        return Fragment {
            tab: Tab::Music,
            html: r#"<div class="track-item"><div class="track-title">No tracks found</div><div class="track-artist">Add MP3 files to the music folder</div></div>"#
                .to_string(),
            actions: Vec::new(),
        };
    }

    let mut html = String::new();
    let mut actions = Vec::new();

    for (index, track) in tracks.iter().enumerate() {
        let marker = options
            .now_playing
            .filter(|now_playing| now_playing.filename == track.filename);
        let is_current = marker.is_some();
        let is_playing = marker.is_some_and(|now_playing| !now_playing.paused);

        let play = Action::PlayTrack(index);
        let delete = Action::ConfirmDelete(index);
        actions.push(play);

        let lyrics = track.lyrics_text();
        let preview = lyrics
            .map(|text| {
                format!(
                    r#"<div class="track-lyrics-preview">{}</div>"#,
                    escape_html(&lyrics_preview(text, options.preview_chars))
                )
            })
            .unwrap_or_default();
        let lyrics_button = if lyrics.is_some() {
            let show = Action::ShowLyrics(index);
            actions.push(show);
            format!(
                r#"<button class="action-btn fullscreen-btn" {} title="Fullscreen Lyrics"><i data-lucide="maximize" class="w-7 h-7"></i></button>"#,
                show.data_attributes()
            )
        } else {
            String::new()
        };
        actions.push(delete);

        let (play_title, play_icon) = if is_playing {
            ("Pause", "pause")
        } else {
            ("Play", "play")
        };

        html.push_str(&format!(
            concat!(
                r#"<div class="track-item{playing_class}" data-index="{index}">"#,
                r#"<div class="track-title">{title}</div>"#,
                r#"<div class="track-artist">{artist}</div>"#,
                "{preview}",
                r#"<div class="track-meta"><span>{duration}</span><span>{created}</span></div>"#,
                r#"<div class="track-actions">"#,
                r#"<button class="action-btn" {play_attrs} title="{play_title}"><i data-lucide="{play_icon}" class="w-7 h-7"></i></button>"#,
                "{lyrics_button}",
                r#"<button class="action-btn delete-btn" {delete_attrs} title="Delete"><i data-lucide="trash-2" class="w-7 h-7"></i></button>"#,
                "</div></div>"
            ),
            playing_class = if is_current { " playing" } else { "" },
            index = index,
            title = escape_html(&track.title),
            artist = escape_html(&track.artist),
            preview = preview,
            duration = format_duration(track.duration),
            created = escape_html(&format_date(track.created.as_deref(), options.now)),
            play_attrs = play.data_attributes(),
            play_title = play_title,
            play_icon = play_icon,
            lyrics_button = lyrics_button,
            delete_attrs = delete.data_attributes(),
        ));
    }

    Fragment {
        tab: Tab::Music,
        html,
        actions,
    }
}
