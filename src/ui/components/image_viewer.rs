//! Fullscreen image viewer with prev/next navigation.
//!
//! Navigation clamps at the ends of the collection. The control at a
//! boundary stays visible but is dimmed.

use crate::{api::Picture, ui::dates::describe_date_taken};

/// Opacity of a navigation control that cannot move further.
pub const DISABLED_OPACITY: &str = "0.3";

/// Opacity of an active navigation control.
pub const ENABLED_OPACITY: &str = "1";

/// What the viewer displays for the open picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    /// Full-size image URL.
    pub url: String,
    /// Picture title.
    pub title: String,
    /// Caption, empty when absent.
    pub caption: String,
    /// `"{width}x{height} • {date}"`.
    pub meta: String,
    /// Whether "previous" can move.
    pub prev_enabled: bool,
    /// Whether "next" can move.
    pub next_enabled: bool,
}

impl ImageView {
    /// Opacity for the previous control.
    #[must_use]
    pub fn prev_opacity(&self) -> &'static str {
        if self.prev_enabled {
            ENABLED_OPACITY
        } else {
            DISABLED_OPACITY
        }
    }

    /// Opacity for the next control.
    #[must_use]
    pub fn next_opacity(&self) -> &'static str {
        if self.next_enabled {
            ENABLED_OPACITY
        } else {
            DISABLED_OPACITY
        }
    }
}

/// Image viewer, closed or open on one picture.
#[derive(Debug, Clone, Default)]
pub struct ImageViewer {
    open: Option<(usize, ImageView)>,
}

impl ImageViewer {
    /// Opens the viewer on the picture at `index`.
    ///
    /// # Returns
    ///
    /// `false` (and no change) if `index` is out of range.
    pub fn show(&mut self, pictures: &[Picture], index: usize) -> bool {
        let Some(picture) = pictures.get(index) else {
            return false;
        };

        let view = ImageView {
            url: picture.url.clone(),
            title: picture.title.clone(),
            caption: picture.caption.clone().unwrap_or_default(),
            meta: format!(
                "{}x{} • {}",
                picture.width,
                picture.height,
                describe_date_taken(picture.date_taken.as_deref())
            ),
            prev_enabled: index > 0,
            next_enabled: index + 1 < pictures.len(),
        };
        self.open = Some((index, view));
        true
    }

    /// Moves to the next picture, clamping at the last one.
    ///
    /// # Returns
    ///
    /// `true` if the viewer moved.
    pub fn next(&mut self, pictures: &[Picture]) -> bool {
        match self.index() {
            Some(index) if index + 1 < pictures.len() => self.show(pictures, index + 1),
            _ => false,
        }
    }

    /// Moves to the previous picture, clamping at the first one.
    pub fn prev(&mut self, pictures: &[Picture]) -> bool {
        match self.index() {
            Some(index) if index > 0 => self.show(pictures, index - 1),
            _ => false,
        }
    }

    /// Closes the viewer.
    pub fn close(&mut self) {
        self.open = None;
    }

    /// Whether the viewer is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Index of the open picture.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.open.as_ref().map(|(index, _)| *index)
    }

    /// Displayed content, when open.
    #[must_use]
    pub fn view(&self) -> Option<&ImageView> {
        self.open.as_ref().map(|(_, view)| view)
    }
}
