//! Render output: markup plus the actions wired into it.
//!
//! Items carry `data-action` and `data-index` attributes instead of inline
//! handlers. The host listens once on the container and turns the clicked
//! element's attributes back into an [`Action`] with [`Action::from_data`].

use crate::{error::UiError, state::Tab};

/// A user action attached to a rendered item.
///
/// Indices refer to the snapshot the fragment was rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Play or pause a track.
    PlayTrack(usize),
    /// Open the fullscreen lyrics overlay.
    ShowLyrics(usize),
    /// Stage a track for deletion.
    ConfirmDelete(usize),
    /// Open the image viewer.
    ShowImage(usize),
}

impl Action {
    /// Value of the `data-action` attribute.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Action::PlayTrack(_) => "play",
            Action::ShowLyrics(_) => "lyrics",
            Action::ConfirmDelete(_) => "delete",
            Action::ShowImage(_) => "image",
        }
    }

    /// Item index the action applies to.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Action::PlayTrack(i)
            | Action::ShowLyrics(i)
            | Action::ConfirmDelete(i)
            | Action::ShowImage(i) => i,
        }
    }

    /// `data-action` and `data-index` attributes for this action.
    #[must_use]
    pub fn data_attributes(self) -> String {
        format!(r#"data-action="{}" data-index="{}""#, self.name(), self.index())
    }

    /// Rebuilds an action from the attributes of a clicked element.
    ///
    /// # Errors
    ///
    /// Returns `UiError::UnknownAction` for names or indices the renderer
    /// never emits.
    pub fn from_data(name: &str, index: &str) -> Result<Self, UiError> {
        let unknown = || UiError::UnknownAction(format!("{name}:{index}"));
        let index: usize = index.parse().map_err(|_| unknown())?;
        match name {
            "play" => Ok(Action::PlayTrack(index)),
            "lyrics" => Ok(Action::ShowLyrics(index)),
            "delete" => Ok(Action::ConfirmDelete(index)),
            "image" => Ok(Action::ShowImage(index)),
            _ => Err(unknown()),
        }
    }
}

/// Markup for one tab, replaced wholesale on each render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Tab the fragment belongs to.
    pub tab: Tab,
    /// Full inner HTML of the tab's container.
    pub html: String,
    /// Every action wired into `html`, in document order.
    pub actions: Vec<Action>,
}
