//! The shared "now playing" state.
//!
//! A [`PlaybackStore`] is created once and handed to every view that shows or
//! controls playback. Views either take a [`PlaybackStore::snapshot`] or hold a
//! [`PlaybackStore::subscribe`] receiver to be woken on change.
//!
//! The play flag is cosmetic: nothing here drives the embedded player, which
//! receives the selected id and an autoplay flag on its own and manages playback
//! independently.

use crate::catalog::Snippet;
use std::sync::Arc;
use tokio::sync::watch;

/// The item currently chosen for playback.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub item_id: String,
    /// Shared with every observer; read-only.
    pub snippet: Arc<Snippet>,
}

/// What observers see.
///
/// (no selection, playing) cannot be reached through [`PlaybackStore`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackState {
    selection: Option<Selection>,
    is_playing: bool,
}

impl PlaybackState {
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }
}

/// Owner of the playback state.
///
/// Cloning is cheap and every clone refers to the same state.
#[derive(Debug, Clone)]
pub struct PlaybackStore {
    state_tx: Arc<watch::Sender<PlaybackState>>,
}

impl Default for PlaybackStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackStore {
    /// A store with nothing selected and nothing playing.
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(PlaybackState::default());
        Self {
            state_tx: Arc::new(state_tx),
        }
    }

    /// Replaces the selection and starts playing.
    ///
    /// The new id and snippet become visible together with `is_playing = true`;
    /// no observer can see one without the others.
    pub fn select(&self, item_id: impl Into<String>, snippet: impl Into<Arc<Snippet>>) {
        let selection = Selection {
            item_id: item_id.into(),
            snippet: snippet.into(),
        };
        tracing::debug!(
            item_id = selection.item_id,
            title = selection.snippet.title,
            "selected item for playback"
        );
        self.state_tx.send_replace(PlaybackState {
            selection: Some(selection),
            is_playing: true,
        });
    }

    /// Flips the play flag. Does nothing while nothing is selected.
    pub fn toggle_play(&self) {
        self.state_tx.send_if_modified(|state| {
            if state.selection.is_none() {
                return false;
            }
            state.is_playing = !state.is_playing;
            true
        });
    }

    /// Sets the play flag. Does nothing while nothing is selected.
    pub fn set_playing(&self, playing: bool) {
        self.state_tx.send_if_modified(|state| {
            if state.selection.is_none() || state.is_playing == playing {
                return false;
            }
            state.is_playing = playing;
            true
        });
    }

    pub fn snapshot(&self) -> PlaybackState {
        self.state_tx.borrow().clone()
    }

    /// A receiver that observes every subsequent change.
    ///
    /// The current state counts as already seen.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.state_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::stub;
    use pretty_assertions::assert_eq;

    fn snippet(title: &str) -> Snippet {
        serde_json::from_value(stub::snippet("v1", title, "Artist", "2024-01-01T00:00:00Z"))
            .unwrap()
    }

    #[test]
    fn starts_empty() {
        let store = PlaybackStore::new();
        assert_eq!(store.snapshot(), PlaybackState::default());
        assert_eq!(store.snapshot().selection(), None);
        assert!(!store.snapshot().is_playing());
    }

    #[test]
    fn select_sets_item_and_plays() {
        let store = PlaybackStore::new();
        store.select("v1", snippet("Song"));

        let state = store.snapshot();
        let selection = state.selection().unwrap();
        assert_eq!(selection.item_id, "v1");
        assert_eq!(*selection.snippet, snippet("Song"));
        assert!(state.is_playing());
    }

    #[test]
    fn select_replaces_wholesale() {
        let store = PlaybackStore::new();
        store.select("v1", snippet("First"));
        store.set_playing(false);
        store.select("v2", snippet("Second"));
        store.select("v2", snippet("Second"));

        let state = store.snapshot();
        assert_eq!(state.selection().unwrap().item_id, "v2");
        assert_eq!(state.selection().unwrap().snippet.title, "Second");
        assert!(state.is_playing());
    }

    #[test]
    fn toggle_twice_is_identity() {
        let store = PlaybackStore::new();
        store.select("v1", snippet("Song"));

        let before = store.snapshot();
        store.toggle_play();
        assert!(!store.snapshot().is_playing());
        store.toggle_play();
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn nothing_plays_without_selection() {
        let store = PlaybackStore::new();
        store.toggle_play();
        store.set_playing(true);

        assert_eq!(store.snapshot(), PlaybackState::default());
    }

    #[test]
    fn set_playing_is_explicit() {
        let store = PlaybackStore::new();
        store.select("v1", snippet("Song"));
        store.set_playing(false);
        store.set_playing(false);
        assert!(!store.snapshot().is_playing());
        store.set_playing(true);
        assert!(store.snapshot().is_playing());
    }

    #[tokio::test]
    async fn clones_share_state_and_observers_are_notified() {
        let store = PlaybackStore::new();
        let player_bar = store.clone();
        let mut observer = player_bar.subscribe();
        let mut second_observer = store.subscribe();

        store.select("v1", snippet("Song"));

        observer.changed().await.unwrap();
        second_observer.changed().await.unwrap();
        let seen = observer.borrow_and_update().clone();
        assert_eq!(seen.selection().unwrap().item_id, "v1");
        assert!(seen.is_playing());
        assert_eq!(player_bar.snapshot(), seen);
    }

    #[tokio::test]
    async fn noop_mutations_do_not_wake_observers() {
        let store = PlaybackStore::new();
        let observer = store.subscribe();

        store.toggle_play();
        store.set_playing(true);
        assert!(!observer.has_changed().unwrap());

        store.select("v1", snippet("Song"));
        store.set_playing(true);
        assert!(observer.has_changed().unwrap());
    }
}
