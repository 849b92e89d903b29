//! Shuffle orders for the song collection and for playlists
//!
//! Orders are permutations of song indices. The global order covers every
//! song; each playlist keeps its own order, independent of the others.

use crate::library::Library;
use crate::state::PlaybackState;
use cadence_core::Playlist;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Produces and maintains shuffle orders
#[derive(Debug)]
pub struct ShuffleEngine {
    rng: StdRng,
}

impl ShuffleEngine {
    /// Engine seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a fixed seed (reproducible orders)
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Fisher-Yates shuffle
    ///
    /// Walks from the last index down to 1, swapping each element with a
    /// uniformly chosen element at or before it. Every permutation is equally
    /// likely.
    pub fn shuffle(&mut self, items: &mut [usize]) {
        items.shuffle(&mut self.rng);
    }

    /// Shuffled copy of `items`
    pub fn shuffled(&mut self, mut items: Vec<usize>) -> Vec<usize> {
        self.shuffle(&mut items);
        items
    }

    /// Turn global shuffle on (new order) or off (order dropped)
    ///
    /// Returns the new shuffle flag.
    pub fn toggle_global(&mut self, state: &mut PlaybackState, library: &Library) -> bool {
        if state.shuffle_on {
            state.shuffle_on = false;
            state.shuffle_order.clear();
            state.shuffle_position = 0;
        } else {
            self.enable_global(state, library);
        }
        state.shuffle_on
    }

    /// Regenerate the global order and point navigation at the active song
    pub fn enable_global(&mut self, state: &mut PlaybackState, library: &Library) {
        state.shuffle_on = true;
        state.shuffle_order = self.shuffled((0..library.len()).collect());
        state.shuffle_position = state
            .shuffle_order
            .iter()
            .position(|&index| index == state.active_index)
            .unwrap_or(0);
    }

    /// Toggle shuffle for one playlist
    ///
    /// Returns whether the playlist is shuffled afterwards.
    pub fn toggle_playlist(
        &mut self,
        state: &mut PlaybackState,
        playlist: &Playlist,
        song_count: usize,
    ) -> bool {
        if state.playlist_shuffles.remove(&playlist.id).is_some() {
            return false;
        }

        let order = self.shuffled(playlist.valid_songs(song_count));
        state.playlist_shuffles.insert(playlist.id.clone(), order);
        true
    }
}

impl Default for ShuffleEngine {
    fn default() -> Self {
        Self::new()
    }
}
