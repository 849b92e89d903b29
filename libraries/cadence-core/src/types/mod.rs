mod playlist;
mod song;

pub use playlist::{Playlist, PlaylistIssue};
pub use song::Song;
