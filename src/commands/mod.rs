mod artist;
mod classify;
mod mood;
mod song;
mod util;

pub use artist::ArtistCmd;
pub use classify::Classify;
pub use mood::MoodCmd;
pub use song::SongCmd;
