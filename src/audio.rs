//! Background music playlist
//!
//! Only the playlist state machine lives here. Decoding and output are the
//! [`AudioSink`]'s business.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AudioConfig;

/// One playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub src: String,
}

impl Track {
    pub fn new(name: impl Into<String>, src: impl Into<String>) -> Self {
        Self { name: name.into(), src: src.into() }
    }
}

/// Playback refused by the sink (e.g. autoplay blocked until user input)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("playback failed: {0}")]
pub struct AudioError(pub String);

/// Audio output the jukebox drives.
pub trait AudioSink {
    /// Load a new source. Looping is always on.
    fn set_source(&mut self, src: &str);
    fn play(&mut self) -> Result<(), AudioError>;
    fn pause(&mut self);
    fn set_muted(&mut self, muted: bool);
}

/// Jukebox cannot be built without tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("playlist is empty")]
pub struct EmptyPlaylist;

/// Playlist cursor plus play/mute flags.
#[derive(Debug)]
pub struct Jukebox<S> {
    tracks: Vec<Track>,
    current: usize,
    playing: bool,
    muted: bool,
    sink: S,
}

impl<S: AudioSink> Jukebox<S> {
    /// Load the first track, paused and unmuted.
    pub fn new(tracks: Vec<Track>, mut sink: S) -> Result<Self, EmptyPlaylist> {
        let first = tracks.first().ok_or(EmptyPlaylist)?;
        sink.set_source(&first.src);
        Ok(Self { tracks, current: 0, playing: false, muted: false, sink })
    }

    /// Jukebox over the playlist from `incubator.toml`.
    pub fn from_config(config: &AudioConfig, sink: S) -> Result<Self, EmptyPlaylist> {
        Self::new(config.tracks.clone(), sink)
    }

    pub fn current(&self) -> &Track {
        &self.tracks[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Track name as shown on the device, upper-cased.
    pub fn now_playing(&self) -> String {
        self.current().name.to_uppercase()
    }

    /// Pause if playing, otherwise play.
    ///
    /// A refused `play` is logged and the jukebox still counts as playing,
    /// so the next user interaction toggles it off again consistently.
    pub fn toggle_play(&mut self) {
        if self.playing {
            self.sink.pause();
            self.playing = false;
        } else {
            if let Err(e) = self.sink.play() {
                warn!(track = %self.current().name, error = %e, "audio play failed");
            }
            self.playing = true;
        }
    }

    /// Move `direction` steps through the playlist, wrapping at both ends.
    pub fn change_track(&mut self, direction: i32) {
        let len = self.tracks.len() as i64;
        let next = (self.current as i64 + i64::from(direction)).rem_euclid(len);
        self.current = next as usize;

        let src = self.tracks[self.current].src.clone();
        self.sink.set_source(&src);
        debug!(track = %self.current().name, "track changed");

        if self.playing {
            if let Err(e) = self.sink.play() {
                warn!(track = %self.current().name, error = %e, "audio play failed");
            }
        }
    }

    pub fn next(&mut self) {
        self.change_track(1);
    }

    pub fn previous(&mut self) {
        self.change_track(-1);
    }

    /// Called by the sink when a track finishes.
    pub fn on_track_ended(&mut self) {
        self.next();
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.sink.set_muted(self.muted);
    }
}
