//! Audio and video collaborators
//!
//! The simulation never decodes media itself. It drives pre-loaded clips
//! through [`AudioSink`] and the cut-scene through [`VideoSink`]; a platform
//! layer supplies the real implementations. The headless backends here
//! advance playback one tick at a time and are what the native driver and
//! the tests run against.

use crate::settings::Settings;

/// Pre-loaded audio clips the core triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clip {
    /// Gameplay soundtrack, looped by the core
    Music,
    /// Enemy or boss hit by a player bullet
    Hit,
    /// Start screen jingle
    StartJingle,
}

impl Clip {
    fn index(self) -> usize {
        match self {
            Clip::Music => 0,
            Clip::Hit => 1,
            Clip::StartJingle => 2,
        }
    }

    pub fn is_music(self) -> bool {
        matches!(self, Clip::Music | Clip::StartJingle)
    }
}

/// Fire-and-forget audio playback
pub trait AudioSink {
    fn play(&mut self, clip: Clip);
    fn pause(&mut self, clip: Clip);
    /// Move the playback position back to the start without changing play state
    fn rewind(&mut self, clip: Clip);
    fn is_playing(&self, clip: Clip) -> bool;

    /// Restart a clip from the beginning
    fn replay(&mut self, clip: Clip) {
        self.rewind(clip);
        self.play(clip);
    }
}

/// Cut-scene playback. Completion is signalled only by `is_playing` turning false.
pub trait VideoSink {
    fn play(&mut self);
    fn pause(&mut self);
    fn rewind(&mut self);
    fn is_playing(&self) -> bool;
}

/// Volume levels applied by audio backends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixer {
    master_volume: f32,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for Mixer {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            music_volume: 0.7,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Mixer {
    pub fn from_settings(settings: &Settings) -> Self {
        let mut mixer = Self::default();
        mixer.set_master_volume(settings.master_volume);
        mixer.set_music_volume(settings.music_volume);
        mixer.set_sfx_volume(settings.sfx_volume);
        mixer.set_muted(settings.muted);
        mixer
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effective gain for a clip
    pub fn gain(&self, clip: Clip) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if clip.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }
}

#[derive(Debug, Clone, Copy)]
struct ClipState {
    length_ticks: u32,
    position: u32,
    playing: bool,
    starts: u32,
}

impl ClipState {
    fn new(length_ticks: u32) -> Self {
        Self {
            length_ticks: length_ticks.max(1),
            position: 0,
            playing: false,
            starts: 0,
        }
    }
}

/// Audio backend that only tracks playback positions
#[derive(Debug, Clone)]
pub struct HeadlessAudio {
    mixer: Mixer,
    clips: [ClipState; 3],
}

impl HeadlessAudio {
    /// Default clip lengths: 90s soundtrack, short hit, 2s jingle
    pub const MUSIC_TICKS: u32 = 90 * crate::consts::TICKS_PER_SECOND;
    pub const HIT_TICKS: u32 = 20;
    pub const JINGLE_TICKS: u32 = 2 * crate::consts::TICKS_PER_SECOND;

    pub fn new(mixer: Mixer) -> Self {
        Self::with_lengths(mixer, Self::MUSIC_TICKS, Self::HIT_TICKS, Self::JINGLE_TICKS)
    }

    pub fn with_lengths(mixer: Mixer, music: u32, hit: u32, jingle: u32) -> Self {
        Self {
            mixer,
            clips: [ClipState::new(music), ClipState::new(hit), ClipState::new(jingle)],
        }
    }

    /// Advance every playing clip by one tick; clips stop at their end
    pub fn advance(&mut self) {
        for clip in self.clips.iter_mut().filter(|c| c.playing) {
            clip.position += 1;
            if clip.position >= clip.length_ticks {
                clip.playing = false;
            }
        }
    }

    /// How many times a clip has been started
    pub fn play_count(&self, clip: Clip) -> u32 {
        self.clips[clip.index()].starts
    }

    pub fn position(&self, clip: Clip) -> u32 {
        self.clips[clip.index()].position
    }
}

impl AudioSink for HeadlessAudio {
    fn play(&mut self, clip: Clip) {
        if self.mixer.gain(clip) <= 0.0 {
            log::trace!("{:?} is silent, not starting", clip);
            return;
        }
        let state = &mut self.clips[clip.index()];
        if state.position >= state.length_ticks {
            // Finished clips stay at the end until rewound
            return;
        }
        state.playing = true;
        state.starts += 1;
    }

    fn pause(&mut self, clip: Clip) {
        self.clips[clip.index()].playing = false;
    }

    fn rewind(&mut self, clip: Clip) {
        self.clips[clip.index()].position = 0;
    }

    fn is_playing(&self, clip: Clip) -> bool {
        self.clips[clip.index()].playing
    }
}

/// Video backend with a fixed running time
#[derive(Debug, Clone)]
pub struct HeadlessVideo {
    length_ticks: u32,
    position: u32,
    playing: bool,
}

impl HeadlessVideo {
    pub fn new(length_ticks: u32) -> Self {
        Self {
            length_ticks: length_ticks.max(1),
            position: 0,
            playing: false,
        }
    }

    pub fn advance(&mut self) {
        if self.playing {
            self.position += 1;
            if self.position >= self.length_ticks {
                self.playing = false;
            }
        }
    }

    /// Index of the frame a renderer would show
    pub fn current_frame(&self) -> u32 {
        self.position.min(self.length_ticks - 1)
    }
}

impl VideoSink for HeadlessVideo {
    fn play(&mut self) {
        if self.position < self.length_ticks {
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn rewind(&mut self) {
        self.position = 0;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixer_clamps_and_mutes() {
        let mut mixer = Mixer::default();
        mixer.set_master_volume(2.0);
        mixer.set_sfx_volume(0.5);
        assert_eq!(mixer.gain(Clip::Hit), 0.5);
        mixer.set_muted(true);
        assert_eq!(mixer.gain(Clip::Music), 0.0);
    }

    #[test]
    fn clip_stops_at_end_until_rewound() {
        let mut audio = HeadlessAudio::with_lengths(Mixer::default(), 3, 1, 1);
        audio.play(Clip::Music);
        for _ in 0..3 {
            assert!(audio.is_playing(Clip::Music));
            audio.advance();
        }
        assert!(!audio.is_playing(Clip::Music));

        audio.play(Clip::Music);
        assert!(!audio.is_playing(Clip::Music));

        audio.replay(Clip::Music);
        assert!(audio.is_playing(Clip::Music));
        assert_eq!(audio.position(Clip::Music), 0);
        assert_eq!(audio.play_count(Clip::Music), 2);
    }

    #[test]
    fn silent_clips_do_not_start() {
        let mut mixer = Mixer::default();
        mixer.set_sfx_volume(0.0);
        let mut audio = HeadlessAudio::new(mixer);
        audio.play(Clip::Hit);
        assert!(!audio.is_playing(Clip::Hit));
        assert_eq!(audio.play_count(Clip::Hit), 0);
    }

    #[test]
    fn video_runs_to_completion() {
        let mut video = HeadlessVideo::new(2);
        video.play();
        video.advance();
        assert!(video.is_playing());
        video.advance();
        assert!(!video.is_playing());
        assert_eq!(video.current_frame(), 1);

        video.rewind();
        video.play();
        assert!(video.is_playing());
    }
}
