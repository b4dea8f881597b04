//! Playback transitions on `App`: loading a track, play/pause, navigation,
//! seeking, volume and the media event handlers.

use std::time::Duration;

use tracing::{debug, error, warn};

use crate::audio::{AudioCmd, MediaSource, ProbeError, secs_or_nan};
use crate::catalog::{asset_url, decode_label, extract_song_name};

use super::clock::{progress_percent, time_label};
use super::effect::{Effect, ProbeRequest};
use super::model::{App, PlayIcon, VolumeIcon};
use super::nav::{self, Advance};

impl App {
    /// Start loading `track` (a stem) from the current folder.
    ///
    /// The now-playing label and the time label change right away, whether or
    /// not the asset turns out to exist.
    pub fn play(&mut self, track: &str, autoplay: bool) -> Vec<Effect> {
        let mut effects = Vec::new();

        match self.current_folder.as_deref() {
            Some(folder) => match asset_url(&self.base_url, folder, track) {
                Ok(url) => {
                    self.probe_seq += 1;
                    debug!(track, url = %url, autoplay, seq = self.probe_seq, "Requesting track");
                    effects.push(Effect::ProbeAsset(ProbeRequest {
                        seq: self.probe_seq,
                        track: track.to_string(),
                        url,
                        autoplay,
                    }));
                }
                Err(e) => error!(track, error = %e, "Cannot build song path"),
            },
            None => warn!(track, "No folder selected; nothing to load"),
        }

        self.now_playing = decode_label(track);
        self.time_label = "00:00/00:00".to_string();
        effects
    }

    /// Apply the answer to an earlier [`ProbeRequest`].
    ///
    /// Late answers are applied like any other; they are only logged.
    pub fn asset_probed(
        &mut self,
        request: ProbeRequest,
        result: Result<MediaSource, ProbeError>,
    ) -> Vec<Effect> {
        if request.seq != self.probe_seq {
            warn!(
                track = %request.track,
                seq = request.seq,
                latest = self.probe_seq,
                "Applying stale probe result"
            );
        }

        match result {
            Ok(source) => {
                self.media.load(source.url.clone(), secs_or_nan(source.duration));
                if request.autoplay {
                    self.media.paused = false;
                    self.play_icon = PlayIcon::Pause;
                }
                vec![Effect::Audio(AudioCmd::Load {
                    source,
                    autoplay: request.autoplay,
                })]
            }
            Err(ProbeError::Status { status }) => {
                error!(track = %request.track, status, "Song file not found");
                Vec::new()
            }
            Err(e) => {
                error!(track = %request.track, error = %e, "Error fetching the song");
                Vec::new()
            }
        }
    }

    /// The play button.
    pub fn toggle_play(&mut self) -> Vec<Effect> {
        if self.media.paused {
            self.media.paused = false;
            self.play_icon = PlayIcon::Pause;
            vec![Effect::Audio(AudioCmd::Play)]
        } else {
            self.play_icon = PlayIcon::Play;
            self.media.paused = true;
            vec![Effect::Audio(AudioCmd::Pause)]
        }
    }

    /// Name of the loaded track, parsed back out of the media source.
    pub fn current_track_name(&self) -> Option<String> {
        self.media.src.as_ref().and_then(extract_song_name)
    }

    /// The next control: stops at the end of the catalog.
    pub fn next(&mut self) -> Vec<Effect> {
        self.advance(Advance::Manual)
    }

    /// The previous control: stops at the start of the catalog.
    pub fn previous(&mut self) -> Vec<Effect> {
        let Some(current) = self.current_track_name() else {
            debug!("Previous ignored: no source loaded");
            return Vec::new();
        };
        match nav::previous_index(&self.catalog, &current) {
            Some(i) => self.play_index(i),
            None => Vec::new(),
        }
    }

    fn advance(&mut self, advance: Advance) -> Vec<Effect> {
        let Some(current) = self.current_track_name() else {
            debug!(?advance, "Advance ignored: no source loaded");
            return Vec::new();
        };
        match nav::next_index(&self.catalog, &current, advance) {
            Some(i) => self.play_index(i),
            None => Vec::new(),
        }
    }

    fn play_index(&mut self, index: usize) -> Vec<Effect> {
        match self.catalog.stem_at(index).map(str::to_string) {
            Some(stem) => self.play(&stem, true),
            None => Vec::new(),
        }
    }

    pub fn toggle_autoplay(&mut self) {
        self.autoplay = !self.autoplay;
    }

    /// The media reached the end of the source.
    pub fn media_ended(&mut self) -> Vec<Effect> {
        self.media.paused = true;
        if !self.autoplay {
            return Vec::new();
        }
        self.advance(Advance::Autoplay)
    }

    pub fn loaded_metadata(&mut self, duration: f64) {
        self.media.duration = duration;
    }

    /// Reflect a position report into the time label and the seek indicator.
    pub fn time_update(&mut self, current: f64, duration: f64) {
        self.media.current_time = current;
        self.media.duration = duration;
        self.time_label = time_label(current, duration);
        if let Some(percent) = progress_percent(current, duration) {
            self.seek_percent = percent;
        }
    }

    /// A click on the seek bar at `fraction` of its width.
    pub fn seek(&mut self, fraction: f64) -> Vec<Effect> {
        let percent = fraction * 100.0;
        self.seek_percent = percent;

        let target = self.media.duration * percent / 100.0;
        if !target.is_finite() || target < 0.0 {
            return Vec::new();
        }
        self.media.current_time = target;
        vec![Effect::Audio(AudioCmd::SeekTo(Duration::from_secs_f64(target)))]
    }

    /// Relative seek from the keyboard.
    pub fn scrub(&mut self, secs: i64) -> Vec<Effect> {
        if self.media.src.is_none() {
            return Vec::new();
        }
        vec![Effect::Audio(AudioCmd::SeekBy(secs))]
    }

    /// The volume slider, in percent.
    pub fn set_volume(&mut self, percent: u8) -> Vec<Effect> {
        let percent = percent.min(100);
        self.volume_percent = percent;
        self.media.volume = f64::from(percent) / 100.0;
        vec![Effect::Audio(AudioCmd::SetVolume(self.media.volume as f32))]
    }

    pub fn step_volume(&mut self, delta: i16) -> Vec<Effect> {
        let target = (i16::from(self.volume_percent) + delta).clamp(0, 100);
        self.set_volume(target as u8)
    }

    /// The volume icon.
    pub fn toggle_mute(&mut self) -> Vec<Effect> {
        if self.media.muted {
            self.media.muted = false;
            self.volume_icon = VolumeIcon::Volume;
        } else {
            self.volume_icon = VolumeIcon::Mute;
            self.media.muted = true;
        }
        vec![Effect::Audio(AudioCmd::SetMuted(self.media.muted))]
    }
}
