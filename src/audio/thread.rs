use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::mixer::Mixer;
use rodio::{OutputStreamBuilder, Sink};
use tracing::{debug, error};

use super::sink::create_sink_at;
use super::types::{AudioCmd, MediaError, MediaEvent, MediaSource, secs_or_nan};

const TICK: Duration = Duration::from_millis(200);

/// Playback state owned by the audio thread.
pub(super) struct Playback {
    pub(super) source: Option<MediaSource>,
    pub(super) sink: Option<Sink>,
    pub(super) duration: Option<Duration>,
    pub(super) paused: bool,
    // Position bookkeeping: `accumulated` covers everything up to `started_at`.
    pub(super) started_at: Option<Instant>,
    pub(super) accumulated: Duration,
    pub(super) volume: f32,
    pub(super) muted: bool,
}

impl Playback {
    pub(super) fn new() -> Self {
        Self {
            source: None,
            sink: None,
            duration: None,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
            volume: 1.0,
            muted: false,
        }
    }

    pub(super) fn position(&self) -> Duration {
        let elapsed = self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed());
        match self.duration {
            Some(total) => elapsed.min(total),
            None => elapsed,
        }
    }

    fn time_update(&self) -> MediaEvent {
        MediaEvent::TimeUpdate {
            current: self.position().as_secs_f64(),
            duration: secs_or_nan(self.duration),
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    pub(super) fn apply_volume(&self) {
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(self.effective_volume());
        }
    }

    pub(super) fn load(
        &mut self,
        mixer: &Mixer,
        source: MediaSource,
        autoplay: bool,
    ) -> Result<(), MediaError> {
        // The old source goes away even if the new one fails to decode.
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.source = None;
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.duration = None;

        let (sink, decoded_total) = create_sink_at(mixer, &source, Duration::ZERO)?;
        self.duration = source.duration.or(decoded_total);
        self.sink = Some(sink);
        self.source = Some(source);
        self.apply_volume();

        if autoplay {
            self.play(mixer)?;
        }
        Ok(())
    }

    /// Resume playback. A source that already played to its end starts
    /// again from the beginning.
    pub(super) fn play(&mut self, mixer: &Mixer) -> Result<(), MediaError> {
        if !self.paused {
            return Ok(());
        }
        if self.sink.as_ref().is_some_and(|s| s.empty()) {
            self.seek_to(mixer, Duration::ZERO)?;
        }
        if let Some(s) = self.sink.as_ref() {
            s.play();
            self.started_at = Some(Instant::now());
            self.paused = false;
        }
        Ok(())
    }

    pub(super) fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            if !self.paused {
                s.pause();
                if let Some(st) = self.started_at.take() {
                    self.accumulated += st.elapsed();
                }
                self.paused = true;
            }
        }
    }

    /// Rebuild the sink and skip into the source.
    pub(super) fn seek_to(&mut self, mixer: &Mixer, target: Duration) -> Result<(), MediaError> {
        let Some(source) = self.source.as_ref() else {
            return Ok(());
        };
        let target = match self.duration {
            Some(total) => target.min(total),
            None => target,
        };

        let (new_sink, _) = create_sink_at(mixer, source, target)?;
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        new_sink.set_volume(self.effective_volume());
        if self.paused {
            self.started_at = None;
        } else {
            new_sink.play();
            self.started_at = Some(Instant::now());
        }
        self.sink = Some(new_sink);
        self.accumulated = target;
        Ok(())
    }

    pub(super) fn seek_by(&mut self, mixer: &Mixer, secs: i64) -> Result<(), MediaError> {
        let cur = self.position().as_secs() as i64;
        let new = (cur + secs).max(0) as u64;
        self.seek_to(mixer, Duration::from_secs(new))
    }

    /// Returns true once when a playing sink runs dry.
    pub(super) fn check_ended(&mut self) -> bool {
        let drained = match self.sink.as_ref() {
            Some(s) => !self.paused && s.empty(),
            None => false,
        };
        if drained {
            if let Some(st) = self.started_at.take() {
                self.accumulated += st.elapsed();
            }
            if let Some(total) = self.duration {
                self.accumulated = total;
            }
            self.paused = true;
        }
        drained
    }

    fn fade_out(&self, fade_out_ms: u64) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        if fade_out_ms == 0 || self.paused {
            sink.set_volume(0.0);
            return;
        }
        let steps: u64 = 20;
        let step_ms = (fade_out_ms / steps).max(1);
        let start = self.effective_volume();
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            sink.set_volume(start * (1.0 - t));
            thread::sleep(Duration::from_millis(step_ms));
        }
        sink.set_volume(0.0);
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<MediaEvent>,
    ready: SyncSender<Result<(), MediaError>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let _ = ready.send(Err(MediaError::NoOutputDevice(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mixer = stream.mixer();
        let mut playback = Playback::new();

        loop {
            match rx.recv_timeout(TICK) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load { source, autoplay } => {
                        debug!(url = %source.url, autoplay, "Loading source");
                        match playback.load(mixer, source, autoplay) {
                            Ok(()) => {
                                let _ = events.send(MediaEvent::LoadedMetadata {
                                    duration: secs_or_nan(playback.duration),
                                });
                                let _ = events.send(playback.time_update());
                            }
                            Err(e) => error!(error = %e, "Failed to load source"),
                        }
                    }
                    AudioCmd::Play => {
                        if let Err(e) = playback.play(mixer) {
                            error!(error = %e, "Failed to restart source");
                        }
                        let _ = events.send(playback.time_update());
                    }
                    AudioCmd::Pause => {
                        playback.pause();
                        let _ = events.send(playback.time_update());
                    }
                    AudioCmd::SeekTo(target) => {
                        if let Err(e) = playback.seek_to(mixer, target) {
                            error!(error = %e, "Seek failed");
                        }
                        let _ = events.send(playback.time_update());
                    }
                    AudioCmd::SeekBy(secs) => {
                        if let Err(e) = playback.seek_by(mixer, secs) {
                            error!(error = %e, "Seek failed");
                        }
                        let _ = events.send(playback.time_update());
                    }
                    AudioCmd::SetVolume(v) => {
                        playback.volume = v.clamp(0.0, 1.0);
                        playback.apply_volume();
                    }
                    AudioCmd::SetMuted(m) => {
                        playback.muted = m;
                        playback.apply_volume();
                    }
                    AudioCmd::Quit { fade_out_ms } => {
                        playback.fade_out(fade_out_ms);
                        if let Some(s) = playback.sink.take() {
                            s.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    if playback.check_ended() {
                        let _ = events.send(playback.time_update());
                        let _ = events.send(MediaEvent::Ended);
                    } else if !playback.paused {
                        let _ = events.send(playback.time_update());
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
