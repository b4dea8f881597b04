use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, MediaError, MediaEvent};

/// Handle to the audio thread. Dropping the command sender stops the thread.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Spawn the audio thread and wait until the output device is open.
    ///
    /// Media events are delivered on the returned receiver.
    pub fn new() -> Result<(Self, Receiver<MediaEvent>), MediaError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<MediaEvent>();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);

        let audio_handle = spawn_audio_thread(rx, events_tx, ready_tx);
        ready_rx.recv().map_err(|_| MediaError::ThreadGone)??;

        let player = Self {
            tx,
            join: Mutex::new(Some(audio_handle)),
        };
        Ok((player, events_rx))
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
