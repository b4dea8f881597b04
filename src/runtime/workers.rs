//! Executes the [`Effect`]s requested by the model.
//!
//! Network requests run on short-lived threads and report back over a channel
//! drained by the event loop. Audio commands go straight to the audio thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use reqwest::blocking::Client;
use tracing::warn;
use url::Url;

use crate::app::{Effect, ProbeRequest};
use crate::audio::{AudioPlayer, MediaSource, ProbeError, probe_asset};
use crate::catalog::{Catalog, CatalogError, load_catalog};

/// Result of a background request.
#[derive(Debug)]
pub enum WorkEvent {
    CatalogLoaded {
        folder: String,
        result: Result<Catalog, CatalogError>,
    },
    AssetProbed {
        request: ProbeRequest,
        result: Result<MediaSource, ProbeError>,
    },
}

pub struct Workers {
    client: Client,
    base_url: Url,
    tx: Sender<WorkEvent>,
}

impl Workers {
    pub fn new(client: Client, base_url: Url) -> (Self, Receiver<WorkEvent>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                client,
                base_url,
                tx,
            },
            rx,
        )
    }

    /// Run `effects` in order. Requests are never cancelled.
    pub fn execute(&self, effects: Vec<Effect>, audio_player: &AudioPlayer) {
        for effect in effects {
            match effect {
                Effect::LoadCatalog { folder } => self.spawn_catalog(folder),
                Effect::ProbeAsset(request) => self.spawn_probe(request),
                Effect::Audio(cmd) => {
                    if audio_player.send(cmd).is_err() {
                        warn!("Audio thread is gone; command dropped");
                    }
                }
            }
        }
    }

    fn spawn_catalog(&self, folder: String) {
        let client = self.client.clone();
        let base = self.base_url.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = load_catalog(&client, &base, &folder);
            let _ = tx.send(WorkEvent::CatalogLoaded { folder, result });
        });
    }

    fn spawn_probe(&self, request: ProbeRequest) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = probe_asset(&client, &request.url);
            let _ = tx.send(WorkEvent::AssetProbed { request, result });
        });
    }
}
