//! Application module: the player model driven by the TUI and runtime.
//!
//! `App` (in `app::model`) holds the folder cards, the loaded catalog and a
//! mirror of the media state; `app::playback` and `app::action` implement the
//! transitions. Pure helpers live in `nav`, `clock` and `search`.

mod action;
mod clock;
mod effect;
mod model;
mod nav;
mod playback;
mod search;

pub use action::Action;
pub use clock::seek_fraction;
pub use effect::{Effect, ProbeRequest};
pub use model::*;

#[cfg(test)]
mod tests;
