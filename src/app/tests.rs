use super::clock::{progress_percent, seconds_to_mmss, time_label};
use super::nav::{Advance, find_index, next_index, previous_index};
use super::*;
use crate::audio::{AudioCmd, MediaSource, ProbeError};
use crate::catalog::{Catalog, CatalogError, asset_url};
use crate::config::FolderCard;
use std::time::Duration;
use url::Url;

fn base() -> Url {
    Url::parse("http://music.local/").unwrap()
}

fn card(folder: &str) -> FolderCard {
    FolderCard {
        folder: folder.into(),
        title: String::new(),
        description: String::new(),
    }
}

fn catalog(songs: &[&str]) -> Catalog {
    Catalog::new("f", songs.iter().map(|s| s.to_string()).collect())
}

/// App with folder `f` loaded from `songs`, the first track probed (not yet loaded).
fn app_with(songs: &[&str]) -> App {
    let mut app = App::new(base(), vec![card("f"), card("g")]);
    app.select_folder(0);
    app.catalog_loaded("f", Ok(catalog(songs)));
    app
}

fn source_for(app: &App, stem: &str) -> MediaSource {
    MediaSource {
        url: asset_url(&app.base_url, "f", stem).unwrap(),
        bytes: vec![1u8, 2, 3].into(),
        duration: Some(Duration::from_secs(200)),
    }
}

/// Pretend the media element currently holds `stem`.
fn loaded(app: &mut App, stem: &str) {
    let url = asset_url(&app.base_url, "f", stem).unwrap();
    app.media.load(url, 200.0);
}

fn probed_tracks(effects: &[Effect]) -> Vec<(String, bool)> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::ProbeAsset(req) => Some((req.track.clone(), req.autoplay)),
            _ => None,
        })
        .collect()
}

fn single_probe(effects: Vec<Effect>) -> ProbeRequest {
    let mut probes: Vec<ProbeRequest> = effects
        .into_iter()
        .filter_map(|e| match e {
            Effect::ProbeAsset(req) => Some(req),
            _ => None,
        })
        .collect();
    assert_eq!(probes.len(), 1);
    probes.remove(0)
}

#[test]
fn seconds_to_mmss_formats_and_clamps() {
    assert_eq!(seconds_to_mmss(125.0), "02:05");
    assert_eq!(seconds_to_mmss(0.0), "00:00");
    assert_eq!(seconds_to_mmss(59.999), "00:59");
    assert_eq!(seconds_to_mmss(6000.0), "100:00");
    assert_eq!(seconds_to_mmss(-5.0), "00:00");
    assert_eq!(seconds_to_mmss(f64::NAN), "00:00");
    assert_eq!(time_label(65.2, f64::NAN), "01:05/00:00");
}

#[test]
fn seek_fraction_is_proportional() {
    assert_eq!(seek_fraction(25, 100), Some(0.25));
    assert_eq!(seek_fraction(0, 40), Some(0.0));
    assert_eq!(seek_fraction(3, 0), None);
    assert_eq!(progress_percent(30.0, 120.0), Some(25.0));
    assert_eq!(progress_percent(30.0, f64::NAN), None);
    assert_eq!(progress_percent(0.0, 0.0), None);
}

#[test]
fn next_previous_index_walk_the_catalog() {
    let c = catalog(&["a.mp3", "b.mp3", "c.mp3"]);
    assert_eq!(next_index(&c, "b", Advance::Manual), Some(2));
    assert_eq!(previous_index(&c, "b"), Some(0));
    assert_eq!(next_index(&c, "c", Advance::Manual), None);
    assert_eq!(next_index(&c, "c", Advance::Autoplay), Some(0));
    assert_eq!(previous_index(&c, "a"), None);
}

#[test]
fn unmatched_track_next_plays_first_previous_does_nothing() {
    let c = catalog(&["a.mp3", "b.mp3"]);
    assert_eq!(find_index(&c, "zzz"), None);
    assert_eq!(next_index(&c, "zzz", Advance::Manual), Some(0));
    assert_eq!(next_index(&c, "zzz", Advance::Autoplay), Some(0));
    assert_eq!(previous_index(&c, "zzz"), None);

    let single = catalog(&["only.mp3"]);
    assert_eq!(next_index(&single, "zzz", Advance::Manual), Some(0));
    assert_eq!(next_index(&single, "only", Advance::Manual), None);
    assert_eq!(next_index(&single, "only", Advance::Autoplay), Some(0));

    let empty = catalog(&[]);
    assert_eq!(next_index(&empty, "a", Advance::Autoplay), None);
}

#[test]
fn app_next_and_previous_play_neighbours() {
    let mut app = app_with(&["a.mp3", "b.mp3", "c.mp3"]);
    loaded(&mut app, "b");

    assert_eq!(probed_tracks(&app.next()), vec![("c".to_string(), true)]);
    assert_eq!(probed_tracks(&app.previous()), vec![("a".to_string(), true)]);
}

#[test]
fn manual_next_at_end_is_noop_but_autoplay_wraps() {
    let mut app = app_with(&["a.mp3", "b.mp3", "c.mp3"]);
    loaded(&mut app, "c");

    assert!(app.next().is_empty());

    // Autoplay off: ended just pauses.
    assert!(app.media_ended().is_empty());
    assert!(app.media.paused);

    app.toggle_autoplay();
    loaded(&mut app, "c");
    assert_eq!(probed_tracks(&app.media_ended()), vec![("a".to_string(), true)]);
}

#[test]
fn navigation_without_source_does_nothing() {
    let mut app = app_with(&["a.mp3", "b.mp3"]);
    assert!(app.media.src.is_none());
    assert!(app.next().is_empty());
    assert!(app.previous().is_empty());
}

#[test]
fn navigation_finds_encoded_names() {
    let mut app = app_with(&["My Song.mp3", "Other Song.mp3"]);
    loaded(&mut app, "My Song");
    assert_eq!(app.current_track_name().as_deref(), Some("My Song"));
    assert_eq!(
        probed_tracks(&app.next()),
        vec![("Other Song".to_string(), true)]
    );
}

#[test]
fn catalog_swap_replaces_list_and_loads_first_paused() {
    let mut app = App::new(base(), vec![card("f"), card("g")]);
    app.select_folder(0);
    app.catalog_loaded("f", Ok(catalog(&["a.mp3", "b.mp3"])));
    app.search_input = "b".into();
    app.perform_search();
    assert_eq!(app.visible_indices(), vec![1]);

    let effects = app.select_folder(1);
    assert!(matches!(&effects[..], [Effect::LoadCatalog { folder }] if folder == "g"));
    assert_eq!(app.current_folder.as_deref(), Some("g"));

    let effects = app.catalog_loaded("g", Ok(Catalog::new("g", vec!["x.mp3".into(), "y.ogg".into()])));
    let labels: Vec<&str> = app.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["x", "y"]);
    assert_eq!(app.visible_indices(), vec![0, 1]);
    assert_eq!(app.selected, 0);

    let req = single_probe(effects);
    assert_eq!(req.track, "x");
    assert!(!req.autoplay);
    assert_eq!(req.url.as_str(), "http://music.local/songs/g/x.mp3");
    assert_eq!(app.now_playing, "x");
}

#[test]
fn failed_catalog_keeps_previous_list() {
    let mut app = app_with(&["a.mp3"]);
    app.select_folder(1);
    let err = serde_json::from_slice::<serde_json::Value>(b"nope").unwrap_err();
    let effects = app.catalog_loaded("g", Err::<Catalog, CatalogError>(CatalogError::Parse(err)));
    assert!(effects.is_empty());
    assert_eq!(app.items.len(), 1);
    // The folder switch already happened.
    assert_eq!(app.current_folder.as_deref(), Some("g"));
}

#[test]
fn play_updates_labels_before_probe_resolves() {
    let mut app = app_with(&["a.mp3", "b.mp3"]);
    app.time_label = "01:00/02:00".into();

    let req = single_probe(app.play("My%20Tune", true));
    assert_eq!(app.now_playing, "My Tune");
    assert_eq!(app.time_label, "00:00/00:00");

    // The probe fails; the label stays on the attempted track and nothing loads.
    let effects = app.asset_probed(req, Err(ProbeError::Status { status: 404 }));
    assert!(effects.is_empty());
    assert_eq!(app.now_playing, "My Tune");
    assert!(app.media.src.is_none());
}

#[test]
fn successful_probe_sets_source_and_starts_when_autoplay() {
    let mut app = app_with(&["a.mp3", "b.mp3"]);
    let req = single_probe(app.play("b", true));
    let source = source_for(&app, "b");

    let effects = app.asset_probed(req, Ok(source));
    assert!(matches!(
        &effects[..],
        [Effect::Audio(AudioCmd::Load { autoplay: true, .. })]
    ));
    assert_eq!(app.current_track_name().as_deref(), Some("b"));
    assert!(!app.media.paused);
    assert_eq!(app.play_icon, PlayIcon::Pause);
    assert_eq!(app.media.duration, 200.0);
}

#[test]
fn first_track_loads_paused() {
    let mut app = App::new(base(), vec![card("f")]);
    app.select_folder(0);
    let req = single_probe(app.catalog_loaded("f", Ok(catalog(&["a.mp3"]))));
    let source = source_for(&app, "a");

    let effects = app.asset_probed(req, Ok(source));
    assert!(matches!(
        &effects[..],
        [Effect::Audio(AudioCmd::Load { autoplay: false, .. })]
    ));
    assert!(app.media.paused);
    assert_eq!(app.play_icon, PlayIcon::Play);
}

#[test]
fn stale_probe_is_still_applied() {
    let mut app = app_with(&["a.mp3", "b.mp3"]);
    let first = single_probe(app.play("a", true));
    let second = single_probe(app.play("b", true));
    assert!(second.seq > first.seq);

    let source_b = source_for(&app, "b");
    app.asset_probed(second, Ok(source_b));
    let source_a = source_for(&app, "a");
    app.asset_probed(first, Ok(source_a));

    // Last answer wins, even though it belongs to the older request.
    assert_eq!(app.current_track_name().as_deref(), Some("a"));
    assert_eq!(app.now_playing, "b");
}

#[test]
fn toggle_play_flips_icon_and_commands() {
    let mut app = app_with(&["a.mp3"]);
    loaded(&mut app, "a");

    let effects = app.toggle_play();
    assert!(matches!(&effects[..], [Effect::Audio(AudioCmd::Play)]));
    assert_eq!(app.play_icon, PlayIcon::Pause);
    assert!(!app.media.paused);

    let effects = app.toggle_play();
    assert!(matches!(&effects[..], [Effect::Audio(AudioCmd::Pause)]));
    assert_eq!(app.play_icon, PlayIcon::Play);
    assert!(app.media.paused);
}

#[test]
fn time_update_moves_label_and_indicator() {
    let mut app = app_with(&["a.mp3"]);
    app.time_update(30.0, 120.0);
    assert_eq!(app.time_label, "00:30/02:00");
    assert_eq!(app.seek_percent, 25.0);

    // Unknown duration keeps the indicator where it was.
    app.time_update(31.0, f64::NAN);
    assert_eq!(app.time_label, "00:31/00:00");
    assert_eq!(app.seek_percent, 25.0);
}

#[test]
fn seek_sets_time_proportionally() {
    let mut app = app_with(&["a.mp3"]);
    loaded(&mut app, "a");
    app.media.duration = 200.0;

    let effects = app.dispatch(Action::Seek(0.5));
    assert_eq!(app.seek_percent, 50.0);
    assert_eq!(app.media.current_time, 100.0);
    assert!(matches!(
        &effects[..],
        [Effect::Audio(AudioCmd::SeekTo(d))] if *d == Duration::from_secs(100)
    ));

    app.media.duration = f64::NAN;
    assert!(app.seek(0.25).is_empty());
    assert_eq!(app.seek_percent, 25.0);
}

#[test]
fn volume_and_mute() {
    let mut app = app_with(&["a.mp3"]);
    let effects = app.set_volume(40);
    assert_eq!(app.media.volume, 0.4);
    assert!(matches!(&effects[..], [Effect::Audio(AudioCmd::SetVolume(v))] if (*v - 0.4).abs() < 1e-6));

    app.step_volume(-50);
    assert_eq!(app.volume_percent, 0);
    app.step_volume(150);
    assert_eq!(app.volume_percent, 100);

    app.toggle_mute();
    assert!(app.media.muted);
    assert_eq!(app.volume_icon, VolumeIcon::Mute);
    let effects = app.toggle_mute();
    assert!(!app.media.muted);
    assert_eq!(app.volume_icon, VolumeIcon::Volume);
    assert!(matches!(&effects[..], [Effect::Audio(AudioCmd::SetMuted(false))]));
}

#[test]
fn search_filters_case_insensitively() {
    let mut app = App::new(base(), vec![card("f")]);
    app.select_folder(0);
    app.catalog_loaded("f", Ok(catalog(&["Song One.mp3", "Other.mp3"])));

    for c in "  SONG ".chars() {
        app.dispatch(Action::SearchInput(c));
    }
    // Typing alone does not filter.
    assert_eq!(app.visible_indices(), vec![0, 1]);

    app.dispatch(Action::PerformSearch);
    assert_eq!(app.visible_indices(), vec![0]);
    assert!(app.items[0].visible);
    assert!(!app.items[1].visible);

    app.search_input.clear();
    app.perform_search();
    assert_eq!(app.visible_indices(), vec![0, 1]);
}

#[test]
fn search_moves_cursor_onto_visible_row() {
    let mut app = app_with(&["Alpha.mp3", "Beta.mp3", "Gamma.mp3"]);
    app.selected = 0;
    app.search_input = "et".into();
    app.perform_search();
    assert_eq!(app.selected, 1);

    assert_eq!(app.next_in_view_from(0), Some(1));
    assert_eq!(app.prev_in_view_from(0), Some(1));
    assert_eq!(app.next_in_view_from(1), Some(1));
}

#[test]
fn play_item_uses_trimmed_label() {
    let mut app = app_with(&["a.mp3", "b.mp3"]);
    app.items[1].label = "  b \n".into();
    let req = single_probe(app.dispatch(Action::PlayItem(1)));
    assert_eq!(req.track, "b");
    assert!(req.autoplay);
    assert_eq!(app.selected, 1);
}

#[test]
fn play_selected_ignores_hidden_rows() {
    let mut app = app_with(&["a.mp3", "b.mp3"]);
    app.items[0].visible = false;
    app.selected = 0;
    assert!(app.dispatch(Action::PlaySelected).is_empty());
}

#[test]
fn cursor_wraps_over_visible_rows() {
    let mut app = app_with(&["a.mp3", "b.mp3", "c.mp3"]);
    app.cursor_up();
    assert_eq!(app.selected, 2);
    app.cursor_down();
    assert_eq!(app.selected, 0);
    app.cursor_bottom();
    assert_eq!(app.selected, 2);
    app.cursor_top();
    assert_eq!(app.selected, 0);
}

#[test]
fn sidebar_and_folder_cursor() {
    let mut app = App::new(base(), vec![card("f"), card("g"), card("h")]);
    app.dispatch(Action::CloseSidebar);
    assert!(!app.sidebar_open);
    app.dispatch(Action::OpenSidebar);
    assert!(app.sidebar_open);
    assert_eq!(app.focus, Focus::Folders);

    app.dispatch(Action::FolderCursorPrev);
    assert_eq!(app.folder_cursor, 2);
    app.dispatch(Action::FolderCursorNext);
    assert_eq!(app.folder_cursor, 0);
    app.dispatch(Action::FolderCursorNext);
    let effects = app.dispatch(Action::ActivateFolderCursor);
    assert!(matches!(&effects[..], [Effect::LoadCatalog { folder }] if folder == "g"));

    app.dispatch(Action::CloseSidebar);
    assert_eq!(app.focus, Focus::Songs);
    assert!(app.select_folder(9).is_empty());
}

#[test]
fn play_without_folder_only_updates_labels() {
    let mut app = App::new(base(), Vec::new());
    let effects = app.play("a", true);
    assert!(effects.is_empty());
    assert_eq!(app.now_playing, "a");
}
