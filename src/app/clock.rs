/// Format seconds as `MM:SS`; NaN and negative values show as `00:00`.
/// Minutes are not capped at two digits.
pub fn seconds_to_mmss(seconds: f64) -> String {
    // Infinite durations (live streams) read as unknown.
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }
    let minutes = (seconds / 60.0).floor() as u64;
    let remaining = (seconds % 60.0).floor() as u64;
    format!("{minutes:02}:{remaining:02}")
}

/// `"<current>/<duration>"` as shown next to the seek bar.
pub fn time_label(current: f64, duration: f64) -> String {
    format!("{}/{}", seconds_to_mmss(current), seconds_to_mmss(duration))
}

/// Position of the seek indicator in percent, or `None` when it can't be
/// computed (unknown or zero duration).
pub fn progress_percent(current: f64, duration: f64) -> Option<f64> {
    let percent = current / duration * 100.0;
    percent.is_finite().then_some(percent)
}

/// Fraction of the bar width at which a click landed.
pub fn seek_fraction(offset: u16, width: u16) -> Option<f64> {
    if width == 0 {
        return None;
    }
    Some(f64::from(offset) / f64::from(width))
}
