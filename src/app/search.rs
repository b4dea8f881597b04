/// A rendered row of the song list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongItem {
    pub label: String,
    pub visible: bool,
}

impl SongItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            visible: true,
        }
    }
}

/// Normalise a raw search box value: lower-cased, then trimmed.
pub fn normalize_query(raw: &str) -> String {
    raw.to_lowercase().trim().to_string()
}

/// Case-insensitive substring match against a lower-cased `query`.
pub fn matches(label: &str, query: &str) -> bool {
    label.to_lowercase().contains(query)
}

/// Toggle each item's visibility for `query`. An empty query shows everything.
pub fn apply_filter(items: &mut [SongItem], query: &str) {
    for item in items.iter_mut() {
        item.visible = matches(&item.label, query);
    }
}
