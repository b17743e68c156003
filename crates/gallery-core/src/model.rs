use serde::{Deserialize, Serialize};

/// Media type discriminator.  `Image` is reserved; no player handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Pdf,
    Image,
}

impl MediaKind {
    /// Short badge label shown on cards.
    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "וידאו",
            Self::Audio => "אודיו",
            Self::Pdf => "PDF",
            Self::Image => "קובץ",
        }
    }

    /// Single-glyph icon used in place of a thumbnail.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Video => "▶",
            Self::Audio => "♫",
            Self::Pdf => "▤",
            Self::Image => "◆",
        }
    }
}

/// A single playable/viewable asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    pub added_at: String,
}

impl MediaItem {
    /// Parse the human-readable duration (`"m:ss"` or `"h:mm:ss"`) into seconds.
    pub fn duration_secs(&self) -> Option<f64> {
        let text = self.duration.as_deref()?;
        let mut total = 0u64;
        let mut parts = 0;
        for part in text.trim().split(':') {
            let n: u64 = part.trim().parse().ok()?;
            total = total.checked_mul(60)?.checked_add(n)?;
            parts += 1;
        }
        if parts == 0 || parts > 3 {
            return None;
        }
        Some(total as f64)
    }
}

/// A named grouping of items.  `items` order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub path: String,
    /// Shown next to the row title; only a manifest sets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<MediaItem>,
}

/// The header's one-of-four type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(MediaKind),
}

impl KindFilter {
    /// Filter buttons in header order.
    pub const CHOICES: [KindFilter; 4] = [
        KindFilter::All,
        KindFilter::Only(MediaKind::Video),
        KindFilter::Only(MediaKind::Audio),
        KindFilter::Only(MediaKind::Pdf),
    ];

    pub fn accepts(self, kind: MediaKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(k) => k == kind,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "הכל",
            Self::Only(kind) => kind.label(),
        }
    }

    /// Next button to the left/right, wrapping.
    pub fn cycle(self, forward: bool) -> Self {
        let pos = Self::CHOICES.iter().position(|&c| c == self).unwrap_or(0);
        let len = Self::CHOICES.len();
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        Self::CHOICES[next]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_duration(d: Option<&str>) -> MediaItem {
        MediaItem {
            id: "x".into(),
            name: "x.mp4".into(),
            title: "x".into(),
            description: None,
            kind: MediaKind::Video,
            path: "media/x.mp4".into(),
            thumbnail: None,
            category: "c".into(),
            duration: d.map(str::to_string),
            size: None,
            added_at: "2024-01-01".into(),
        }
    }

    #[test]
    fn test_duration_secs() {
        assert_eq!(item_with_duration(Some("15:30")).duration_secs(), Some(930.0));
        assert_eq!(item_with_duration(Some("1:02:03")).duration_secs(), Some(3723.0));
        assert_eq!(item_with_duration(Some("abc")).duration_secs(), None);
        assert_eq!(item_with_duration(None).duration_secs(), None);
        assert_eq!(
            item_with_duration(Some("18446744073709551615:59")).duration_secs(),
            None
        );
    }

    #[test]
    fn test_item_json_shape() {
        let json = r#"{
            "id": "9", "name": "a.mp3", "title": "A", "type": "audio",
            "path": "media/p/a.mp3", "category": "p", "addedAt": "2024-01-07"
        }"#;
        let item: MediaItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, MediaKind::Audio);
        assert_eq!(item.added_at, "2024-01-07");
        assert!(item.description.is_none());
    }

    #[test]
    fn test_filter_cycle_wraps() {
        assert_eq!(KindFilter::All.cycle(false), KindFilter::Only(MediaKind::Pdf));
        assert_eq!(KindFilter::Only(MediaKind::Pdf).cycle(true), KindFilter::All);
        assert!(KindFilter::All.accepts(MediaKind::Image));
        assert!(!KindFilter::Only(MediaKind::Audio).accepts(MediaKind::Video));
    }
}
