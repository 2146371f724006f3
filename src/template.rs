use std::fmt;

use regex::Regex;
use thiserror::Error;

/// Class suffix written into the placeholder of the active navigation entry.
pub const ACTIVE_MARKER: &str = " active";

const PLACEHOLDER_PATTERN: &str = r"\{([a-z]+)_active\}";

static SIDEBAR_TEMPLATE: &str = include_str!("../templates/sidebar.html");

/// Project dashboard pages that can be flagged active in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavEntry {
    Ozet,
    Kesif,
    Teklif,
    Sozlesme,
    Metraj,
    Hakedis,
    Odeme,
}

impl NavEntry {
    pub const ALL: [NavEntry; 7] = [
        NavEntry::Ozet,
        NavEntry::Kesif,
        NavEntry::Teklif,
        NavEntry::Sozlesme,
        NavEntry::Metraj,
        NavEntry::Hakedis,
        NavEntry::Odeme,
    ];

    pub fn id(self) -> &'static str {
        match self {
            NavEntry::Ozet => "ozet",
            NavEntry::Kesif => "kesif",
            NavEntry::Teklif => "teklif",
            NavEntry::Sozlesme => "sozlesme",
            NavEntry::Metraj => "metraj",
            NavEntry::Hakedis => "hakedis",
            NavEntry::Odeme => "odeme",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|entry| entry.id() == id)
    }

    pub fn placeholder(self) -> String {
        format!("{{{}_active}}", self.id())
    }
}

impl fmt::Display for NavEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("invalid placeholder pattern")]
    Pattern(#[from] regex::Error),
    #[error("unknown placeholder {{{0}_active}}")]
    UnknownPlaceholder(String),
    #[error("placeholder for {0} appears more than once")]
    DuplicatePlaceholder(NavEntry),
    #[error("placeholder for {0} is missing")]
    MissingPlaceholder(NavEntry),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(NavEntry),
}

/// Sidebar markup split into literal text and one slot per navigation entry.
#[derive(Debug, Clone)]
pub struct SidebarTemplate {
    segments: Vec<Segment>,
}

impl SidebarTemplate {
    /// The sidebar shipped with the dashboard.
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::parse(SIDEBAR_TEMPLATE)
    }

    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let pattern = Regex::new(PLACEHOLDER_PATTERN)?;
        let mut segments = Vec::new();
        let mut seen = Vec::with_capacity(NavEntry::ALL.len());
        let mut cursor = 0;

        for caps in pattern.captures_iter(raw) {
            let (Some(whole), Some(id)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let id = id.as_str();
            let entry = NavEntry::from_id(id)
                .ok_or_else(|| TemplateError::UnknownPlaceholder(id.to_string()))?;
            if seen.contains(&entry) {
                return Err(TemplateError::DuplicatePlaceholder(entry));
            }
            seen.push(entry);

            if whole.start() > cursor {
                segments.push(Segment::Text(raw[cursor..whole.start()].to_string()));
            }
            segments.push(Segment::Slot(entry));
            cursor = whole.end();
        }
        if cursor < raw.len() {
            segments.push(Segment::Text(raw[cursor..].to_string()));
        }

        if let Some(missing) = NavEntry::ALL.into_iter().find(|entry| !seen.contains(entry)) {
            return Err(TemplateError::MissingPlaceholder(missing));
        }

        Ok(Self { segments })
    }

    /// Instantiates the sidebar with `active_page` flagged. Identifiers outside
    /// the catalog yield a sidebar with no active entry.
    pub fn render(&self, active_page: &str) -> String {
        let mut out = String::with_capacity(self.len_hint());
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(entry) if entry.id() == active_page => out.push_str(ACTIVE_MARKER),
                Segment::Slot(_) => {}
            }
        }
        out
    }

    fn len_hint(&self) -> usize {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => text.len(),
                Segment::Slot(_) => ACTIVE_MARKER.len(),
            })
            .sum()
    }
}
