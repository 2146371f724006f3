use std::borrow::Cow;

use regex::{Captures, Regex};

const SIDEBAR_REGION_PATTERN: &str =
    r#"(?s)(<aside class="sidebar">)\s*<div class="sidebar-header">.*?</div>\s*</aside>"#;
const SIDEBAR_CLOSE: &str = "    </aside>";

/// Locates the `<aside class="sidebar">` block of a dashboard page.
///
/// The block starts at the sidebar header and ends at the first `</div>`
/// followed only by whitespace and the closing `</aside>`.
#[derive(Debug, Clone)]
pub struct SidebarRegion {
    pattern: Regex,
}

impl SidebarRegion {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(SIDEBAR_REGION_PATTERN)?,
        })
    }

    pub fn is_present(&self, content: &str) -> bool {
        self.pattern.is_match(content)
    }

    /// Replaces every sidebar block with `fragment`, keeping the opening tag.
    /// Borrows `content` unchanged when no block is found.
    pub fn splice<'a>(&self, content: &'a str, fragment: &str) -> Cow<'a, str> {
        self.pattern.replace_all(content, |caps: &Captures<'_>| {
            format!("{}\n{}\n{}", &caps[1], fragment, SIDEBAR_CLOSE)
        })
    }
}
