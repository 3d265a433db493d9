//! Ordered event matchers.
//!
//! Every image path is checked against the matchers in allow-list order and
//! the first matcher whose normalized identifier occurs in the normalized path
//! wins. The list order is therefore both the display order and the match
//! priority: an identifier contained in a later, longer identifier captures
//! images meant for the longer one. Reordering the list changes grouping.

/// Events shown in the JROTC menu, in display order.
pub const DEFAULT_EVENTS: [&str; 6] = [
    "South-Broward",
    "Yuletide-Parade-25-26",
    "Open-House-25-26",
    "Raiders-State-Comp",
    "Raider-County",
    "Western-Comp",
];

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '_' || c == '-'
}

/// Lowercase and collapse every run of whitespace, `_` or `-` into one `-`.
pub fn normalize_path(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_separator = false;
    for c in value.chars() {
        if is_separator(c) {
            if !in_separator {
                out.push('-');
                in_separator = true;
            }
        } else {
            out.extend(c.to_lowercase());
            in_separator = false;
        }
    }
    out
}

/// Remote tags cannot carry whitespace, `-` or `_`.
pub fn lookup_tag(category: &str) -> String {
    category.chars().filter(|c| !is_separator(*c)).collect()
}

/// Identifier with its separators turned into single spaces.
pub fn display_name(identifier: &str) -> String {
    identifier
        .split(is_separator)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMatcher {
    needle: String,
    name: String,
}

impl EventMatcher {
    /// Returns `None` for identifiers that normalize to nothing, which would
    /// otherwise match every path.
    pub fn new(identifier: &str) -> Option<Self> {
        let needle = normalize_path(identifier.trim());
        if needle.trim_matches('-').is_empty() {
            return None;
        }
        Some(EventMatcher {
            needle,
            name: display_name(identifier),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `normalized_path` must already be passed through [`normalize_path`].
    pub fn matches(&self, normalized_path: &str) -> bool {
        normalized_path.contains(&self.needle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMatchers {
    matchers: Vec<EventMatcher>,
}

impl EventMatchers {
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matchers = identifiers
            .into_iter()
            .filter_map(|id| {
                let matcher = EventMatcher::new(id.as_ref());
                if matcher.is_none() {
                    tracing::warn!(identifier = id.as_ref(), "Ignoring empty event identifier");
                }
                matcher
            })
            .collect();
        EventMatchers { matchers }
    }

    /// Index of the first matcher hit by `path`.
    pub fn classify(&self, path: &str) -> Option<usize> {
        let normalized = normalize_path(path);
        self.matchers.iter().position(|m| m.matches(&normalized))
    }

    pub fn get(&self, index: usize) -> Option<&EventMatcher> {
        self.matchers.get(index)
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Default for EventMatchers {
    fn default() -> Self {
        EventMatchers::new(DEFAULT_EVENTS)
    }
}
