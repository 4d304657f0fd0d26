use crate::extract::TitleConfig;

/// Entities decoded in titles. Anything else is left as written.
const ENTITIES: [(&str, &str); 7] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
];

const ELLIPSIS: &str = "...";

/// Turns a raw extracted string into a display title.
#[derive(Debug, Clone)]
pub struct TitleCleaner {
    max_chars: usize,
    suffixes: Vec<String>,
}

impl Default for TitleCleaner {
    fn default() -> Self {
        Self::new(&TitleConfig::default())
    }
}

impl TitleCleaner {
    pub fn new(config: &TitleConfig) -> Self {
        Self {
            max_chars: config.max_chars,
            suffixes: config.strip_suffixes.clone(),
        }
    }

    /// Collapse whitespace, decode, strip known suffixes and truncate.
    /// Returns `None` when nothing is left.
    pub fn clean(&self, raw: &str) -> Option<String> {
        let collapsed = collapse_whitespace(raw);
        let decoded = decode_entities(&collapsed);
        let stripped = self
            .suffixes
            .iter()
            .find_map(|suffix| strip_suffix(&decoded, suffix))
            .unwrap_or(decoded.as_str());
        let title = truncate(stripped.trim(), self.max_chars);

        if title.is_empty() {
            None
        } else {
            Some(title)
        }
    }
}

/// Single left-to-right pass; decoded text is never decoded again.
pub fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx..];
        match ENTITIES.iter().find(|(entity, _)| tail.starts_with(entity)) {
            Some((entity, replacement)) => {
                out.push_str(replacement);
                rest = &tail[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove a trailing `- <suffix>` (whitespace optional on both sides of the
/// dash), matching the suffix ASCII-case-insensitively.
fn strip_suffix<'a>(title: &'a str, suffix: &str) -> Option<&'a str> {
    let title = title.trim_end();
    let split = title.len().checked_sub(suffix.len())?;
    if !title.is_char_boundary(split) || !title[split..].eq_ignore_ascii_case(suffix) {
        return None;
    }
    let head = title[..split].trim_end().strip_suffix('-')?;
    Some(head.trim_end())
}

/// Cut to `max_chars` characters, the last three replaced by `...`. Limits
/// too small for the ellipsis get a plain cut.
pub fn truncate(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_string();
    }
    if max_chars <= ELLIPSIS.len() {
        return title.chars().take(max_chars).collect();
    }
    let keep = max_chars - ELLIPSIS.len();
    let mut out: String = title.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
