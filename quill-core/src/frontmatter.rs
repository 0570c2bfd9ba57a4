use std::collections::HashMap;

/// Metadata extracted from the `---` block at the top of an article.
///
/// `title` and `date` are the only keys the pipeline interprets; anything
/// else lands in `extra` so a key like `description` can still reach the
/// feed without a schema change.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub extra: HashMap<String, String>,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "title" => self.title.as_deref(),
            "date" => self.date.as_deref(),
            _ => self.extra.get(key).map(String::as_str),
        }
    }
}

/// Splits raw article text into frontmatter and body.
///
/// The block must start at the very first byte: a line that is exactly
/// `---`, any number of `key: value` lines, and a closing `---` line.
/// Inner lines split on the first colon with both halves trimmed; lines
/// without a colon are skipped rather than rejected. With a block present
/// the body is trimmed; without one the input comes back untouched.
pub fn extract(raw: &str) -> (Frontmatter, String) {
    let Some((block, body)) = split_fenced(raw) else {
        return (Frontmatter::default(), raw.to_string());
    };

    let mut frontmatter = Frontmatter::default();
    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().to_string();
        match key {
            "title" => frontmatter.title = Some(value),
            "date" => frontmatter.date = Some(value),
            _ => {
                frontmatter.extra.insert(key.to_string(), value);
            }
        }
    }

    (frontmatter, body.trim().to_string())
}

// Returns (inner block, everything after the closing fence), or None when
// the text does not open with a fence line at position 0.
fn split_fenced(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_body() {
        let (meta, body) = extract("---\ntitle: Hello\ndate: 2024-03-01\n---\n\n# Heading\n");
        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.date.as_deref(), Some("2024-03-01"));
        assert_eq!(body, "# Heading");
    }

    #[test]
    fn round_trips_serialized_metadata() {
        let serialized = "---\ntitle: Round Trip\ndate: 2023-12-31\nauthor: me\n---\nbody text";
        let (meta, body) = extract(serialized);
        assert_eq!(meta.title.as_deref(), Some("Round Trip"));
        assert_eq!(meta.date.as_deref(), Some("2023-12-31"));
        assert_eq!(meta.extra.get("author").map(String::as_str), Some("me"));
        assert_eq!(body, "body text");
    }

    #[test]
    fn no_fence_returns_input_unchanged() {
        let raw = "  plain text, not trimmed  \n";
        let (meta, body) = extract(raw);
        assert_eq!(meta, Frontmatter::default());
        assert_eq!(body, raw);
    }

    #[test]
    fn fence_must_be_anchored_to_start() {
        let raw = "\n---\ntitle: Late\n---\nbody";
        let (meta, body) = extract(raw);
        assert!(meta.title.is_none());
        assert_eq!(body, raw);
    }

    #[test]
    fn missing_closing_fence_degrades_to_no_metadata() {
        let raw = "---\ntitle: Dangling\nbody without end";
        let (meta, body) = extract(raw);
        assert!(meta.title.is_none());
        assert_eq!(body, raw);
    }

    #[test]
    fn lines_without_colon_are_skipped() {
        let (meta, _) = extract("---\njust some words\ntitle: Kept\n---\nbody");
        assert_eq!(meta.title.as_deref(), Some("Kept"));
        assert!(meta.extra.is_empty());
    }

    #[test]
    fn values_split_on_first_colon_only() {
        let (meta, _) = extract("---\nlink: https://example.com\n---\n");
        assert_eq!(
            meta.extra.get("link").map(String::as_str),
            Some("https://example.com")
        );
    }

    #[test]
    fn keys_and_values_are_trimmed() {
        let (meta, _) = extract("---\n  title :   Spaced Out  \n---\nbody");
        assert_eq!(meta.title.as_deref(), Some("Spaced Out"));
    }

    #[test]
    fn empty_block_yields_empty_metadata() {
        let (meta, body) = extract("---\n---\nbody");
        assert_eq!(meta, Frontmatter::default());
        assert_eq!(body, "body");
    }

    #[test]
    fn longer_dash_runs_are_not_fences() {
        let raw = "----\ntitle: Nope\n----\nbody";
        let (meta, body) = extract(raw);
        assert!(meta.title.is_none());
        assert_eq!(body, raw);
    }

    #[test]
    fn crlf_fences_are_accepted() {
        let (meta, body) = extract("---\r\ntitle: Windows\r\n---\r\nbody\r\n");
        assert_eq!(meta.title.as_deref(), Some("Windows"));
        assert_eq!(body, "body");
    }
}
