use std::path::Path;

use chrono::NaiveDate;

use crate::frontmatter::Frontmatter;

/// Display value used when an article carries no `date` key.
pub const UNDATED: &str = "N/A";

/// The resolved view of one article: everything the index, the post page
/// and the feed need, derived once from the source file and its location.
#[derive(Debug, Clone)]
pub struct Post {
    pub title: String,
    /// Free-form date string from the frontmatter, [`UNDATED`] when absent.
    pub date: String,
    pub description: String,
    pub html_body: String,
    /// Slug path relative to the content root, forward slashes.
    pub slug: String,
    /// Output location relative to the output root.
    pub url: String,
}

impl Post {
    /// Derives a post from parsed metadata and its already-rendered body.
    /// Infallible: missing metadata falls back to the slug and [`UNDATED`].
    pub fn resolve(slug_path: &Path, frontmatter: &Frontmatter, html_body: String) -> Post {
        let slug = slug_to_string(slug_path);
        let title = frontmatter
            .title
            .clone()
            .unwrap_or_else(|| titleize(&slug));
        let date = frontmatter.date.clone().unwrap_or_else(|| UNDATED.to_string());
        let description = frontmatter
            .extra
            .get("description")
            .cloned()
            .unwrap_or_default();

        Post {
            title,
            date,
            description,
            html_body,
            url: format!("{}/index.html", slug),
            slug,
        }
    }

    /// Key for date-descending ordering. Unparseable dates (including the
    /// [`UNDATED`] sentinel) map to the minimum date so they sort last.
    pub fn sort_key(&self) -> NaiveDate {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").unwrap_or(NaiveDate::MIN)
    }

    /// The date as shown on the index page: a datetime value is cut down
    /// to its calendar-day part.
    pub fn display_date(&self) -> &str {
        let date = self.date.split(' ').next().unwrap_or(&self.date);
        date.split('T').next().unwrap_or(date)
    }
}

fn slug_to_string(slug_path: &Path) -> String {
    let parts: Vec<String> = slug_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/")
}

/// `my-first-post` -> `My First Post`. The fallback title for articles
/// without a `title` key, derived from the last slug segment.
pub fn titleize(slug: &str) -> String {
    slug.rsplit('/')
        .next()
        .unwrap_or(slug)
        .replace('-', " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
