use chrono::{DateTime, NaiveDate, Utc};
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder};

use crate::config::SiteConfig;
use crate::post::Post;

const GENERATOR: &str = concat!("quill ", env!("CARGO_PKG_VERSION"));

/// Serializes the post list into an RSS 2.0 document. Writing the result
/// to disk is the builder's job; this type only produces the XML string.
pub struct FeedGenerator<'a> {
    site: &'a SiteConfig,
    /// `base_url` with any trailing slash removed, shared by the channel
    /// link and every item link.
    base_url: &'a str,
    now: DateTime<Utc>,
}

impl<'a> FeedGenerator<'a> {
    pub fn new(site: &'a SiteConfig, now: DateTime<Utc>) -> Self {
        Self {
            site,
            base_url: site.base_url.trim_end_matches('/'),
            now,
        }
    }

    /// Builds the feed document. Entries are ordered by parsed date
    /// descending; the feed sorts its own copy rather than trusting the
    /// caller's ordering. All text fields are XML-escaped by the
    /// serializer.
    pub fn generate(&self, posts: &[Post]) -> String {
        let mut ordered: Vec<&Post> = posts.iter().collect();
        ordered.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));

        let items: Vec<rss::Item> = ordered.iter().map(|post| self.item(post)).collect();

        let channel = ChannelBuilder::default()
            .title(self.site.title.as_str())
            .link(self.base_url)
            .description(self.site.description.as_str())
            .last_build_date(self.now.to_rfc2822())
            .generator(GENERATOR.to_string())
            .items(items)
            .build();

        channel.to_string()
    }

    fn item(&self, post: &Post) -> rss::Item {
        let link = format!("{}/{}", self.base_url, post.slug);

        ItemBuilder::default()
            .title(post.title.clone())
            .link(link.clone())
            .guid(GuidBuilder::default().permalink(true).value(link).build())
            .pub_date(self.pub_date(&post.date))
            .description(post.description.clone())
            .build()
    }

    // `YYYY-MM-DD` at midnight UTC as RFC 2822; anything unparseable
    // falls back to the build time instead of failing the feed.
    fn pub_date(&self, date: &str) -> String {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().to_rfc2822())
            .unwrap_or_else(|| self.now.to_rfc2822())
    }
}
