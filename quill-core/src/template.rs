use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::post::Post;

const BASE_TEMPLATE: &str = include_str!("../templates/base.html");
const POST_TEMPLATE: &str = include_str!("../templates/post.html");
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const NOT_FOUND_TEMPLATE: &str = include_str!("../templates/not_found.html");

/// Default stylesheet, written to the output root unless the working
/// directory provides its own `style.css`.
pub const DEFAULT_STYLESHEET: &str = include_str!("../templates/style.css");

#[derive(Debug)]
pub enum TemplateError {
    TeraError(tera::Error),
}

impl From<tera::Error> for TemplateError {
    fn from(err: tera::Error) -> Self {
        TemplateError::TeraError(err)
    }
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::TeraError(e) => write!(f, "Template error: {}", e),
        }
    }
}

impl std::error::Error for TemplateError {}

#[derive(Serialize)]
struct SocialLink<'a> {
    label: &'a str,
    url: &'a str,
}

#[derive(Serialize)]
struct IndexEntry<'a> {
    title: &'a str,
    url: &'a str,
    date: &'a str,
}

/// Wraps rendered fragments into full documents: one shell template with
/// slots for page title, site identity, navigation, body, and footer year.
///
/// The footer year is handed in at construction so rendering stays a pure
/// function of its inputs; the builder owns the clock.
pub struct PageRenderer {
    tera: Tera,
    base_context: Context,
    site_title: String,
}

impl PageRenderer {
    pub fn new(site: &SiteConfig, year: i32) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", BASE_TEMPLATE),
            ("post.html", POST_TEMPLATE),
            ("index.html", INDEX_TEMPLATE),
            ("not_found.html", NOT_FOUND_TEMPLATE),
        ])?;

        let socials: Vec<SocialLink> = site
            .socials
            .iter()
            .map(|(label, url)| SocialLink { label, url })
            .collect();

        let mut base_context = Context::new();
        base_context.insert("site_title", &site.title);
        base_context.insert("site_subtitle", &site.subtitle);
        base_context.insert("socials", &socials);
        base_context.insert("year", &year);

        Ok(Self {
            tera,
            base_context,
            site_title: site.title.clone(),
        })
    }

    /// The post fragment wrapped in the shell, titled `{post} | {site}`.
    pub fn render_post(&self, post: &Post) -> Result<String, TemplateError> {
        let mut context = self.base_context.clone();
        context.insert("page_title", &format!("{} | {}", post.title, self.site_title));
        context.insert("post_body", &post.html_body);

        Ok(self.tera.render("post.html", &context)?)
    }

    /// The home page. `posts` must already be in display order; this
    /// renders the list as given.
    pub fn render_index(&self, posts: &[Post]) -> Result<String, TemplateError> {
        let entries: Vec<IndexEntry> = posts
            .iter()
            .map(|post| IndexEntry {
                title: &post.title,
                url: &post.url,
                date: post.display_date(),
            })
            .collect();

        let mut context = self.base_context.clone();
        context.insert("page_title", &format!("Home | {}", self.site_title));
        context.insert("posts", &entries);

        Ok(self.tera.render("index.html", &context)?)
    }

    pub fn render_not_found(&self) -> Result<String, TemplateError> {
        let mut context = self.base_context.clone();
        context.insert("page_title", &format!("404 | {}", self.site_title));

        Ok(self.tera.render("not_found.html", &context)?)
    }
}
