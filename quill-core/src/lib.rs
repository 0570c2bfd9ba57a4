pub mod builder;
pub mod config;
pub mod feed;
pub mod frontmatter;
pub mod markdown;
pub mod post;
pub mod scaffold;
pub mod template;

// Re-export main types
pub use builder::{BuildError, BuildEvent, BuildReport, SiteBuilder};
pub use config::{Config, ConfigError};
pub use feed::FeedGenerator;
pub use frontmatter::Frontmatter;
pub use post::Post;
pub use scaffold::ScaffoldError;
pub use template::{PageRenderer, TemplateError};
