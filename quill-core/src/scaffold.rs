use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::ContentConfig;
use crate::post::titleize;

#[derive(Debug)]
pub enum ScaffoldError {
    /// The slug directory already exists; nothing was written.
    AlreadyExists(PathBuf),
    Io(std::io::Error),
}

impl fmt::Display for ScaffoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaffoldError::AlreadyExists(p) => {
                write!(f, "Article directory already exists: {}", p.display())
            }
            ScaffoldError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ScaffoldError {}

impl From<std::io::Error> for ScaffoldError {
    fn from(err: std::io::Error) -> Self {
        ScaffoldError::Io(err)
    }
}

/// Paths created by [`create`], handed back so the CLI can open the
/// article in an editor.
#[derive(Debug)]
pub struct NewArticle {
    pub directory: PathBuf,
    pub markdown_path: PathBuf,
    pub assets_path: PathBuf,
}

/// Creates `<content>/<slug>/<post filename>` pre-filled with frontmatter
/// and a placeholder body, plus an empty assets subdirectory. Refuses to
/// touch an existing slug directory.
pub fn create(
    content: &ContentConfig,
    slug: &str,
    date: NaiveDate,
) -> Result<NewArticle, ScaffoldError> {
    let directory = Path::new(&content.directory).join(slug);
    if directory.exists() {
        return Err(ScaffoldError::AlreadyExists(directory));
    }

    let markdown_path = directory.join(&content.post_filename);
    let assets_path = directory.join(&content.assets_dir);

    std::fs::create_dir_all(&directory)?;
    std::fs::create_dir(&assets_path)?;
    std::fs::write(
        &markdown_path,
        article_template(&titleize(slug), &date.format("%Y-%m-%d").to_string(), slug, &content.assets_dir),
    )?;

    Ok(NewArticle {
        directory,
        markdown_path,
        assets_path,
    })
}

fn article_template(title: &str, date: &str, slug: &str, assets_dir: &str) -> String {
    format!(
        "---\n\
         title: {title}\n\
         date: {date}\n\
         ---\n\
         \n\
         This is the content for your new article, '{slug}'.\n\
         \n\
         Start writing your awesome content here! You can include assets in the \
         accompanying `{assets_dir}` folder.\n\
         \n\
         ## Sub-heading Example\n\
         \n\
         * List item 1\n\
         * List item 2\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter;

    fn content_config(root: &Path) -> ContentConfig {
        ContentConfig {
            directory: root.to_string_lossy().into_owned(),
            ..ContentConfig::default()
        }
    }

    #[test]
    fn creates_article_skeleton() {
        let tmp = tempfile::tempdir().unwrap();
        let content = content_config(tmp.path());
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let created = create(&content, "my-first-post", date).unwrap();

        assert!(created.markdown_path.is_file());
        assert!(created.assets_path.is_dir());

        let raw = std::fs::read_to_string(&created.markdown_path).unwrap();
        let (meta, body) = frontmatter::extract(&raw);
        assert_eq!(meta.title.as_deref(), Some("My First Post"));
        assert_eq!(meta.date.as_deref(), Some("2024-03-01"));
        assert!(body.contains("my-first-post"));
    }

    #[test]
    fn refuses_existing_slug_without_mutation() {
        let tmp = tempfile::tempdir().unwrap();
        let content = content_config(tmp.path());
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let existing = tmp.path().join("taken");
        std::fs::create_dir(&existing).unwrap();

        let err = create(&content, "taken", date).unwrap_err();
        assert!(matches!(err, ScaffoldError::AlreadyExists(_)));
        // nothing got written inside the pre-existing directory
        assert_eq!(std::fs::read_dir(&existing).unwrap().count(), 0);
    }
}
