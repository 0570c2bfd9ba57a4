use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};
use walkdir::WalkDir;

use crate::config::Config;
use crate::feed::FeedGenerator;
use crate::frontmatter;
use crate::markdown;
use crate::post::Post;
use crate::template::{DEFAULT_STYLESHEET, PageRenderer, TemplateError};

#[derive(Debug)]
pub enum BuildError {
    /// The content directory does not exist. Raised before the output
    /// directory is touched.
    MissingContentRoot(PathBuf),
    Template(TemplateError),
    Scan(walkdir::Error),
    Io(std::io::Error),
}

impl From<TemplateError> for BuildError {
    fn from(err: TemplateError) -> Self {
        BuildError::Template(err)
    }
}

impl From<walkdir::Error> for BuildError {
    fn from(err: walkdir::Error) -> Self {
        BuildError::Scan(err)
    }
}

impl From<std::io::Error> for BuildError {
    fn from(err: std::io::Error) -> Self {
        BuildError::Io(err)
    }
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::MissingContentRoot(p) => {
                write!(f, "Content directory not found: {}", p.display())
            }
            BuildError::Template(e) => write!(f, "Template error: {}", e),
            BuildError::Scan(e) => write!(f, "Scan error: {}", e),
            BuildError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for BuildError {}

/// Failure building one post. Reported through [`BuildEvent::PostFailed`]
/// and recorded in the report; never aborts the rest of the build.
#[derive(Debug)]
pub enum PostError {
    Io(std::io::Error),
    Template(TemplateError),
}

impl From<std::io::Error> for PostError {
    fn from(err: std::io::Error) -> Self {
        PostError::Io(err)
    }
}

impl From<TemplateError> for PostError {
    fn from(err: TemplateError) -> Self {
        PostError::Template(err)
    }
}

impl std::fmt::Display for PostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostError::Io(e) => write!(f, "IO error: {}", e),
            PostError::Template(e) => write!(f, "Template error: {}", e),
        }
    }
}

impl std::error::Error for PostError {}

/// Progress and diagnostics emitted while building. The core never prints;
/// the CLI subscribes to these and decides how to report them.
pub enum BuildEvent<'a> {
    PostBuilt { slug: &'a str },
    PostFailed { source: &'a Path, error: &'a PostError },
    AssetCopyFailed { path: &'a Path, error: &'a std::io::Error },
    FeedWritten { path: &'a Path },
}

#[derive(Debug, Default)]
pub struct BuildReport {
    pub posts_built: usize,
    /// Sources that were skipped, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Orchestrates a full regeneration: discovery, per-post pipeline, asset
/// mirroring, index/404 pages, and the feed. One invocation, one output
/// tree; there is no incremental mode.
pub struct SiteBuilder {
    config: Config,
    now: DateTime<Utc>,
}

impl SiteBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            now: Utc::now(),
        }
    }

    /// Freezes the build timestamp (footer year, feed dates). Tests use
    /// this to make rebuilds byte-identical.
    pub fn at_time(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn build(&self, on_event: &mut dyn FnMut(BuildEvent)) -> Result<BuildReport, BuildError> {
        let content_root = Path::new(&self.config.content.directory);
        if !content_root.is_dir() {
            return Err(BuildError::MissingContentRoot(content_root.to_path_buf()));
        }

        // Full regeneration: stale artifacts from removed posts must not
        // survive into the new tree.
        let output_root = Path::new(&self.config.content.output);
        if output_root.exists() {
            std::fs::remove_dir_all(output_root)?;
        }
        std::fs::create_dir_all(output_root)?;

        self.write_stylesheet(output_root)?;

        let renderer = PageRenderer::new(&self.config.site, self.now.year())?;

        let mut report = BuildReport::default();
        let mut posts = Vec::new();
        for source_dir in self.discover(content_root)? {
            let slug_path = source_dir
                .strip_prefix(content_root)
                .unwrap_or(&source_dir)
                .to_path_buf();
            if slug_path.as_os_str().is_empty() {
                // a bare content file at the root has no slug directory
                continue;
            }

            match self.build_post(&source_dir, &slug_path, output_root, &renderer, on_event) {
                Ok(post) => {
                    on_event(BuildEvent::PostBuilt { slug: &post.slug });
                    report.posts_built += 1;
                    posts.push(post);
                }
                Err(error) => {
                    let source = source_dir.join(&self.config.content.post_filename);
                    on_event(BuildEvent::PostFailed {
                        source: &source,
                        error: &error,
                    });
                    report.skipped.push((source, error.to_string()));
                }
            }
        }

        // Date descending; the sort is stable so undated posts keep their
        // discovery order behind every dated one.
        posts.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));

        std::fs::write(output_root.join("index.html"), renderer.render_index(&posts)?)?;
        std::fs::write(output_root.join("404.html"), renderer.render_not_found()?)?;

        if self.config.feed.enabled {
            let feed = FeedGenerator::new(&self.config.site, self.now);
            let path = output_root.join(&self.config.feed.filename);
            std::fs::write(&path, feed.generate(&posts))?;
            on_event(BuildEvent::FeedWritten { path: &path });
        }

        Ok(report)
    }

    // One source per directory containing the designated content filename.
    // Sorted traversal keeps discovery order deterministic across runs.
    fn discover(&self, content_root: &Path) -> Result<Vec<PathBuf>, BuildError> {
        let mut sources = Vec::new();
        for entry in WalkDir::new(content_root).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            if entry.file_name().to_string_lossy() == self.config.content.post_filename
                && let Some(parent) = entry.path().parent()
            {
                sources.push(parent.to_path_buf());
            }
        }

        Ok(sources)
    }

    fn build_post(
        &self,
        source_dir: &Path,
        slug_path: &Path,
        output_root: &Path,
        renderer: &PageRenderer,
        on_event: &mut dyn FnMut(BuildEvent),
    ) -> Result<Post, PostError> {
        let raw = std::fs::read_to_string(source_dir.join(&self.config.content.post_filename))?;
        let (metadata, body) = frontmatter::extract(&raw);
        let post = Post::resolve(slug_path, &metadata, markdown::to_html(&body));

        let document = renderer.render_post(&post)?;
        let target_dir = output_root.join(slug_path);
        std::fs::create_dir_all(&target_dir)?;
        std::fs::write(target_dir.join("index.html"), document)?;

        self.copy_assets(source_dir, &target_dir, on_event);

        Ok(post)
    }

    // Mirrors every sibling of the content file into the post's output
    // directory. Failures are per-entry: one bad asset never takes the
    // post down with it.
    fn copy_assets(&self, source_dir: &Path, target_dir: &Path, on_event: &mut dyn FnMut(BuildEvent)) {
        let entries = match std::fs::read_dir(source_dir) {
            Ok(entries) => entries,
            Err(error) => {
                on_event(BuildEvent::AssetCopyFailed {
                    path: source_dir,
                    error: &error,
                });
                return;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    on_event(BuildEvent::AssetCopyFailed {
                        path: source_dir,
                        error: &error,
                    });
                    continue;
                }
            };
            let name = entry.file_name();
            if name.to_string_lossy() == self.config.content.post_filename {
                continue;
            }

            let source = entry.path();
            let target = target_dir.join(&name);
            let result = if source.is_dir() {
                copy_dir(&source, &target)
            } else {
                std::fs::copy(&source, &target).map(|_| ())
            };

            if let Err(error) = result {
                on_event(BuildEvent::AssetCopyFailed {
                    path: &source,
                    error: &error,
                });
            }
        }
    }

    // style.css from the working directory wins over the bundled default.
    fn write_stylesheet(&self, output_root: &Path) -> Result<(), BuildError> {
        let stylesheet = std::fs::read_to_string("style.css")
            .unwrap_or_else(|_| DEFAULT_STYLESHEET.to_string());
        std::fs::write(output_root.join("style.css"), stylesheet)?;

        Ok(())
    }
}

fn copy_dir(source: &Path, target: &Path) -> std::io::Result<()> {
    if target.exists() {
        std::fs::remove_dir_all(target)?;
    }
    std::fs::create_dir_all(target)?;
    for entry in std::fs::read_dir(source)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target.join(entry.file_name()))?;
        } else {
            std::fs::copy(entry.path(), target.join(entry.file_name()))?;
        }
    }

    Ok(())
}
