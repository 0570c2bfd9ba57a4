use std::{collections::BTreeMap, fmt, path::Path};

use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parsing(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parsing(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Parsing(value)
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub content: ContentConfig,
    pub feed: FeedConfig,
}

impl Config {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&data)?;

        Ok(config)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub subtitle: String,
    /// Absolute base URL of the deployed site. Used for feed links only.
    pub base_url: String,
    pub description: String,
    /// Label -> URL, rendered in the navigation bar after the home link.
    pub socials: BTreeMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            subtitle: "Generated with quill".to_string(),
            base_url: "http://localhost:8000".to_string(),
            description: "Recent content.".to_string(),
            socials: BTreeMap::new(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding one subdirectory per article.
    pub directory: String,
    /// Directory the site is generated into. Cleared on every build.
    pub output: String,
    /// The file inside a slug directory that holds the article body.
    pub post_filename: String,
    /// Subdirectory created alongside new articles for images etc.
    pub assets_dir: String,
    /// Editor command for `quill new`, overridden by $EDITOR.
    pub default_editor: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            directory: "content".to_string(),
            output: "public".to_string(),
            post_filename: "article.md".to_string(),
            assets_dir: "media".to_string(),
            default_editor: "nano".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct FeedConfig {
    pub enabled: bool,
    pub filename: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            filename: "feed.xml".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let config: Config = toml::from_str(
            r#"
            [site]
            title = "Ramblings"
            "#,
        )
        .unwrap();

        assert_eq!(config.site.title, "Ramblings");
        assert_eq!(config.content.directory, "content");
        assert_eq!(config.content.post_filename, "article.md");
        assert!(!config.feed.enabled);
    }

    #[test]
    fn read_loads_a_toml_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("quill.toml");
        std::fs::write(
            &path,
            "[site]\ntitle = \"From Disk\"\n\n[feed]\nenabled = true\n",
        )
        .unwrap();

        let config = Config::read(&path).unwrap();
        assert_eq!(config.site.title, "From Disk");
        assert!(config.feed.enabled);

        let err = Config::read(tmp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn socials_preserve_label_and_url() {
        let config: Config = toml::from_str(
            r#"
            [site.socials]
            GitHub = "https://github.com/someone"
            Mastodon = "https://hachyderm.io/@someone"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.site.socials.get("GitHub").map(String::as_str),
            Some("https://github.com/someone")
        );
        assert_eq!(config.site.socials.len(), 2);
    }
}
