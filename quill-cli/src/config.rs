use std::path::Path;

use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use config::{Config as ConfigBuilder, Environment, File};
use quill_core::Config;

/// Adds the shared `--config` flag to a subcommand.
pub fn add_config_arg(command: Command) -> Command {
    command.arg(
        Arg::new("config")
            .short('c')
            .long("config")
            .value_name("FILE")
            .help("Configuration file")
            .default_value("./quill.toml"),
    )
}

/// Load configuration with cascading precedence:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (QUILL_*)
/// 3. Configuration file
/// 4. Defaults (lowest priority)
pub fn load_config(args: &ArgMatches) -> Result<Config> {
    let config_file = args
        .get_one::<String>("config")
        .cloned()
        .unwrap_or_else(|| "./quill.toml".to_string());

    // 1. Start with defaults
    let mut builder = ConfigBuilder::builder().add_source(ConfigBuilder::try_from(&Config::default())?);

    // 2. Add configuration file if it exists
    if Path::new(&config_file).exists() {
        builder = builder.add_source(File::with_name(&config_file));
    }

    // 3. Add environment variables with QUILL_ prefix
    builder = builder.add_source(
        Environment::with_prefix("QUILL")
            .prefix_separator("_")
            .separator("__"), // Use double underscore for nested keys
    );

    // 4. Override with CLI arguments (highest priority)
    // Only the flags the current subcommand actually defines
    if let Some(dir) = args.try_get_one::<String>("content").unwrap_or(None) {
        builder = builder.set_override("content.directory", dir.as_str())?;
    }
    if let Some(dir) = args.try_get_one::<String>("output").unwrap_or(None) {
        builder = builder.set_override("content.output", dir.as_str())?;
    }

    Ok(builder.build()?.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> Command {
        add_config_arg(Command::new("test"))
            .arg(Arg::new("content").long("content").value_name("DIR"))
            .arg(Arg::new("output").long("output").value_name("DIR"))
    }

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let matches = command().try_get_matches_from(["test"]).unwrap();
        let config = load_config(&matches).unwrap();

        assert_eq!(config.content.directory, "content");
        assert_eq!(config.content.output, "public");
        assert_eq!(config.site.title, "My Blog");
    }

    #[test]
    fn cli_args_override_defaults() {
        let matches = command()
            .try_get_matches_from(["test", "--content", "/custom/content", "--output", "/custom/out"])
            .unwrap();
        let config = load_config(&matches).unwrap();

        assert_eq!(config.content.directory, "/custom/content");
        assert_eq!(config.content.output, "/custom/out");
        // Untouched keys keep their defaults
        assert_eq!(config.content.post_filename, "article.md");
    }

    #[test]
    fn config_file_layers_between_defaults_and_flags() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("quill.toml");
        std::fs::write(
            &file,
            "[site]\ntitle = \"From File\"\n\n[content]\noutput = \"dist\"\n",
        )
        .unwrap();

        let matches = command()
            .try_get_matches_from([
                "test",
                "--config",
                file.to_str().unwrap(),
                "--output",
                "/flag/wins",
            ])
            .unwrap();
        let config = load_config(&matches).unwrap();

        assert_eq!(config.site.title, "From File");
        assert_eq!(config.content.output, "/flag/wins");
    }
}
