use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use quill_core::{BuildEvent, SiteBuilder};

use crate::config::{add_config_arg, load_config};

pub fn make_subcommand() -> Command {
    add_config_arg(Command::new("build"))
        .about("Generate the static site from the content directory")
        .arg(
            Arg::new("content")
                .short('s')
                .long("content")
                .value_name("DIR")
                .help("Content directory holding one folder per article"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory for the generated site"),
        )
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let config = load_config(args)?;
    let output = config.content.output.clone();

    let report = SiteBuilder::new(config).build(&mut |event| match event {
        BuildEvent::PostBuilt { slug } => println!("Built post: {slug}"),
        BuildEvent::PostFailed { source, error } => {
            eprintln!("Error processing {}: {}", source.display(), error)
        }
        BuildEvent::AssetCopyFailed { path, error } => {
            eprintln!("Warning: could not copy asset {}: {}", path.display(), error)
        }
        BuildEvent::FeedWritten { path } => println!("Feed written to {}", path.display()),
    })?;

    if report.skipped.is_empty() {
        println!("Site built successfully in {} ({} posts)", output, report.posts_built);
    } else {
        println!(
            "Site built in {} ({} posts, {} skipped)",
            output,
            report.posts_built,
            report.skipped.len()
        );
    }

    Ok(())
}
