use anyhow::Result;
use chrono::Local;
use clap::{Arg, ArgMatches, Command};
use quill_core::scaffold;

use crate::config::{add_config_arg, load_config};

pub fn make_subcommand() -> Command {
    add_config_arg(Command::new("new"))
        .about("Scaffold a new article and open it in your editor")
        .arg(
            Arg::new("slug")
                .required(true)
                .value_name("SLUG")
                .help("URL-friendly name (e.g. \"my-first-post\"), becomes the folder name"),
        )
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let config = load_config(args)?;
    let slug = args.get_one::<String>("slug").expect("slug is required");

    let article = scaffold::create(&config.content, slug, Local::now().date_naive())?;
    println!("Created new article at {}", article.directory.display());

    // $EDITOR wins over the configured editor, matching git and friends.
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| config.content.default_editor.clone());
    println!("Opening {} in {editor}. Save and close to return...", article.markdown_path.display());

    match std::process::Command::new(&editor).arg(&article.markdown_path).status() {
        Ok(_) => println!("Editor closed. Run `quill build` to publish."),
        // The scaffold stays in place even when the editor can't start.
        Err(error) => eprintln!("Could not launch editor '{editor}': {error}"),
    }

    Ok(())
}
