use anyhow::Result;
use clap::Command;

mod cmd;
mod config;

fn main() -> Result<()> {
    let matches = Command::new("quill")
        .about("A tiny static site generator for a personal blog")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(cmd::build::make_subcommand())
        .subcommand(cmd::new::make_subcommand())
        .get_matches();

    match matches.subcommand() {
        Some(("build", args)) => cmd::build::execute(args),
        Some(("new", args)) => cmd::new::execute(args),
        _ => unreachable!("subcommand is required"),
    }
}
