use bookmarks_plus::{
    cli::{init_verbose, Cli, Command, FULL_VERSION},
    commands::{edit, export, import},
    utils::{handle_error_and_exit, Result},
};
use clap::Parser;

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    let subcommand_name = match cli.command {
        Command::Import(_) => "import",
        Command::Export(_) => "export",
        Command::Add(_) => "add",
        Command::Newest(_) => "newest",
        Command::Label(_) => "label",
        Command::Remove(_) => "remove",
        Command::Clear(_) => "clear",
    };

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        *FULL_VERSION,
        subcommand_name
    );
    match cli.command {
        Command::Import(args) => import::import(args)?,
        Command::Export(args) => export::export(args)?,
        Command::Add(args) => edit::add(args)?,
        Command::Newest(args) => edit::newest(args)?,
        Command::Label(args) => edit::label(args)?,
        Command::Remove(args) => edit::remove(args)?,
        Command::Clear(args) => edit::clear(args)?,
    }
    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
