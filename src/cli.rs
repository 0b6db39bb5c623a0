use crate::bookmarks::{ExportFormat, DEFAULT_SHARE_URL};
use crate::utils::Result;
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name = "bookmarks-plus",
          version = &**FULL_VERSION,
          about = "Mark, label, import, export and navigate genomic regions of interest",
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(global = true)]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Import bookmarks from a BED/TSV file and/or a share link")]
    Import(ImportArgs),
    #[clap(about = "Export bookmarks as BED or TSV")]
    Export(ExportArgs),
    #[clap(about = "Bookmark a region")]
    Add(AddArgs),
    #[clap(about = "Show the most recently created bookmark")]
    Newest(StoreArgs),
    #[clap(about = "Set or clear the label of a bookmark")]
    Label(LabelArgs),
    #[clap(about = "Remove a bookmark")]
    Remove(RemoveArgs),
    #[clap(about = "Remove all bookmarks")]
    Clear(StoreArgs),
}

#[derive(Parser, Debug)]
pub struct StoreArgs {
    #[clap(required = true)]
    #[clap(short = 's')]
    #[clap(long = "store")]
    #[clap(help = "Session JSON file holding the bookmarks (created if missing)")]
    #[clap(value_name = "STORE")]
    #[arg(value_parser = check_prefix_path)]
    pub store_path: PathBuf,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("source").required(true).multiple(true).args(["file", "share_link"])))]
#[command(arg_required_else_help(true))]
pub struct ImportArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[clap(required = true)]
    #[clap(short = 'a')]
    #[clap(long = "assembly")]
    #[clap(help = "Assembly the imported file regions belong to")]
    #[clap(value_name = "ASSEMBLY")]
    #[arg(value_parser = check_nonempty)]
    pub assembly_name: String,

    #[clap(short = 'f')]
    #[clap(long = "file")]
    #[clap(help = "BED or TSV file (path or URL); the first 4 columns are used")]
    #[clap(value_name = "FILE")]
    pub file: Option<String>,

    #[clap(short = 'l')]
    #[clap(long = "share-link")]
    #[clap(help = "Share link of a saved session to import bookmarks from")]
    #[clap(value_name = "URL")]
    pub share_link: Option<String>,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "share-url")]
    #[clap(help = "Base URL of the session sharing service")]
    #[clap(value_name = "URL")]
    #[clap(default_value = DEFAULT_SHARE_URL)]
    pub share_url: String,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "timeout")]
    #[clap(help = "Share service request timeout in seconds")]
    #[clap(value_name = "SECS")]
    #[clap(default_value = "30")]
    #[arg(value_parser = positive_seconds)]
    pub timeout_secs: u64,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct ExportArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[clap(short = 'F')]
    #[clap(long = "format")]
    #[clap(help = "Output format (bed or tsv)")]
    #[clap(value_name = "FORMAT")]
    #[clap(default_value = "bed")]
    pub format: ExportFormat,

    #[clap(short = 'a')]
    #[clap(long = "assembly")]
    #[clap(help = "Only export bookmarks on this assembly (required for BED)")]
    #[clap(value_name = "ASSEMBLY")]
    pub assembly_name: Option<String>,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output path (defaults to stdout)")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_prefix_path)]
    pub output_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct AddArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[clap(required = true)]
    #[clap(short = 'a')]
    #[clap(long = "assembly")]
    #[clap(help = "Assembly of the region")]
    #[clap(value_name = "ASSEMBLY")]
    #[arg(value_parser = check_nonempty)]
    pub assembly_name: String,

    #[clap(required = true)]
    #[clap(short = 'r')]
    #[clap(long = "region")]
    #[clap(help = "Region to bookmark, 1-based (e.g. chr1:101-200 or chr1:101..200)")]
    #[clap(value_name = "REGION")]
    pub region: String,

    #[clap(long = "label")]
    #[clap(help = "Bookmark label")]
    #[clap(value_name = "LABEL")]
    pub label: Option<String>,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct LabelArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "index")]
    #[clap(help = "0-based position of the bookmark in the store")]
    #[clap(value_name = "INDEX")]
    pub index: usize,

    #[clap(required = true)]
    #[clap(long = "label")]
    #[clap(help = "New label (empty string clears it)")]
    #[clap(value_name = "LABEL")]
    pub label: String,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct RemoveArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "index")]
    #[clap(help = "0-based position of the bookmark in the store")]
    #[clap(value_name = "INDEX")]
    pub index: usize,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_prefix_path(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(path.to_path_buf())
}

fn check_nonempty(s: &str) -> Result<String> {
    if s.trim().is_empty() {
        Err("Assembly name cannot be an empty string".to_string())
    } else {
        Ok(s.to_string())
    }
}

fn positive_seconds(s: &str) -> Result<u64> {
    let secs: u64 = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid number of seconds", s))?;
    if secs >= 1 {
        Ok(secs)
    } else {
        Err("Timeout must be at least 1 second".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn import_requires_a_source() {
        let result = Cli::try_parse_from(["bookmarks-plus", "import", "-s", "b.json", "-a", "hg38"]);
        assert!(result.is_err());
    }

    #[test]
    fn import_accepts_file_and_link() {
        let cli = Cli::try_parse_from([
            "bookmarks-plus",
            "-v",
            "import",
            "-s",
            "b.json",
            "-a",
            "hg38",
            "-f",
            "regions.bed",
            "-l",
            "https://x/?&session=share-a&password=b",
        ])
        .unwrap();
        assert_eq!(cli.verbosity, 1);
        match cli.command {
            Command::Import(args) => {
                assert_eq!(args.file.as_deref(), Some("regions.bed"));
                assert_eq!(args.share_url, DEFAULT_SHARE_URL);
                assert_eq!(args.timeout_secs, 30);
            }
            _ => panic!("expected import"),
        }
    }

    #[test]
    fn export_parses_format() {
        let cli = Cli::try_parse_from(["bookmarks-plus", "export", "-s", "b.json", "-F", "tsv"]).unwrap();
        match cli.command {
            Command::Export(args) => assert_eq!(args.format, ExportFormat::Tsv),
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn zero_timeout_rejected() {
        assert!(positive_seconds("0").is_err());
        assert_eq!(positive_seconds("5"), Ok(5));
    }
}
