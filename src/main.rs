use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use grok::input::{self, Source};
use grok::{FileConfig, Options};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let matches = Command::new("grok")
        .about("Render a JSON document as a readable value tree")
        .arg(
            Arg::new("input")
                .help("JSON file, http(s) URL, or - for stdin (zstd input is decompressed)")
                .index(1),
        )
        .arg(
            Arg::new("colour")
                .long("colour")
                .visible_alias("color")
                .help("When to colourize output")
                .value_parser(["auto", "always", "never"])
                .default_value("auto"),
        )
        .arg(
            Arg::new("tabstop")
                .long("tabstop")
                .help("Indentation unit"),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .help("Nesting depth at which output is truncated (0 = unlimited)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("max-length")
                .long("max-length")
                .help("String length at which strings are cut (0 = unlimited)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .help("Name shown on the top-level line"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config file (defaults to <config dir>/grok/config.json)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log debug output to stderr")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    let file_config = match matches.get_one::<PathBuf>("config") {
        Some(path) => FileConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => FileConfig::load_default().context("Failed to load default config")?,
    };

    let mut options = file_config.apply(Options::new());

    // Command-line flags win over the config file.
    match matches.get_one::<String>("colour").map(String::as_str) {
        Some("always") => options = options.colour(true),
        Some("never") => options = options.colour(false),
        _ => {
            if file_config.colour.is_none() {
                options = options.colour(colour_supported());
            }
        }
    }
    if let Some(tabstop) = matches.get_one::<String>("tabstop") {
        options = options.tabstop(tabstop.clone());
    }
    if let Some(max_depth) = matches.get_one::<usize>("max-depth") {
        options = options.max_depth(*max_depth);
    }
    if let Some(max_length) = matches.get_one::<usize>("max-length") {
        options = options.max_length(*max_length);
    }
    if let Some(name) = matches.get_one::<String>("name") {
        options = options.root_name(name.clone());
    }

    let source = Source::parse(matches.get_one::<String>("input").map(String::as_str));
    let document = input::load(&source).with_context(|| format!("Failed to load {:?}", source))?;

    grok::value_with(&document, &options).context("Failed to write output")?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "grok=debug" } else { "grok=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn colour_supported() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}
