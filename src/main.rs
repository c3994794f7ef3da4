//! Card Block CLI
//!
//! Usage:
//!   card-block [OPTIONS] [FILE]
//!
//! Options:
//!   -v, --variation <NAME>    Layout to settle the card into
//!   -q, --query-loop          Treat the card as inside a query loop
//!   -c, --config <FILE>       Editor configuration (TOML format)
//!       --variations <FILE>   Variation definitions (TOML format)
//!   -l, --list                List available variations
//!   -n, --notation            Show block notation reference
//!       --json                Print settled children as JSON
//!   -h, --help                Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use card_block::{
    print, settle_with_config, CardConfig, CardError, SettleConfig, VariationRegistry,
};

#[derive(Parser)]
#[command(name = "card-block")]
#[command(about = "Fit card content to a layout variation")]
struct Cli {
    /// Input file in block notation (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Layout to settle the card into (defaults to the default variation)
    #[arg(short, long)]
    variation: Option<String>,

    /// Treat the card as inside a query loop
    #[arg(short, long)]
    query_loop: bool,

    /// Editor configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Variation definitions file (TOML format), replacing the built-in layouts
    #[arg(long)]
    variations: Option<PathBuf>,

    /// List available variations
    #[arg(short, long)]
    list: bool,

    /// Show block notation reference
    #[arg(short, long)]
    notation: bool,

    /// Print settled children as JSON instead of block notation
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.notation {
        print_notation();
        return;
    }

    // Load variations
    let registry = match &cli.variations {
        Some(path) => match VariationRegistry::from_file(path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error loading variations '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => VariationRegistry::builtin(),
    };

    if cli.list {
        print_variations(&registry);
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Load editor configuration
    let card_config = match &cli.config {
        Some(path) => match CardConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => CardConfig::default(),
    };

    // Read input
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut config = SettleConfig::new()
        .with_card_config(card_config)
        .with_variations(registry)
        .with_query_loop(cli.query_loop);
    if let Some(variation) = cli.variation {
        config = config.with_variation(variation);
    }

    match settle_with_config(&source, &config) {
        Ok(children) if cli.json => match serde_json::to_string_pretty(&children) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Ok(children) => {
            print!("{}", print(&children));
        }
        Err(CardError::Parse(errors)) => {
            for error in errors {
                eprint!("{}", error.format(&source, &filename));
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    println!(
        r#"Card Block - fit card content to a layout variation

USAGE:
    card-block [OPTIONS] [FILE]
    echo '<blocks>' | card-block

OPTIONS:
    -v, --variation    Layout to settle into (default: the default variation)
    -q, --query-loop   Treat the card as inside a query loop
    -c, --config       Editor configuration (TOML file)
    --variations       Variation definitions (TOML file)
    -l, --list         List available variations
    -n, --notation     Show block notation reference
    --json             Print JSON instead of block notation
    -h, --help         Print help

QUICK START:
    echo 'core/heading [content: "Hi"]' | card-block --variation card-2

This keeps the heading and fills the rest of the card-2 layout around it."#
    );
}

fn print_variations(registry: &VariationRegistry) {
    for variation in registry.iter() {
        let marker = if variation.is_default { " (default)" } else { "" };
        println!("{}{}", variation.name, marker);
        if !variation.title.is_empty() {
            println!("    {}", variation.title);
        }
        for line in print(variation.template()).lines() {
            println!("    | {}", line);
        }
    }
}

fn print_notation() {
    println!(
        r#"BLOCK NOTATION
==============

BLOCKS
------
core/image                      Block by type id (namespace/name)
core/button [text: "Go"]        Block with attributes
core/group {{ ... }}              Block with children

ATTRIBUTE VALUES
----------------
"text"                          String (\" and \\ escapes)
12, -1.5                        Number
true, false                     Boolean
null                            Null
"odd key": 1                    Quote keys that are not plain names

COMMENTS
--------
// line comment
/* block comment */

EXAMPLE
-------
core/image [url: "x.png"]
ltic/card-inner-text-block [templateLock: "false"] {{
    core/heading [level: 2]
    core/paragraph
}}
core/button [text: "Read More"]"#
    );
}
