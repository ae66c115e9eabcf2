//! Command-line interface for doxpage
//! Converts LaTeX-flavoured theory notes into a Doxygen page.
//!
//! Usage:
//!   doxpage                                   - Convert theorycore.md into ../pages/theory.txt
//!   doxpage `<source>` -o `<destination>`     - Convert with explicit paths
//!   doxpage --stdout                          - Print the page instead of writing it
//!   doxpage --list-rules                      - List the substitution rules in order
//!
//! Defaults come from the embedded configuration, then `./doxpage.toml`, then
//! `--config`, then the flags above.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use doxpage_config::{DoxpageConfig, Loader, PROJECT_FILE};
use doxpage_core::rewrite::transforms::standard;
use doxpage_core::rewrite::{write_page, DocumentLoader, PageWrapper, RuleSet};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("doxpage")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rewrites LaTeX math and citations in theory notes into a Doxygen page")
        .arg(
            Arg::new("source")
                .help("Theory notes to convert (default: theorycore.md)")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Where to write the page (default: ../pages/theory.txt)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .help("Page title written into the @page header"),
        )
        .arg(
            Arg::new("bold-macro")
                .long("bold-macro")
                .help("How \\bm is rewritten")
                .value_parser(["substring", "brace-only"]),
        )
        .arg(
            Arg::new("stdout")
                .long("stdout")
                .help("Print the page to stdout instead of writing it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-rules")
                .long("list-rules")
                .help("List the substitution rules in the order they run")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every rule application")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    let result = if matches.get_flag("list-rules") {
        handle_list_rules_command(&matches)
    } else {
        handle_convert_command(&matches)
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("doxpage=debug,doxpage_core=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("doxpage=info,doxpage_core=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Layer defaults, the project file, `--config` and flag overrides
fn load_config(matches: &ArgMatches) -> Result<DoxpageConfig> {
    let mut loader = Loader::new().with_optional_file(PROJECT_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    let overrides = [
        ("source", "paths.source"),
        ("output", "paths.destination"),
        ("title", "page.title"),
        ("bold-macro", "rules.bold_macro"),
    ];
    for (arg, key) in overrides {
        if let Some(value) = matches.get_one::<String>(arg) {
            loader = loader.set_override(key, value.clone())?;
        }
    }

    loader.build().context("failed to load configuration")
}

/// Handle the default convert command
fn handle_convert_command(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    debug!(?config, "loaded configuration");

    let pipeline = standard::build(&config.rewrite_options())?;
    let page = DocumentLoader::from_path(&config.paths.source)?.with(&pipeline)?;

    if matches.get_flag("stdout") {
        print!("{}", page);
    } else {
        write_page(&config.paths.destination, &page)?;
    }
    Ok(())
}

/// Handle the list-rules command
fn handle_list_rules_command(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let rules = RuleSet::theory(config.rules.bold_macro)?;
    let wrapper = PageWrapper::new(config.page.title);

    println!("Substitution rules, in order:\n");
    for (index, rule) in rules.rules().iter().enumerate() {
        println!("  {}. {}", index + 1, rule.name());
        println!("     {}", rule.description());
    }
    println!("  {}. page", rules.len() + 1);
    println!("     wrap in `{}` ... `*/`", wrapper.header().trim_end());
    Ok(())
}
