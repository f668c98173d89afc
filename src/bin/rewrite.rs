//! Command-line interface for token rewriting
//! This binary tokenizes a source file, queues the edits of a rewrite script and prints the result.
//!
//! Usage:
//!   rewrite apply `<path>` --script `<script>` [--program `<name>`] [--start N] [--end N]
//!   rewrite tokens `<path>` [--format debug|json]                 - Dump the token buffer
//!   rewrite original `<path>`                                     - Print the untouched tokens
//!
//! Every subcommand accepts `--config <file>` to layer a TOML file over the built-in defaults.

use clap::{value_parser, Arg, ArgMatches, Command};
use std::error::Error;
use std::path::PathBuf;
use token_rewrite::rewrite::config::{Loader, RewriteConfig};
use token_rewrite::rewrite::loader::{load_script, DocumentLoader};
use token_rewrite::rewrite::logging;
use token_rewrite::rewrite::script::ScriptFormat;

fn cli() -> Command {
    Command::new("rewrite")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Queue edits against a token stream and render the result")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file layered over the defaults"),
        )
        .subcommand(
            Command::new("apply")
                .about("Apply a rewrite script and print the rendered program")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("script")
                        .long("script")
                        .short('s')
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("YAML or JSON rewrite script"),
                )
                .arg(
                    Arg::new("script-format")
                        .long("script-format")
                        .value_parser(["yaml", "json"])
                        .help("Script format, when the extension does not tell"),
                )
                .arg(
                    Arg::new("program")
                        .long("program")
                        .short('p')
                        .help("Program to render (defaults to render.program)"),
                )
                .arg(
                    Arg::new("start")
                        .long("start")
                        .value_parser(value_parser!(usize))
                        .default_value("0")
                        .help("First token index to render"),
                )
                .arg(
                    Arg::new("end")
                        .long("end")
                        .value_parser(value_parser!(usize))
                        .help("Token index to stop before (defaults to the token count)"),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the tokens of a source file")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["debug", "json"])
                        .default_value("debug")
                        .help("Output format"),
                ),
        )
        .subcommand(
            Command::new("original")
                .about("Print the source as rendered from its tokens, without edits")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file")
                        .required(true)
                        .index(1),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    let config = load_config(matches.get_one::<PathBuf>("config")).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    logging::init(&config.logging.level);

    let result = match matches.subcommand() {
        Some(("apply", apply_matches)) => handle_apply_command(apply_matches, &config),
        Some(("tokens", tokens_matches)) => handle_tokens_command(tokens_matches),
        Some(("original", original_matches)) => handle_original_command(original_matches),
        _ => unreachable!(),
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<RewriteConfig, config::ConfigError> {
    match path {
        Some(path) => Loader::new().with_file(path).build(),
        None => Loader::new().build(),
    }
}

fn source_path(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_default()
}

/// Handle the apply command
fn handle_apply_command(
    matches: &ArgMatches,
    config: &RewriteConfig,
) -> Result<String, Box<dyn Error>> {
    let script_path = matches
        .get_one::<PathBuf>("script")
        .ok_or("missing --script")?;
    let format = match matches.get_one::<String>("script-format") {
        Some(name) => name.parse()?,
        None => ScriptFormat::from_path(script_path).unwrap_or(config.script.default_format),
    };
    let script = load_script(script_path, Some(format))?;

    let loader = DocumentLoader::from_path(source_path(matches))?;
    let stream = loader.apply(&script)?;

    let program = matches
        .get_one::<String>("program")
        .unwrap_or(&config.render.program);
    let start = matches.get_one::<usize>("start").copied().unwrap_or(0);
    let end = matches
        .get_one::<usize>("end")
        .copied()
        .unwrap_or_else(|| stream.token_count());

    let mut output = stream.render_program_range(program, start, end);
    if config.render.ensure_trailing_newline && !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) -> Result<String, Box<dyn Error>> {
    let tokens = DocumentLoader::from_path(source_path(matches))?.tokens();
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("debug");

    let mut output = match format {
        "json" => serde_json::to_string_pretty(tokens.tokens())?,
        _ => tokens
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
    };
    output.push('\n');
    Ok(output)
}

/// Handle the original command
fn handle_original_command(matches: &ArgMatches) -> Result<String, Box<dyn Error>> {
    let stream = DocumentLoader::from_path(source_path(matches))?.rewrite();
    Ok(stream.render_original())
}
