// Command-line interface for redactable
//
// This binary drives the Markdown redaction round-trip from the shell:
//
//  redactable redact <input> [-o <file>]                 - Replace protected nodes with placeholders
//  redactable restore <edited> --source <orig> [-o ...]  - Merge edited text back over the original
//  redactable inspect <input> [--redacted]               - Dump the parsed tree as JSON
//
// Redaction and restoration are a pair: `restore` re-derives the redactions
// from the pristine original, so the original file is the only state that has
// to survive between the two invocations.
//
// Strategy selection comes from configuration (redactable.toml, layered over
// embedded defaults) and can be overridden per invocation with --strategies.

use clap::{Arg, ArgAction, Command, ValueHint};
use redactable::{placeholder, redact, restore, StrategySet};
use redactable_config::{Loader, RedactableConfig};
use std::fs;

fn build_cli() -> Command {
    Command::new("redactable")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for protecting Markdown structure through external edits")
        .long_about(
            "redactable protects the non-translatable parts of a Markdown document\n\
            (link destinations, image URLs, annotation regions) while the visible text\n\
            goes through an external edit such as machine translation.\n\n\
            Workflow:\n  \
            1. redact:  links and images become indexed placeholders like [a cat][0]\n  \
            2. edit:    the placeholder text is translated or rewritten elsewhere\n  \
            3. restore: placeholders are joined back to the original by index\n\n\
            Examples:\n  \
            redactable redact doc.md -o doc.redacted.md\n  \
            redactable restore doc.translated.md --source doc.md -o doc.fr.md\n  \
            redactable inspect doc.md --redacted",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a redactable.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("strategies")
                .long("strategies")
                .value_name("NAMES")
                .help("Comma-separated strategies to apply (overrides configuration)")
                .long_help(
                    "Comma-separated list of redaction strategies to apply,\n\
                    overriding the configured set.\n\n\
                    Built-in strategies: link, image, annotation",
                )
                .value_delimiter(',')
                .action(ArgAction::Append)
                .global(true),
        )
        .subcommand(
            Command::new("redact")
                .about("Replace protected Markdown nodes with indexed placeholders")
                .long_about(
                    "Parse the input document, replace every node a strategy claims with\n\
                    an indexed placeholder, and print the redacted Markdown.\n\n\
                    Inline nodes become [display text][index]; block regions become an\n\
                    open/close marker pair around their editable body.\n\n\
                    Examples:\n  \
                    redactable redact doc.md                       # Redact to stdout\n  \
                    redactable redact doc.md -o doc.redacted.md    # Redact to a file\n  \
                    redactable redact doc.md --strategies link     # Links only",
                )
                .arg(
                    Arg::new("input")
                        .help("Input Markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("restore")
                .about("Merge an edited placeholder document back over its original")
                .long_about(
                    "Join every placeholder in the edited document to its redaction in the\n\
                    original by index and rebuild the full Markdown.\n\n\
                    Placeholders may be moved, duplicated, or dropped by the edit. A\n\
                    placeholder that cannot be resolved is kept as literal text rather\n\
                    than failing the run.\n\n\
                    Examples:\n  \
                    redactable restore doc.translated.md --source doc.md\n  \
                    redactable restore doc.translated.md --source doc.md -o doc.fr.md",
                )
                .arg(
                    Arg::new("edited")
                        .help("Edited Markdown file containing placeholders")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("source")
                        .long("source")
                        .short('s')
                        .help("The pristine original document (required)")
                        .required(true)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Dump the parsed document tree as JSON")
                .long_about(
                    "Parse the input with the placeholder-aware pipeline and print the\n\
                    tree as JSON. With --redacted, run the redaction pass first so the\n\
                    dump shows redaction nodes with their assigned indices.\n\n\
                    Examples:\n  \
                    redactable inspect doc.md                 # Parsed tree\n  \
                    redactable inspect doc.md --redacted      # Tree after redaction\n  \
                    redactable inspect doc.md --compact       # Single-line JSON",
                )
                .arg(
                    Arg::new("input")
                        .help("Input Markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("redacted")
                        .long("redacted")
                        .help("Run the redaction pass before dumping")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .help("Single-line JSON output (overrides inspect.pretty)")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    let strategy_override: Option<Vec<String>> = matches
        .get_many::<String>("strategies")
        .map(|values| values.cloned().collect());
    let strategies = strategy_set(&config, strategy_override.as_deref());

    match matches.subcommand() {
        Some(("redact", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_redact_command(input, output, &strategies);
        }
        Some(("restore", sub_matches)) => {
            let edited = sub_matches
                .get_one::<String>("edited")
                .expect("edited is required");
            let source = sub_matches
                .get_one::<String>("source")
                .expect("source is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_restore_command(edited, source, output, &strategies);
        }
        Some(("inspect", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let redacted = sub_matches.get_flag("redacted");
            let pretty = config.inspect.pretty && !sub_matches.get_flag("compact");
            handle_inspect_command(input, redacted, pretty, &strategies);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the redact command
fn handle_redact_command(input: &str, output: Option<&str>, strategies: &StrategySet) {
    let source = read_input(input);
    let (redacted, _) = redact(&source, &placeholder::pipeline(), strategies);
    write_output(output, &redacted);
}

/// Handle the restore command
fn handle_restore_command(
    edited: &str,
    source: &str,
    output: Option<&str>,
    strategies: &StrategySet,
) {
    let edited_text = read_input(edited);
    let source_text = read_input(source);
    let restored = restore(
        &source_text,
        &edited_text,
        &placeholder::pipeline(),
        strategies,
    );
    write_output(output, &restored);
}

/// Handle the inspect command
fn handle_inspect_command(input: &str, redacted: bool, pretty: bool, strategies: &StrategySet) {
    let source = read_input(input);
    let pipeline = placeholder::pipeline();
    let doc = if redacted {
        redact(&source, &pipeline, strategies).1
    } else {
        pipeline.parse(&source)
    };

    let json = if pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    };
    match json {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> RedactableConfig {
    let loader = Loader::new().with_optional_file("redactable.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn strategy_set(config: &RedactableConfig, names: Option<&[String]>) -> StrategySet {
    let result = match names {
        Some(names) => StrategySet::from_names(names),
        None => config.redact.strategy_set(),
    };
    result.unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    })
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn write_output(output: Option<&str>, text: &str) {
    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{text}"),
    }
}
