use clap::{Parser, ValueEnum};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use vistrail_translate::prelude::*;

/// The kind of document stored in the input file.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum DocumentKind {
    Vistrail,
    Workflow,
    Log,
    Registry,
    Startup,
}

/// Translate VisTrails documents from schema 1.0.2 to 1.0.3
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Kind of document to translate
    #[arg(value_enum)]
    kind: DocumentKind,
    /// Path to the 1.0.2 document (JSON)
    input: String,
    /// Where to write the translated document; defaults to stdout
    #[arg(short, long)]
    output: Option<String>,
    /// Skip unresolved exploration entries instead of stopping at the first one
    #[arg(long)]
    skip_unresolved: bool,
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let policy = if cli.skip_unresolved {
        UnresolvedPolicy::SkipEntry
    } else {
        UnresolvedPolicy::StopAtFirst
    };
    let translator = Translator::builder().with_unresolved_policy(policy).build();

    let start = Instant::now();
    let text = fs::read_to_string(&cli.input).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read input file '{}': {}", cli.input, e))
    });

    let output = match cli.kind {
        DocumentKind::Vistrail => {
            let old: v1_0_2::Vistrail = parse(&text);
            render(&translator.translate_vistrail(&old).unwrap_or_else(translate_failed))
        }
        DocumentKind::Workflow => {
            let old: v1_0_2::Workflow = parse(&text);
            render(&translator.translate_workflow(&old).unwrap_or_else(translate_failed))
        }
        DocumentKind::Log => {
            let old: Log = parse(&text);
            render(&translator.translate_log(&old))
        }
        DocumentKind::Registry => {
            let old: v1_0_2::Registry = parse(&text);
            render(&translator.translate_registry(&old).unwrap_or_else(translate_failed))
        }
        DocumentKind::Startup => {
            let old: Startup = parse(&text);
            render(&translator.translate_startup(&old))
        }
    };

    match &cli.output {
        Some(path) => fs::write(path, output).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to write output file '{}': {}", path, e))
        }),
        None => println!("{}", output),
    }
    tracing::info!(kind = ?cli.kind, elapsed = ?start.elapsed(), "translation finished");
}

fn parse<T: DeserializeOwned>(text: &str) -> T {
    serde_json::from_str(text)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse input JSON: {}", e)))
}

fn render<T: Serialize>(document: &T) -> String {
    serde_json::to_string_pretty(document)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize output: {}", e)))
}

fn translate_failed<T>(error: TranslateError) -> T {
    exit_with_error(&format!("Translation failed: {}", error))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
