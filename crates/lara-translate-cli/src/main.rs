//! Lara Translate CLI - Command line tool for the Lara Translate API.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use lara_translate_core::{
    ClientConfig, Credentials, Lang, LaraTranslator, TranslationOptions, TranslationStyle,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, ValueEnum)]
enum StyleOption {
    Faithful,
    Fluid,
    Creative,
}

impl From<StyleOption> for TranslationStyle {
    fn from(opt: StyleOption) -> Self {
        match opt {
            StyleOption::Faithful => Self::Faithful,
            StyleOption::Fluid => Self::Fluid,
            StyleOption::Creative => Self::Creative,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "lara-translate")]
#[command(author, version, about = "Translate text and documents with Lara", long_about = None)]
struct Args {
    /// Lara access key id
    #[arg(long, env = "LARA_ACCESS_KEY_ID")]
    access_key_id: String,

    /// Lara access key secret
    #[arg(long, env = "LARA_ACCESS_KEY_SECRET", hide_env_values = true)]
    access_key_secret: String,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate text
    Text {
        /// Text to translate
        text: String,

        /// Source language code (empty for autodetect)
        #[arg(short = 's', long, default_value = "")]
        source: String,

        /// Target language code
        #[arg(short = 't', long)]
        target: String,

        /// Translation style
        #[arg(long, value_enum)]
        style: Option<StyleOption>,

        /// Translation memory IDs to adapt to (repeatable)
        #[arg(long = "adapt-to")]
        adapt_to: Vec<String>,

        /// Glossary IDs to apply (repeatable)
        #[arg(long = "glossary")]
        glossaries: Vec<String>,

        /// Instructions for the translation engine (repeatable)
        #[arg(long = "instruction")]
        instructions: Vec<String>,

        /// Content type of the input (e.g. text/plain, text/html)
        #[arg(long)]
        content_type: Option<String>,

        /// Suppress request tracing
        #[arg(long)]
        no_trace: bool,
    },

    /// Translate a document file
    Document {
        /// Input file
        input: PathBuf,

        /// Output file (default: input-<target>.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Source language code (empty for autodetect)
        #[arg(short = 's', long, default_value = "")]
        source: String,

        /// Target language code
        #[arg(short = 't', long)]
        target: String,

        /// Translation style
        #[arg(long, value_enum)]
        style: Option<StyleOption>,

        /// Translation memory IDs to adapt to (repeatable)
        #[arg(long = "adapt-to")]
        adapt_to: Vec<String>,

        /// Glossary IDs to apply (repeatable)
        #[arg(long = "glossary")]
        glossaries: Vec<String>,

        /// Request PDF output for PDF inputs
        #[arg(long)]
        pdf: bool,

        /// Suppress request tracing
        #[arg(long)]
        no_trace: bool,
    },

    /// List the account's glossaries
    Glossaries,

    /// List the account's translation memories
    Memories,
}

/// Repeatable CLI values become an optional list, flags an optional bool.
fn some_if_nonempty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() { None } else { Some(values) }
}

const fn some_if_set(flag: bool) -> Option<bool> {
    if flag { Some(true) } else { None }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before parsing args so env vars are available)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Setup logging
    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Load or create config
    let config = if let Some(config_path) = &args.config {
        ClientConfig::from_file(config_path).context("Failed to load config file")?
    } else {
        ClientConfig::load()
    };

    let credentials = Credentials::new(args.access_key_id, args.access_key_secret);
    let translator = LaraTranslator::with_config(credentials, config)
        .context("Failed to initialize translator")?;

    match args.command {
        Command::Text {
            text,
            source,
            target,
            style,
            adapt_to,
            glossaries,
            instructions,
            content_type,
            no_trace,
        } => {
            let options = TranslationOptions {
                style: style.map(Into::into),
                adapt_to: some_if_nonempty(adapt_to),
                glossaries: some_if_nonempty(glossaries),
                instructions: some_if_nonempty(instructions),
                content_type,
                no_trace: some_if_set(no_trace),
                ..Default::default()
            };

            let result = translator
                .translate_text(&text, &Lang::new(source), &Lang::new(target), &options)
                .await
                .context("Translation failed")?;

            info!("Detected source language: {}", result.source_language);

            // CLI output is intentional
            #[allow(clippy::print_stdout)]
            {
                println!("{}", result.translation);
            }
        }

        Command::Document {
            input,
            output,
            source,
            target,
            style,
            adapt_to,
            glossaries,
            pdf,
            no_trace,
        } => {
            let filename = input
                .file_name()
                .and_then(|n| n.to_str())
                .context("Input path has no filename")?
                .to_string();

            info!("Loading document: {}", input.display());
            let file_bytes = std::fs::read(&input)
                .context(format!("Failed to read input: {}", input.display()))?;

            let options = TranslationOptions {
                style: style.map(Into::into),
                adapt_to: some_if_nonempty(adapt_to),
                glossaries: some_if_nonempty(glossaries),
                output_format: pdf.then_some(lara_translate_core::OutputFormat::Pdf),
                no_trace: some_if_set(no_trace),
                ..Default::default()
            };

            // Document translation can take minutes; show a spinner
            let pb = ProgressBar::new_spinner();
            // Template is hardcoded and valid, unwrap is safe
            #[allow(clippy::unwrap_used)]
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {msg}")
                    .unwrap(),
            );
            pb.enable_steady_tick(Duration::from_millis(120));
            pb.set_message("Translating document...");

            let translated = translator
                .translate_document(
                    &file_bytes,
                    &filename,
                    &Lang::new(source),
                    &Lang::new(target.as_str()),
                    &options,
                )
                .await
                .context("Document translation failed")?;

            pb.finish_with_message("Translation complete");

            // Determine output path
            let output_path = output.unwrap_or_else(|| {
                let stem = input
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("output");
                let extension = if pdf {
                    "pdf".to_string()
                } else {
                    lara_translate_core::util::file_extension(&filename)
                };
                input.with_file_name(format!("{stem}-{target}.{extension}"))
            });

            std::fs::write(&output_path, &translated)
                .context(format!("Failed to write output: {}", output_path.display()))?;

            #[allow(clippy::print_stdout)]
            {
                println!("Translated document saved to: {}", output_path.display());
            }
        }

        Command::Glossaries => {
            let glossaries = translator
                .list_glossaries()
                .await
                .context("Failed to list glossaries")?;

            #[allow(clippy::print_stdout)]
            for glossary in glossaries {
                println!("{}\t{}", glossary.id, glossary.name);
            }
        }

        Command::Memories => {
            let memories = translator
                .list_memories()
                .await
                .context("Failed to list memories")?;

            #[allow(clippy::print_stdout)]
            for memory in memories {
                println!("{}\t{}", memory.id, memory.name);
            }
        }
    }

    Ok(())
}
