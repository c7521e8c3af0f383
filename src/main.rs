mod analysis;
mod config;
mod editor;
mod mcp;
mod naming;
mod server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::analysis::{analyze_code, render_documentation, DeclarationMatcher};
use crate::config::Settings;
use crate::editor::{format_selection, BufferHost, FormatOutcome, SaveOutcome, Selection};
use crate::naming::{convert, detect_document_style, detect_style, NamingStyle};

#[derive(Parser)]
#[command(name = "namestyle", about = "Naming style detection and conversion for editors")]
struct Cli {
    /// Settings file (defaults to ~/.config/namestyle/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP stdio server
    Serve,

    /// Print the naming style of an identifier, or of a whole file
    Detect {
        /// Identifier to classify
        #[arg(required_unless_present = "file")]
        identifier: Option<String>,

        /// Classify the prevailing style of this file instead
        #[arg(short, long, conflicts_with = "identifier")]
        file: Option<PathBuf>,
    },

    /// Convert an identifier to another naming style
    Convert {
        identifier: String,

        /// Target style: snake_case, camelCase or PascalCase
        #[arg(short, long)]
        to: NamingStyle,

        /// Source style (detected when omitted)
        #[arg(short, long)]
        from: Option<NamingStyle>,
    },

    /// Rewrite the selected identifier of a file into the file's naming style
    Format {
        /// File to edit in place
        file: PathBuf,

        /// Byte range to select, as START:END
        #[arg(long, conflicts_with = "find")]
        range: Option<Selection>,

        /// Select the first occurrence of this text
        #[arg(long)]
        find: Option<String>,

        /// Also save the converted identifier as <NAME>.<extension> in the workspace
        #[arg(short, long)]
        save: Option<String>,

        /// Print the resulting document instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate the design documentation report for a file
    Document {
        file: PathBuf,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        None => {
            eprintln!("Usage: namestyle serve");
            eprintln!("       namestyle detect <identifier> | --file <path>");
            eprintln!("       namestyle convert <identifier> --to <style> [--from <style>]");
            eprintln!("       namestyle format <file> --range <start:end> | --find <text> [--save <name>]");
            eprintln!("       namestyle document <file> [--output <path>]");
            std::process::exit(1);
        }

        Some(Commands::Serve) => {
            tracing::info!(
                "namestyle server starting (workspace: {}, extension: .{})",
                settings.workspace_dir().display(),
                settings.output_extension
            );
            server::stdio::run(settings).await?;
        }

        Some(Commands::Detect { identifier, file }) => {
            let style = match (identifier, file) {
                (_, Some(path)) => {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    detect_document_style(&text)
                }
                (Some(identifier), None) => detect_style(&identifier),
                (None, None) => anyhow::bail!("Provide an identifier or --file"),
            };
            println!("{} ({})", style, style.example());
        }

        Some(Commands::Convert { identifier, to, from }) => {
            let from = from.unwrap_or_else(|| detect_style(&identifier));
            let converted = convert(identifier.trim(), from, to);
            if converted == identifier.trim() && from != to {
                tracing::warn!("No conversion applies from {} to {}", from, to);
            }
            println!("{converted}");
        }

        Some(Commands::Format {
            file,
            range,
            find,
            save,
            dry_run,
        }) => {
            let mut host = BufferHost::open(&file, settings.workspace_dir())?;
            let selection = match (range, find) {
                (Some(range), _) => Some(range),
                (None, Some(needle)) => Some(
                    Selection::find(host.document(), &needle)
                        .with_context(|| format!("'{}' not found in {}", needle, file.display()))?,
                ),
                (None, None) => None,
            };
            if let Some(selection) = selection {
                host.select(selection)?;
            }
            host.answer_save_prompt(save);

            let outcome = format_selection(&mut host, &settings.output_extension)?;
            report_outcome(&outcome);

            if let FormatOutcome::Converted { .. } = outcome {
                if dry_run {
                    print!("{}", host.document());
                } else {
                    std::fs::write(&file, host.into_document())
                        .with_context(|| format!("Failed to write file: {}", file.display()))?;
                }
            }
        }

        Some(Commands::Document { file, output }) => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let matcher = DeclarationMatcher::new(&settings.declaration_keywords[..])?;
            let report = render_documentation(&analyze_code(&text, &matcher));
            match output {
                Some(path) => {
                    std::fs::write(&path, report)
                        .with_context(|| format!("Failed to write file: {}", path.display()))?;
                    eprintln!("Design documentation created: {}", path.display());
                }
                None => print!("{report}"),
            }
        }
    }

    Ok(())
}

fn report_outcome(outcome: &FormatOutcome) {
    match outcome {
        FormatOutcome::NoSelection | FormatOutcome::EmptySelection => {}
        FormatOutcome::Unchanged {
            selection_style,
            document_style,
        } => {
            eprintln!(
                "Nothing to do: selection is {}, document is {}",
                selection_style, document_style
            );
        }
        FormatOutcome::Converted {
            original,
            converted,
            from,
            to,
            saved,
        } => {
            eprintln!("{original} ({from}) -> {converted} ({to})");
            if let SaveOutcome::Saved { path } = saved {
                eprintln!("Saved to {}", path.display());
            }
        }
    }
}
