//! Command-line front end for the inspiration analyzer.
//!
//! Usage:
//!   inspiration-analyzer prompt export.json --tool claude
//!   inspiration-analyzer parse ai-response.json --view display
//!   inspiration-analyzer finalize ai-response.json --tool claude

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use inspiration_analyzer::config::RuntimeConfig;
use inspiration_analyzer::prompts::{DEFAULT_PROMPT_FILE, DEFAULT_RESPONSE_FILE};
use inspiration_analyzer::{
    AiTool, DisplayView, ExportBundle, ParseOutcome, PromptBuilder, ResponseParser, finalize,
};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "inspiration-analyzer")]
#[command(
    about = "Prepare AI analysis prompts and validate the JSON that comes back",
    long_about = None
)]
struct Cli {
    /// Config file (defaults to $INSPIRATION_ANALYZER_CONFIG or inspiration_analyzer.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and repair a pasted AI response
    Parse {
        /// Response file, or `-` for stdin
        input: String,
        /// Expect the unrestricted_insights section
        #[arg(long)]
        unrestricted: bool,
        #[arg(long, value_enum, default_value_t = View::Result)]
        view: View,
        /// Write JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render the analysis prompt from an exported bundle
    Prompt {
        export: PathBuf,
        #[arg(long)]
        unrestricted: bool,
        #[arg(long, default_value = "claude")]
        tool: AiTool,
        #[arg(long, default_value = DEFAULT_PROMPT_FILE)]
        output: PathBuf,
    },
    /// Validate a response, attach processing metadata, and write a backup
    Finalize {
        input: String,
        #[arg(long)]
        tool: AiTool,
        #[arg(long)]
        unrestricted: bool,
        /// Overrides output.backup_dir
        #[arg(long)]
        backup_dir: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum View {
    /// Full validation result
    Result,
    /// Titled sections for display
    Display,
}

fn main() -> Result<()> {
    inspiration_analyzer::load_env();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            RuntimeConfig::load_from_env().log_level,
        ))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let parser = build_parser(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse {
            input,
            unrestricted,
            view,
            output,
        } => parse(&parser, &input, unrestricted, view, output.as_deref()),
        Commands::Prompt {
            export,
            unrestricted,
            tool,
            output,
        } => prompt(&export, unrestricted, tool, &output),
        Commands::Finalize {
            input,
            tool,
            unrestricted,
            backup_dir,
        } => finalize_response(&parser, &input, tool, unrestricted, backup_dir),
    }
}

fn build_parser(config_path: Option<&str>) -> Result<ResponseParser> {
    let path = match config_path {
        Some(p) => p.to_string(),
        None => std::env::var("INSPIRATION_ANALYZER_CONFIG")
            .unwrap_or_else(|_| "inspiration_analyzer.toml".to_string()),
    };
    ResponseParser::from_config_file(&path)
        .with_context(|| format!("Failed to load configuration from {path}"))
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read response from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))
    }
}

fn emit(json: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn parse(
    parser: &ResponseParser,
    input: &str,
    unrestricted: bool,
    view: View,
    output: Option<&Path>,
) -> Result<()> {
    let text = read_input(input)?;
    let outcome = parser.parse_and_validate(&text, unrestricted);

    let json = match (view, &outcome) {
        (View::Display, ParseOutcome::Report(report)) => serde_json::to_string_pretty(
            &DisplayView::from_response(&report.data, parser.config().messages()),
        )?,
        _ => serde_json::to_string_pretty(&outcome)?,
    };
    emit(&json, output)
}

fn prompt(export: &Path, unrestricted: bool, tool: AiTool, output: &Path) -> Result<()> {
    let bundle = ExportBundle::load(export)
        .with_context(|| format!("Failed to load export {}", export.display()))?;
    let prompt = PromptBuilder::new(&bundle).unrestricted(unrestricted).build()?;
    prompt.write_to(output)?;

    eprintln!("✅ Prompt written to {}", output.display());
    let prompt_file = output.display().to_string();
    for line in tool.instructions(&prompt_file, DEFAULT_RESPONSE_FILE) {
        eprintln!("{line}");
    }
    Ok(())
}

fn finalize_response(
    parser: &ResponseParser,
    input: &str,
    tool: AiTool,
    unrestricted: bool,
    backup_dir: Option<PathBuf>,
) -> Result<()> {
    let text = read_input(input)?;
    let outcome = parser.parse_and_validate(&text, unrestricted);
    if let Some(failure) = outcome.failure() {
        for suggestion in &failure.suggestions {
            eprintln!("💡 {suggestion}");
        }
    }
    let processed = finalize(outcome, tool).context("Response could not be finalized")?;

    let dir = backup_dir.unwrap_or_else(|| PathBuf::from(&parser.config().output.backup_dir));
    let backup = processed.write_backup(&dir)?;
    eprintln!("💾 Backup saved to {}", backup.display());

    println!("{}", serde_json::to_string_pretty(&processed)?);
    Ok(())
}
