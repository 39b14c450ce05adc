use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jast::parser::{parse_source_with_diagnostics, Lexer};
use jast::{generate, summarize, Config, UnitSummary};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "jast")]
#[command(about = "Java-like source to AST parser and source generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lexically analyze a source file
    Lex {
        /// Input source file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Show token locations
        #[arg(short, long)]
        locations: bool,
    },

    /// Parse a source file and show the AST
    Parse {
        /// Input source file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Show detailed AST information
        #[arg(short, long)]
        detailed: bool,
    },

    /// Parse a source file and print it regenerated
    Format {
        /// Input source file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Generator configuration (JSON)
        #[arg(short, long, value_name = "JSON")]
        config: Option<PathBuf>,
    },

    /// Print the declarative summary of a source file as JSON
    Summarize {
        /// Input source file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Render stub source from a JSON summary
    Skeleton {
        /// Summary produced by `summarize`
        #[arg(value_name = "SUMMARY_JSON")]
        summary: PathBuf,

        /// Generator configuration (JSON)
        #[arg(short, long, value_name = "JSON")]
        config: Option<PathBuf>,
    },

    /// Parse every .java file under a directory and report diagnostics
    Check {
        /// Directory to scan
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Lex { input, locations } => {
            lex_file(input, *locations)?;
        }
        Commands::Parse { input, detailed } => {
            parse_file(input, *detailed)?;
        }
        Commands::Format { input, config } => {
            format_file(input, config.as_deref())?;
        }
        Commands::Summarize { input } => {
            summarize_file(input)?;
        }
        Commands::Skeleton { summary, config } => {
            skeleton_file(summary, config.as_deref())?;
        }
        Commands::Check { dir } => {
            check_dir(dir)?;
        }
    }

    Ok(())
}

fn read_source(input: &Path) -> Result<String> {
    fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn lex_file(input: &Path, locations: bool) -> Result<()> {
    let source = read_source(input)?;
    let lexer = Lexer::new(&source);
    let tokens = lexer.tokenize().map_err(|e| anyhow::anyhow!("Lexical error: {}", e))?;

    for token in tokens {
        if locations {
            println!("{:?} at {}:{}", token.token_type(), token.location().line, token.location().column);
        } else {
            println!("{:?}: '{}'", token.token_type(), token.lexeme());
        }
    }

    Ok(())
}

fn parse_file(input: &Path, detailed: bool) -> Result<()> {
    let source = read_source(input)?;
    let (unit, errors) = parse_source_with_diagnostics(&source);

    if detailed {
        println!("{:#?}", unit);
    } else {
        for type_decl in &unit.type_decls {
            println!(
                "{} ({} members)",
                type_decl.name(),
                type_decl.members().len()
            );
        }
    }

    for error in &errors {
        eprintln!("{}: {}", input.display(), error);
    }

    Ok(())
}

fn format_file(input: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let source = read_source(input)?;
    let (unit, errors) = parse_source_with_diagnostics(&source);
    if !errors.is_empty() {
        eprintln!("{}: {} diagnostics, output may be incomplete", input.display(), errors.len());
    }
    print!("{}", generate(&unit, &config));
    Ok(())
}

fn summarize_file(input: &Path) -> Result<()> {
    let source = read_source(input)?;
    let (unit, _) = parse_source_with_diagnostics(&source);
    println!("{}", summarize(&unit).to_json()?);
    Ok(())
}

fn skeleton_file(summary: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let summary = UnitSummary::from_file(summary)
        .with_context(|| format!("failed to load summary {}", summary.display()))?;
    print!("{}", generate(&summary, &config));
    Ok(())
}

fn check_dir(dir: &Path) -> Result<()> {
    let mut files = 0usize;
    let mut failing = 0usize;

    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "java") {
            continue;
        }
        files += 1;

        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                failing += 1;
                continue;
            }
        };
        let (unit, errors) = parse_source_with_diagnostics(&source);
        if errors.is_empty() {
            println!("ok    {} ({} types)", path.display(), unit.type_decls.len());
        } else {
            failing += 1;
            println!("{:<5} {} ({} diagnostics)", "warn", path.display(), errors.len());
            for error in &errors {
                println!("      {}", error);
            }
        }
    }

    println!("{} files checked, {} with diagnostics", files, failing);
    Ok(())
}
