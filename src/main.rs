use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::fs;
use std::io;
use std::path::PathBuf;
use teny::cli::output::{self, OutputFormat};
use teny::config::Overrides;
use teny::{dict, lemmatizer, server, Config, SpellChecker};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "teny")]
#[command(version, about = "Malagasy spell checking, lemmatization and Wikipedia lookup", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./.teny.toml when present)
    #[arg(short, long, global = true, env = "TENY_CONFIG")]
    config: Option<PathBuf>,

    /// Word list for spell checking
    #[arg(long, global = true, env = "TENY_CORRECTOR_DICT")]
    corrector_dict: Option<PathBuf>,

    /// Word list for dictionary lookups
    #[arg(long, global = true, env = "TENY_DICTIONARY")]
    dictionary: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "TENY_BIND_ADDR")]
        bind: Option<String>,
    },
    /// Spell-check text files
    Check {
        /// Files to check
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Output format (text, json)
        #[arg(short = 'o', long, default_value = "text")]
        format: OutputFormat,

        /// Exit with code 0 even if errors are found
        #[arg(long)]
        no_fail: bool,
    },
    /// Print the stem of each word
    Lemmatize {
        #[arg(value_name = "WORDS", required = true)]
        words: Vec<String>,
    },
    /// Word list management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// Show word list info
    Info {
        /// Word list path (defaults to the lookup dictionary)
        path: Option<PathBuf>,
    },
    /// Build a word list by crawling Malagasy Wikipedia
    Generate {
        /// Output path (defaults to the lookup dictionary)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of pages to visit
        #[arg(long, default_value_t = 2000)]
        max_pages: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,teny=debug,tower_http=debug".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "teny", &mut io::stdout());
        return Ok(());
    }

    let colored = !cli.no_color;
    if !colored {
        colored::control::set_override(false);
    }
    let command = cli.command.unwrap_or(Commands::Serve { bind: None });

    let bind_addr = match &command {
        Commands::Serve { bind } => bind.clone(),
        _ => None,
    };

    let config = Config::load(Overrides {
        config_file: cli.config,
        bind_addr,
        corrector_dictionary: cli.corrector_dict,
        dictionary: cli.dictionary,
    })?;

    match command {
        Commands::Serve { .. } => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;
            runtime.block_on(server::serve(&config))?;
        }
        Commands::Check {
            files,
            format,
            no_fail,
        } => {
            let total_errors = check_files(&config, &files, &format, colored)?;

            if format == OutputFormat::Text {
                output::print_check_summary(total_errors, &files, colored);
            }

            // Exit with appropriate code
            if total_errors > 0 && !no_fail {
                std::process::exit(1);
            }
        }
        Commands::Lemmatize { words } => {
            for word in words {
                output::print_lemma(&word, &lemmatizer::lemmatize(&word), colored);
            }
        }
        Commands::Dict { action } => match action {
            DictCommands::Info { path } => {
                dict::manager::show_info(path.as_ref().unwrap_or(&config.dictionary))?;
            }
            DictCommands::Generate { output, max_pages } => {
                dict::manager::generate_dictionary(
                    &config.wikipedia,
                    output.as_ref().unwrap_or(&config.dictionary),
                    max_pages,
                )?;
            }
        },
    }

    Ok(())
}

fn check_files(
    config: &Config,
    files: &[PathBuf],
    format: &OutputFormat,
    colored: bool,
) -> Result<usize> {
    let checker = SpellChecker::new(config);
    let mut total_errors = 0;

    for file_path in files {
        if !file_path.exists() {
            eprintln!("Error: File not found: {}", file_path.display());
            continue;
        }

        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

        let result = checker.spell_check_text(&content);
        output::print_errors(file_path, &content, &result, colored, format);
        total_errors += result.error_count();
    }

    Ok(total_errors)
}
