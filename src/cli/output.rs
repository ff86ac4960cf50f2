use crate::{CheckResult, SpellError};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonError {
    file: String,
    line: usize,
    column: usize,
    #[serde(flatten)]
    error: SpellError,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonOutput {
    file: String,
    total_errors: usize,
    errors: Vec<JsonError>,
}

/// 1-based line and column (in characters) of a byte offset
pub fn line_column(content: &str, index: usize) -> (usize, usize) {
    let before = &content[..index.min(content.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

pub fn print_errors(
    file_path: &Path,
    content: &str,
    result: &CheckResult,
    colored_output: bool,
    format: &OutputFormat,
) {
    match format {
        OutputFormat::Text => print_text_errors(file_path, content, result, colored_output),
        OutputFormat::Json => print_json_errors(file_path, content, result),
    }
}

fn print_text_errors(file_path: &Path, content: &str, result: &CheckResult, colored_output: bool) {
    if result.errors.is_empty() {
        return;
    }

    let file_name = file_path.display().to_string();

    if colored_output {
        println!("\n{}", file_name.bold().underline());
    } else {
        println!("\n{}", file_name);
    }

    for error in &result.errors {
        let (line, column) = line_column(content, error.index);
        let line_info = format!("{}:{}", line, column);

        if colored_output {
            println!("  {} {}", line_info.blue().bold(), error.word.red().bold());

            if !error.suggestions.is_empty() {
                let suggestions = error
                    .suggestions
                    .iter()
                    .map(|s| s.green().to_string())
                    .collect::<Vec<_>>()
                    .join(&", ".dimmed().to_string());
                println!("    {} {}", "→".dimmed(), suggestions);
            }
        } else {
            println!("  {} {}", line_info, error.word);

            if !error.suggestions.is_empty() {
                println!("    → {}", error.suggestions.join(", "));
            }
        }
    }
}

fn print_json_errors(file_path: &Path, content: &str, result: &CheckResult) {
    let file = file_path.display().to_string();
    let errors = result
        .errors
        .iter()
        .map(|e| {
            let (line, column) = line_column(content, e.index);
            JsonError {
                file: file.clone(),
                line,
                column,
                error: e.clone(),
            }
        })
        .collect();

    let output = JsonOutput {
        file,
        total_errors: result.error_count(),
        errors,
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to serialize results: {}", e),
    }
}

pub fn print_check_summary(total_errors: usize, files: &[impl AsRef<Path>], colored: bool) {
    println!();
    if total_errors == 0 {
        if colored {
            println!("{}", "✓ No spelling errors found!".green().bold());
        } else {
            println!("✓ No spelling errors found!");
        }
    } else {
        let error_word = if total_errors == 1 { "error" } else { "errors" };
        if colored {
            println!(
                "{} {} {} found in {} {}",
                "✗".red().bold(),
                total_errors.to_string().red().bold(),
                error_word,
                files.len(),
                if files.len() == 1 { "file" } else { "files" }
            );
        } else {
            println!(
                "✗ {} {} found in {} {}",
                total_errors,
                error_word,
                files.len(),
                if files.len() == 1 { "file" } else { "files" }
            );
        }
    }
}

pub fn print_lemma(word: &str, lemma: &str, colored: bool) {
    if colored {
        println!("{} {} {}", word.bold(), "→".dimmed(), lemma.green());
    } else {
        println!("{} → {}", word, lemma);
    }
}
