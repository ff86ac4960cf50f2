use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::checker::dictionary::Dictionary;
use crate::config::WikipediaConfig;

/// Pages the crawl starts from
pub const SEEDS: &[&str] = &[
    "Madagasikara",
    "Antananarivo",
    "Firenena",
    "Tantara",
    "Olona",
    "Zava-maniry",
    "Zavatra",
    "Kolontsaina",
    "Fiainana",
    "Fampianarana",
];

pub const MIN_WORD_LENGTH: usize = 2;

const REQUEST_DELAY: Duration = Duration::from_millis(200);
const PAGE_TIMEOUT: Duration = Duration::from_secs(10);

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref PUNCTUATION: Regex = Regex::new(r"[^\w\s'-]").unwrap();
}

#[derive(Debug, Deserialize)]
struct PagesResponse {
    query: PagesQuery,
}

#[derive(Debug, Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: HashMap<String, Page>,
}

#[derive(Debug, Default, Deserialize)]
struct Page {
    #[serde(default)]
    extract: String,
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
struct Link {
    title: Option<String>,
}

pub fn show_info(path: &Path) -> Result<()> {
    if !path.exists() {
        println!(
            "{} Word list {} not found.",
            "✗".red().bold(),
            path.display().to_string().yellow()
        );
        println!("Run {} to build one.", "teny dict generate".cyan());
        return Ok(());
    }

    let metadata = fs::metadata(path)?;
    let dict = Dictionary::load_from_path(path)?;

    println!("{}", format!("Word list: {}", path.display()).bold());
    println!("  Size: {} KB", metadata.len() / 1024);
    println!("  Words: {}", dict.len().to_string().yellow());
    println!("  Format: newline-delimited, lowercase");

    Ok(())
}

/// Crawl the encyclopedia breadth-first from [`SEEDS`] and write every word
/// seen in page extracts to `output`.
pub fn generate_dictionary(
    config: &WikipediaConfig,
    output: &Path,
    max_pages: usize,
) -> Result<()> {
    println!(
        "{} Malagasy word list from {} (up to {} pages)...",
        "Building".cyan().bold(),
        config.api_url.dimmed(),
        max_pages.to_string().yellow()
    );

    let http = reqwest::blocking::Client::builder()
        .timeout(PAGE_TIMEOUT)
        .user_agent(config.user_agent.clone())
        .build()
        .context("Failed to create HTTP client")?;

    let pb = ProgressBar::new(max_pages as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress template")?
            .progress_chars("=> "),
    );

    let (words, visited) = crawl(
        SEEDS,
        max_pages,
        REQUEST_DELAY,
        |title| fetch_page(&http, &config.api_url, title),
        &pb,
    );

    pb.finish_with_message(format!("{} pages visited", visited));

    let count = Dictionary::write_word_list(&words, output)?;

    println!(
        "{} Word list written: {} ({} words)",
        "✓".green().bold(),
        output.display().to_string().cyan(),
        count.to_string().yellow()
    );

    Ok(())
}

/// Breadth-first walk from `seeds`. Only pages that were fetched count as
/// visited and toward `max_pages`; a failed page can be queued again by a
/// later link. Returns the collected words and the number of pages visited.
fn crawl<F>(
    seeds: &[&str],
    max_pages: usize,
    delay: Duration,
    mut fetch: F,
    pb: &ProgressBar,
) -> (HashSet<String>, usize)
where
    F: FnMut(&str) -> Result<(Vec<String>, Vec<String>)>,
{
    let mut words = HashSet::new();
    let mut visited = HashSet::new();
    let mut queue: VecDeque<String> = seeds.iter().map(|s| s.to_string()).collect();

    while visited.len() < max_pages {
        let Some(title) = queue.pop_front() else {
            break;
        };
        if visited.contains(&title) {
            continue;
        }

        match fetch(&title) {
            Ok((page_words, links)) => {
                words.extend(page_words);
                queue.extend(links.into_iter().filter(|link| !visited.contains(link)));
                pb.set_message(format!("{} words | {}", words.len(), title));
                visited.insert(title);
                pb.inc(1);

                std::thread::sleep(delay);
            }
            Err(e) => {
                tracing::warn!(page = %title, "skipping page: {:#}", e);
            }
        }
    }

    (words, visited.len())
}

fn fetch_page(
    http: &reqwest::blocking::Client,
    api_url: &str,
    title: &str,
) -> Result<(Vec<String>, Vec<String>)> {
    let response = http
        .get(api_url)
        .query(&[
            ("action", "query"),
            ("titles", title),
            ("prop", "extracts|links"),
            ("explaintext", "1"),
            ("pllimit", "max"),
            ("format", "json"),
        ])
        .send()
        .with_context(|| format!("Failed to fetch page {}", title))?;

    if !response.status().is_success() {
        anyhow::bail!("Failed to fetch page {}: HTTP {}", title, response.status());
    }

    let body = response.text()?;
    parse_page(&body)
}

/// Words and outgoing link titles of the first page in a `prop=extracts|links` response
fn parse_page(body: &str) -> Result<(Vec<String>, Vec<String>)> {
    let response: PagesResponse =
        serde_json::from_str(body).context("Failed to parse page response")?;

    let page = response
        .query
        .pages
        .into_values()
        .next()
        .unwrap_or_default();

    let links = page.links.into_iter().filter_map(|l| l.title).collect();

    Ok((clean_text(&page.extract), links))
}

/// Lowercase words of at least [`MIN_WORD_LENGTH`] characters, markup and
/// punctuation removed. Apostrophes and hyphens stay inside words.
pub fn clean_text(text: &str) -> Vec<String> {
    let text = HTML_TAG.replace_all(text, "");
    let text = PUNCTUATION.replace_all(&text, "");

    text.split_whitespace()
        .filter(|w| w.chars().count() >= MIN_WORD_LENGTH)
        .map(|w| w.to_lowercase())
        .collect()
}
