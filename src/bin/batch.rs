//! Command-line front-end for batch operations against sv.link.
//!
//! Runs the same batch and export code as the HTTP service, reading items
//! from a file and writing exports to disk.
//!
//! # Usage
//!
//! ```bash
//! # Shorten every URL in urls.txt and save CSV + QR archive
//! cargo run --bin batch -- shorten urls.txt --csv results.csv --zip qrcodes.zip
//!
//! # Look up visit counts
//! cargo run --bin batch -- lookup links.txt --csv lookup.csv
//!
//! # Retarget links; each line is `shortUrl,newTarget`
//! cargo run --bin batch -- update changes.csv --csv update.csv
//! ```
//!
//! # Environment Variables
//!
//! - `SV_LINK_API_KEY`: provider API key (prompted for when missing)
//! - `PROVIDER_*`, `MAX_BATCH_SIZE`: same as the server, see `config`

use sv_link_batch::application::services::{BatchOutcome, BatchRequest, BatchService, ExportService};
use sv_link_batch::config;
use sv_link_batch::domain::context::BatchContext;
use sv_link_batch::domain::entities::{
    ArchiveNaming, ArchiveOptions, CsvLocale, ExportPayload, LinkChange, Summary,
};
use sv_link_batch::infrastructure::provider::SvLinkClient;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use dialoguer::Password;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Batch shortening, lookup and retargeting for sv.link.
#[derive(Parser)]
#[command(name = "batch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Provider API key
    #[arg(long, env = "SV_LINK_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten one URL per line
    Shorten {
        file: PathBuf,

        /// Write results as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write QR codes of the short links as a ZIP archive
        #[arg(long)]
        zip: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Locale::English)]
        locale: Locale,

        /// Name QR files after the original URL instead of the ordinal
        #[arg(long)]
        slug: bool,

        /// Add a metadata file per QR code and a manifest
        #[arg(long)]
        metadata: bool,
    },

    /// Look up visit counts and targets, one short link per line
    Lookup {
        file: PathBuf,

        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Locale::English)]
        locale: Locale,
    },

    /// Retarget links; each line is `shortUrl,newTarget`
    Update {
        file: PathBuf,

        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Locale::English)]
        locale: Locale,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Locale {
    Native,
    English,
}

impl From<Locale> for CsvLocale {
    fn from(locale: Locale) -> Self {
        match locale {
            Locale::Native => CsvLocale::Native,
            Locale::English => CsvLocale::English,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let api_key = match cli.api_key.filter(|k| !k.trim().is_empty()) {
        Some(key) => key,
        None => Password::new()
            .with_prompt("sv.link API key")
            .interact()?,
    };

    let client = SvLinkClient::new(&config.provider_user_agent)
        .context("Failed to build provider HTTP client")?;
    let service = BatchService::new(Arc::new(client));
    let exports = ExportService::new();
    let ctx = BatchContext::new(api_key, config.provider_settings());

    match cli.command {
        Commands::Shorten {
            file,
            csv,
            zip,
            locale,
            slug,
            metadata,
        } => {
            let urls = read_lines(&file)?;
            let results = match service.process(&ctx, BatchRequest::Shorten(urls)).await? {
                BatchOutcome::Shortened(results) => results,
                _ => anyhow::bail!("unexpected batch outcome"),
            };

            println!("{}", "🔗 Shorten".bright_blue().bold());
            println!();
            for (i, r) in results.records().iter().enumerate() {
                print_row(i + 1, r.success, &r.original, &r.short);
            }
            print_summary(&results.summary());

            if let Some(path) = csv {
                save(&path, &exports.csv(results.records(), locale.into())?)?;
            }
            if let Some(path) = zip {
                let options = ArchiveOptions {
                    naming: if slug {
                        ArchiveNaming::Slug
                    } else {
                        ArchiveNaming::Ordinal
                    },
                    include_metadata: metadata,
                };
                save(&path, &exports.qr_archive(results.records(), options)?)?;
            }
        }

        Commands::Lookup { file, csv, locale } => {
            let links = read_lines(&file)?;
            let results = match service.process(&ctx, BatchRequest::Lookup(links)).await? {
                BatchOutcome::LookedUp(results) => results,
                _ => anyhow::bail!("unexpected batch outcome"),
            };

            println!("{}", "🔍 Lookup".bright_blue().bold());
            println!();
            for (i, r) in results.records().iter().enumerate() {
                let detail = format!("{} views → {}", r.views, r.target);
                print_row(i + 1, r.success, &r.link, &detail);
            }
            print_summary(&results.summary());

            if let Some(path) = csv {
                save(&path, &exports.csv(results.records(), locale.into())?)?;
            }
        }

        Commands::Update { file, csv, locale } => {
            let pairs = read_pairs(&file)?;
            let changes = resolve_changes(&service, &ctx, pairs).await?;

            let results = match service.process(&ctx, BatchRequest::Update(changes)).await? {
                BatchOutcome::Updated(results) => results,
                _ => anyhow::bail!("unexpected batch outcome"),
            };

            println!("{}", "✏️  Update".bright_blue().bold());
            println!();
            for (i, r) in results.records().iter().enumerate() {
                let link = r.short_url.as_deref().unwrap_or_default();
                print_row(i + 1, r.success, link, r.note());
            }
            print_summary(&results.summary());

            if let Some(path) = csv {
                save(&path, &exports.csv(results.records(), locale.into())?)?;
            }
        }
    }

    Ok(())
}

/// Looks up link ids for `(shortUrl, newTarget)` pairs.
///
/// Links that cannot be resolved keep an empty id and fail in the update run.
async fn resolve_changes(
    service: &BatchService<SvLinkClient>,
    ctx: &BatchContext,
    pairs: Vec<(String, String)>,
) -> Result<Vec<LinkChange>> {
    let links: Vec<String> = pairs.iter().map(|(link, _)| link.clone()).collect();
    let resolved = match service.process(ctx, BatchRequest::Resolve(links)).await? {
        BatchOutcome::Resolved(results) => results,
        _ => anyhow::bail!("unexpected batch outcome"),
    };

    Ok(pairs
        .into_iter()
        .zip(resolved.into_records())
        .map(|((short_url, new_target), link)| LinkChange {
            link_id: link.link_id,
            short_url: Some(short_url),
            new_target: Some(new_target),
        })
        .collect())
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Reads `shortUrl,newTarget` rows, skipping blank and incomplete lines.
fn read_pairs(path: &Path) -> Result<Vec<(String, String)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut pairs = Vec::new();
    for record in reader.records() {
        let record = record?;
        match (record.get(0), record.get(1)) {
            (Some(link), Some(target)) if !link.is_empty() && !target.is_empty() => {
                pairs.push((link.to_string(), target.to_string()));
            }
            _ => continue,
        }
    }
    Ok(pairs)
}

fn save(path: &Path, payload: &ExportPayload) -> Result<()> {
    let bytes = payload.decode().context("Export payload is not valid base64")?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "  {} {} ({} bytes)",
        "Saved".green(),
        path.display().to_string().cyan(),
        payload.size
    );
    Ok(())
}

fn print_row(ordinal: usize, success: bool, item: &str, detail: &str) {
    let status = if success { "OK".green() } else { "FAIL".red() };
    println!(
        "  {:>4} {:<4} {} {}",
        ordinal.to_string().bright_black(),
        status,
        item.cyan(),
        detail.bright_black()
    );
}

fn print_summary(summary: &Summary) {
    println!();
    println!(
        "  Total: {}  Success: {}  Failed: {}",
        summary.total.to_string().bright_white().bold(),
        summary.success.to_string().bright_green().bold(),
        summary.failed.to_string().bright_red().bold()
    );
    println!();
}
