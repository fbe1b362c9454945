use asura_scraper::config::Config;
use asura_scraper::{AsuraScans, ScraperError};
use log::{error, info};
use serde::Serialize;
use std::process::ExitCode;

const USAGE: &str = "usage: asura_scraper <command> [args]

commands:
  search <query> [page]   search the catalog by title
  latest [page]           latest chapter updates
  popular                 today's popular series
  series [page]           browse the full catalog
  info <id>               series details and chapter list
  pages <id>              image URLs of one chapter";

fn parse_page(arg: Option<&String>) -> Result<u32, ScraperError> {
    match arg {
        None => Ok(1),
        Some(raw) => raw
            .parse()
            .map_err(|_| ScraperError::Validation("Invalid page number".to_string())),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ScraperError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ScraperError::parse("output", e.to_string()))?;
    println!("{}", json);
    Ok(())
}

async fn run(source: &AsuraScans, args: &[String]) -> Result<(), ScraperError> {
    let command = args.first().map(String::as_str).unwrap_or_default();
    match command {
        "search" => {
            let query = args.get(1).map(String::as_str).unwrap_or_default();
            print_json(&source.search(query, parse_page(args.get(2))?).await?)
        }
        "latest" => print_json(&source.get_latest_updates(parse_page(args.get(1))?).await?),
        "popular" => print_json(&source.get_popular_today().await?),
        "series" => print_json(&source.get_series(parse_page(args.get(1))?).await?),
        "info" => {
            let id = args.get(1).map(String::as_str).unwrap_or_default();
            print_json(&source.fetch_manga_info(id).await?)
        }
        "pages" => {
            let id = args.get(1).map(String::as_str).unwrap_or_default();
            print_json(&source.fetch_chapter_pages(id).await?)
        }
        _ => Err(ScraperError::Validation(format!(
            "unknown command `{}`\n\n{}",
            command, USAGE
        ))),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    }

    let cfg = Config::load();
    info!(
        "Using {} with {} fallback prox(ies), max retries {}",
        cfg.source.base_url,
        cfg.source.fallback_proxies.len(),
        cfg.bot_detection.max_retries
    );

    let source = match AsuraScans::with_config(&cfg) {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to create AsuraScans adapter: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&source, &args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_blocked() => {
            eprintln!("The manga site is currently blocking our requests. Try again later.");
            error!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
