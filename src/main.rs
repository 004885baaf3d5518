use std::fs;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use candela::build::run_build;
use candela::{
    normalize_query, parse_index, preview, ClientProfile, LoadCompletion, SearchRecord,
    SearchSession,
};

mod cli;
use cli::display::{self, match_label, styled, themed, timing_ms, BOLD, CYAN, DIM, GREEN, MAGENTA, YELLOW};
use cli::{Cli, Commands};

/// How many entries `inspect` lists before folding the rest into a count.
const INSPECT_ENTRY_LIMIT: usize = 20;

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build { input, output } => run_build(&input, &output),
        Commands::Inspect { file } => run_inspect(&file),
        Commands::Search {
            file,
            query,
            limit,
            json,
        } => run_search(&file, &query, limit, json),
        Commands::Fingerprint {
            user_agent,
            language,
            screen,
            timezone_offset,
        } => run_fingerprint(user_agent, language, &screen, timezone_offset),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so boxed stdout output stays pipeable.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("candela=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_inspect(file: &str) -> Result<(), String> {
    let xml = fs::read_to_string(file).map_err(|e| format!("Failed to read {}: {}", file, e))?;
    let records = parse_index(&xml).map_err(|e| format!("Failed to parse {}: {}", file, e))?;

    println!();
    display::double_header();
    display::title("CANDELA INDEX");
    display::double_divider();
    display::row_double(&format!("  File:     {}", display::truncate_path(file, 56)));
    display::row_double(&format!("  Size:     {}", display::format_size(xml.len())));
    display::row_double(&format!("  Entries:  {}", records.len()));
    display::double_footer();
    println!();

    display::section_top("ENTRIES");
    if records.is_empty() {
        display::row(&themed(YELLOW, &[], "  (no entries)"));
    }
    for (i, record) in records.iter().take(INSPECT_ENTRY_LIMIT).enumerate() {
        display::row(&format!(
            "  {:>3}. {} {}",
            i + 1,
            display::pad_right(&clip(&record.title, 34), 34),
            themed(CYAN, &[], &display::truncate_path(&record.url, 26)),
        ));
    }
    if records.len() > INSPECT_ENTRY_LIMIT {
        display::row(&format!(
            "       ... and {} more",
            records.len() - INSPECT_ENTRY_LIMIT
        ));
    }

    let title_bytes: usize = records.iter().map(|r| r.title.len()).sum();
    let content_bytes: usize = records.iter().map(|r| r.content.len()).sum();
    let url_bytes: usize = records.iter().map(|r| r.url.len()).sum();

    display::section_mid("TOTALS");
    display::row(&format!("  Titles:   {}", display::format_size(title_bytes)));
    display::row(&format!("  Content:  {}", display::format_size(content_bytes)));
    display::row(&format!("  Urls:     {}", display::format_size(url_bytes)));
    display::section_bot();
    Ok(())
}

fn run_search(file: &str, query: &str, limit: usize, json: bool) -> Result<(), String> {
    let xml = fs::read_to_string(file).map_err(|e| format!("Failed to read {}: {}", file, e))?;

    // Drive the same state machine the browser widget runs, so CLI results
    // and page results can never disagree.
    let mut session = SearchSession::new();
    session.begin_load();
    match session.complete_load(&xml) {
        LoadCompletion::Ready(_) => {}
        LoadCompletion::Rejected(e) => return Err(format!("Failed to parse {}: {}", file, e)),
        LoadCompletion::Ignored => return Err(format!("Index load for {} was not started", file)),
    }

    let started = Instant::now();
    let hits = session.query(query);
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    if json {
        let limited: Vec<&SearchRecord> = hits.iter().take(limit).copied().collect();
        let out = serde_json::to_string_pretty(&limited)
            .map_err(|e| format!("Failed to serialize results: {}", e))?;
        println!("{}", out);
        return Ok(());
    }

    if hits.is_empty() {
        println!("{}", themed(YELLOW, &[], &format!("No results for \"{}\"", query)));
        return Ok(());
    }

    println!(
        "{} result{} for \"{}\" ({} ms)",
        hits.len(),
        if hits.len() == 1 { "" } else { "s" },
        query,
        timing_ms(elapsed_ms)
    );
    println!();

    let needle = normalize_query(query);
    for (i, hit) in hits.iter().take(limit).enumerate() {
        let source = if hit.title.trim().to_lowercase().contains(&needle) {
            "title"
        } else {
            "content"
        };
        println!(
            "  {:>2}. {} {}",
            i + 1,
            themed(GREEN, &[BOLD], &hit.title),
            match_label(source)
        );
        println!("      {}", themed(CYAN, &[], &hit.url));
        println!("      {}", styled(&[DIM], &preview(&hit.content)));
        println!();
    }
    if hits.len() > limit {
        println!("  ... and {} more", hits.len() - limit);
    }
    Ok(())
}

fn run_fingerprint(
    user_agent: String,
    language: String,
    screen: &str,
    timezone_offset: i32,
) -> Result<(), String> {
    let (width, height) = parse_screen(screen)?;
    let profile = ClientProfile {
        user_agent,
        language,
        screen_width: width,
        screen_height: height,
        timezone_offset_min: timezone_offset,
    };
    println!("  profile:     {}", styled(&[DIM], &profile.canonical_string()));
    println!(
        "  fingerprint: {}",
        themed(MAGENTA, &[BOLD], &profile.fingerprint())
    );
    Ok(())
}

/// Parse a "WIDTHxHEIGHT" screen spec.
fn parse_screen(spec: &str) -> Result<(u32, u32), String> {
    let (w, h) = spec
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("Invalid screen size '{}': expected WIDTHxHEIGHT", spec))?;
    let width = w
        .trim()
        .parse()
        .map_err(|_| format!("Invalid screen width '{}'", w))?;
    let height = h
        .trim()
        .parse()
        .map_err(|_| format!("Invalid screen height '{}'", h))?;
    Ok((width, height))
}

/// Truncate display text to `max` characters, appending ... if clipped.
fn clip(text: &str, max: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max {
        return text.to_string();
    }
    let keep: String = chars[..max.saturating_sub(3)].iter().collect();
    format!("{}...", keep)
}
