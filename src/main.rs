//! # classpack CLI
//!
//! Command-line interface for the classpack library.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use classpack::cli::{Args, Command, OutputArgs};
use classpack::combine::Combiner;
use classpack::config::{CombineConfig, ExtractorConfig, MediaConfig, ParserConfig};
use classpack::core::{ChatSummary, ClassSummary, FilterConfig, Record, apply_filters, ascii_only};
use classpack::extract::ClassExtractor;
use classpack::format::write_to_format;
use classpack::media::{MediaKind, MediaOrganizer};
use classpack::parser::WhatsAppParser;
use classpack::search::{DriveLinkFinder, EventSearch};
use classpack::{ClasspackError, Message};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "classpack=info" } else { "classpack=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ClasspackError> {
    let filter = args.filter_config()?;
    let parser_config = ParserConfig::new().with_skip_system_messages(args.skip_system);

    println!("📦 classpack v{}", env!("CARGO_PKG_VERSION"));
    println!("{RULE}");

    match &args.command {
        Command::Parse { input, output } => {
            let start = Instant::now();
            let parser = WhatsAppParser::with_config(parser_config)?;
            println!("📂 Input:   {}", input.display());
            let messages = parser.parse(input)?;
            println!(
                "   Parsed {} messages ({:.2}s)",
                messages.len(),
                start.elapsed().as_secs_f64()
            );
            let messages = filter_messages(messages, &filter)?;
            print_chat_summary(&messages, &args.teacher)?;
            print_previews(&messages);
            write_output(&messages, output)?;
        }
        Command::Combine { inputs, output } => {
            let messages = load(inputs, parser_config, &filter)?;
            print_chat_summary(&messages, &args.teacher)?;
            write_output(&messages, output)?;
        }
        Command::Classes { inputs, output } => {
            let messages = load(inputs, parser_config, &filter)?;
            let extractor = ClassExtractor::new(ExtractorConfig::new().with_teacher(&args.teacher))?;
            let classes = extractor.extract(&messages)?;

            println!();
            println!("🎵 Found {} class/event dates:", classes.len());
            println!("{RULE}");
            for class in &classes {
                let at = class
                    .time
                    .as_deref()
                    .map(|t| format!(" at {t}"))
                    .unwrap_or_default();
                println!("  {}{}  [{}]", class.date, at, class.class_type.as_str().to_uppercase());
                println!("    Evidence: \"{}\"", ascii_only(&class.evidence));
            }

            let summary = ClassSummary::new(&classes);
            println!("{RULE}");
            println!("📊 Summary:");
            for (class_type, count) in &summary.by_type {
                println!("   {class_type}: {count}");
            }
            println!("   Total:  {}", summary.total);
            write_output(&classes, output)?;
        }
        Command::Search { inputs, patterns } => {
            let messages = load(inputs, parser_config, &filter)?;
            let search = if patterns.is_empty() {
                EventSearch::new()?
            } else {
                let table: Vec<(&str, &str)> =
                    patterns.iter().map(|p| (p.as_str(), p.as_str())).collect();
                EventSearch::with_table(&table)?
            };

            let mentions = search.search(&messages);
            println!();
            println!("🔍 {} event mentions:", mentions.len());
            for mention in &mentions {
                println!(
                    "  [{}] {}: {}",
                    mention.date,
                    mention.label,
                    ascii_only(&mention.snippet)
                );
            }
        }
        Command::Links { inputs } => {
            let messages = load(inputs, parser_config, &filter)?;
            println!();
            println!("🔗 Practice recording links (from {}):", args.teacher);
            let links = DriveLinkFinder::new()?.links_from(&messages, &args.teacher);
            for link in &links {
                println!("  {}: {}", link.date, link.url);
            }
            println!("   {} links", links.len());
        }
        Command::Media { inputs, out_dir } => {
            let messages = load(inputs, parser_config, &filter)?;
            let organizer =
                MediaOrganizer::with_config(MediaConfig::new().with_teacher(&args.teacher))?;

            println!();
            println!("🎧 Extracting media to {}...", out_dir.display());
            let start = Instant::now();
            let report = organizer.organize(inputs.as_slice(), &messages, out_dir)?;
            for archive in &report.archives {
                match archive.error {
                    None => {
                        println!("   ✔ {}:", archive.path.display());
                        for plan in &archive.extracted {
                            println!("     {}: {} -> {}", plan.kind, plan.entry, plan.file_name);
                        }
                    }
                    Some(ref error) => println!("   ✘ {}: {}", archive.path.display(), error),
                }
            }

            println!("{RULE}");
            println!("📊 Summary ({:.2}s):", start.elapsed().as_secs_f64());
            for kind in MediaKind::all() {
                println!("   {}/: {}", kind.dir_name(), report.count(*kind));
            }
        }
    }

    Ok(())
}

/// Parses and merges every input, then applies the global filters.
fn load(
    inputs: &[PathBuf],
    parser: ParserConfig,
    filter: &FilterConfig,
) -> Result<Vec<Message>, ClasspackError> {
    let start = Instant::now();
    let combiner = Combiner::with_config(CombineConfig::new().with_parser(parser))?;
    println!("⏳ Combining {} export(s)...", inputs.len());

    let combined = combiner.combine(inputs)?;
    for source in &combined.sources {
        match source.error {
            None => println!(
                "   ✔ {}: {} messages ({} new)",
                source.path.display(),
                source.parsed,
                source.added
            ),
            Some(ref error) => println!("   ✘ {}: {}", source.path.display(), error),
        }
    }

    combined.ensure_any_readable()?;

    println!(
        "   {} unique messages, {} duplicates dropped ({:.2}s)",
        combined.messages.len(),
        combined.duplicates(),
        start.elapsed().as_secs_f64()
    );

    filter_messages(combined.messages, filter)
}

fn filter_messages(
    messages: Vec<Message>,
    filter: &FilterConfig,
) -> Result<Vec<Message>, ClasspackError> {
    if !filter.is_active() {
        return Ok(messages);
    }
    println!("🔍 Filtering messages...");
    let filtered = apply_filters(messages, filter)?;
    println!("   {} messages after filtering", filtered.len());
    Ok(filtered)
}

fn print_chat_summary(messages: &[Message], teacher: &str) -> Result<(), ClasspackError> {
    let summary = ChatSummary::new(messages, teacher, &DriveLinkFinder::new()?);
    println!();
    println!("📊 Summary:");
    println!("   Messages:          {}", summary.total);
    if let Some((first, last)) = summary.date_range() {
        println!("   Date range:        {first} to {last}");
    }
    println!("   From {teacher}:  {}", summary.from_teacher);
    println!("   With Drive links:  {}", summary.with_drive_links);
    Ok(())
}

fn print_previews(messages: &[Message]) {
    if messages.is_empty() {
        return;
    }
    println!();
    println!("--- First 3 messages ---");
    for msg in messages.iter().take(3) {
        println!("  [{} {}] {}: {}", msg.date, msg.time, msg.sender, msg.preview(60));
    }
    println!("--- Last 2 messages ---");
    for msg in &messages[messages.len().saturating_sub(2)..] {
        println!("  [{} {}] {}: {}", msg.date, msg.time, msg.sender, msg.preview(60));
    }
}

fn write_output<R: Record>(records: &[R], output: &OutputArgs) -> Result<(), ClasspackError> {
    let Some((path, format)) = output.target()? else {
        return Ok(());
    };
    let start = Instant::now();
    println!("💾 Writing {}...", format);
    write_to_format(records, path, format, &output.output_config())?;
    println!(
        "✅ Done! {} records saved to {} ({:.2}s)",
        records.len(),
        path,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
