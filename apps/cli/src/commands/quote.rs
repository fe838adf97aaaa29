//! # Quote Commands
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tripquote quote new            → draft JSON, number = next free       │
//! │        │ (edit the file)                                                │
//! │        ▼                                                                │
//! │  tripquote quote calculate      → breakdown, nothing stored            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  tripquote quote save           → priced with the stored config,       │
//! │                                   snapshot kept with the quote         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use chrono::Local;
use clap::{Args, Subcommand};
use tracing::info;

use tripquote_core::report::build_report;
use tripquote_core::{calculate_quote, next_quote_number, parse_pricing_config, Locale, QuoteInput};
use tripquote_db::SavedQuote;

use super::{print_json, read_json, read_text, Context};
use crate::error::{CliError, CliResult};
use crate::output::{render_breakdown, render_quote_list};

#[derive(Debug, Args)]
pub struct QuoteCommand {
    #[command(subcommand)]
    command: QuoteSubcommand,
}

#[derive(Debug, Subcommand)]
enum QuoteSubcommand {
    /// Price a quote file and print the breakdown
    Calculate(CalculateArgs),
    /// Price a quote file with the stored configuration and save it
    Save(SaveArgs),
    /// List saved quotes
    List(ListArgs),
    /// Show a saved quote
    Show(ShowArgs),
    /// Delete a saved quote
    Delete(DeleteArgs),
    /// Print the next quote number
    Next(NextArgs),
    /// Print a blank draft quote with the next number
    New,
}

#[derive(Debug, Args)]
struct CalculateArgs {
    /// Quote JSON file
    #[arg(long)]
    quote: PathBuf,

    /// Pricing JSON file (defaults to the stored configuration)
    #[arg(long)]
    pricing: Option<PathBuf>,

    /// Locale for notes and titles (en, de)
    #[arg(long)]
    locale: Option<Locale>,

    /// Print the calculated quote as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct SaveArgs {
    /// Quote JSON file
    #[arg(long)]
    quote: PathBuf,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Case-insensitive filter on number, client or date
    #[arg(long)]
    search: Option<String>,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Quote number, e.g. Q-2026-014
    number: String,

    #[arg(long)]
    locale: Option<Locale>,

    /// Print the saved quote and its calculation as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    number: String,
}

#[derive(Debug, Args)]
struct NextArgs {
    /// Compute the successor of this number instead of the latest saved one
    #[arg(long)]
    from: Option<String>,
}

pub async fn run(command: QuoteCommand, ctx: &Context) -> CliResult<()> {
    match command.command {
        QuoteSubcommand::Calculate(args) => calculate(args, ctx).await,
        QuoteSubcommand::Save(args) => save(args, ctx).await,
        QuoteSubcommand::List(args) => list(args, ctx).await,
        QuoteSubcommand::Show(args) => show(args, ctx).await,
        QuoteSubcommand::Delete(args) => delete(args, ctx).await,
        QuoteSubcommand::Next(args) => next(args, ctx).await,
        QuoteSubcommand::New => new_draft(ctx).await,
    }
}

async fn calculate(args: CalculateArgs, ctx: &Context) -> CliResult<()> {
    let quote: QuoteInput = read_json(&args.quote)?;
    let pricing = match &args.pricing {
        Some(path) => {
            let (pricing, _) = parse_pricing_config(&read_text(path)?).map_err(CliError::InvalidConfig)?;
            pricing
        }
        None => ctx.db.pricing().load().await?,
    };
    let locale = args.locale.unwrap_or(ctx.config.locale);

    let calculated = calculate_quote(&quote, &pricing, locale)?;
    info!(
        quote_number = %quote.quote_number,
        items = calculated.items.len(),
        total = %calculated.total,
        "Quote calculated"
    );

    if args.json {
        return print_json(&calculated);
    }
    let report = build_report(&quote, &calculated, locale);
    println!("{}", render_breakdown(&report, locale, &ctx.config.currency_symbol));
    Ok(())
}

async fn save(args: SaveArgs, ctx: &Context) -> CliResult<()> {
    let quote: QuoteInput = read_json(&args.quote)?;
    let pricing = ctx.db.pricing().load().await?;

    let saved = ctx.db.quotes().save(&quote, &pricing).await?;
    println!(
        "Saved {} ({}), total {}",
        saved.summary.quote_number,
        saved.summary.file_key,
        saved.summary.total().format(ctx.config.locale, &ctx.config.currency_symbol),
    );
    Ok(())
}

async fn list(args: ListArgs, ctx: &Context) -> CliResult<()> {
    let quotes = ctx.db.quotes().list(args.search.as_deref()).await?;
    if quotes.is_empty() {
        println!("No saved quotes");
        return Ok(());
    }
    println!(
        "{}",
        render_quote_list(&quotes, ctx.config.locale, &ctx.config.currency_symbol)
    );
    Ok(())
}

async fn show(args: ShowArgs, ctx: &Context) -> CliResult<()> {
    let saved = ctx.db.quotes().get(&args.number).await?;
    let locale = args.locale.unwrap_or(ctx.config.locale);

    if args.json {
        return print_json(&show_document(&saved, locale)?);
    }

    let calculated = saved.calculate(locale)?;
    let report = build_report(&saved.quote, &calculated, locale);
    println!(
        "{}  {}  {}",
        saved.summary.quote_number, saved.summary.client_name, saved.summary.quote_date
    );
    println!("{}", render_breakdown(&report, locale, &ctx.config.currency_symbol));
    Ok(())
}

/// The saved quote and its calculation in `locale`, as printed by
/// `quote show --json`.
fn show_document(saved: &SavedQuote, locale: Locale) -> CliResult<serde_json::Value> {
    let calculated = saved.calculate(locale)?;
    Ok(serde_json::json!({
        "quote": saved.quote,
        "calculated": calculated,
    }))
}

async fn delete(args: DeleteArgs, ctx: &Context) -> CliResult<()> {
    if ctx.db.quotes().delete(&args.number).await? {
        println!("Deleted {}", args.number);
    } else {
        println!("No saved quote {}", args.number);
    }
    Ok(())
}

async fn next(args: NextArgs, ctx: &Context) -> CliResult<()> {
    let number = match args.from {
        Some(current) => next_quote_number(&current),
        None => ctx.db.quotes().next_quote_number(Local::now().date_naive()).await?,
    };
    println!("{number}");
    Ok(())
}

async fn new_draft(ctx: &Context) -> CliResult<()> {
    let today = Local::now().date_naive();
    let number = ctx.db.quotes().next_quote_number(today).await?;
    print_json(&QuoteInput::draft(number, today))
}

// =============================================================================
// Unit Tests
// =============================================================================
