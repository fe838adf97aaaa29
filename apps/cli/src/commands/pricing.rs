//! # Pricing Commands
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tripquote pricing tier set dinner 1 --price 31.50                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.pricing().load()  ──►  PricingConfig::update_tier(...)             │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                      AutoSaver::spawn ──► schedule(config)             │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                      flush() ──► report (ladder warnings printed)      │
//! │                      shutdown()                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use tripquote_core::editor::{ExtraPatch, ItemPatch, TierPatch};
use tripquote_core::{
    check_pricing_config, parse_pricing_config, Locale, Money, Multiplier, PricingConfig, PricingModel,
    PricingTarget,
};
use tripquote_db::AutoSaver;

use super::{print_json, read_text, Context};
use crate::error::{CliError, CliResult};
use crate::output::{render_config_report, render_pricing};

#[derive(Debug, Args)]
pub struct PricingCommand {
    #[command(subcommand)]
    command: PricingSubcommand,
}

#[derive(Debug, Subcommand)]
enum PricingSubcommand {
    /// Print the stored configuration
    Show(ShowArgs),
    /// Check the stored configuration or a file against the pricing contract
    Validate(ValidateArgs),
    /// Replace the stored configuration with a file
    Import(ImportArgs),
    /// Restore the default configuration
    Reset,
    /// Change a ladder's pricing model or multiplier
    Item(ItemArgs),
    /// Edit the tiers of a ladder
    Tier(TierCommand),
    /// Edit extra services
    Extra(ExtraCommand),
}

#[derive(Debug, Args)]
struct ShowArgs {
    #[arg(long)]
    locale: Option<Locale>,

    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Pricing JSON file (defaults to the stored configuration)
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ImportArgs {
    #[arg(long)]
    file: PathBuf,
}

#[derive(Debug, Args)]
struct ItemArgs {
    /// hotel.budget, hotel.premium, hotel.luxury, dinner, guide or flight
    target: PricingTarget,

    /// per_person or per_group
    #[arg(long, value_parser = parse_tag::<PricingModel>)]
    model: Option<PricingModel>,

    /// per_day, per_trip or per_piece
    #[arg(long, value_parser = parse_tag::<Multiplier>)]
    multiplier: Option<Multiplier>,
}

#[derive(Debug, Args)]
struct TierCommand {
    #[command(subcommand)]
    command: TierSubcommand,
}

#[derive(Debug, Subcommand)]
enum TierSubcommand {
    /// Append an open-ended tier after the last one
    Add { target: PricingTarget },
    /// Remove the tier at INDEX
    Remove { target: PricingTarget, index: usize },
    /// Change the tier at INDEX
    Set(TierSetArgs),
}

#[derive(Debug, Args)]
struct TierSetArgs {
    target: PricingTarget,
    index: usize,

    #[arg(long)]
    min: Option<u32>,

    #[arg(long, conflicts_with = "open")]
    max: Option<u32>,

    /// Remove the upper bound
    #[arg(long)]
    open: bool,

    #[arg(long, value_parser = parse_money)]
    price: Option<Money>,
}

#[derive(Debug, Args)]
struct ExtraCommand {
    #[command(subcommand)]
    command: ExtraSubcommand,
}

#[derive(Debug, Subcommand)]
enum ExtraSubcommand {
    /// Add a new extra service
    Add(ExtraFields),
    /// Change an extra service
    Set {
        id: String,
        #[command(flatten)]
        fields: ExtraFields,
    },
    /// Remove an extra service
    Remove { id: String },
}

#[derive(Debug, Args)]
struct ExtraFields {
    #[arg(long)]
    title_en: Option<String>,

    #[arg(long)]
    title_de: Option<String>,

    #[arg(long, value_parser = parse_money)]
    price: Option<Money>,

    #[arg(long, value_parser = parse_tag::<PricingModel>)]
    model: Option<PricingModel>,

    #[arg(long, value_parser = parse_tag::<Multiplier>)]
    multiplier: Option<Multiplier>,
}

impl From<ExtraFields> for ExtraPatch {
    fn from(fields: ExtraFields) -> Self {
        ExtraPatch {
            title_en: fields.title_en,
            title_de: fields.title_de,
            price: fields.price,
            pricing_model: fields.model,
            multiplier: fields.multiplier,
        }
    }
}

impl From<&TierSetArgs> for TierPatch {
    fn from(args: &TierSetArgs) -> Self {
        TierPatch {
            min_people: args.min,
            max_people: if args.open { Some(None) } else { args.max.map(Some) },
            price: args.price,
        }
    }
}

/// Parses a snake_case enum tag (`per_person`, `per_day`, ...).
fn parse_tag<T: DeserializeOwned>(value: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_string()))
        .map_err(|_| format!("unknown value '{value}'"))
}

/// Parses an amount in major units, e.g. `31.50`.
fn parse_money(value: &str) -> Result<Money, String> {
    let amount: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not an amount"))?;
    if !amount.is_finite() {
        return Err(format!("'{value}' is not an amount"));
    }
    Ok(Money::round_from(amount))
}

pub async fn run(command: PricingCommand, ctx: &Context) -> CliResult<()> {
    match command.command {
        PricingSubcommand::Show(args) => show(args, ctx).await,
        PricingSubcommand::Validate(args) => validate(args, ctx).await,
        PricingSubcommand::Import(args) => import(args, ctx).await,
        PricingSubcommand::Reset => {
            ctx.db.pricing().reset().await?;
            println!("Pricing configuration reset to defaults");
            Ok(())
        }
        PricingSubcommand::Item(args) => {
            let patch = ItemPatch {
                pricing_model: args.model,
                multiplier: args.multiplier,
            };
            edit(ctx, |pricing| {
                pricing.update_item(args.target, &patch);
                Ok(())
            })
            .await?;
            println!("Updated {}", args.target);
            Ok(())
        }
        PricingSubcommand::Tier(command) => tier(command, ctx).await,
        PricingSubcommand::Extra(command) => extra(command, ctx).await,
    }
}

async fn show(args: ShowArgs, ctx: &Context) -> CliResult<()> {
    let pricing = ctx.db.pricing().load().await?;
    if args.json {
        return print_json(&pricing);
    }
    let locale = args.locale.unwrap_or(ctx.config.locale);
    println!("{}", render_pricing(&pricing, locale, &ctx.config.currency_symbol));
    Ok(())
}

async fn validate(args: ValidateArgs, ctx: &Context) -> CliResult<()> {
    let report = match &args.file {
        Some(path) => match parse_pricing_config(&read_text(path)?) {
            Ok((_, report)) | Err(report) => report,
        },
        None => check_pricing_config(&ctx.db.pricing().load().await?),
    };

    println!("{}", render_config_report(&report, ctx.config.locale));
    if report.is_valid() {
        Ok(())
    } else {
        Err(CliError::InvalidConfig(report))
    }
}

async fn import(args: ImportArgs, ctx: &Context) -> CliResult<()> {
    let (pricing, _) = parse_pricing_config(&read_text(&args.file)?).map_err(CliError::InvalidConfig)?;
    let report = ctx.db.pricing().save(&pricing).await?;
    info!(file = %args.file.display(), "Pricing configuration imported");

    if report.advisory_count() > 0 {
        println!("{}", render_config_report(&report, ctx.config.locale));
    }
    println!("Imported {}", args.file.display());
    Ok(())
}

async fn tier(command: TierCommand, ctx: &Context) -> CliResult<()> {
    match command.command {
        TierSubcommand::Add { target } => {
            let index = edit(ctx, |pricing| Ok(pricing.add_tier(target))).await?;
            println!("Added tier {index} to {target}");
        }
        TierSubcommand::Remove { target, index } => {
            let removed = edit(ctx, |pricing| Ok(pricing.remove_tier(target, index)?)).await?;
            println!(
                "Removed tier {index} ({}+) from {target}",
                removed.min_people
            );
        }
        TierSubcommand::Set(args) => {
            let patch = TierPatch::from(&args);
            edit(ctx, |pricing| Ok(pricing.update_tier(args.target, args.index, &patch)?)).await?;
            println!("Updated tier {} of {}", args.index, args.target);
        }
    }
    Ok(())
}

async fn extra(command: ExtraCommand, ctx: &Context) -> CliResult<()> {
    match command.command {
        ExtraSubcommand::Add(fields) => {
            let patch = ExtraPatch::from(fields);
            let id = edit(ctx, |pricing| {
                let id = pricing.add_extra().id.clone();
                pricing.update_extra(&id, &patch)?;
                Ok(id)
            })
            .await?;
            println!("Added extra {id}");
        }
        ExtraSubcommand::Set { id, fields } => {
            let patch = ExtraPatch::from(fields);
            edit(ctx, |pricing| Ok(pricing.update_extra(&id, &patch)?)).await?;
            println!("Updated extra {id}");
        }
        ExtraSubcommand::Remove { id } => {
            edit(ctx, |pricing| Ok(pricing.remove_extra(&id)?)).await?;
            println!("Removed extra {id}");
        }
    }
    Ok(())
}

/// Applies one edit to the stored configuration and persists it through
/// the auto-saver.
async fn edit<T>(ctx: &Context, apply: impl FnOnce(&mut PricingConfig) -> CliResult<T>) -> CliResult<T> {
    let mut pricing = ctx.db.pricing().load().await?;
    let outcome = apply(&mut pricing)?;

    let saver = AutoSaver::spawn(ctx.db.pricing(), ctx.config.autosave_delay);
    saver.schedule(pricing).await?;
    let flushed = saver.flush().await;
    if let Err(e) = saver.shutdown().await {
        warn!(error = %e, "Auto-saver did not shut down cleanly");
    }

    if let Some(report) = flushed? {
        if report.advisory_count() > 0 {
            println!("{}", render_config_report(&report, ctx.config.locale));
        }
    }
    Ok(outcome)
}

// =============================================================================
// Unit Tests
// =============================================================================
