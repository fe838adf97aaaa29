//! # Terminal Output
//!
//! Renders breakdowns, saved-quote lists, pricing ladders and config
//! reports as tables. Every function returns a `String`; printing is left to
//! the command.

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use tripquote_core::notes::{model_label, multiplier_label};
use tripquote_core::report::QuoteReport;
use tripquote_core::{ConfigReport, Locale, Money, PricingConfig, PricingTarget};
use tripquote_db::SavedQuoteSummary;

/// Column and summary labels.
struct Labels {
    item: &'static str,
    notes: &'static str,
    qty: &'static str,
    unit_price: &'static str,
    subtotal: &'static str,
    base_total: &'static str,
    total: &'static str,
    per_traveller: &'static str,
}

fn labels(locale: Locale) -> Labels {
    match locale {
        Locale::En => Labels {
            item: "Item",
            notes: "Notes",
            qty: "Qty",
            unit_price: "Unit price",
            subtotal: "Subtotal",
            base_total: "Base total",
            total: "Total",
            per_traveller: "Per traveller",
        },
        Locale::De => Labels {
            item: "Leistung",
            notes: "Hinweise",
            qty: "Menge",
            unit_price: "Einzelpreis",
            subtotal: "Zwischensumme",
            base_total: "Basissumme",
            total: "Gesamt",
            per_traveller: "Pro Person",
        },
    }
}

// =============================================================================
// Quote Breakdown
// =============================================================================

/// Renders a quote report: line items, then totals and commissions.
///
/// ```text
/// ╭──────────────┬───────────────────────┬─────┬────────────┬────────────╮
/// │ Item         │ Notes                 │ Qty │ Unit price │   Subtotal │
/// ├──────────────┼───────────────────────┼─────┼────────────┼────────────┤
/// │ Hotel budget │ per night             │   7 │     €80.00 │ €1,120.00  │
/// ╰──────────────┴───────────────────────┴─────┴────────────┴────────────╯
///   Base total            €1,120.00
///   Local agency (10%)      €112.00
///   Total                 €1,232.00
///   Per traveller           €616.00
/// ```
pub fn render_breakdown(report: &QuoteReport, locale: Locale, symbol: &str) -> String {
    let labels = labels(locale);
    let mut builder = Builder::default();
    builder.push_record([
        labels.item,
        labels.notes,
        labels.qty,
        labels.unit_price,
        labels.subtotal,
    ]);
    for row in &report.rows {
        builder.push_record([
            row.title.clone(),
            row.notes.clone(),
            row.qty.to_string(),
            row.unit_price.format(locale, symbol),
            row.subtotal.format(locale, symbol),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());

    let mut summary = vec![(labels.base_total.to_string(), report.base_total)];
    for commission in &report.commissions {
        summary.push((format!("{} ({})", commission.title, commission.rate_pct), commission.amount));
    }
    summary.push((labels.total.to_string(), report.total));
    summary.push((labels.per_traveller.to_string(), report.per_traveller_total));

    format!("{table}\n{}", summary_lines(&summary, locale, symbol))
}

fn summary_lines(lines: &[(String, Money)], locale: Locale, symbol: &str) -> String {
    let values: Vec<String> = lines.iter().map(|(_, amount)| amount.format(locale, symbol)).collect();
    let label_width = lines.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    let value_width = values.iter().map(|v| v.chars().count()).max().unwrap_or(0);

    lines
        .iter()
        .zip(&values)
        .map(|((label, _), value)| format!("  {label:<label_width$}  {value:>value_width$}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Saved Quotes
// =============================================================================

/// Renders the saved-quote registry, newest number first.
pub fn render_quote_list(quotes: &[SavedQuoteSummary], locale: Locale, symbol: &str) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Number", "Client", "Date", "People", "Days", "Total", "Saved"]);
    for quote in quotes {
        builder.push_record([
            quote.quote_number.clone(),
            quote.client_name.clone(),
            quote.quote_date.to_string(),
            quote.people_count.to_string(),
            quote.days.to_string(),
            quote.total().format(locale, symbol),
            quote.saved_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..6), Alignment::right());
    table.to_string()
}

// =============================================================================
// Pricing Configuration
// =============================================================================

/// Renders every tier ladder followed by the extra services.
pub fn render_pricing(config: &PricingConfig, locale: Locale, symbol: &str) -> String {
    let mut sections = vec![format!("Coverage: 1-{} people", config.coverage_max_people)];

    for target in PricingTarget::ALL {
        let item = config.item(target);
        let mut builder = Builder::default();
        builder.push_record(["#", "Min", "Max", "Price"]);
        for (index, tier) in item.tiers.iter().enumerate() {
            builder.push_record([
                index.to_string(),
                tier.min_people.to_string(),
                tier.max_people.map_or_else(|| "open".to_string(), |max| max.to_string()),
                tier.price.format(locale, symbol),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Columns::new(0..4), Alignment::right());

        sections.push(format!(
            "{target} ({}, {})\n{table}",
            model_label(item.pricing_model, locale),
            multiplier_label(item.multiplier, locale),
        ));
    }

    let mut builder = Builder::default();
    builder.push_record(["Id", "Title", "Price", "Model", "Unit"]);
    for extra in &config.extras {
        builder.push_record([
            extra.id.clone(),
            extra.title(locale).to_string(),
            extra.price.format(locale, symbol),
            model_label(extra.pricing_model, locale).to_string(),
            multiplier_label(extra.multiplier, locale).to_string(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..3), Alignment::right());
    sections.push(format!("extras\n{table}"));

    sections.join("\n\n")
}

/// Renders a config report: blocking defects, then advisory ladder defects.
pub fn render_config_report(report: &ConfigReport, locale: Locale) -> String {
    let mut lines = Vec::new();

    if report.is_valid() {
        lines.push("Pricing configuration is usable.".to_string());
    } else {
        lines.push("Pricing configuration is NOT usable:".to_string());
        lines.extend(report.defects.iter().map(|defect| format!("  ✗ {defect}")));
    }

    if !report.ladder_defects.is_empty() {
        lines.push("Ladder warnings:".to_string());
        for ladder in &report.ladder_defects {
            for defect in &ladder.defects {
                lines.push(format!("  ! {}: {}", ladder.target, defect.message(locale)));
            }
        }
    }

    if !report.duplicate_extra_ids.is_empty() {
        lines.push(format!(
            "Duplicate extra ids (first entry is used): {}",
            report.duplicate_extra_ids.join(", ")
        ));
    }

    lines.join("\n")
}

// =============================================================================
// Unit Tests
// =============================================================================
