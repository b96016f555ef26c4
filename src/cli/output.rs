//! Operator-facing rendering of run reports.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::app::RunReport;
use crate::domain::{Category, CategoryCounts, ClassificationResult, RunId, StoredResult};

const RULE_WIDTH: usize = 56;

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(RULE_WIDTH));
}

pub fn key_value(label: &str, value: impl Display) {
    println!("{label:<14} {value}");
}

pub fn ok(message: &str) {
    println!("✓ {message}");
}

pub fn warn(message: &str) {
    println!("⚠ {message}");
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Stations")]
    count: usize,
}

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "Station")]
    station: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Items")]
    items: String,
    #[tabled(rename = "Collateral")]
    collateral: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

/// Render whole ISK amounts with thousands separators.
pub fn isk(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn origin(result: &ClassificationResult) -> (String, String) {
    match result {
        ClassificationResult::ItemExchange {
            from_region,
            from_station,
            ..
        }
        | ClassificationResult::HighValue {
            from_region,
            from_station,
            ..
        }
        | ClassificationResult::Courier {
            from_region,
            from_station,
            ..
        } => (from_station.clone(), from_region.clone()),
        ClassificationResult::HighCount { summary, .. }
        | ClassificationResult::LogisticsReferral { summary }
        | ClassificationResult::Generic { summary }
        | ClassificationResult::IslandHighCount { summary }
        | ClassificationResult::IslandGeneric { summary } => {
            (summary.from_station.clone(), summary.from_region.clone())
        }
        ClassificationResult::Problem { .. } => (String::new(), String::new()),
    }
}

fn detail(result: &ClassificationResult) -> String {
    match result {
        ClassificationResult::Courier {
            provider,
            reward,
            to_station,
            ..
        } => format!("{provider} → {to_station}, reward {}", isk(*reward)),
        ClassificationResult::ItemExchange { reason, recipient, .. } => {
            format!("{reason} → {recipient}")
        }
        ClassificationResult::HighValue { jumps_to_jita, .. }
        | ClassificationResult::HighCount { jumps_to_jita, .. } => match jumps_to_jita {
            Some(jumps) => format!("{jumps} jumps to Jita"),
            None => "no route to Jita".into(),
        },
        ClassificationResult::Problem { message } => message.clone(),
        _ => String::new(),
    }
}

fn result_row(record: &StoredResult) -> ResultRow {
    let (station, region) = origin(&record.result);
    ResultRow {
        station: if station.is_empty() {
            record.station_id.to_string()
        } else {
            station
        },
        region,
        items: record
            .result
            .item_count()
            .map(|n| n.to_string())
            .unwrap_or_default(),
        collateral: record.result.collateral().map(isk).unwrap_or_default(),
        detail: detail(&record.result),
    }
}

fn print_table(table: Table) {
    for line in table.to_string().lines() {
        println!("  {line}");
    }
}

/// Print the per-category summary table.
pub fn print_counts(counts: &CategoryCounts) {
    let rows: Vec<CountRow> = counts
        .iter()
        .map(|(category, count)| CountRow {
            category: category.as_str(),
            count,
        })
        .collect();
    print_table(Table::new(rows));
}

/// Print the top results of each non-empty category.
pub fn print_top(top: &[(Category, Vec<StoredResult>)]) {
    for (category, records) in top {
        if records.is_empty() {
            continue;
        }
        section(category.as_str());
        print_table(Table::new(records.iter().map(result_row)));
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    run_id: RunId,
    counts: &'a CategoryCounts,
    ignored: usize,
    failed: usize,
    top: BTreeMap<&'static str, &'a [StoredResult]>,
}

/// Render the report as pretty JSON.
pub fn report_json(report: &RunReport, top: &[(Category, Vec<StoredResult>)]) -> serde_json::Result<String> {
    let view = JsonReport {
        run_id: report.run_id,
        counts: &report.counts,
        ignored: report.ignored,
        failed: report.failed,
        top: top
            .iter()
            .map(|(category, records)| (category.as_str(), records.as_slice()))
            .collect(),
    };
    serde_json::to_string_pretty(&view)
}
