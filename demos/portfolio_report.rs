//! End-to-end demo: generate a synthetic portfolio, compute EVM indices,
//! print the flags per project.
//!
//! ```bash
//! RUST_LOG=avance=debug cargo run --example portfolio_report
//! ```

use anyhow::{Context, Result};
use avance::synth::PortfolioBuilder;
use avance::{analyze, Severity};
use std::collections::BTreeMap;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let portfolio = PortfolioBuilder::new().periods(52).seed(42).build();
    let report = analyze(portfolio.metrics, &portfolio.schedule, &portfolio.changes)
        .context("portfolio analysis failed")?;

    // Latest period per project
    let mut latest = BTreeMap::new();
    for row in &report.metrics {
        latest
            .entry(row.project_id.clone())
            .and_modify(|current: &mut &avance::PeriodMetric| {
                if row.period_end > current.period_end {
                    *current = row;
                }
            })
            .or_insert(row);
    }

    println!("=== Portfolio status ===");
    for (project_id, row) in &latest {
        println!(
            "{project_id}: CPI {:.2}  SPI {:.2}  EAC {:>12.0}  VAC {:>12.0}",
            row.cpi.unwrap_or_default(),
            row.spi.unwrap_or_default(),
            row.eac.unwrap_or_default(),
            row.vac.unwrap_or_default(),
        );
    }

    println!("\n=== Flags ({}) ===", report.flags.len());
    for flag in report.flags.iter().filter(|f| f.severity == Severity::High).take(10) {
        println!(
            "{} {} [{}] {}",
            flag.period_end, flag.project_id, flag.flag_type, flag.message
        );
    }

    let json = serde_json::to_string_pretty(&report.flags.last())?;
    println!("\nlast flag as JSON:\n{json}");
    Ok(())
}
