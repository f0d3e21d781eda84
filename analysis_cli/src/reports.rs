//! Rendering stage: turns demand and result tables into delimited and
//! plain-text output, and reads a prepared demand table back in. All
//! renderers are pure string builders with thin filesystem wrappers.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use permitatlas::prelude::*;

use crate::errors::{AnalysisError, Result};

const RULE: &str =
    "======================================================================";
const LIGHT_RULE: &str =
    "----------------------------------------------------------------------";

// ---------------------------------------------------------------------
// demand table CSV
// ---------------------------------------------------------------------

pub fn render_demand_csv(table: &DemandTable) -> String {
    let segments = table.segments();
    let mut out = String::from("Date,Year,Month");
    for segment in &segments {
        out.push(',');
        out.push_str(segment.code());
    }
    out.push_str(",Total_Permits\n");

    for period in table.periods() {
        out.push_str(&format!("{}-01,{},{}", period, period.year(), period.month()));
        let mut total = 0.0;
        for &segment in &segments {
            let permits = table.get(period, segment).unwrap_or(0.0);
            total += permits;
            out.push_str(&format!(",{}", permits));
        }
        out.push_str(&format!(",{}\n", total));
    }
    out
}

pub fn parse_demand_csv(text: &str) -> Result<DemandTable> {
    let mut lines = text.lines();
    let header = lines
        .next()
        .ok_or_else(|| AnalysisError::ParsingError("Empty demand file".to_string()))?;
    let columns: Vec<&str> = header.split(',').collect();
    if columns.first() != Some(&"Date") {
        return Err(AnalysisError::ParsingError(
            "Demand file must start with a Date column".to_string(),
        ));
    }
    let mut segment_columns = Vec::new();
    for (index, column) in columns.iter().enumerate() {
        if let Ok(segment) = column.parse::<Segment>() {
            segment_columns.push((index, segment));
        }
    }
    if segment_columns.is_empty() {
        return Err(AnalysisError::ParsingError(
            "Demand file has no segment columns".to_string(),
        ));
    }

    let mut table = DemandTable::new();
    for (number, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != columns.len() {
            return Err(AnalysisError::ParsingError(format!(
                "Row {} has {} fields, expected {}",
                number + 2,
                fields.len(),
                columns.len()
            )));
        }
        let date = NaiveDate::parse_from_str(fields[0], "%Y-%m-%d").map_err(|e| {
            AnalysisError::ParsingError(format!("Row {}: bad date '{}': {}", number + 2, fields[0], e))
        })?;
        let period = Period::from_date(date);
        for &(index, segment) in &segment_columns {
            let permits = fields[index].parse::<f64>().map_err(|_| {
                AnalysisError::ParsingError(format!(
                    "Row {}: bad permit count '{}'",
                    number + 2,
                    fields[index]
                ))
            })?;
            table.add_record(period, segment, permits)?;
        }
    }
    Ok(table)
}

pub fn write_demand_csv(path: &Path, table: &DemandTable) -> Result<()> {
    fs::write(path, render_demand_csv(table))?;
    Ok(())
}

pub fn read_demand_csv(path: &Path) -> Result<DemandTable> {
    parse_demand_csv(&fs::read_to_string(path)?)
}

// ---------------------------------------------------------------------
// result tables
// ---------------------------------------------------------------------

pub fn render_comparison_csv(comparison: &ScenarioComparison) -> String {
    let mut out = String::from(
        "Scenario,Annual_Revenue,Monthly_Revenue,Total_Permits,Revenue_vs_Baseline\n",
    );
    for row in comparison.rows() {
        out.push_str(&format!(
            "{},{:.2},{:.2},{:.0},{:.2}\n",
            row.scenario(),
            row.annual_revenue(),
            row.monthly_revenue(),
            row.total_permits(),
            row.revenue_vs_baseline_pct()
        ));
    }
    out
}

pub fn write_comparison_csv(path: &Path, comparison: &ScenarioComparison) -> Result<()> {
    fs::write(path, render_comparison_csv(comparison))?;
    Ok(())
}

pub fn render_recommendations_csv(recommendations: &[PricingRecommendation]) -> String {
    let mut out =
        String::from("Segment,Current_Price,Peak_Price,OffPeak_Price,Peak_Change,OffPeak_Change\n");
    for recommendation in recommendations {
        out.push_str(&format!(
            "{},{:.0},{:.0},{:.0},{:.1},{:.1}\n",
            recommendation.segment(),
            recommendation.current_price(),
            recommendation.peak_price(),
            recommendation.off_peak_price(),
            recommendation.peak_change_pct(),
            recommendation.off_peak_change_pct()
        ));
    }
    out
}

pub fn write_recommendations_csv(
    path: &Path,
    recommendations: &[PricingRecommendation],
) -> Result<()> {
    fs::write(path, render_recommendations_csv(recommendations))?;
    Ok(())
}

// ---------------------------------------------------------------------
// plain-text reports
// ---------------------------------------------------------------------

pub fn render_optimization_report(
    baseline: &SimulationResult,
    comparison: &ScenarioComparison,
    recommended: &str,
    recommendations: &[PricingRecommendation],
) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push_str("\nREVENUE OPTIMIZATION RESULTS\n");
    out.push_str(RULE);
    out.push_str("\n\n");

    out.push_str("BASELINE (CURRENT PRICING)\n");
    out.push_str(LIGHT_RULE);
    out.push('\n');
    out.push_str(&format!(
        "Average Annual Revenue:  ${}\n",
        thousands(baseline.annualized_revenue())
    ));
    out.push_str(&format!(
        "Average Monthly Revenue: ${}\n\n",
        thousands(baseline.monthly_mean_revenue())
    ));

    out.push_str("SCENARIO COMPARISON\n");
    out.push_str(LIGHT_RULE);
    out.push('\n');
    out.push_str(&format!(
        "{:<28} {:>16} {:>16} {:>14} {:>10}\n",
        "Scenario", "Annual Revenue", "Monthly Revenue", "Total Permits", "vs Base"
    ));
    for row in comparison.rows() {
        out.push_str(&format!(
            "{:<28} {:>16} {:>16} {:>14} {:>9.1}%\n",
            row.scenario(),
            format!("${}", thousands(row.annual_revenue())),
            format!("${}", thousands(row.monthly_revenue())),
            thousands(row.total_permits()),
            row.revenue_vs_baseline_pct()
        ));
    }
    out.push('\n');

    out.push_str(&format!("RECOMMENDED PRICING STRATEGY ({})\n", recommended));
    out.push_str(LIGHT_RULE);
    out.push('\n');
    for recommendation in recommendations {
        out.push_str(&format!(
            "{:<22} ${:>5.0} now -> ${:>5.0} peak / ${:>5.0} off-peak ({:+.1}% / {:+.1}%)\n",
            recommendation.segment().to_string(),
            recommendation.current_price(),
            recommendation.peak_price(),
            recommendation.off_peak_price(),
            recommendation.peak_change_pct(),
            recommendation.off_peak_change_pct()
        ));
    }
    out.push('\n');

    out.push_str("KEY BENEFITS\n");
    out.push_str(LIGHT_RULE);
    out.push('\n');
    if let Some(row) = comparison
        .rows()
        .iter()
        .find(|row| row.scenario() == recommended)
    {
        let additional = row.annual_revenue() - baseline.annualized_revenue();
        out.push_str(&format!(
            "* Additional Annual Revenue: ${} ({:+.1}%)\n",
            thousands(additional),
            row.revenue_vs_baseline_pct()
        ));
        out.push_str(&format!(
            "* Conservation funding increase: ${} (assuming 70% allocation)\n",
            thousands(additional * 0.7)
        ));
    }
    out.push_str("* Capitalizes on inelastic foreign demand during peak season\n");
    out.push_str("* Stimulates off-peak visits through targeted discounts\n");
    out
}

pub fn render_summary_report(
    summaries: &[SegmentSummary],
    split: &SeasonSplit,
    table: &DemandTable,
) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push_str("\nDEMAND SUMMARY STATISTICS\n");
    out.push_str(RULE);
    out.push_str("\n\n");

    out.push_str("MONTHLY PERMIT SALES BY SEGMENT\n");
    out.push_str(LIGHT_RULE);
    out.push('\n');
    out.push_str(&format!(
        "{:<22} {:>7} {:>9} {:>9} {:>7} {:>7} {:>10}\n",
        "Segment", "Months", "Mean", "Std Dev", "Min", "Max", "Total"
    ));
    for summary in summaries {
        out.push_str(&format!(
            "{:<22} {:>7} {:>9.0} {:>9.1} {:>7.0} {:>7.0} {:>10}\n",
            summary.segment().to_string(),
            summary.count(),
            summary.mean(),
            summary.std_dev(),
            summary.min(),
            summary.max(),
            thousands(summary.total())
        ));
    }
    out.push('\n');

    out.push_str("SEASONALITY\n");
    out.push_str(LIGHT_RULE);
    out.push('\n');
    out.push_str(&format!(
        "Average Peak Season Demand:     {} permits/month\n",
        thousands(split.peak_mean())
    ));
    out.push_str(&format!(
        "Average Off-Peak Season Demand: {} permits/month\n",
        thousands(split.off_peak_mean())
    ));
    out.push_str(&format!("Peak/Off-Peak Ratio: {:.2}x\n", split.ratio()));
    out.push_str(&format!(
        "Coverage: {} months across {} years\n",
        table.periods().len(),
        table.years_spanned()
    ));
    out
}

pub fn write_report(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

/// Whole-dollar figure with thousands separators.
fn thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let mut digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::new();
    while digits.len() > 3 {
        let split = digits.len() - 3;
        grouped = format!(",{}{}", &digits[split..], grouped);
        digits.truncate(split);
    }
    grouped = format!("{}{}", digits, grouped);
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
