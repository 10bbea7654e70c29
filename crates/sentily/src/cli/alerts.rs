//! `sentily alerts`: urgent feedback that needs attention

use anyhow::Result;

use sentily_client::Resource;
use sentily_explorer::alerts::{display_rows, filter_by_urgency, ALERT_DISPLAY_LIMIT};
use sentily_explorer::{AlertStats, DimensionFilter, UrgencyLevel};

use crate::cli::output::{self, color_for_urgency, or_empty};
use crate::cli::{ApiContext, GlobalOptions};

/// Arguments for the alerts command
#[derive(Debug, clap::Args)]
pub struct AlertsArgs {
    /// Urgency level to keep (matches any label containing it; "all" for any)
    #[arg(long)]
    pub urgency: Option<String>,

    /// Feedback type to request from the backend
    #[arg(long = "feedback-type")]
    pub feedback_type: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: AlertsArgs, options: &GlobalOptions) -> Result<()> {
    let ctx = ApiContext::resolve(options)?;
    let urgency = DimensionFilter::from(args.urgency.clone());
    let feedback_type = DimensionFilter::from(args.feedback_type.clone());

    // Urgency stays client-side so the stats cover every alert of the
    // requested type. "all" is never sent as a feedback type.
    let type_query = match &feedback_type {
        DimensionFilter::All => None,
        DimensionFilter::Only(value) => Some(value.clone()),
    };
    let alerts = ctx.load("alerts", Resource::alerts(None, type_query))?;

    let stats = AlertStats::compute(&alerts);
    let matching = filter_by_urgency(&alerts, &urgency);
    let rows = display_rows(&matching);
    tracing::info!(
        alerts = stats.total,
        matching = matching.len(),
        "loaded alerts"
    );

    if args.json {
        let body = serde_json::json!({
            "stats": stats,
            "filters": {
                "urgency": urgency.to_string(),
                "feedback_type": feedback_type.to_string(),
            },
            "total_matches": matching.len(),
            "alerts": rows,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("ALERTS");
    println!("======");
    println!();
    println!("Total alerts:         {}", stats.total);
    println!("High urgency:         {}", stats.high_urgency);
    println!("Feedback types:       {}", stats.feedback_types);
    println!();

    if rows.is_empty() {
        println!("No alerts found for the selected urgency level.");
        return Ok(());
    }

    let table_rows = rows
        .iter()
        .map(|row| {
            let level = UrgencyLevel::of(Some(row.urgency.as_str()));
            vec![
                (row.platform.clone(), None),
                (row.urgency.clone(), color_for_urgency(level)),
                (or_empty(row.feedback_type.as_deref()), None),
                (row.details.clone(), None),
                (row.date.clone(), None),
            ]
        })
        .collect();
    output::print_table_colored(&["Platform", "Urgency", "Type", "Details", "Date"], table_rows);

    if matching.len() > ALERT_DISPLAY_LIMIT {
        println!("Showing the first {} of {} alerts", ALERT_DISPLAY_LIMIT, matching.len());
    }
    Ok(())
}
