//! `sentily summary`: dashboard overview counters and trends

use anyhow::Result;
use comfy_table::Color;

use sentily_client::Resource;
use sentily_explorer::{DashboardSummary, SentimentPoint, Tone, UrgencyLevel};

use crate::cli::output::{self, color_for_tone, color_for_urgency};
use crate::cli::{ApiContext, GlobalOptions};

/// Arguments for the summary command
#[derive(Debug, clap::Args)]
pub struct SummaryArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SummaryArgs, options: &GlobalOptions) -> Result<()> {
    let ctx = ApiContext::resolve(options)?;
    let summary = ctx.load("summary", Resource::summary())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("FEEDBACK SUMMARY");
    println!("================");
    println!();
    println!("Total feedback: {}", summary.total_feedback);
    println!();

    let sentiment_rows = summary
        .sentiment_counts
        .iter()
        .map(|(label, count)| {
            let color = color_for_tone(Tone::of_sentiment(Some(label.as_str())));
            vec![
                (label.clone(), color),
                (count.to_string(), None),
                (format!("{}%", summary.percent(*count)), None),
            ]
        })
        .collect();
    output::print_table_colored(&["Sentiment", "Count", "Share"], sentiment_rows);

    if !summary.urgency_counts.is_empty() {
        let urgency_rows = summary
            .urgency_counts
            .iter()
            .map(|(label, count)| {
                vec![
                    (label.clone(), color_for_urgency(UrgencyLevel::of(Some(label.as_str())))),
                    (count.to_string(), None),
                ]
            })
            .collect();
        output::print_table_colored(&["Urgency", "Count"], urgency_rows);
    }

    if !summary.feedback_type_counts.is_empty() {
        let rows = summary
            .feedback_type_counts
            .iter()
            .map(|(label, count)| vec![label.clone(), count.to_string()])
            .collect();
        output::print_table(&["Feedback type", "Count"], rows);
    }

    print_points("Platform", &summary.platform_comparison);
    print_points("Date", &summary.trends);
    print_headline(&summary);
    Ok(())
}

fn print_points(label: &str, points: &[SentimentPoint]) {
    if points.is_empty() {
        return;
    }
    let rows = points
        .iter()
        .map(|p| {
            vec![
                (p.name.clone(), None),
                (p.positive.to_string(), Some(Color::Green)),
                (p.negative.to_string(), Some(Color::Red)),
                (p.neutral.to_string(), Some(Color::Yellow)),
                (p.total().to_string(), None),
            ]
        })
        .collect();
    output::print_table_colored(&[label, "Positive", "Negative", "Neutral", "Total"], rows);
}

fn print_headline(summary: &DashboardSummary) {
    if summary.total_feedback == 0 {
        println!("No feedback has been analyzed yet.");
        return;
    }
    println!(
        "{}% positive, {}% negative",
        summary.percent(summary.sentiment("positive")),
        summary.percent(summary.sentiment("negative"))
    );
}
