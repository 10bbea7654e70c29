//! `sentily feedback`: the feedback explorer
//!
//! Fetches once, then filters, paginates and renders client-side. With
//! `--show N` a single record from the filtered list is printed in full,
//! raw backend object included.

use anyhow::Result;
use serde::Serialize;

use sentily_client::Resource;
use sentily_explorer::paginate::PageState;
use sentily_explorer::{Dimension, ExplorerView, FeedbackRecord, FilterState};

use crate::cli::error::HelpfulError;
use crate::cli::output::{self, color_for_tone, color_for_urgency, or_empty, truncate};
use crate::cli::{ApiContext, GlobalOptions};

const MESSAGE_PREVIEW_CHARS: usize = 80;

/// Arguments for the feedback command
#[derive(Debug, clap::Args)]
pub struct FeedbackArgs {
    /// Number of records to request from the backend
    #[arg(long)]
    pub limit: Option<usize>,

    /// Case-insensitive text search over message, body and submitter
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sentiment to keep ("all" for any)
    #[arg(long)]
    pub sentiment: Option<String>,

    /// Urgency to keep ("all" for any)
    #[arg(long)]
    pub urgency: Option<String>,

    /// Platform to keep ("all" for any)
    #[arg(long)]
    pub platform: Option<String>,

    /// Page to display (1-based, clamped to the last page)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Records per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Show one record in detail (1-based position in the filtered list)
    #[arg(long, value_name = "INDEX")]
    pub show: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl FeedbackArgs {
    fn filters(&self) -> FilterState {
        FilterState {
            search_term: self.search.clone().unwrap_or_default(),
            sentiment: self.sentiment.clone().into(),
            urgency: self.urgency.clone().into(),
            platform: self.platform.clone().into(),
        }
    }
}

/// One table row, with display fallbacks applied.
#[derive(Debug, Serialize)]
struct FeedbackRow<'a> {
    /// 1-based position in the filtered list
    position: usize,
    user: &'a str,
    message: &'a str,
    sentiment: Option<&'a str>,
    urgency: Option<&'a str>,
    platform: Option<&'a str>,
    date: Option<&'a str>,
}

impl<'a> FeedbackRow<'a> {
    fn new(position: usize, record: &'a FeedbackRecord) -> Self {
        Self {
            position,
            user: record.identity(),
            message: record.message(),
            sentiment: record.sentiment(),
            urgency: record.urgency(),
            platform: record.platform(),
            date: record.date(),
        }
    }
}

pub fn run(args: FeedbackArgs, options: &GlobalOptions) -> Result<()> {
    let ctx = ApiContext::resolve(options)?;
    let limit = args.limit.unwrap_or(ctx.config.feedback_limit);
    let page_size = args.page_size.unwrap_or(ctx.config.page_size).max(1);

    let records = ctx.load("feedback", Resource::feedback(limit))?;
    tracing::info!(records = records.len(), limit, "loaded feedback");

    let mut view = ExplorerView::with_records(records, page_size);
    view.set_filters(args.filters());
    view.go_to_page(args.page);

    match args.show {
        Some(position) => show_record(&mut view, position, args.json),
        None => list_page(&mut view, args.json),
    }
}

fn list_page(view: &mut ExplorerView, json: bool) -> Result<()> {
    let filters = view.filters().clone();
    let facets = view.facets().clone();
    let page_state = view.page_state();
    let page = view.current_page();
    let offset = page.item_range.map(|(first, _)| first).unwrap_or(1);
    let rows: Vec<FeedbackRow> = page
        .records
        .iter()
        .enumerate()
        .map(|(i, record)| FeedbackRow::new(offset + i, record))
        .collect();

    if json {
        let body = serde_json::json!({
            "filters": filters,
            "active_filters": filters.active_filter_count(),
            "page": page.number,
            "page_size": page_state.items_per_page(),
            "total_pages": page.total_pages,
            "page_numbers": PageState::page_numbers(page.total_pages).collect::<Vec<_>>(),
            "total_matches": page.total_matches,
            "total_records": page.total_records,
            "showing": page
                .item_range
                .map(|(from, to)| serde_json::json!({"from": from, "to": to})),
            "items": rows,
            "facets": facets,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if page.total_records == 0 {
        println!("No feedback available.");
        return Ok(());
    }
    if page.total_matches == 0 {
        println!("No feedback matches your filters.");
        print_filter_hint(&filters);
        return Ok(());
    }

    let table_rows = page
        .records
        .iter()
        .zip(rows.iter())
        .map(|(record, row)| {
            vec![
                (row.position.to_string(), None),
                (row.user.to_string(), None),
                (truncate(row.message, MESSAGE_PREVIEW_CHARS), None),
                (or_empty(row.sentiment), color_for_tone(record.sentiment_tone())),
                (or_empty(row.urgency), color_for_urgency(record.urgency_level())),
                (or_empty(row.platform), None),
                (or_empty(row.date), None),
            ]
        })
        .collect();
    output::print_table_colored(
        &["#", "User", "Message", "Sentiment", "Urgency", "Platform", "Date"],
        table_rows,
    );

    if let Some((from, to)) = page.item_range {
        let mut line = format!("Showing {} to {} of {} results", from, to, page.total_matches);
        if page.total_matches != page.total_records {
            line.push_str(&format!(" (filtered from {})", page.total_records));
        }
        println!("{}", line);
    }
    println!(
        "{}",
        output::page_bar(page.number, page.total_pages, PageState::page_numbers(page.total_pages))
    );
    print_filter_hint(&filters);
    Ok(())
}

fn print_filter_hint(filters: &FilterState) {
    let active = filters.active_filter_count();
    if active == 0 && filters.search_term.is_empty() {
        return;
    }
    let mut parts = Vec::new();
    if !filters.search_term.is_empty() {
        parts.push(format!("search \"{}\"", filters.search_term));
    }
    for dimension in Dimension::ALL {
        let filter = filters.dimension(dimension);
        if filter.is_active() {
            parts.push(format!("{}={}", dimension.as_str(), filter));
        }
    }
    println!("Filters: {}", parts.join(", "));
}

fn show_record(view: &mut ExplorerView, position: usize, json: bool) -> Result<()> {
    let matches = view.match_count();
    let record = match position.checked_sub(1) {
        Some(idx) => view.record_at(idx),
        None => None,
    }
    .ok_or_else(|| HelpfulError::record_out_of_range(position, matches))?;

    if json {
        let body = serde_json::json!({
            "record": FeedbackRow::new(position, record),
            "feedback_type": record.feedback_type(),
            "recommended_action": record.recommended_action(),
            "raw": record.raw(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("FEEDBACK #{}", position);
    println!("============");
    println!();
    println!("User:      {}", record.identity());
    println!("Sentiment: {}", or_empty(record.sentiment()));
    println!("Urgency:   {}", or_empty(record.urgency()));
    println!("Platform:  {}", or_empty(record.platform()));
    println!("Date:      {}", or_empty(record.date()));
    if let Some(kind) = record.feedback_type() {
        println!("Type:      {}", kind);
    }
    if let Some(action) = record.recommended_action() {
        println!("Action:    {}", action);
    }
    println!();
    println!("{}", record.message());
    println!();
    println!("Raw data:");
    println!("{}", serde_json::to_string_pretty(record.raw())?);
    Ok(())
}
