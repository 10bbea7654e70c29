//! `sentily facets`: distinct filter values present in the feedback set

use anyhow::Result;

use sentily_client::Resource;
use sentily_explorer::{extract_facets, Dimension};

use crate::cli::output;
use crate::cli::{ApiContext, GlobalOptions};

/// Arguments for the facets command
#[derive(Debug, clap::Args)]
pub struct FacetsArgs {
    /// Number of records to request from the backend
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: FacetsArgs, options: &GlobalOptions) -> Result<()> {
    let ctx = ApiContext::resolve(options)?;
    let limit = args.limit.unwrap_or(ctx.config.feedback_limit);
    let records = ctx.load("feedback", Resource::feedback(limit))?;
    let facets = extract_facets(&records);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&facets)?);
        return Ok(());
    }

    let rows = Dimension::ALL
        .iter()
        .map(|dimension| {
            let values = facets.values(*dimension);
            vec![
                dimension.as_str().to_string(),
                values.len().to_string(),
                if values.is_empty() {
                    output::EMPTY_CELL.to_string()
                } else {
                    values.join(", ")
                },
            ]
        })
        .collect();
    output::print_table(&["Dimension", "Count", "Values"], rows);
    println!("From {} feedback record(s)", records.len());
    Ok(())
}
