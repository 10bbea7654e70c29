//! `sentily health`: backend liveness check

use anyhow::Result;

use sentily_client::Resource;

use crate::cli::{ApiContext, GlobalOptions};

/// Arguments for the health command
#[derive(Debug, clap::Args)]
pub struct HealthArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: HealthArgs, options: &GlobalOptions) -> Result<()> {
    let ctx = ApiContext::resolve(options)?;
    let health = ctx.load("backend health", Resource::health())?;

    if args.json {
        let body = serde_json::json!({
            "base_url": ctx.client.base_url(),
            "reachable": true,
            "status": health.status,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        let status = if health.status.is_empty() { "ok" } else { health.status.as_str() };
        println!("Backend at {}: {}", ctx.client.base_url(), status);
    }
    Ok(())
}
