//! `sentily config`: show resolved configuration and paths

use sentily_protocol::paths;

use crate::cli::{resolve_config, BaseUrlSource, GlobalOptions};

/// Arguments for the config command
#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    /// Show resolved configuration in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Run the config command - shows the effective settings and where they live
pub fn run(args: ConfigArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let home = paths::sentily_home();
    let config_path = paths::default_config_path();
    let session_path = paths::default_session_path();
    let logs = paths::default_logs_dir();
    let (config, source) = resolve_config(options, &config_path)?;

    if args.json {
        let body = serde_json::json!({
            "home": home.to_string_lossy(),
            "config_file": {
                "path": config_path.to_string_lossy(),
                "exists": config_path.exists(),
            },
            "session_file": {
                "path": session_path.to_string_lossy(),
                "exists": session_path.exists(),
            },
            "logs_dir": logs.to_string_lossy(),
            "api": config,
            "base_url_source": source,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        let source_label = match source {
            BaseUrlSource::Flag => "--api-base / SENTILY_API_BASE",
            BaseUrlSource::ConfigFile => "config file",
            BaseUrlSource::Default => "default",
        };
        let exists = |p: &std::path::Path| if p.exists() { "exists" } else { "not found" };

        println!("SENTILY CONFIGURATION");
        println!("=====================");
        println!();
        println!("Home:     {}", home.display());
        println!("Config:   {} ({})", config_path.display(), exists(&config_path));
        println!("Session:  {} ({})", session_path.display(), exists(&session_path));
        println!("Logs:     {}", logs.display());
        println!();
        println!("API base URL:    {} (from {})", config.base_url, source_label);
        println!("Feedback limit:  {}", config.feedback_limit);
        println!("Page size:       {}", config.page_size);
        println!(
            "Request timeout: {}",
            config
                .request_timeout_secs
                .map(|s| format!("{}s", s))
                .unwrap_or_else(|| "none".to_string())
        );
    }

    Ok(())
}
