//! CLI session management
//!
//! Mock sign-in: any non-empty email and password is accepted and the
//! resulting user is remembered in `~/.sentily/session.toml`. The password
//! is never stored. Nothing is sent to the backend.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use sentily_protocol::paths;

use crate::cli::error::HelpfulError;

/// Dashboard role chosen at sign-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Client => "client",
        }
    }

    /// Display name given to the mock user of this role
    fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Alex Doe",
            Role::Client => "John Client",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
}

/// Session file contents
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub user: Option<SessionUser>,
}

impl Session {
    /// Read the session file; a missing file means signed out.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| HelpfulError::session_unreadable(path, &e.to_string()))?;
        let session = toml::from_str(&content)
            .map_err(|e| HelpfulError::session_unreadable(path, &e.to_string()))?;
        Ok(session)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Mock credential check. Returns the signed-in session or an error for
    /// empty credentials.
    pub fn login(email: &str, password: &str, role: Role) -> Result<Self, HelpfulError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(HelpfulError::new("Invalid credentials")
                .with_context("Both an email and a password are required")
                .with_suggestion("TRY: sentily login --email you@example.com --password PASSWORD"));
        }
        Ok(Self {
            user: Some(SessionUser {
                id: "1".to_string(),
                email: email.to_string(),
                role,
                name: role.display_name().to_string(),
            }),
        })
    }
}

/// Arguments for the login command
#[derive(Debug, clap::Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    /// Dashboard role
    #[arg(long, value_enum, default_value_t = Role::Client)]
    pub role: Role,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the whoami command
#[derive(Debug, clap::Args)]
pub struct WhoamiArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn session_path() -> PathBuf {
    paths::default_session_path()
}

pub fn run_login(args: LoginArgs) -> Result<()> {
    let session = Session::login(&args.email, &args.password, args.role)?;
    session.save(&session_path())?;
    tracing::info!(role = args.role.as_str(), "signed in");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else if let Some(user) = &session.user {
        println!("Signed in as {} <{}> ({})", user.name, user.email, user.role.as_str());
    }
    Ok(())
}

pub fn run_logout() -> Result<()> {
    let path = session_path();
    if path.exists() {
        std::fs::remove_file(&path)?;
        println!("Signed out.");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}

pub fn run_whoami(args: WhoamiArgs) -> Result<()> {
    let session = Session::load(&session_path())?;

    if args.json {
        let body = serde_json::json!({
            "authenticated": session.is_authenticated(),
            "user": session.user,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    match &session.user {
        Some(user) => {
            println!("{} <{}>", user.name, user.email);
            println!("Role: {}", user.role.as_str());
        }
        None => println!("Not signed in. Run: sentily login --email EMAIL --password PASSWORD"),
    }
    Ok(())
}
