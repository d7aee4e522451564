pub mod generate;
pub mod load_config;
pub mod manifest;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;

use aurora_readme_core::assemble::Session;
use aurora_readme_core::badge::{BadgeKind, BadgeStyle};
use aurora_readme_core::contract::{SectionKind, Style};
use aurora_readme_core::session::SessionStore;

use generate::GeminiClient;
use load_config::Config;

/// CLI for aurora-readme: assemble a project README from model-generated
/// sections, a logo and badges.
#[derive(Parser)]
#[clap(
    name = "aurora-readme",
    version,
    about = "Assemble a project README from model-generated sections, a logo and badges"
)]
pub struct Cli {
    /// Path to the YAML config file
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the session state file location
    #[clap(long, global = true)]
    pub state: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set the working repository (GitHub URL or owner/repo) and start a fresh README
    Init {
        /// Repository locator, e.g. "vercel/next.js" or a github.com URL
        locator: String,
    },
    /// Create one README section and append it to the document
    Section {
        #[clap(value_enum)]
        kind: SectionArg,
        /// Name of the custom section (required with `custom`)
        #[clap(long)]
        name: Option<String>,
    },
    /// Create all standard sections in order, stopping at the first failure
    All,
    /// Create a project logo (shown in previews, never written into the document)
    Logo,
    /// Revise the whole document in the configured writing style
    Improve,
    /// Insert a repository metric badge under the title
    Badge {
        #[clap(value_enum)]
        kind: BadgeArg,
        /// Visual style for the badge image
        #[clap(long, value_enum)]
        style: Option<BadgeStyleArg>,
    },
    /// Change the writing style used for generation
    Style {
        #[clap(value_enum)]
        style: StyleArg,
    },
    /// Print the README (the logo embed is included unless --raw)
    Show {
        /// Print the raw document buffer without the logo overlay
        #[clap(long)]
        raw: bool,
    },
    /// Write the README buffer to a file
    Export {
        #[clap(default_value = "README.md")]
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionArg {
    Introduction,
    Features,
    TechStack,
    Installation,
    Usage,
    Contributing,
    License,
    Custom,
}

impl From<SectionArg> for SectionKind {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Introduction => SectionKind::Introduction,
            SectionArg::Features => SectionKind::Features,
            SectionArg::TechStack => SectionKind::TechStack,
            SectionArg::Installation => SectionKind::Installation,
            SectionArg::Usage => SectionKind::Usage,
            SectionArg::Contributing => SectionKind::Contributing,
            SectionArg::License => SectionKind::License,
            SectionArg::Custom => SectionKind::Custom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BadgeArg {
    License,
    Stars,
    Forks,
    IssuesOpen,
    IssuesPrOpen,
    Contributors,
    LastCommit,
    RepoSize,
}

impl From<BadgeArg> for BadgeKind {
    fn from(arg: BadgeArg) -> Self {
        match arg {
            BadgeArg::License => BadgeKind::License,
            BadgeArg::Stars => BadgeKind::Stars,
            BadgeArg::Forks => BadgeKind::Forks,
            BadgeArg::IssuesOpen => BadgeKind::IssuesOpen,
            BadgeArg::IssuesPrOpen => BadgeKind::IssuesPrOpen,
            BadgeArg::Contributors => BadgeKind::Contributors,
            BadgeArg::LastCommit => BadgeKind::LastCommit,
            BadgeArg::RepoSize => BadgeKind::RepoSize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BadgeStyleArg {
    Flat,
    FlatSquare,
    Plastic,
    ForTheBadge,
    Social,
}

impl From<BadgeStyleArg> for BadgeStyle {
    fn from(arg: BadgeStyleArg) -> Self {
        match arg {
            BadgeStyleArg::Flat => BadgeStyle::Flat,
            BadgeStyleArg::FlatSquare => BadgeStyle::FlatSquare,
            BadgeStyleArg::Plastic => BadgeStyle::Plastic,
            BadgeStyleArg::ForTheBadge => BadgeStyle::ForTheBadge,
            BadgeStyleArg::Social => BadgeStyle::Social,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    Professional,
    Friendly,
    Concise,
}

impl From<StyleArg> for Style {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Professional => Style::Professional,
            StyleArg::Friendly => Style::Friendly,
            StyleArg::Concise => Style::Concise,
        }
    }
}

/// Extracted async CLI logic entrypoint for integration tests and main().
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config::load(cli.config.as_deref())?;
    let store = SessionStore::new(state_path(cli.state, &config)?);
    let mut session = match store.load() {
        Some(snapshot) => Session::from_snapshot(snapshot),
        None => Session::new(),
    };

    match cli.command {
        Commands::Init { locator } => {
            let summary = session.set_repository(&locator)?.to_string();
            persist(&store, &session);
            println!("Repository set: {summary}");
            println!("You can now generate sections for your README.");
        }
        Commands::Section { kind, name } => {
            let kind: SectionKind = kind.into();
            if kind == SectionKind::Custom && name.is_none() {
                bail!("--name is required for a custom section");
            }
            if kind != SectionKind::Custom && name.is_some() {
                bail!("--name is only valid with the custom section type");
            }
            let client = GeminiClient::from_env(&config)?;
            let result = session
                .generate_section(&client, kind, name.as_deref())
                .await;
            persist(&store, &session);
            result?;
            let label = name.unwrap_or_else(|| kind.display_name().to_string());
            println!("The \"{label}\" section has been added to your README.");
        }
        Commands::All => {
            let client = GeminiClient::from_env(&config)?;
            let result = session.generate_all(&client).await;
            // Prior successful appends are kept even when a later section
            // failed, so the snapshot is written either way.
            persist(&store, &session);
            result?;
            println!("README generated: the standard sections have been created.");
        }
        Commands::Logo => {
            let client = GeminiClient::from_env(&config)?;
            let result = session.generate_logo(&client).await;
            persist(&store, &session);
            result?;
            println!("A new logo has been created for your project.");
        }
        Commands::Improve => {
            let client = GeminiClient::from_env(&config)?;
            let result = session.improve(&client).await;
            persist(&store, &session);
            result?;
            println!("Your README has been revised.");
        }
        Commands::Badge { kind, style } => {
            let kind: BadgeKind = kind.into();
            let style = style.map(BadgeStyle::from).or_else(|| kind.default_style());
            session.add_badge(kind, style)?;
            persist(&store, &session);
            println!("The {} badge has been added to your README.", kind.slug());
        }
        Commands::Style { style } => {
            session.set_style(style.into());
            persist(&store, &session);
            println!("Writing style set to {}.", session.style().as_str());
        }
        Commands::Show { raw } => {
            if raw {
                println!("{}", session.document());
            } else {
                println!("{}", session.compose_for_display());
            }
        }
        Commands::Export { path } => {
            fs::write(&path, session.document())
                .with_context(|| format!("failed to write README to {path:?}"))?;
            println!("README written to {}.", path.display());
        }
    }

    Ok(())
}

/// Resolves the session state file: flag, then config, then the user data
/// directory.
fn state_path(flag: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(path) = &config.state_path {
        return Ok(path.clone());
    }
    let base = dirs::data_dir().context("could not determine a data directory for session state")?;
    Ok(base.join("aurora-readme").join("session.json"))
}

/// Persistence failures are logged and never fatal.
fn persist(store: &SessionStore, session: &Session) {
    if let Err(e) = store.save(&session.snapshot()) {
        warn!(error = ?e, path = %store.path().display(), "failed to save session snapshot");
    }
}
