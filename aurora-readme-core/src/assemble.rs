//! # assemble: the document assembly engine
//!
//! This module owns the single evolving README buffer and defines the
//! deterministic merge rules for everything that lands in it: seeding on
//! repository selection, section appends, badge insertion under the title,
//! wholesale revision, and the display-only logo overlay.
//!
//! # Major Types
//! - [`Session`]: the session-state struct — document text, repository
//!   identity, logo reference, writing style and generation status. All
//!   mutation goes through its methods; there are no ambient globals.
//! - [`AssembleError`]: error cases surfaced to the caller.
//!
//! # Responsibilities
//! - Sequential, fail-fast orchestration of the full-document run: each
//!   section call is awaited before the next begins, the loop stops at the
//!   first failure, and prior successful appends are retained. This is a
//!   correctness requirement for deterministic ordering, not a
//!   parallelism opportunity.
//! - On any failed external call the document is left in its last-good
//!   state; nothing is retried automatically.
//! - At most one generation is in flight: operations are rejected with
//!   [`AssembleError::Busy`] while the status is non-idle.
//!
//! # Navigation
//! - Entry points: [`Session::set_repository`], [`Session::generate_section`],
//!   [`Session::generate_all`], [`Session::add_badge`], [`Session::improve`],
//!   [`Session::generate_logo`], [`Session::compose_for_display`].

use std::fmt;

use thiserror::Error;
use tracing::{error, info};

use crate::badge::{self, BadgeKind, BadgeStyle};
use crate::contract::{
    DocumentReviser, GenerateError, LogoGenerator, SectionGenerator, SectionKind, SectionRequest,
    Style, STANDARD_SECTIONS,
};
use crate::locator::{self, LocatorError, RepoIdentity};
use crate::session::SessionSnapshot;

/// Tag identifying the at-most-one operation currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Section(SectionKind),
    All,
    Logo,
    Improve,
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationStatus::Idle => write!(f, "idle"),
            GenerationStatus::Section(kind) => write!(f, "{} section", kind.display_name()),
            GenerationStatus::All => write!(f, "full README"),
            GenerationStatus::Logo => write!(f, "logo"),
            GenerationStatus::Improve => write!(f, "improvement"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error(transparent)]
    InvalidLocator(#[from] LocatorError),
    #[error("no repository has been set")]
    NoRepository,
    #[error("cannot improve an empty document")]
    EmptyDocument,
    #[error("a {0} generation is already in flight")]
    Busy(GenerationStatus),
    #[error("failed to create the {section} section")]
    SectionFailed {
        section: String,
        #[source]
        source: GenerateError,
    },
    #[error("logo creation failed")]
    LogoFailed(#[source] GenerateError),
    #[error("README improvement failed")]
    ImproveFailed(#[source] GenerateError),
}

/// Session state owned by one controller. There is exactly one live
/// document per session; every mutation overwrites the previous value.
#[derive(Debug, Default)]
pub struct Session {
    repo_url: Option<String>,
    repo: Option<RepoIdentity>,
    document: String,
    logo_data_uri: Option<String>,
    style: Style,
    status: GenerationStatus,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a session from a persisted snapshot. Generation status is
    /// transient and always starts idle.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            repo_url: snapshot.repo_url,
            repo: snapshot.repo_details,
            document: snapshot.readme_content,
            logo_data_uri: snapshot.logo_data_uri,
            style: snapshot.style,
            status: GenerationStatus::Idle,
        }
    }

    /// Projects the current state for persistence.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            repo_url: self.repo_url.clone(),
            repo_details: self.repo.clone(),
            readme_content: self.document.clone(),
            logo_data_uri: self.logo_data_uri.clone(),
            style: self.style,
        }
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn repository(&self) -> Option<&RepoIdentity> {
        self.repo.as_ref()
    }

    pub fn repo_url(&self) -> Option<&str> {
        self.repo_url.as_deref()
    }

    pub fn logo_data_uri(&self) -> Option<&str> {
        self.logo_data_uri.as_deref()
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    /// Direct user edit: replaces the buffer with arbitrary text.
    pub fn set_document(&mut self, text: impl Into<String>) {
        self.document = text.into();
    }

    /// Parses the locator and seeds the document: the buffer becomes a
    /// single `# <repo>` title line and the logo reference is cleared.
    /// A rejected locator leaves all state untouched.
    pub fn set_repository(&mut self, raw: &str) -> Result<&RepoIdentity, AssembleError> {
        let identity = locator::locate(raw)?;
        info!(owner = %identity.owner, repo = %identity.repo, "repository set");
        self.repo_url = Some(raw.to_string());
        self.document = format!("# {}", identity.repo);
        self.logo_data_uri = None;
        Ok(self.repo.insert(identity))
    }

    /// Appends a generated fragment. If the trimmed document is non-empty
    /// the result is `trim(document) + "\n\n" + fragment`; otherwise the
    /// fragment lands verbatim. Trim-then-join keeps the buffer from
    /// accumulating more than one separating blank line.
    pub fn append_section(&mut self, fragment: &str) {
        if self.document.trim().is_empty() {
            self.document = fragment.to_string();
        } else {
            let mut next = self.document.trim().to_string();
            next.push_str("\n\n");
            next.push_str(fragment);
            self.document = next;
        }
    }

    /// Generates one section and appends it on success.
    pub async fn generate_section<G>(
        &mut self,
        generator: &G,
        kind: SectionKind,
        custom_name: Option<&str>,
    ) -> Result<(), AssembleError>
    where
        G: SectionGenerator + ?Sized,
    {
        let repo_url = self.repo_url.clone().ok_or(AssembleError::NoRepository)?;
        self.begin(GenerationStatus::Section(kind))?;
        let label = custom_name.unwrap_or(kind.display_name()).to_string();
        info!(section = %label, "generating README section");

        let request = SectionRequest {
            repo_url: &repo_url,
            section: kind,
            custom_section_name: custom_name,
            style: self.style,
        };
        let result = generator.generate_section(request).await;
        self.finish();

        match result {
            Ok(fragment) => {
                self.append_section(&fragment);
                info!(section = %label, "section appended");
                Ok(())
            }
            Err(e) => {
                error!(section = %label, error = ?e, "section generation failed");
                Err(AssembleError::SectionFailed {
                    section: label,
                    source: e,
                })
            }
        }
    }

    /// Generates the standard sections in their fixed order.
    ///
    /// The document is reseeded to `# <repo>` first; each call is awaited
    /// before the next begins. The loop stops at the first failure: the
    /// failed section is not appended, all prior appends remain, and the
    /// error names the failed section. No rollback, no retry.
    pub async fn generate_all<G>(&mut self, generator: &G) -> Result<(), AssembleError>
    where
        G: SectionGenerator + ?Sized,
    {
        let (repo_url, repo_name) = match (&self.repo_url, &self.repo) {
            (Some(url), Some(identity)) => (url.clone(), identity.repo.clone()),
            _ => return Err(AssembleError::NoRepository),
        };
        self.begin(GenerationStatus::All)?;
        info!(repo = %repo_name, sections = STANDARD_SECTIONS.len(), "generating all standard sections");

        self.document = format!("# {repo_name}");

        for kind in STANDARD_SECTIONS {
            let request = SectionRequest {
                repo_url: &repo_url,
                section: kind,
                custom_section_name: None,
                style: self.style,
            };
            match generator.generate_section(request).await {
                Ok(fragment) => {
                    // A buffer already ending in a blank-line pair needs
                    // no extra separator.
                    if !self.document.trim().is_empty() && !self.document.ends_with("\n\n") {
                        self.document.push_str("\n\n");
                    }
                    self.document.push_str(&fragment);
                    info!(section = kind.display_name(), "section appended");
                }
                Err(e) => {
                    error!(
                        section = kind.display_name(),
                        error = ?e,
                        "stopping full generation at first failure"
                    );
                    self.finish();
                    return Err(AssembleError::SectionFailed {
                        section: kind.display_name().to_string(),
                        source: e,
                    });
                }
            }
        }

        self.finish();
        info!("all standard sections generated");
        Ok(())
    }

    /// Constructs a badge for the current repository and splices it in.
    pub fn add_badge(
        &mut self,
        kind: BadgeKind,
        style: Option<BadgeStyle>,
    ) -> Result<(), AssembleError> {
        let repo = self.repo.as_ref().ok_or(AssembleError::NoRepository)?;
        let markdown = badge::badge_markdown(kind, repo, style);
        info!(badge = kind.slug(), "inserting badge");
        self.insert_badge(&markdown);
        Ok(())
    }

    /// Splices badge markdown onto the badge line directly under the
    /// title.
    ///
    /// The first line starting with `# ` is the title. The badge line is
    /// the line after the first blank line following the title (both are
    /// created when missing); a line already containing the badge host
    /// marker is reused so consecutive insertions accumulate onto one
    /// line, space-separated, in call order. Without a title line the
    /// markdown is prepended to the whole document. The placement target
    /// is idempotent; the content is not — repeated identical insertions
    /// duplicate the markdown.
    pub fn insert_badge(&mut self, badge_markdown: &str) {
        let mut lines: Vec<String> = self.document.split('\n').map(str::to_string).collect();

        let Some(title_index) = lines.iter().position(|line| line.starts_with("# ")) else {
            self.document = format!("{badge_markdown} {}", self.document);
            return;
        };

        // First blank line after the title; append one if the scan runs
        // off the end of the document.
        let mut insert_index = title_index + 1;
        while insert_index < lines.len() && !lines[insert_index].trim().is_empty() {
            insert_index += 1;
        }
        if insert_index == lines.len() {
            lines.insert(insert_index, String::new());
        }

        let badge_line_index = insert_index + 1;
        if badge_line_index >= lines.len() || !lines[badge_line_index].contains(badge::BADGE_HOST)
        {
            lines.insert(badge_line_index, String::new());
        }

        let line = &mut lines[badge_line_index];
        if line.is_empty() {
            line.push_str(badge_markdown);
        } else {
            line.push(' ');
            line.push_str(badge_markdown);
        }
        self.document = lines.join("\n");
    }

    /// Submits the full document for revision and replaces it wholesale
    /// on success. On failure the document is left byte-for-byte
    /// unchanged.
    pub async fn improve<R>(&mut self, reviser: &R) -> Result<(), AssembleError>
    where
        R: DocumentReviser + ?Sized,
    {
        if self.document.is_empty() {
            return Err(AssembleError::EmptyDocument);
        }
        self.begin(GenerationStatus::Improve)?;
        info!(bytes = self.document.len(), "submitting README for revision");

        let result = reviser.revise(&self.document, self.style).await;
        self.finish();

        match result {
            Ok(improved) => {
                self.document = improved;
                info!("README replaced with revised text");
                Ok(())
            }
            Err(e) => {
                error!(error = ?e, "revision failed; document left unchanged");
                Err(AssembleError::ImproveFailed(e))
            }
        }
    }

    /// Generates a logo for the current repository and stores its data
    /// URI. The logo never enters the document buffer.
    pub async fn generate_logo<L>(&mut self, generator: &L) -> Result<(), AssembleError>
    where
        L: LogoGenerator + ?Sized,
    {
        let repo_name = self
            .repo
            .as_ref()
            .map(|identity| identity.repo.clone())
            .ok_or(AssembleError::NoRepository)?;
        self.begin(GenerationStatus::Logo)?;
        info!(repo = %repo_name, "generating logo");

        let result = generator.generate_logo(&repo_name).await;
        self.finish();

        match result {
            Ok(data_uri) => {
                self.logo_data_uri = Some(data_uri);
                info!("logo created");
                Ok(())
            }
            Err(e) => {
                error!(error = ?e, "logo generation failed");
                Err(AssembleError::LogoFailed(e))
            }
        }
    }

    /// Read-only projection for rendering: when a logo is set, a centered
    /// image embed plus a blank line is prefixed ahead of the document.
    /// The projection is never written back into the buffer.
    pub fn compose_for_display(&self) -> String {
        match &self.logo_data_uri {
            Some(uri) => format!(
                "<p align=\"center\"><img src=\"{uri}\" alt=\"logo\" width=\"120\"></p>\n\n{}",
                self.document
            ),
            None => self.document.clone(),
        }
    }

    fn begin(&mut self, status: GenerationStatus) -> Result<(), AssembleError> {
        if self.status != GenerationStatus::Idle {
            return Err(AssembleError::Busy(self.status));
        }
        self.status = status;
        Ok(())
    }

    fn finish(&mut self) {
        self.status = GenerationStatus::Idle;
    }
}
