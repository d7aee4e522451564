//! # contract: interfaces to the hosted generation collaborators
//!
//! This module defines the traits and supporting types for the three
//! external calls the assembly engine awaits: section generation, logo
//! generation and full-document revision. All three are opaque
//! asynchronous functions with possible failure; transport, prompting and
//! serialization are the implementor's concern.
//!
//! ## Interface & Extensibility
//! - Implement [`SectionGenerator`], [`LogoGenerator`] and
//!   [`DocumentReviser`] to create new generation clients (API-backed,
//!   file-based, or mock/test implementations).
//! - All methods are async, returning results and using boxed error types.
//! - Error handling is uniform: implementors convert all meaningful
//!   upstream errors to a boxed trait object ([`GenerateError`]).
//!
//! ## Mocking & Testing
//! - The traits are annotated for `mockall` so consumers can generate
//!   deterministic mocks for unit/integration tests. Mocks are exported
//!   under the `test-export-mocks` feature.
//!
//! ## Contract notes
//! - A section fragment must begin with a markdown heading line.
//! - A logo is returned as a `data:<mimetype>;base64,<data>` URI; an
//!   implementation that cannot produce an image payload must error.
//! - A revision returns the complete replacement document and must leave
//!   fenced code blocks untouched.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use mockall::automock;

/// Error type shared by all collaborator calls (simple boxed error).
pub type GenerateError = Box<dyn std::error::Error + Send + Sync>;

/// The README section types a generator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Introduction,
    Features,
    Installation,
    Usage,
    Contributing,
    License,
    TechStack,
    Custom,
}

/// The fixed order in which a full-document run generates sections.
pub const STANDARD_SECTIONS: [SectionKind; 7] = [
    SectionKind::Introduction,
    SectionKind::Features,
    SectionKind::TechStack,
    SectionKind::Installation,
    SectionKind::Usage,
    SectionKind::Contributing,
    SectionKind::License,
];

impl SectionKind {
    /// The identifier used on the wire and in prompts (e.g. `tech_stack`).
    pub fn wire_name(self) -> &'static str {
        match self {
            SectionKind::Introduction => "introduction",
            SectionKind::Features => "features",
            SectionKind::Installation => "installation",
            SectionKind::Usage => "usage",
            SectionKind::Contributing => "contributing",
            SectionKind::License => "license",
            SectionKind::TechStack => "tech_stack",
            SectionKind::Custom => "custom",
        }
    }

    /// Human-readable name, used in reports and failure messages.
    pub fn display_name(self) -> &'static str {
        match self {
            SectionKind::Introduction => "Introduction",
            SectionKind::Features => "Features",
            SectionKind::Installation => "Installation",
            SectionKind::Usage => "Usage",
            SectionKind::Contributing => "Contributing",
            SectionKind::License => "License",
            SectionKind::TechStack => "Tech Stack",
            SectionKind::Custom => "Custom",
        }
    }
}

/// Writing style applied to generated and revised text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Professional,
    Friendly,
    Concise,
}

impl Style {
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Professional => "professional",
            Style::Friendly => "friendly",
            Style::Concise => "concise",
        }
    }
}

/// Represents one section generation request.
pub struct SectionRequest<'a> {
    /// The raw repository locator the user supplied (URL or owner/repo).
    pub repo_url: &'a str,
    /// Which section to generate.
    pub section: SectionKind,
    /// Name of the custom section; required iff `section` is `Custom`.
    pub custom_section_name: Option<&'a str>,
    /// Writing style for the generated content.
    pub style: Style,
}

/// Trait for generating a single README section.
///
/// The returned fragment is markdown and starts with a heading line.
/// Implemented by real clients and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait SectionGenerator: Send + Sync {
    /// Generate one markdown section fragment for the request.
    async fn generate_section<'a>(
        &self,
        req: SectionRequest<'a>,
    ) -> Result<String, GenerateError>;
}

/// Trait for generating a project logo.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait LogoGenerator: Send + Sync {
    /// Generate a logo for the named repository, returned as a
    /// `data:<mimetype>;base64,<data>` URI.
    async fn generate_logo(&self, repo_name: &str) -> Result<String, GenerateError>;
}

/// Trait for revising a complete README document.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait DocumentReviser: Send + Sync {
    /// Revise the full document and return the complete replacement text.
    async fn revise(&self, readme_content: &str, style: Style) -> Result<String, GenerateError>;
}
