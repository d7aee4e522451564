//! Generation client: bridges the collaborator traits in
//! [`aurora_readme_core::contract`] to the hosted `generateContent` model
//! API, facilitating section, logo and revision calls from the CLI.
//!
//! - Construct [`GeminiClient`] from the loaded [`Config`] plus the
//!   `GEMINI_API_KEY` environment variable.
//! - The three trait implementations build the prompt, post one request
//!   and map the response; all transport, serialization, and error
//!   handling are encapsulated here.
//! - Failures are converted to boxed [`GenerateError`]s and are **not**
//!   retried: recovery is "leave last-good state and let the user retry
//!   the action".

use std::time::Duration;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use aurora_readme_core::contract::{
    DocumentReviser, GenerateError, LogoGenerator, SectionGenerator, SectionRequest, SectionKind,
    Style,
};

use crate::load_config::Config;
use crate::manifest;

/// HTTP client for the hosted generation API. One instance serves all
/// three collaborator roles.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    image_model: String,
}

impl GeminiClient {
    /// Builds a client from the config plus the `GEMINI_API_KEY`
    /// environment variable.
    pub fn from_env(config: &Config) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY must be set (a .env file in the working directory works)")?;
        Self::new(api_key, config)
    }

    pub fn new(api_key: String, config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&api_key).context("invalid API key header value")?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            model: config.api.model.clone(),
            image_model: config.api.image_model.clone(),
        })
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerateError> {
        let url = format!("{}/models/{model}:generateContent", self.base_url);
        debug!(model, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| -> GenerateError { format!("HTTP request failed: {e}").into() })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| -> GenerateError { format!("failed to read response body: {e}").into() })?;

        if !status.is_success() {
            error!(%status, model, "generateContent request failed");
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "model API error ({}): {}",
                    api_err.error.status, api_err.error.message
                ),
                Err(_) => format!("model API returned {status}: {body}"),
            };
            return Err(message.into());
        }

        serde_json::from_str(&body)
            .map_err(|e| -> GenerateError { format!("failed to parse API response: {e}").into() })
    }
}

#[async_trait]
impl SectionGenerator for GeminiClient {
    async fn generate_section<'a>(
        &self,
        req: SectionRequest<'a>,
    ) -> Result<String, GenerateError> {
        let tech_stack = if req.section == SectionKind::TechStack {
            Some(manifest::tech_stack_instruction())
        } else {
            None
        };
        let prompt = section_prompt(&req, tech_stack.as_deref());

        let response = self
            .generate(&self.model, &GenerateContentRequest::text(prompt))
            .await?;
        let text = response
            .text()
            .ok_or_else(|| -> GenerateError { "model returned no text for the section".into() })?;
        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl DocumentReviser for GeminiClient {
    async fn revise(&self, readme_content: &str, style: Style) -> Result<String, GenerateError> {
        let prompt = improve_prompt(readme_content, style);

        let response = self
            .generate(&self.model, &GenerateContentRequest::text(prompt))
            .await?;
        let text = response
            .text()
            .ok_or_else(|| -> GenerateError { "model returned no revised document".into() })?;
        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl LogoGenerator for GeminiClient {
    async fn generate_logo(&self, repo_name: &str) -> Result<String, GenerateError> {
        let request = GenerateContentRequest::text(logo_prompt(repo_name))
            .with_response_modalities(&["TEXT", "IMAGE"]);

        let response = self.generate(&self.image_model, &request).await?;
        let inline = response.inline_data().ok_or_else(|| -> GenerateError {
            "image generation produced no image payload".into()
        })?;
        Ok(format!("data:{};base64,{}", inline.mime_type, inline.data))
    }
}

fn section_prompt(req: &SectionRequest<'_>, tech_stack_instruction: Option<&str>) -> String {
    let section_label = req.custom_section_name.unwrap_or(req.section.wire_name());

    let mut prompt = String::from(
        "You are a helpful AI assistant that generates README sections for GitHub repositories.\n\
         \n\
         Based on the repository URL and the desired section type, create a relevant and informative section.\n\
         \n\
         Your response must start with a Markdown heading for the section (e.g., \"## Introduction\").\n",
    );
    if let Some(instruction) = tech_stack_instruction {
        prompt.push('\n');
        prompt.push_str(instruction);
        prompt.push('\n');
    }
    prompt.push_str(&format!(
        "\nYour writing style should be: {}.\n\
         \n\
         Repository URL: {}\n\
         Section To Generate: {}\n",
        req.style.as_str(),
        req.repo_url,
        section_label
    ));
    prompt
}

fn improve_prompt(readme_content: &str, style: Style) -> String {
    format!(
        "You are an expert technical writer and AI assistant specializing in creating \
         high-quality GitHub README files.\n\
         \n\
         Your task is to review the provided README content and improve it significantly.\n\
         \n\
         Follow these instructions:\n\
         1. **Correct Grammar and Spelling:** Fix any grammatical errors, spelling mistakes, and typos.\n\
         2. **Enhance Clarity and Conciseness:** Rephrase sentences to be clearer, more concise, and easier to understand.\n\
         3. **Ensure Professional Tone:** Maintain a professional and engaging tone suitable for a software project. The desired writing style is: {}.\n\
         4. **Improve Formatting:** Ensure consistent and clean Markdown formatting. Use headings, lists, and code blocks effectively.\n\
         5. **Check for Completeness:** If you notice any obvious missing sections (like a \"License\" or \"Usage\" section if they seem necessary), you can add a placeholder for them, but prioritize improving the existing content.\n\
         6. **Do Not Change Core Meaning:** The goal is to improve the presentation and readability, not to alter the fundamental information or instructions.\n\
         7. **Preserve Code Blocks:** Do not modify the content inside code blocks (e.g., ```bash ... ```).\n\
         8. **Return the Full README:** Your output must be the complete, improved README content.\n\
         \n\
         Here is the README content to improve:\n\
         ---\n\
         {}\n\
         ---\n",
        style.as_str(),
        readme_content
    )
}

fn logo_prompt(repo_name: &str) -> String {
    format!(
        "Generate a simple, clean, modern, abstract logo for a software project called \
         \"{repo_name}\". The logo should be square and suitable for use on a white or \
         light-colored background. Do not include any text in the logo."
    )
}

// --- Wire types for the generateContent endpoint ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    fn text(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt),
                    inline_data: None,
                }],
            }],
            generation_config: None,
        }
    }

    fn with_response_modalities(mut self, modalities: &[&str]) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_modalities: modalities.iter().map(|m| m.to_string()).collect(),
        });
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, if any.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// First inline image payload of the first candidate, if any.
    fn inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
    }
}
