use aurora_readme::generate::GeminiClient;
use aurora_readme::load_config::{ApiSection, Config};
use aurora_readme_core::contract::{
    DocumentReviser, LogoGenerator, SectionGenerator, SectionKind, SectionRequest, Style,
};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: &str) -> Config {
    Config {
        api: ApiSection {
            base_url: base_url.to_string(),
            model: "gemini-test".to_string(),
            image_model: "gemini-image-test".to_string(),
        },
        state_path: None,
    }
}

fn test_client(server: &MockServer) -> GeminiClient {
    GeminiClient::new("test-api-key".to_string(), &test_config(&server.uri()))
        .expect("client should build")
}

fn section_request(kind: SectionKind) -> SectionRequest<'static> {
    SectionRequest {
        repo_url: "acme/widget",
        section: kind,
        custom_section_name: None,
        style: Style::Professional,
    }
}

fn text_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
}

#[tokio::test]
async fn generate_section_returns_fragment_and_sends_key_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .and(header("x-goog-api-key", "test-api-key"))
        .and(header("content-type", "application/json"))
        .and(body_string_contains("Repository URL: acme/widget"))
        .and(body_string_contains("Section To Generate: introduction"))
        .and(body_string_contains("Your writing style should be: professional"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_response("## Introduction\nWelcome.")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let fragment = client
        .generate_section(section_request(SectionKind::Introduction))
        .await
        .unwrap();
    assert_eq!(fragment, "## Introduction\nWelcome.");
}

#[tokio::test]
async fn custom_section_name_lands_in_the_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .and(body_string_contains("Section To Generate: Benchmarks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_response("## Benchmarks\nNumbers.")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let request = SectionRequest {
        repo_url: "acme/widget",
        section: SectionKind::Custom,
        custom_section_name: Some("Benchmarks"),
        style: Style::Friendly,
    };
    let fragment = client.generate_section(request).await.unwrap();
    assert!(fragment.starts_with("## Benchmarks"));
}

#[tokio::test]
async fn tech_stack_prompt_is_biased_by_the_local_manifest() {
    // Integration tests run from the package root, so the crate's own
    // Cargo.toml is the manifest consulted here.
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .and(body_string_contains(
            "technologies based on its Cargo.toml",
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_response("## Tech Stack\n- rust")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let fragment = client
        .generate_section(section_request(SectionKind::TechStack))
        .await
        .unwrap();
    assert!(fragment.starts_with("## Tech Stack"));
}

#[tokio::test]
async fn api_error_surfaces_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .generate_section(section_request(SectionKind::Usage))
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("INVALID_ARGUMENT"), "got: {message}");
    assert!(message.contains("API key not valid"), "got: {message}");
}

#[tokio::test]
async fn empty_candidates_is_an_error_not_an_empty_section() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .generate_section(section_request(SectionKind::Features))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no text"), "got: {err}");
}

#[tokio::test]
async fn logo_returns_data_uri_from_inline_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-image-test:generateContent"))
        .and(body_string_contains("responseModalities"))
        .and(body_string_contains("abstract logo for a software project called \\\"widget\\\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [
                    { "text": "Here is your logo." },
                    { "inlineData": { "mimeType": "image/png", "data": "QUJDRA==" } }
                ] } }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let uri = client.generate_logo("widget").await.unwrap();
    assert_eq!(uri, "data:image/png;base64,QUJDRA==");
}

#[tokio::test]
async fn logo_without_image_payload_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-image-test:generateContent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response("Sorry, text only this time.")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.generate_logo("widget").await.unwrap_err();
    assert!(err.to_string().contains("no image payload"), "got: {err}");
}

#[tokio::test]
async fn revise_sends_document_and_style_and_returns_replacement() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .and(body_string_contains("The desired writing style is: concise"))
        .and(body_string_contains("# widget"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response("# widget\n\n## Intro\nPolished.")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let improved = client
        .revise("# widget\n\n## Intro\nsloppy", Style::Concise)
        .await
        .unwrap();
    assert_eq!(improved, "# widget\n\n## Intro\nPolished.");
}
