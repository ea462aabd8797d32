use harzo_core::{GenerationError, GenerationSettings, ImageGenerator, ImageHandle, Quality};
use harzo_interaction::GeminiImageClient;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::body_partial_json;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;

const IMAGE_PATH: &str = "/v1beta/models/gemini-2.5-flash-image:generateContent";
const PRO_IMAGE_PATH: &str = "/v1beta/models/gemini-3-pro-image-preview:generateContent";
const TEXT_PATH: &str = "/v1beta/models/gemini-3-flash-preview:generateContent";

fn client_for(server: &MockServer) -> GeminiImageClient {
    GeminiImageClient::new("test-key").with_base_url(format!("{}/v1beta", server.uri()))
}

fn parts_response(parts: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{ "content": { "role": "model", "parts": parts } }]
    }))
}

#[tokio::test]
async fn generate_returns_first_inline_image() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "imageConfig": { "aspectRatio": "1:1", "imageSize": "1K" } }
        })))
        .respond_with(parts_response(json!([
            { "text": "A fox, as requested." },
            { "inlineData": { "mimeType": "image/png", "data": "img123" } }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let image = client_for(&server)
        .generate_image("a red fox in snow", &GenerationSettings::default())
        .await
        .unwrap();

    assert_eq!(image.as_str(), "data:image/png;base64,img123");
}

#[tokio::test]
async fn text_only_response_is_no_image() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(parts_response(json!([{ "text": "I cannot draw that." }])))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_image("a red fox in snow", &GenerationSettings::default())
        .await
        .unwrap_err();

    assert_eq!(err, GenerationError::NoImage { operation: "generate" });
}

#[tokio::test]
async fn rejected_key_is_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": 401, "message": "API key not valid", "status": "UNAUTHENTICATED" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_image("anything", &GenerationSettings::default())
        .await
        .unwrap_err();

    match err {
        GenerationError::Unauthorized(message) => {
            assert_eq!(message, "UNAUTHENTICATED: API key not valid")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_carries_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_image("anything", &GenerationSettings::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        GenerationError::Api {
            status: 503,
            message: "overloaded".to_string()
        }
    );
    assert!(err.is_transport());
}

#[tokio::test]
async fn ultra_hd_uses_pro_model_at_2k() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PRO_IMAGE_PATH))
        .and(body_partial_json(json!({
            "generationConfig": { "imageConfig": { "aspectRatio": "16:9", "imageSize": "2K" } }
        })))
        .respond_with(parts_response(json!([
            { "inlineData": { "mimeType": "image/jpeg", "data": "UFJP" } }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let settings = GenerationSettings {
        quality: Quality::UltraHd,
        aspect_ratio: harzo_core::AspectRatio::Widescreen,
        ..Default::default()
    };

    let image = client_for(&server)
        .generate_image("a lighthouse", &settings)
        .await
        .unwrap();

    assert_eq!(image.mime_type(), Some("image/jpeg"));
    assert_eq!(image.payload(), Some("UFJP"));
}

#[tokio::test]
async fn transform_sends_source_image_before_instruction() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(body_partial_json(json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "inlineData": { "mimeType": "image/jpeg", "data": "U1JD" } }
                ]
            }]
        })))
        .respond_with(parts_response(json!([
            { "inlineData": { "mimeType": "image/png", "data": "T1VU" } }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let source = ImageHandle::from_base64("image/jpeg", "U1JD");
    let image = client_for(&server)
        .transform_image(&source, "make it winter", &GenerationSettings::default())
        .await
        .unwrap();

    assert_eq!(image.as_str(), "data:image/png;base64,T1VU");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let instruction = body["contents"][0]["parts"][1]["text"].as_str().unwrap();
    assert!(instruction.contains("make it winter"));
    assert!(instruction.contains("strength of 50%"));
}

#[tokio::test]
async fn edits_ignore_quality_tier_and_framing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(parts_response(json!([
            { "inlineData": { "mimeType": "image/png", "data": "T1VU" } }
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let settings = GenerationSettings {
        quality: Quality::UltraHd,
        aspect_ratio: harzo_core::AspectRatio::Portrait,
        ..Default::default()
    };
    let source = ImageHandle::from_base64("image/png", "U1JD");
    let client = client_for(&server);

    client
        .transform_image(&source, "make it winter", &settings)
        .await
        .unwrap();
    client
        .persona_transform(&source, "a knight", &settings)
        .await
        .unwrap();

    for request in server.received_requests().await.unwrap() {
        assert_eq!(request.url.path(), IMAGE_PATH);
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert!(body.get("generationConfig").is_none());
    }
}

#[tokio::test]
async fn persona_without_image_is_no_image() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(parts_response(json!([])))
        .mount(&server)
        .await;

    let source = ImageHandle::from_base64("image/png", "U1JD");
    let err = client_for(&server)
        .persona_transform(&source, "a knight", &GenerationSettings::default())
        .await
        .unwrap_err();

    assert!(err.is_no_image());
}

#[tokio::test]
async fn enhance_returns_model_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(parts_response(json!([
            { "text": "  A crimson fox bounding through fresh powder, golden hour.  " }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let enhanced = client_for(&server).enhance_prompt("fox").await.unwrap();

    assert_eq!(
        enhanced,
        "A crimson fox bounding through fresh powder, golden hour."
    );
}

#[tokio::test]
async fn enhance_keeps_prompt_when_model_is_silent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let enhanced = client_for(&server).enhance_prompt("fox").await.unwrap();

    assert_eq!(enhanced, "fox");
}
