//! HTTPバックエンドのテスト（wiremock）

use codeshift::client::HttpBackend;
use codeshift_common::backend::MultiFileInput;
use codeshift_common::{Backend, BackendError, SubmissionBundle};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_backend(ai: &MockServer, deploy: &MockServer) -> HttpBackend {
    HttpBackend::new(ai.uri(), deploy.uri())
        .expect("client build failed")
        .with_timeout(5)
        .with_deploy_timeout(5)
}

#[tokio::test]
async fn test_unified_operation_posts_code_field() {
    let ai = MockServer::start().await;
    let deploy = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/unified_operation"))
        .and(body_json(json!({ "code": "### User Prompt:\nupgrade" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "converted_code": "class A { }", "suggestions": "ok" }
        })))
        .expect(1)
        .mount(&ai)
        .await;

    let backend = create_backend(&ai, &deploy);
    let result = backend
        .unified_operation("### User Prompt:\nupgrade")
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(result.converted_code, "class A { }");
    assert_eq!(result.suggestions.as_deref(), Some("ok"));
}

#[tokio::test]
async fn test_process_multi_files_body_shape() {
    let ai = MockServer::start().await;
    let deploy = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process_multi_files"))
        .and(body_json(json!({
            "prompt": "rename",
            "files": [{ "file_name": "A.java", "content": "class A {}" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [{ "file_name": "A.java", "content": "class A2 {}", "suggestions": ["a", "b"] }]
        })))
        .mount(&ai)
        .await;

    let backend = create_backend(&ai, &deploy);
    let files = vec![MultiFileInput {
        file_name: "A.java".into(),
        content: "class A {}".into(),
    }];
    let results = backend
        .process_multi_files("rename", &files)
        .await
        .unwrap()
        .into_files()
        .unwrap();

    assert_eq!(results[0].content, "class A2 {}");
    assert_eq!(results[0].suggestions.as_ref().unwrap().joined(), "a\nb");
}

#[tokio::test]
async fn test_deploy_goes_to_deploy_server() {
    let ai = MockServer::start().await;
    let deploy = MockServer::start().await;
    let bundle = SubmissionBundle::encode("A.java", "class A {}", "kind: Job", "FROM openjdk:17");

    Mock::given(method("POST"))
        .and(path("/submit_files"))
        .and(body_json(serde_json::to_value(&bundle).unwrap()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "kubectl_logs": "T0sK"
        })))
        .expect(1)
        .mount(&deploy)
        .await;

    let backend = create_backend(&ai, &deploy);
    let response = backend.deploy(&bundle).await.unwrap();

    assert!(response.is_success());
    assert_eq!(response.kubectl_logs.as_deref(), Some("T0sK"));
}

#[tokio::test]
async fn test_non_2xx_is_http_error() {
    let ai = MockServer::start().await;
    let deploy = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate_unit_test"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&ai)
        .await;

    let backend = create_backend(&ai, &deploy);
    let err = backend.generate_unit_test("A.java", "class A {}").await.unwrap_err();

    assert_eq!(
        err,
        BackendError::Http {
            status: 500,
            body: "internal".into()
        }
    );
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let ai = MockServer::start().await;
    let deploy = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/deployment_files"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&ai)
        .await;

    let backend = create_backend(&ai, &deploy);
    let err = backend.deployment_files("A.java", "class A {}").await.unwrap_err();

    assert!(matches!(err, BackendError::Decode(_)));
}

#[tokio::test]
async fn test_slow_backend_is_timeout() {
    let ai = MockServer::start().await;
    let deploy = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/unified_operation"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "result": { "converted_code": "x" } }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&ai)
        .await;

    let backend = create_backend(&ai, &deploy).with_timeout(1);
    let err = backend.unified_operation("x").await.unwrap_err();

    assert_eq!(err, BackendError::Timeout { seconds: 1 });
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let backend = HttpBackend::new("http://127.0.0.1:9", "http://127.0.0.1:9")
        .unwrap()
        .with_timeout(5);
    let err = backend.unified_operation("x").await.unwrap_err();

    assert!(matches!(err, BackendError::Network(_)));
}
