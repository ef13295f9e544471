use std::path::PathBuf;
use std::time::Duration;

use chirp_engine::{
    Credentials, FailureKind, PublishSettings, PublishStage, Publisher, XPublisher,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> Credentials {
    Credentials {
        api_key: "key".into(),
        api_secret: "secret".into(),
        access_token: "token".into(),
        access_token_secret: "token-secret".into(),
    }
}

fn settings(server: &MockServer) -> PublishSettings {
    PublishSettings {
        upload_url: format!("{}/1.1/media/upload.json", server.uri()),
        post_url: format!("{}/2/tweets", server.uri()),
        ..PublishSettings::default()
    }
}

fn photo(temp: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = temp.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

async fn mount_upload(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/1.1/media/upload.json"))
        .and(header_exists("authorization"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn uploads_then_posts_with_media_id() {
    let server = MockServer::start().await;
    mount_upload(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({"media_id": 710511363345354753u64, "media_id_string": "710511363345354753"})),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .and(header_exists("authorization"))
        .and(body_json(json!({"text": "", "media": {"media_ids": ["710511363345354753"]}})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"data": {"id": "1445880548472328192", "text": ""}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let file = photo(&temp, "a.jpg", b"\xff\xd8\xff\xe0jpeg");
    let publisher = XPublisher::new(credentials(), settings(&server));

    let media_id = publisher.publish(&file).await.expect("publish ok");
    assert_eq!(media_id, "710511363345354753");

    let requests = server.received_requests().await.unwrap();
    let upload = &requests[0];
    let auth = upload.headers.get("authorization").unwrap().to_str().unwrap();
    assert!(auth.starts_with("OAuth "));
    assert!(auth.contains("oauth_consumer_key=\"key\""));
    assert!(auth.contains("oauth_signature_method=\"HMAC-SHA1\""));
    let body = String::from_utf8_lossy(&upload.body);
    assert!(body.contains("name=\"media\""));
    assert!(body.contains("filename=\"a.jpg\""));
    assert!(body.contains("image/jpeg"));
}

#[tokio::test]
async fn missing_credentials_fail_before_any_request() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let file = photo(&temp, "a.jpg", b"x");
    let creds = Credentials {
        access_token_secret: String::new(),
        ..credentials()
    };
    let publisher = XPublisher::new(creds, settings(&server));

    let err = publisher.publish(&file).await.unwrap_err();
    assert_eq!(err.stage, PublishStage::Authenticate);
    assert_eq!(err.kind, FailureKind::MissingCredentials);
    assert!(err.message.contains("ACCESS_TOKEN_SECRET"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn rejected_credentials_map_to_unauthorized() {
    let server = MockServer::start().await;
    mount_upload(
        &server,
        ResponseTemplate::new(401).set_body_string(r#"{"errors":[{"code":32}]}"#),
    )
    .await;

    let temp = TempDir::new().unwrap();
    let file = photo(&temp, "a.jpg", b"x");
    let publisher = XPublisher::new(credentials(), settings(&server));

    let err = publisher.publish(&file).await.unwrap_err();
    assert_eq!(err.stage, PublishStage::Upload);
    assert_eq!(err.kind, FailureKind::Unauthorized);
}

#[tokio::test]
async fn post_creation_failure_is_reported_at_that_stage() {
    let server = MockServer::start().await;
    mount_upload(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"media_id_string": "42"})),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let file = photo(&temp, "a.jpg", b"x");
    let publisher = XPublisher::new(credentials(), settings(&server));

    let err = publisher.publish(&file).await.unwrap_err();
    assert_eq!(err.stage, PublishStage::CreatePost);
    assert_eq!(err.kind, FailureKind::HttpStatus(429));
    assert!(err.to_string().starts_with("post creation failed (http status 429)"));
}

#[tokio::test]
async fn undecodable_upload_response_is_invalid() {
    let server = MockServer::start().await;
    mount_upload(&server, ResponseTemplate::new(200).set_body_string("not json")).await;

    let temp = TempDir::new().unwrap();
    let file = photo(&temp, "a.jpg", b"x");
    let publisher = XPublisher::new(credentials(), settings(&server));

    let err = publisher.publish(&file).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidResponse);
}

#[tokio::test]
async fn slow_platform_times_out() {
    let server = MockServer::start().await;
    mount_upload(
        &server,
        ResponseTemplate::new(200)
            .set_delay(Duration::from_millis(250))
            .set_body_json(json!({"media_id_string": "42"})),
    )
    .await;

    let temp = TempDir::new().unwrap();
    let file = photo(&temp, "a.jpg", b"x");
    let publisher = XPublisher::new(
        credentials(),
        PublishSettings {
            request_timeout: Duration::from_millis(50),
            ..settings(&server)
        },
    );

    let err = publisher.publish(&file).await.unwrap_err();
    assert_eq!(err.stage, PublishStage::Upload);
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreadable_or_oversized_media_never_reaches_the_network() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let publisher = XPublisher::new(
        credentials(),
        PublishSettings {
            max_media_bytes: 4,
            ..settings(&server)
        },
    );

    let err = publisher
        .publish(&temp.path().join("gone.jpg"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::MediaUnreadable);

    let big = photo(&temp, "big.jpg", b"0123456789");
    let err = publisher.publish(&big).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 4,
            actual: 10
        }
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}
