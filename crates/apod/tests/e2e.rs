// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: REQ client -> REP server -> NASA client (wiremock) -> presenter.

use std::sync::Arc;
use std::time::Duration;

use apod_core::{ApodError, ImageStatus, Reply};
use apod_nasa::{NasaClient, NasaSource};
use apod_presenter::ImagePresenter;
use apod_service::{ApodServer, ApodService};
use apod_test_utils::MockViewer;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zeromq::{ReqSocket, Socket, SocketRecv, SocketSend, ZmqMessage};

const API_PATH: &str = "/planetary/apod";

struct Stack {
    nasa: MockServer,
    viewer: MockViewer,
    dir: tempfile::TempDir,
    client: ReqSocket,
    shutdown: CancellationToken,
    server: JoinHandle<Result<(), ApodError>>,
}

impl Stack {
    async fn start() -> Self {
        let nasa = MockServer::start().await;
        let viewer = MockViewer::new();
        let dir = tempfile::tempdir().unwrap();

        let client = NasaClient::new("e2e-key".into(), format!("{}{API_PATH}", nasa.uri())).unwrap();
        let presenter = ImagePresenter::with_viewer(
            Arc::new(viewer.clone()),
            dir.path().to_path_buf(),
            Duration::from_millis(10),
        )
        .unwrap();
        let service = ApodService::new('4', Arc::new(NasaSource::with_client(client)), presenter);
        let server = ApodServer::bind("tcp://127.0.0.1:0", service).await.unwrap();
        let endpoint = server.endpoint().to_string();

        let shutdown = CancellationToken::new();
        let server = tokio::spawn(server.run(shutdown.clone()));

        let mut client = ReqSocket::new();
        client.connect(&endpoint).await.unwrap();

        Self {
            nasa,
            viewer,
            dir,
            client,
            shutdown,
            server,
        }
    }

    async fn request(&mut self, message: &str) -> Reply {
        self.client
            .send(ZmqMessage::from(message.to_string()))
            .await
            .unwrap();
        let reply = self.client.recv().await.unwrap();
        let frame = reply.get(0).unwrap();
        let json: serde_json::Value = serde_json::from_slice(frame).unwrap();
        assert!(json.get("status").is_some(), "reply without status: {json}");
        Reply::from_bytes(frame).unwrap()
    }

    async fn stop(self) {
        self.shutdown.cancel();
        let result = tokio::time::timeout(Duration::from_secs(5), self.server)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }
}

fn apod_body(media_type: &str, url: &str, hdurl: Option<&str>) -> serde_json::Value {
    let mut body = serde_json::json!({
        "date": "2024-05-10",
        "explanation": "Aurora over the northern hemisphere.",
        "title": "Northern Lights",
        "media_type": media_type,
        "service_version": "v1",
        "url": url,
    });
    if let Some(hdurl) = hdurl {
        body["hdurl"] = serde_json::Value::String(hdurl.to_string());
    }
    body
}

fn unwrap_success(reply: Reply) -> (apod_core::ApodRecord, ImageStatus) {
    match reply {
        Reply::Success { apod, image_status } => (apod, image_status),
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn text_request_returns_record_without_image() {
    let mut stack = Stack::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("api_key", "e2e-key"))
        .and(query_param_is_missing("date"))
        .respond_with(ResponseTemplate::new(200).set_body_json(apod_body(
            "image",
            "https://apod.nasa.gov/image/aurora.jpg",
            Some("https://apod.nasa.gov/image/aurora_hd.jpg"),
        )))
        .expect(1)
        .mount(&stack.nasa)
        .await;

    let (apod, image_status) = unwrap_success(stack.request("4text").await);
    assert_eq!(image_status, ImageStatus::NotRequested);
    assert_eq!(apod.title, "Northern Lights");
    assert_eq!(apod.url, "https://apod.nasa.gov/image/aurora_hd.jpg");
    assert_eq!(stack.viewer.shown_count().await, 0);

    stack.stop().await;
}

#[tokio::test]
async fn video_falls_back_to_url_and_is_not_shown() {
    let mut stack = Stack::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("date", "2021-03-04"))
        .respond_with(ResponseTemplate::new(200).set_body_json(apod_body(
            "video",
            "https://www.youtube.com/embed/abc",
            None,
        )))
        .expect(1)
        .mount(&stack.nasa)
        .await;

    let (apod, image_status) = unwrap_success(stack.request("4 for 2021-03-04").await);
    assert_eq!(image_status, ImageStatus::NotShown);
    assert_eq!(apod.url, "https://www.youtube.com/embed/abc");
    assert_eq!(stack.viewer.shown_count().await, 0);
    assert!(std::fs::read_dir(stack.dir.path()).unwrap().next().is_none());

    stack.stop().await;
}

#[tokio::test]
async fn image_is_downloaded_shown_and_removed() {
    let mut stack = Stack::start().await;
    let image_url = format!("{}/image/2405/aurora.png", stack.nasa.uri());
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(apod_body(
            "image",
            "https://apod.nasa.gov/image/small.png",
            Some(&image_url),
        )))
        .mount(&stack.nasa)
        .await;
    Mock::given(method("GET"))
        .and(path("/image/2405/aurora.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png-bytes".to_vec()))
        .expect(1)
        .mount(&stack.nasa)
        .await;

    let (apod, image_status) = unwrap_success(stack.request("4").await);
    assert_eq!(image_status, ImageStatus::Shown);
    assert_eq!(apod.url, image_url);

    let shown = stack.viewer.shown().await;
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].path.extension().unwrap(), "png");
    assert_eq!(shown[0].contents.as_deref(), Some(&b"png-bytes"[..]));
    assert!(std::fs::read_dir(stack.dir.path()).unwrap().next().is_none());

    stack.stop().await;
}

#[tokio::test]
async fn wrong_tag_never_reaches_upstream() {
    let mut stack = Stack::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&stack.nasa)
        .await;

    assert_eq!(stack.request("5").await, Reply::InvalidRequest);
    assert_eq!(stack.request("3text").await, Reply::InvalidRequest);

    stack.stop().await;
}

#[tokio::test]
async fn upstream_failure_is_answered_and_loop_continues() {
    let mut stack = Stack::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("date", "1990-01-01"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": 400,
            "msg": "Date must be between Jun 16, 1995 and today.",
            "service_version": "v1",
        })))
        .mount(&stack.nasa)
        .await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("date", "2000-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&stack.nasa)
        .await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param_is_missing("date"))
        .respond_with(ResponseTemplate::new(200).set_body_json(apod_body(
            "video",
            "https://www.youtube.com/embed/abc",
            None,
        )))
        .mount(&stack.nasa)
        .await;

    match stack.request("41990-01-01").await {
        Reply::Error { message } => {
            assert!(message.contains("Date must be between"), "got: {message}")
        }
        other => panic!("expected error, got {other:?}"),
    }
    assert_eq!(stack.request("42000-01-01 text").await.status(), "error");

    let (_, image_status) = unwrap_success(stack.request("4text").await);
    assert_eq!(image_status, ImageStatus::NotRequested);

    stack.stop().await;
}

#[tokio::test]
async fn wildcard_bind_address_serves_on_all_interfaces() {
    let mut config = apod_config::load_and_validate_str("[service]\nbind_address = \"*\"\n")
        .expect("wildcard address should validate");
    config.service.port = 0;

    let presenter = ImagePresenter::with_viewer(
        Arc::new(MockViewer::new()),
        std::env::temp_dir(),
        Duration::ZERO,
    )
    .unwrap();
    let source = Arc::new(apod_test_utils::MockSource::new());
    let service = ApodService::new('4', source, presenter);
    let server = ApodServer::bind(&config.service.bind_endpoint(), service)
        .await
        .unwrap();

    let port = server
        .endpoint()
        .strip_prefix("tcp://0.0.0.0:")
        .expect("bound on all interfaces")
        .to_string();
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(server.run(shutdown.clone()));

    let mut client = ReqSocket::new();
    client
        .connect(&format!("tcp://127.0.0.1:{port}"))
        .await
        .unwrap();
    client.send(ZmqMessage::from("5".to_string())).await.unwrap();
    let reply = client.recv().await.unwrap();
    assert_eq!(
        Reply::from_bytes(reply.get(0).unwrap()).unwrap(),
        Reply::InvalidRequest
    );

    shutdown.cancel();
    handle.await.unwrap().unwrap();
}
