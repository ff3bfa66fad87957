use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use image::{DynamicImage, ImageFormat, RgbImage};
use serde_json::Value;
use tower::ServiceExt;

use catdog_detector::{
    adapters::http::{router, state::HttpState},
    application::{ports::DetectorPort, services::DetectionService},
    domain::{
        detection::Prediction,
        errors::{DomainError, DomainResult},
    },
};

const BOUNDARY: &str = "catdogboundary";

struct StubDetector(Vec<Prediction>);

#[async_trait]
impl DetectorPort for StubDetector {
    async fn detect(&self, _image: Arc<RgbImage>) -> DomainResult<Vec<Prediction>> {
        Ok(self.0.clone())
    }
}

struct BrokenDetector;

#[async_trait]
impl DetectorPort for BrokenDetector {
    async fn detect(&self, _image: Arc<RgbImage>) -> DomainResult<Vec<Prediction>> {
        Err(DomainError::OperationFailed("no session".into()))
    }
}

fn pred(label: &str, class_id: usize, score: f32, bbox: [f32; 4]) -> Prediction {
    Prediction {
        x1: bbox[0],
        y1: bbox[1],
        x2: bbox[2],
        y2: bbox[3],
        score,
        class_id,
        label: label.to_string(),
    }
}

fn scene() -> Vec<Prediction> {
    vec![
        pred("person", 0, 0.97, [0.0, 0.0, 50.0, 100.0]),
        pred("dog", 16, 0.91, [10.5, 12.2, 80.9, 60.0]),
        pred("cat", 15, 0.64, [-4.0, 30.0, 40.0, 140.0]),
        pred("couch", 57, 0.55, [0.0, 0.0, 160.0, 120.0]),
    ]
}

fn app_with(detector: Arc<dyn DetectorPort>, max_upload_bytes: usize) -> Router {
    let detection = Arc::new(DetectionService::new(detector, max_upload_bytes));
    router(HttpState { detection })
}

fn app() -> Router {
    app_with(Arc::new(StubDetector(scene())), 1024 * 1024)
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

fn multipart_body(field: &str, filename: Option<&str>, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    match filename {
        Some(name) => body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        ),
        None => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n").as_bytes(),
        ),
    }
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn returns_only_cats_and_dogs_with_valid_boxes() {
    let body = multipart_body("file", Some("pets.png"), &png(160, 120));
    let (status, json) = send(app(), upload("/detect", body)).await;

    assert_eq!(status, StatusCode::OK);
    let detections = json["detections"].as_array().unwrap();
    assert_eq!(detections.len(), 2);

    for det in detections {
        let label = det["label"].as_str().unwrap();
        assert!(label == "cat" || label == "dog", "unexpected label {label}");

        let confidence = det["confidence"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&confidence));

        for key in ["x", "y", "w", "h"] {
            assert!(det[key].as_i64().unwrap() >= 0, "{key} is negative");
        }
    }

    assert_eq!(detections[0]["label"], "dog");
    assert_eq!(detections[0]["x"], 10);
    assert_eq!(detections[0]["y"], 12);
    assert_eq!(detections[0]["w"], 70);
    assert_eq!(detections[0]["h"], 48);

    // recortada a la imagen de 160x120
    assert_eq!(detections[1]["label"], "cat");
    assert_eq!(detections[1]["x"], 0);
    assert_eq!(detections[1]["h"], 90);
}

#[tokio::test]
async fn label_query_selects_one_class() {
    let body = multipart_body("file", Some("pets.png"), &png(160, 120));
    let (status, json) = send(app(), upload("/detect?label=cat", body)).await;

    assert_eq!(status, StatusCode::OK);
    let detections = json["detections"].as_array().unwrap();
    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0]["label"], "cat");
}

#[tokio::test]
async fn unknown_label_query_is_rejected() {
    let body = multipart_body("file", Some("pets.png"), &png(8, 8));
    let (status, json) = send(app(), upload("/detect?label=horse", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("label"));
}

#[tokio::test]
async fn empty_scene_yields_empty_list() {
    let app = app_with(Arc::new(StubDetector(vec![])), 1024 * 1024);
    let body = multipart_body("file", Some("empty.png"), &png(8, 8));
    let (status, json) = send(app, upload("/detect", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({"detections": []}));
}

#[tokio::test]
async fn non_image_upload_is_a_bad_request() {
    let body = multipart_body("file", Some("notes.txt"), b"just some text, not pixels");
    let (status, json) = send(app(), upload("/detect", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn empty_file_is_a_bad_request() {
    let body = multipart_body("file", Some("empty.png"), b"");
    let (status, json) = send(app(), upload("/detect", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn missing_file_field_is_a_bad_request() {
    let body = multipart_body("comment", None, b"hello");
    let (status, json) = send(app(), upload("/detect", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("file"));
}

#[tokio::test]
async fn any_named_file_part_is_accepted() {
    let body = multipart_body("image", Some("pets.png"), &png(160, 120));
    let (status, json) = send(app(), upload("/detect", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["detections"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = app_with(Arc::new(StubDetector(scene())), 1024);
    let body = multipart_body("file", Some("big.png"), &vec![0u8; 4096]);
    let (status, json) = send(app, upload("/detect", body)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(json["error"].as_str().unwrap().contains("payload too large"));
}

#[tokio::test]
async fn body_over_the_router_limit_names_the_cap() {
    // 200 KiB supera max_upload_bytes más el margen de multipart
    let app = app_with(Arc::new(StubDetector(scene())), 1024);
    let body = multipart_body("file", Some("huge.png"), &vec![7u8; 200 * 1024]);
    let (status, json) = send(app, upload("/detect", body)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("payload too large"), "{message}");
    assert!(message.contains("1024"), "{message}");
}

#[tokio::test]
async fn inference_failure_is_a_server_error() {
    let app = app_with(Arc::new(BrokenDetector), 1024 * 1024);
    let body = multipart_body("file", Some("pets.png"), &png(8, 8));
    let (status, json) = send(app, upload("/detect", body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("no session"));
}

#[tokio::test]
async fn only_post_detect_is_routed() {
    let get = Request::builder().uri("/detect").body(Body::empty()).unwrap();
    let res = app().oneshot(get).await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    let other = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let res = app().oneshot(other).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
