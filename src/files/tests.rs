//! File Service Module Tests
//!
//! ## Test Scopes
//! - **Validation**: extension and content-type rules for uploads.
//! - **FileService**: the request flow over in-memory stores, including the error taxonomy.
//! - **Router**: end-to-end HTTP behaviour through the axum `Router`.

#[cfg(test)]
mod tests {
    use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
    use crate::error::FileServiceError;
    use crate::files::handlers::router;
    use crate::files::service::{FileService, validate_upload};
    use crate::files::types::FileSource;
    use crate::metadata::gateway::MetadataGateway;
    use crate::metadata::memory::InMemoryMetadataGateway;
    use crate::negotiation::types::{LineDetail, NegotiatedPayload, RandomLineJson};
    use crate::storage::backend::ObjectStore;
    use crate::storage::blob::BlobStore;
    use crate::storage::types::{ByteStream, StoredObject};
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use bytes::Bytes;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BUCKET: &str = "default-bucket";
    const BOUNDARY: &str = "XTEXTSAMPLERBOUNDARY";

    struct Fixture {
        service: Arc<FileService>,
        metadata: Arc<InMemoryMetadataGateway>,
    }

    fn allowed() -> Vec<String> {
        vec!["txt".into(), "csv".into(), "json".into()]
    }

    fn fixture() -> Fixture {
        let metadata = Arc::new(InMemoryMetadataGateway::new());
        let store = Arc::new(BlobStore::in_memory());
        let service = Arc::new(FileService::new(
            metadata.clone(),
            store,
            BUCKET,
            allowed(),
        ));
        Fixture { service, metadata }
    }

    async fn upload(fixture: &Fixture, name: &str, content: &str) {
        fixture
            .service
            .upload(
                Some(name),
                Some("text/plain"),
                Bytes::copy_from_slice(content.as_bytes()),
            )
            .await
            .unwrap();
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    /// Object store whose every call fails, for backend error paths.
    struct BrokenStore;

    #[async_trait]
    impl ObjectStore for BrokenStore {
        async fn fetch(&self, _container: &str, _key: &str) -> anyhow::Result<Option<ByteStream>> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn store(&self, _data: Bytes, _container: &str, _key: &str) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn list(&self, _container: &str) -> anyhow::Result<Vec<StoredObject>> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    // ============================================================
    // VALIDATION TESTS
    // ============================================================

    #[test]
    fn test_validate_accepts_allowed_text_file() {
        let key = validate_upload(Some("notes.TXT"), Some("text/plain"), &allowed()).unwrap();
        assert_eq!(key, "notes.TXT");
    }

    #[test]
    fn test_validate_requires_extension() {
        for name in [None, Some(""), Some("README")] {
            let result = validate_upload(name, Some("text/plain"), &allowed());
            assert!(matches!(
                result,
                Err(FileServiceError::InvalidUpload(ref msg)) if msg.contains("valid extension")
            ));
        }
    }

    #[test]
    fn test_validate_rejects_disallowed_extension() {
        let result = validate_upload(Some("image.png"), Some("text/plain"), &allowed());
        assert!(matches!(
            result,
            Err(FileServiceError::InvalidUpload(ref msg)) if msg.contains(".txt, .csv, .json")
        ));
    }

    #[test]
    fn test_validate_rejects_non_text_content_type() {
        for content_type in [None, Some("application/octet-stream")] {
            let result = validate_upload(Some("data.csv"), content_type, &allowed());
            assert!(matches!(
                result,
                Err(FileServiceError::InvalidUpload(ref msg)) if msg.contains("text-based")
            ));
        }
    }

    // ============================================================
    // SERVICE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_upload_records_metadata() {
        let fixture = fixture();
        upload(&fixture, "a.txt", "hello\nworld\n").await;

        let record = fixture.service.last_uploaded().await.unwrap();
        assert_eq!(record.key, "a.txt");
        assert_eq!(record.size_bytes, 12);
        assert_eq!(record.container_name, BUCKET);
        assert_eq!(fixture.metadata.count(BUCKET).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_upload_store_failure_is_reported() {
        let metadata = Arc::new(InMemoryMetadataGateway::new());
        let service = FileService::new(metadata.clone(), Arc::new(BrokenStore), BUCKET, allowed());

        let result = service
            .upload(Some("a.txt"), Some("text/plain"), Bytes::from_static(b"x"))
            .await;

        assert!(matches!(result, Err(FileServiceError::UploadFailed { ref key }) if key == "a.txt"));
        assert_eq!(metadata.count(BUCKET).await.unwrap(), 0, "No record without bytes");
    }

    #[tokio::test]
    async fn test_no_uploads_is_no_records() {
        let fixture = fixture();
        let mut rng = rng();

        assert!(matches!(
            fixture.service.last_uploaded().await,
            Err(FileServiceError::NoRecords)
        ));
        assert!(matches!(
            fixture.service.list_all().await,
            Err(FileServiceError::NoRecords)
        ));
        assert!(matches!(
            fixture
                .service
                .one_random_line(Some("application/json"), &mut rng)
                .await,
            Err(FileServiceError::NoRecords)
        ));
        assert!(matches!(
            fixture.service.one_random_line_backwards(&mut rng).await,
            Err(FileServiceError::NoRecords)
        ));
        assert!(matches!(
            fixture
                .service
                .longest_lines(FileSource::Random, &mut rng)
                .await,
            Err(FileServiceError::NoRecords)
        ));
    }

    #[tokio::test]
    async fn test_one_random_line_json_scenario() {
        let fixture = fixture();
        upload(&fixture, "a.txt", "hello\nworld\n").await;
        let mut rng = rng();

        for _ in 0..20 {
            let payload = fixture
                .service
                .one_random_line(Some("application/json"), &mut rng)
                .await
                .unwrap();

            let NegotiatedPayload::Json(RandomLineJson { random_line }) = payload else {
                panic!("expected json payload");
            };
            assert!(random_line == "hello" || random_line == "world");
        }
    }

    #[tokio::test]
    async fn test_one_random_line_reads_most_recent_file() {
        let fixture = fixture();
        upload(&fixture, "old.txt", "old content\n").await;
        upload(&fixture, "new.txt", "new content\n").await;
        let mut rng = rng();

        let payload = fixture
            .service
            .one_random_line(Some("text/plain"), &mut rng)
            .await
            .unwrap();

        assert_eq!(payload, NegotiatedPayload::PlainText("new content".into()));
    }

    #[tokio::test]
    async fn test_one_random_line_detail_scenario() {
        let fixture = fixture();
        upload(&fixture, "a.txt", "world\n").await;
        let mut rng = rng();

        let payload = fixture
            .service
            .one_random_line(Some("application/*"), &mut rng)
            .await
            .unwrap();

        assert_eq!(
            payload,
            NegotiatedPayload::Detail(LineDetail {
                line_number: 0,
                filename: "a.txt".into(),
                most_freq_letter: 'd',
            })
        );
    }

    #[tokio::test]
    async fn test_missing_accept_checked_before_lookup() {
        let fixture = fixture();
        let mut rng = rng();

        let result = fixture.service.one_random_line(None, &mut rng).await;
        assert!(matches!(
            result,
            Err(FileServiceError::MissingNegotiationHeader)
        ));
    }

    #[tokio::test]
    async fn test_empty_file_is_empty_content() {
        let fixture = fixture();
        upload(&fixture, "empty.txt", "").await;
        let mut rng = rng();

        assert!(matches!(
            fixture
                .service
                .one_random_line(Some("application/json"), &mut rng)
                .await,
            Err(FileServiceError::EmptyContent)
        ));
        assert!(matches!(
            fixture.service.one_random_line_backwards(&mut rng).await,
            Err(FileServiceError::EmptyContent)
        ));

        let longest = fixture
            .service
            .longest_lines(FileSource::MostRecent, &mut rng)
            .await
            .unwrap();
        assert_eq!(longest.file_key, "empty.txt");
        assert!(longest.lines.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_decoding_error() {
        let fixture = fixture();
        fixture
            .service
            .upload(
                Some("bad.txt"),
                Some("text/plain"),
                Bytes::from_static(b"\xc3\x28\n"),
            )
            .await
            .unwrap();
        let mut rng = rng();

        let result = fixture
            .service
            .one_random_line(Some("application/json"), &mut rng)
            .await;
        assert!(matches!(result, Err(FileServiceError::Decoding { line: 1 })));
    }

    #[tokio::test]
    async fn test_record_without_object_is_object_missing() {
        let fixture = fixture();
        fixture
            .metadata
            .insert(BUCKET, "ghost.txt", 10, Utc::now())
            .await
            .unwrap();
        let mut rng = rng();

        let result = fixture
            .service
            .one_random_line(Some("application/json"), &mut rng)
            .await;
        assert!(matches!(
            result,
            Err(FileServiceError::ObjectMissing { ref key, .. }) if key == "ghost.txt"
        ));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_backend_error() {
        let metadata = Arc::new(InMemoryMetadataGateway::new());
        metadata
            .insert(BUCKET, "a.txt", 1, Utc::now())
            .await
            .unwrap();
        let service = FileService::new(metadata, Arc::new(BrokenStore), BUCKET, allowed());
        let mut rng = rng();

        let result = service.one_random_line_backwards(&mut rng).await;
        assert!(matches!(result, Err(FileServiceError::Backend(_))));
    }

    #[tokio::test]
    async fn test_backwards_reverses_a_line_of_some_file() {
        let fixture = fixture();
        upload(&fixture, "a.txt", "abc\ndef\n").await;
        upload(&fixture, "b.txt", "żółw\n").await;
        let mut rng = rng();

        let expected: HashSet<&str> = ["cba", "fed", "wółż"].into_iter().collect();
        for _ in 0..30 {
            let response = fixture
                .service
                .one_random_line_backwards(&mut rng)
                .await
                .unwrap();
            assert!(expected.contains(response.random_line_backwards.as_str()));
        }
    }

    #[tokio::test]
    async fn test_longest_lines_three_line_file() {
        let fixture = fixture();
        upload(&fixture, "three.txt", "mid line\na\nthe longest line\n").await;
        let mut rng = rng();

        let response = fixture
            .service
            .longest_lines(FileSource::MostRecent, &mut rng)
            .await
            .unwrap();

        let contents: Vec<&str> = response
            .lines
            .iter()
            .map(|item| item.line_content.as_str())
            .collect();
        assert_eq!(response.file_key, "three.txt");
        assert_eq!(contents, vec!["the longest line", "mid line", "a"]);
    }

    #[tokio::test]
    async fn test_longest_lines_from_random_file() {
        let fixture = fixture();
        upload(&fixture, "a.txt", "x\n").await;
        upload(&fixture, "b.txt", "y\n").await;
        let mut rng = rng();

        let mut keys = HashSet::new();
        for _ in 0..40 {
            let response = fixture
                .service
                .longest_lines(FileSource::Random, &mut rng)
                .await
                .unwrap();
            keys.insert(response.file_key);
        }

        assert_eq!(keys.len(), 2, "Both files should be picked eventually");
    }

    // ============================================================
    // ROUTER TESTS
    // ============================================================

    fn multipart_body(filename: &str, content_type: &str, content: &str) -> String {
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\
             Content-Type: {ct}\r\n\r\n{c}\r\n--{b}--\r\n",
            b = BOUNDARY,
            f = filename,
            ct = content_type,
            c = content
        )
    }

    fn upload_request(filename: &str, content_type: &str, content: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/files/upload/")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(filename, content_type, content)))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_router_upload_then_random_line_json() {
        let fixture = fixture();
        let app = router(fixture.service.clone(), DEFAULT_MAX_UPLOAD_BYTES);

        let response = app
            .clone()
            .oneshot(upload_request("a.txt", "text/plain", "hello\nworld\n"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"key": "a.txt", "filename": "a.txt"})
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/files/one_random_line/")
                    .header(header::ACCEPT, "application/json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let line = body["random_line"].as_str().unwrap();
        assert!(line == "hello" || line == "world");
    }

    #[tokio::test]
    async fn test_router_rejects_bad_upload() {
        let fixture = fixture();
        let app = router(fixture.service.clone(), DEFAULT_MAX_UPLOAD_BYTES);

        let response = app
            .oneshot(upload_request("photo.png", "image/png", "binary"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("Invalid file format"));
    }

    #[tokio::test]
    async fn test_router_accepts_upload_above_axum_default_cap() {
        let fixture = fixture();
        let app = router(fixture.service.clone(), DEFAULT_MAX_UPLOAD_BYTES);
        let content = "a line of text\n".repeat(200_000);

        let response = app
            .oneshot(upload_request("big.txt", "text/plain", &content))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let latest = fixture.service.last_uploaded().await.unwrap();
        assert_eq!(latest.key, "big.txt");
        assert_eq!(latest.size_bytes, content.len() as u64);
    }

    #[tokio::test]
    async fn test_router_upload_over_limit_is_payload_too_large() {
        let fixture = fixture();
        let app = router(fixture.service.clone(), 1024);

        let response = app
            .oneshot(upload_request("big.txt", "text/plain", &"x".repeat(4096)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"detail": "File exceeds the upload size limit."})
        );
        assert!(matches!(
            fixture.service.last_uploaded().await,
            Err(FileServiceError::NoRecords)
        ));
    }

    #[tokio::test]
    async fn test_router_non_ascii_accept_falls_back_to_plain_text() {
        let fixture = fixture();
        upload(&fixture, "a.txt", "hello\n").await;
        let app = router(fixture.service.clone(), DEFAULT_MAX_UPLOAD_BYTES);

        let accept = header::HeaderValue::from_bytes(b"text/pl\xe9in").unwrap();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/files/one_random_line/")
                    .header(header::ACCEPT, accept)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"hello");
    }

    #[tokio::test]
    async fn test_router_missing_accept_is_bad_request() {
        let fixture = fixture();
        upload(&fixture, "a.txt", "hello\n").await;
        let app = router(fixture.service.clone(), DEFAULT_MAX_UPLOAD_BYTES);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/files/one_random_line/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"detail": "Header is missing: accept"})
        );
    }

    #[tokio::test]
    async fn test_router_empty_file_is_bad_request() {
        let fixture = fixture();
        upload(&fixture, "empty.txt", "").await;
        let app = router(fixture.service.clone(), DEFAULT_MAX_UPLOAD_BYTES);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/files/one_random_line_backwards/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"detail": "Empty file"})
        );
    }

    #[tokio::test]
    async fn test_router_no_files_is_not_found() {
        let fixture = fixture();
        let app = router(fixture.service.clone(), DEFAULT_MAX_UPLOAD_BYTES);

        for uri in [
            "/files/list_all/",
            "/files/last_uploaded/",
            "/files/one_random_line_backwards/",
            "/files/20_longest_line_of_one_file/?random_file=true",
        ] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri = {}", uri);
        }
    }

    #[tokio::test]
    async fn test_router_longest_lines_shape() {
        let fixture = fixture();
        upload(&fixture, "three.txt", "bb\na\nccc\n").await;
        let app = router(fixture.service.clone(), DEFAULT_MAX_UPLOAD_BYTES);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/files/20_longest_line_of_one_file/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "file_key": "three.txt",
                "lines": [
                    {"line_content": "ccc"},
                    {"line_content": "bb"},
                    {"line_content": "a"}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_router_backend_failure_hides_detail() {
        let metadata = Arc::new(InMemoryMetadataGateway::new());
        metadata
            .insert(BUCKET, "a.txt", 1, Utc::now())
            .await
            .unwrap();
        let service = Arc::new(FileService::new(
            metadata,
            Arc::new(BrokenStore),
            BUCKET,
            allowed(),
        ));
        let app = router(service, DEFAULT_MAX_UPLOAD_BYTES);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/files/20_longest_line_of_one_file/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"detail": "An internal server error occurred"})
        );
    }

    #[tokio::test]
    async fn test_router_list_all_and_last_uploaded() {
        let fixture = fixture();
        upload(&fixture, "a.txt", "one\n").await;
        upload(&fixture, "b.csv", "x,y\n").await;
        let app = router(fixture.service.clone(), DEFAULT_MAX_UPLOAD_BYTES);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/files/list_all/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        let keys: Vec<&str> = listed["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["key"].as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["a.txt", "b.csv"]);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/files/last_uploaded/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let last = body_json(response).await;
        assert_eq!(last["results"]["key"], "b.csv");
        assert_eq!(last["results"]["size_bytes"], 4);
    }
}
