//! Crate-level tests for the media pipeline and router

#[cfg(test)]
mod support {
    use std::path::Path;

    use axum::body::Bytes;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    use crate::domain::asset::IncomingFile;

    pub const BOUNDARY: &str = "----media-test-boundary";

    pub fn png(field: &str, size: usize) -> IncomingFile {
        IncomingFile {
            field_name: field.to_string(),
            original_name: "photo.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![0x89; size],
        }
    }

    /// Files directly under `dir`, ignoring sub-directories
    pub fn files_in(dir: &Path) -> Vec<String> {
        match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(Result::ok)
                .filter(|e| e.path().is_file())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub struct Part<'a> {
        pub name: &'a str,
        pub file: Option<(&'a str, &'a str)>,
        pub data: Vec<u8>,
    }

    pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part.file {
                Some((file_name, content_type)) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            part.name, file_name, content_type
                        )
                        .as_bytes(),
                    );
                }
                None => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                            .as_bytes(),
                    );
                }
            }
            body.extend_from_slice(&part.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    /// Address that refuses connections
    pub async fn closed_endpoint() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    /// Stand-in for the remote media host. Records the last upload body.
    pub async fn fake_remote_host() -> (String, Arc<Mutex<Option<Bytes>>>) {
        let seen = Arc::new(Mutex::new(None));
        let recorder = seen.clone();

        let app = Router::new()
            .route(
                "/{cloud}/image/upload",
                post(move |body: Bytes| {
                    let recorder = recorder.clone();
                    async move {
                        *recorder.lock().await = Some(body);
                        Json(json!({
                            "secure_url": "https://res.example.com/portfolio/abc123.png",
                            "public_id": "portfolio/abc123",
                        }))
                    }
                }),
            )
            .route(
                "/{cloud}/image/destroy",
                post(|_body: Bytes| async { Json(json!({ "result": "ok" })) }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), seen)
    }
}

#[cfg(test)]
mod pipeline_tests {
    use std::time::Duration;

    use super::support::*;
    use crate::application::{MediaConfig, RemoteCredentials, UploadPipeline};
    use crate::domain::asset::StorageProvider;
    use crate::domain::policy::UploadPolicy;
    use crate::error::MediaError;

    fn local_pipeline(dir: &tempfile::TempDir) -> UploadPipeline {
        UploadPipeline::new(MediaConfig::local(dir.path().join("uploads"))).unwrap()
    }

    fn remote_pipeline(dir: &tempfile::TempDir, api_base: &str) -> UploadPipeline {
        let remote = RemoteCredentials::from_parts(
            Some("demo".into()),
            Some("key".into()),
            Some("secret".into()),
        )
        .unwrap()
        .with_api_base(api_base);

        let config = MediaConfig::local(dir.path().join("uploads"))
            .with_remote(remote)
            .with_remote_timeout(Duration::from_secs(5));
        UploadPipeline::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_local_store_creates_directory_and_resolvable_url() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = local_pipeline(&dir);
        assert_eq!(pipeline.provider(), StorageProvider::Local);

        let asset = pipeline
            .store(png("image", 1024), &UploadPolicy::content_image())
            .await
            .unwrap();

        assert_eq!(asset.provider, StorageProvider::Local);
        assert_eq!(asset.url, format!("/uploads/{}", asset.public_id));
        assert_eq!(asset.size, 1024);
        assert_eq!(asset.original_name, "photo.png");
        assert!(asset.public_id.starts_with("image-"));

        let stored = dir.path().join("uploads").join(&asset.public_id);
        assert_eq!(std::fs::read(stored).unwrap().len(), 1024);
        assert!(files_in(&dir.path().join(".uploads-staging")).is_empty());
    }

    #[tokio::test]
    async fn test_staging_never_appears_under_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = local_pipeline(&dir);

        pipeline
            .store(png("image", 512), &UploadPolicy::content_image())
            .await
            .unwrap();

        let entries: Vec<String> = std::fs::read_dir(dir.path().join("uploads"))
            .unwrap()
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries.len(), 1);
        assert!(entries.iter().all(|name| !name.starts_with('.')));
        assert!(dir.path().join(".uploads-staging").is_dir());
    }

    #[tokio::test]
    async fn test_oversized_file_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = local_pipeline(&dir);

        let err = pipeline
            .store(png("image", 6 * 1024 * 1024), &UploadPolicy::content_image())
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::Rejected(_)));
        assert!(!dir.path().join("uploads").exists());
    }

    #[tokio::test]
    async fn test_disallowed_type_is_rejected_before_write() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = local_pipeline(&dir);

        let mut file = png("image", 10);
        file.content_type = Some("application/pdf".to_string());
        file.original_name = "cv.pdf".to_string();

        let err = pipeline
            .store(file, &UploadPolicy::content_image())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Not an image"));
        assert!(!dir.path().join("uploads").exists());
    }

    #[tokio::test]
    async fn test_cover_ceiling_is_larger() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = local_pipeline(&dir);

        let file = png("image", 6 * 1024 * 1024);
        assert!(pipeline.store(file.clone(), &UploadPolicy::blog_cover()).await.is_ok());
        assert!(pipeline.store(file, &UploadPolicy::profile_image()).await.is_err());
    }

    #[tokio::test]
    async fn test_local_delete_is_best_effort() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = local_pipeline(&dir);

        let asset = pipeline
            .store(png("image", 8), &UploadPolicy::content_image())
            .await
            .unwrap();

        assert!(pipeline.delete(&asset.public_id, StorageProvider::Local).await);
        assert!(!pipeline.delete(&asset.public_id, StorageProvider::Local).await);
        assert!(!pipeline.delete("../../etc/passwd", StorageProvider::Local).await);
        assert!(!pipeline.delete("portfolio/abc", StorageProvider::Remote).await);
    }

    #[tokio::test]
    async fn test_remote_failure_removes_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = remote_pipeline(&dir, &closed_endpoint().await);
        assert_eq!(pipeline.provider(), StorageProvider::Remote);

        let err = pipeline
            .store(png("image", 64), &UploadPolicy::content_image())
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::UploadFailed { .. }));
        assert!(files_in(&dir.path().join(".uploads-staging")).is_empty());
        assert!(files_in(&dir.path().join("uploads")).is_empty());
    }

    #[tokio::test]
    async fn test_remote_success_uses_host_url() {
        let dir = tempfile::tempdir().unwrap();
        let (api_base, seen) = fake_remote_host().await;
        let pipeline = remote_pipeline(&dir, &api_base);

        let asset = pipeline
            .store(png("image", 64), &UploadPolicy::content_image())
            .await
            .unwrap();

        assert_eq!(asset.provider, StorageProvider::Remote);
        assert_eq!(asset.url, "https://res.example.com/portfolio/abc123.png");
        assert_eq!(asset.public_id, "portfolio/abc123");
        assert!(files_in(&dir.path().join(".uploads-staging")).is_empty());
        assert!(files_in(&dir.path().join("uploads")).is_empty());

        let body = seen.lock().await.clone().unwrap();
        let body = String::from_utf8_lossy(&body);
        assert!(body.contains("name=\"signature\""));
        assert!(body.contains("c_limit,w_1200"));
        assert!(body.contains("portfolio"));

        assert!(pipeline.delete("portfolio/abc123", StorageProvider::Remote).await);
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::support::*;
    use crate::application::{MediaConfig, UploadPipeline};
    use crate::presentation::media_router;

    fn app(dir: &tempfile::TempDir) -> axum::Router {
        let pipeline = UploadPipeline::new(MediaConfig::local(dir.path().join("uploads"))).unwrap();
        media_router(Arc::new(pipeline))
    }

    fn upload_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_upload_image_returns_created() {
        let dir = tempfile::tempdir().unwrap();
        let request = upload_request(
            "/media/images",
            &[Part {
                name: "image",
                file: Some(("skill.png", "image/png")),
                data: vec![1; 2048],
            }],
        );

        let response = app(&dir).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response).await;
        assert_eq!(body["provider"], "local");
        assert_eq!(body["size"], 2048);
        assert_eq!(body["originalName"], "skill.png");
        assert!(body["url"].as_str().unwrap().starts_with("/uploads/image-"));
        assert_eq!(files_in(&dir.path().join("uploads")).len(), 1);
    }

    #[tokio::test]
    async fn test_six_megabytes_over_five_megabyte_ceiling() {
        let dir = tempfile::tempdir().unwrap();
        let request = upload_request(
            "/media/images",
            &[Part {
                name: "image",
                file: Some(("big.png", "image/png")),
                data: vec![0; 6 * 1024 * 1024],
            }],
        );

        let response = app(&dir).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["msg"], "File too large. Maximum size is 5MB");
        assert!(files_in(&dir.path().join("uploads")).is_empty());
        assert!(files_in(&dir.path().join(".uploads-staging")).is_empty());
    }

    #[tokio::test]
    async fn test_cover_accepts_six_megabytes() {
        let dir = tempfile::tempdir().unwrap();
        let request = upload_request(
            "/media/covers",
            &[Part {
                name: "image",
                file: Some(("cover.jpg", "image/jpeg")),
                data: vec![0; 6 * 1024 * 1024],
            }],
        );

        let response = app(&dir).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_non_image_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let request = upload_request(
            "/media/images",
            &[Part {
                name: "image",
                file: Some(("notes.txt", "text/plain")),
                data: b"hello".to_vec(),
            }],
        );

        let response = app(&dir).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["msg"], "Not an image! Please upload an image.");
    }

    #[tokio::test]
    async fn test_missing_file_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let request = upload_request(
            "/media/images",
            &[Part {
                name: "title",
                file: None,
                data: b"no file here".to_vec(),
            }],
        );

        let response = app(&dir).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["msg"], "Please upload an image file");
    }

    #[tokio::test]
    async fn test_not_multipart_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/media/images")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app(&dir).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["msg"].as_str().unwrap().starts_with("Invalid multipart body"));
    }

    #[tokio::test]
    async fn test_delete_local_asset() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);

        let upload = upload_request(
            "/media/images",
            &[Part {
                name: "image",
                file: Some(("a.gif", "image/gif")),
                data: vec![7; 16],
            }],
        );
        let created = json_body(app.clone().oneshot(upload).await.unwrap()).await;
        let public_id = created["publicId"].as_str().unwrap().to_string();

        let delete = |public_id: &str| {
            Request::builder()
                .method("DELETE")
                .uri("/media")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({ "publicId": public_id, "provider": "local" }).to_string(),
                ))
                .unwrap()
        };

        let response = app.clone().oneshot(delete(&public_id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["deleted"], true);

        let response = app.oneshot(delete(&public_id)).await.unwrap();
        assert_eq!(json_body(response).await["deleted"], false);
    }

    #[tokio::test]
    async fn test_delete_with_bad_body() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder()
            .method("DELETE")
            .uri("/media")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"publicId":"x","provider":"ftp"}"#))
            .unwrap();

        let response = app(&dir).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["msg"], "Please provide publicId and provider");
    }
}
