//! Cloudinary Client
//!
//! Signed uploads and deletes against the Cloudinary upload API.
//! Every request carries the client-wide timeout.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use crate::application::config::RemoteCredentials;
use crate::error::{MediaError, MediaResult};

/// Result of a successful remote upload
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteUpload {
    pub secure_url: String,
    pub public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    http: reqwest::Client,
    credentials: RemoteCredentials,
}

impl CloudinaryClient {
    pub fn new(credentials: RemoteCredentials, timeout: Duration) -> MediaResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MediaError::Config(format!("HTTP client: {e}")))?;

        Ok(Self { http, credentials })
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{}/image/{}",
            self.credentials.api_base, self.credentials.cloud_name, action
        )
    }

    /// Upload a staged file into the configured folder
    pub async fn upload(
        &self,
        staged: &Path,
        file_name: &str,
        content_type: &str,
    ) -> MediaResult<RemoteUpload> {
        let bytes = tokio::fs::read(staged)
            .await
            .map_err(|e| MediaError::upload_failed(format!("read staged file: {e}")))?;

        let timestamp = Utc::now().timestamp().to_string();
        let params = [
            ("folder", self.credentials.folder.as_str()),
            ("timestamp", timestamp.as_str()),
            ("transformation", self.credentials.transformation.as_str()),
        ];
        let signature = sign(&params, &self.credentials.api_secret);

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| MediaError::upload_failed(format!("content type: {e}")))?;

        let mut form = Form::new()
            .part("file", part)
            .text("api_key", self.credentials.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key, value.to_string());
        }

        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorResponse>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_default();
            return Err(MediaError::upload_failed(format!(
                "remote host returned {status}: {detail}"
            )));
        }

        let uploaded = response
            .json::<RemoteUpload>()
            .await
            .map_err(|e| MediaError::upload_failed(format!("unexpected response: {e}")))?;

        tracing::info!(public_id = %uploaded.public_id, "Uploaded asset to remote host");
        Ok(uploaded)
    }

    /// Destroy a remote asset. Never fails; returns whether it was deleted.
    pub async fn destroy(&self, public_id: &str) -> bool {
        let timestamp = Utc::now().timestamp().to_string();
        let params = [("public_id", public_id), ("timestamp", timestamp.as_str())];
        let signature = sign(&params, &self.credentials.api_secret);

        let form = [
            ("public_id", public_id),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.credentials.api_key.as_str()),
            ("signature", signature.as_str()),
        ];

        let response = match self.http.post(self.endpoint("destroy")).form(&form).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(public_id = %public_id, error = %e, "Remote delete failed");
                return false;
            }
        };

        match response.json::<DestroyResponse>().await {
            Ok(body) if body.result == "ok" => {
                tracing::debug!(public_id = %public_id, "Deleted remote asset");
                true
            }
            Ok(body) => {
                tracing::warn!(public_id = %public_id, result = %body.result, "Remote delete not confirmed");
                false
            }
            Err(e) => {
                tracing::warn!(public_id = %public_id, error = %e, "Remote delete returned unexpected body");
                false
            }
        }
    }
}

fn transport_error(e: reqwest::Error) -> MediaError {
    if e.is_timeout() {
        MediaError::upload_failed("remote host timed out")
    } else {
        MediaError::upload_failed(format!("remote host unreachable: {e}"))
    }
}

/// Request signature: SHA-1 over `k=v&k=v` (sorted by key) followed by the secret
pub fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_matches_documented_example() {
        // Example from the Cloudinary signing documentation
        let params = [
            ("timestamp", "1315060510"),
            ("public_id", "sample_image"),
            ("eager", "w_400,h_300,c_pad|w_260,h_200,c_crop"),
        ];
        assert_eq!(
            sign(&params, "abcd"),
            "bfd09f95f331f558cbd1320e67aa8d488770583e"
        );
    }

    #[test]
    fn test_sign_is_order_independent() {
        let a = [("folder", "portfolio"), ("timestamp", "1")];
        let b = [("timestamp", "1"), ("folder", "portfolio")];
        assert_eq!(sign(&a, "s"), sign(&b, "s"));
        assert_ne!(sign(&a, "s"), sign(&a, "t"));
    }

    #[test]
    fn test_endpoint() {
        let credentials = RemoteCredentials::from_parts(
            Some("demo".into()),
            Some("key".into()),
            Some("secret".into()),
        )
        .unwrap()
        .with_api_base("http://127.0.0.1:1/v1_1/");
        let client = CloudinaryClient::new(credentials, Duration::from_secs(1)).unwrap();

        assert_eq!(client.endpoint("upload"), "http://127.0.0.1:1/v1_1/demo/image/upload");
    }
}
