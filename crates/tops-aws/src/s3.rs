use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use tracing::{debug, info};

use tops_core::{LabInfoSource, UpstreamError};
use tops_model::{Credentials, LabInfo};

use crate::{config::LabInfoConfig, errors::AwsError, sdk};

/// Object key of the lab-configuration document for `lab_id`.
pub fn lab_info_key(lab_id: &str) -> String {
    format!("{lab_id}.yaml")
}

/// Decode a lab-configuration document. It must be a YAML mapping.
pub fn parse_lab_info(raw: &[u8]) -> Result<LabInfo, AwsError> {
    let text = std::str::from_utf8(raw).map_err(|e| AwsError::Decode(e.to_string()))?;
    let value: serde_json::Value =
        serde_yaml::from_str(text).map_err(|e| AwsError::Decode(e.to_string()))?;
    LabInfo::try_from(value).map_err(|e| AwsError::Decode(e.to_string()))
}

/// Fetches `{labID}.yaml` from a configured bucket.
///
/// No retry here: a wrong lab id should surface at once.
#[derive(Debug, Clone)]
pub struct S3LabInfoSource {
    config: LabInfoConfig,
}

impl S3LabInfoSource {
    pub fn new(config: LabInfoConfig) -> Self {
        Self { config }
    }

    async fn client(&self, credentials: &Credentials) -> aws_sdk_s3::Client {
        let sdk = sdk::load(
            &self.config.region,
            credentials,
            self.config.endpoint_url.as_deref(),
        )
        .await;
        let builder = aws_sdk_s3::config::Builder::from(&sdk);
        // emulators rarely resolve virtual-hosted bucket names
        let builder = builder.force_path_style(self.config.endpoint_url.is_some());
        aws_sdk_s3::Client::from_conf(builder.build())
    }

    async fn get(&self, lab_id: &str, credentials: &Credentials) -> Result<LabInfo, AwsError> {
        let key = lab_info_key(lab_id);
        let bucket = &self.config.bucket;
        debug!(%bucket, %key, "fetching lab info");

        let object = self
            .client(credentials)
            .await
            .get_object()
            .bucket(bucket)
            .key(&key)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(|service| service.is_no_such_key())
                {
                    AwsError::NoSuchKey {
                        bucket: bucket.clone(),
                        key: key.clone(),
                    }
                } else {
                    AwsError::S3(DisplayErrorContext(&err).to_string())
                }
            })?;

        let raw = object
            .body
            .collect()
            .await
            .map_err(|e| AwsError::S3(format!("reading body: {e}")))?
            .into_bytes();
        let info = parse_lab_info(&raw)?;
        info!(%bucket, %key, entries = info.as_map().len(), "lab info loaded");
        Ok(info)
    }
}

#[async_trait]
impl LabInfoSource for S3LabInfoSource {
    async fn fetch_lab_info(
        &self,
        lab_id: &str,
        credentials: &Credentials,
    ) -> Result<LabInfo, UpstreamError> {
        self.get(lab_id, credentials).await.map_err(UpstreamError::from)
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        extract::Path,
        http::{StatusCode, header},
        response::IntoResponse,
        routing::get,
    };
    use serde_json::json;

    use super::*;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn xml_error(status: StatusCode, code: &str) -> axum::response::Response {
        let body = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <Error><Code>{code}</Code><Message>{code}</Message><RequestId>r1</RequestId></Error>"
        );
        (status, [(header::CONTENT_TYPE, "application/xml")], body).into_response()
    }

    /// Path-style bucket emulator: `l1.yaml` exists, `locked.yaml` is denied.
    async fn object(Path((bucket, key)): Path<(String, String)>) -> axum::response::Response {
        match (bucket.as_str(), key.as_str()) {
            ("labs", "l1.yaml") => (
                [(header::CONTENT_TYPE, "application/x-yaml")],
                "sqsURL: https://queue/r1/q\ntitle: Lab 1\n",
            )
                .into_response(),
            ("labs", "locked.yaml") => xml_error(StatusCode::FORBIDDEN, "AccessDenied"),
            _ => xml_error(StatusCode::NOT_FOUND, "NoSuchKey"),
        }
    }

    async fn source() -> S3LabInfoSource {
        let endpoint = serve(Router::new().route("/{bucket}/{key}", get(object))).await;
        S3LabInfoSource::new(LabInfoConfig {
            endpoint_url: Some(endpoint),
            ..LabInfoConfig::new("labs")
        })
    }

    fn credentials() -> Credentials {
        Credentials::new("AKIATEST", "secret")
    }

    #[tokio::test]
    async fn fetches_document_from_bucket() {
        let info = source().await.get("l1", &credentials()).await.unwrap();
        assert_eq!(info.queue_url(), Some("https://queue/r1/q"));
        assert_eq!(info.get("title"), Some(&json!("Lab 1")));
    }

    #[tokio::test]
    async fn unknown_lab_is_no_such_key() {
        let err = source().await.get("l9", &credentials()).await.unwrap_err();
        assert!(matches!(
            err,
            AwsError::NoSuchKey { ref bucket, ref key } if bucket == "labs" && key == "l9.yaml"
        ));
    }

    #[tokio::test]
    async fn other_service_errors_stay_transport_failures() {
        let src = source().await;
        let err = src.get("locked", &credentials()).await.unwrap_err();
        assert!(matches!(&err, AwsError::S3(msg) if msg.contains("AccessDenied")));

        let upstream = src
            .fetch_lab_info("locked", &credentials())
            .await
            .unwrap_err();
        assert!(matches!(upstream, UpstreamError::Transport(_)));
    }

    #[test]
    fn key_follows_lab_id() {
        assert_eq!(lab_info_key("l1"), "l1.yaml");
    }

    #[test]
    fn parses_nested_mapping() {
        let raw = b"sqsURL: https://sqs.us-east-1.amazonaws.com/1/labs\ntitle: Lab 1\nseats: 4\nlinks:\n  - docs\n";
        let info = parse_lab_info(raw).unwrap();

        assert_eq!(info.queue_url(), Some("https://sqs.us-east-1.amazonaws.com/1/labs"));
        assert_eq!(info.get("seats"), Some(&json!(4)));
        assert_eq!(info.get("links"), Some(&json!(["docs"])));
    }

    #[test]
    fn rejects_non_mapping_documents() {
        assert!(matches!(parse_lab_info(b"- a\n- b\n"), Err(AwsError::Decode(_))));
        assert!(matches!(parse_lab_info(b"just text"), Err(AwsError::Decode(_))));
        assert!(matches!(parse_lab_info(b""), Err(AwsError::Decode(_))));
    }

    #[test]
    fn rejects_invalid_yaml_and_utf8() {
        assert!(matches!(parse_lab_info(b"a: [1, 2"), Err(AwsError::Decode(_))));
        assert!(matches!(parse_lab_info(&[0xff, 0xfe]), Err(AwsError::Decode(_))));
    }

    #[test]
    fn missing_key_maps_to_not_found() {
        let err = UpstreamError::from(AwsError::NoSuchKey {
            bucket: "labs".into(),
            key: "l9.yaml".into(),
        });
        assert_eq!(err, UpstreamError::NotFound("object s3://labs/l9.yaml not found".into()));
    }
}
