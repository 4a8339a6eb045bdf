use async_trait::async_trait;
use aws_sdk_sqs::error::DisplayErrorContext;
use tracing::debug;

use tops_core::{QueuePublisher, UpstreamError};
use tops_model::{Credentials, QueueAddress};

use crate::{config::QueueConfig, errors::AwsError, sdk};

/// SQS queue bound to the heartbeat address from lab info.
#[derive(Debug, Clone)]
pub struct SqsQueue {
    client: aws_sdk_sqs::Client,
    url: String,
}

impl SqsQueue {
    pub async fn connect(
        address: &QueueAddress,
        credentials: &Credentials,
        config: &QueueConfig,
    ) -> Self {
        let sdk = sdk::load(&address.region, credentials, config.endpoint_url.as_deref()).await;
        debug!(url = %address.url, region = %address.region, "sqs client ready");
        Self {
            client: aws_sdk_sqs::Client::new(&sdk),
            url: address.url.clone(),
        }
    }

    async fn send(&self, body: &str) -> Result<String, AwsError> {
        let output = self
            .client
            .send_message()
            .queue_url(&self.url)
            .message_body(body)
            .send()
            .await
            .map_err(|err| AwsError::Sqs(DisplayErrorContext(&err).to_string()))?;

        output
            .message_id()
            .map(str::to_owned)
            .ok_or(AwsError::MissingMessageId)
    }
}

#[async_trait]
impl QueuePublisher for SqsQueue {
    async fn publish(&self, body: &str) -> Result<String, UpstreamError> {
        self.send(body).await.map_err(UpstreamError::from)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Router,
        extract::State,
        http::{HeaderMap, StatusCode, header},
        response::{IntoResponse, Response},
        routing::post,
    };
    use serde_json::{Value, json};

    use super::*;

    type Seen = Arc<Mutex<Vec<Value>>>;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn amz_json(status: StatusCode, body: Value) -> Response {
        (
            status,
            [(header::CONTENT_TYPE, "application/x-amz-json-1.0")],
            body.to_string(),
        )
            .into_response()
    }

    /// JSON-protocol queue emulator keyed on the queue URL's last segment.
    async fn send_message(State(seen): State<Seen>, headers: HeaderMap, body: String) -> Response {
        let target = headers
            .get("x-amz-target")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert_eq!(target, "AmazonSQS.SendMessage");

        let request: Value = serde_json::from_str(&body).unwrap();
        let queue = request["QueueUrl"].as_str().unwrap_or_default().to_string();
        seen.lock().unwrap().push(request);

        if queue.ends_with("/labs") {
            amz_json(StatusCode::OK, json!({"MessageId": "m-1"}))
        } else if queue.ends_with("/silent") {
            amz_json(StatusCode::OK, json!({}))
        } else {
            amz_json(
                StatusCode::BAD_REQUEST,
                json!({
                    "__type": "com.amazonaws.sqs#QueueDoesNotExist",
                    "message": "The specified queue does not exist.",
                }),
            )
        }
    }

    async fn queue(name: &str) -> (SqsQueue, Seen) {
        let seen = Seen::default();
        let endpoint = serve(
            Router::new()
                .route("/", post(send_message))
                .with_state(seen.clone()),
        )
        .await;
        let address = QueueAddress {
            url: format!("{endpoint}/000000000000/{name}"),
            region: "r1".into(),
        };
        let config = QueueConfig {
            endpoint_url: Some(endpoint),
        };
        let queue = SqsQueue::connect(&address, &Credentials::new("AKIATEST", "secret"), &config).await;
        (queue, seen)
    }

    #[tokio::test]
    async fn publishes_body_to_bound_queue() {
        let (queue, seen) = queue("labs").await;

        let id = queue.publish(r#"{"depID":"d1"}"#).await.unwrap();
        assert_eq!(id, "m-1");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0]["MessageBody"], json!(r#"{"depID":"d1"}"#));
        assert!(seen[0]["QueueUrl"].as_str().unwrap().ends_with("/000000000000/labs"));
    }

    #[tokio::test]
    async fn response_without_message_id_is_rejected() {
        let (queue, _seen) = queue("silent").await;
        let err = queue.send("{}").await.unwrap_err();
        assert!(matches!(err, AwsError::MissingMessageId));
    }

    #[tokio::test]
    async fn service_error_is_a_transport_failure() {
        let (queue, _seen) = queue("gone").await;

        let err = queue.send("{}").await.unwrap_err();
        assert!(matches!(err, AwsError::Sqs(_)));

        let upstream = queue.publish("{}").await.unwrap_err();
        assert!(matches!(upstream, UpstreamError::Transport(_)));
    }
}
