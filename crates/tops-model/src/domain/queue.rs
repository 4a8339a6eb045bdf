use url::{Host, Url};

use crate::{KEY_QUEUE_URL, LabInfo, ModelError};

/// Heartbeat queue URL together with the region it lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueAddress {
    pub url: String,
    pub region: String,
}

impl QueueAddress {
    /// Derive the region from a queue URL.
    ///
    /// `https://sqs.<region>.amazonaws.com/...` yields the second host label.
    /// Hosts with fewer than three labels (or IP hosts) fall back to the first
    /// path segment, so `https://queue/r1/q` yields `r1`.
    pub fn parse(url: &str) -> Result<Self, ModelError> {
        let invalid = |reason: &str| ModelError::InvalidQueueUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        };
        let parsed = Url::parse(url.trim()).map_err(|e| invalid(&e.to_string()))?;

        let from_host = match parsed.host() {
            Some(Host::Domain(domain)) => {
                let labels: Vec<&str> = domain.split('.').collect();
                (labels.len() >= 3)
                    .then(|| labels[1])
                    .filter(|label| !label.is_empty())
            }
            _ => None,
        };
        let region = match from_host {
            Some(region) => region,
            None => parsed
                .path_segments()
                .and_then(|mut segments| segments.find(|s| !s.is_empty()))
                .ok_or_else(|| invalid("no region in host or path"))?,
        };

        Ok(Self {
            url: url.trim().to_string(),
            region: region.to_string(),
        })
    }

    pub fn from_lab_info(info: &LabInfo) -> Result<Self, ModelError> {
        let url = info
            .queue_url()
            .ok_or(ModelError::MissingQueueUrl(KEY_QUEUE_URL))?;
        Self::parse(url)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn region_from_aws_host() {
        let addr =
            QueueAddress::parse("https://sqs.us-east-1.amazonaws.com/123456789012/labs").unwrap();
        assert_eq!(addr.region, "us-east-1");
        assert_eq!(addr.url, "https://sqs.us-east-1.amazonaws.com/123456789012/labs");
    }

    #[test]
    fn region_from_path_when_host_is_short() {
        let addr = QueueAddress::parse("https://queue/r1/q").unwrap();
        assert_eq!(addr.region, "r1");
    }

    #[test]
    fn ip_host_uses_path() {
        let addr = QueueAddress::parse("http://127.0.0.1:4566/eu-west-1/q").unwrap();
        assert_eq!(addr.region, "eu-west-1");
    }

    #[test]
    fn rejects_url_without_region() {
        assert!(matches!(
            QueueAddress::parse("https://queue"),
            Err(ModelError::InvalidQueueUrl { .. })
        ));
        assert!(matches!(
            QueueAddress::parse("not a url"),
            Err(ModelError::InvalidQueueUrl { .. })
        ));
    }

    #[test]
    fn missing_queue_url_in_lab_info() {
        let info = LabInfo::try_from(json!({"title": "lab"})).unwrap();
        assert_eq!(
            QueueAddress::from_lab_info(&info).unwrap_err(),
            ModelError::MissingQueueUrl("sqsURL")
        );
    }
}
