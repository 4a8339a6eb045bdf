use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::config::Credentials as AwsCredentials;
use tops_model::Credentials;

const PROVIDER_NAME: &str = "tops-metadata";

/// Shared SDK configuration bound to deployment-scoped static credentials.
pub(crate) async fn load(
    region: &str,
    credentials: &Credentials,
    endpoint_url: Option<&str>,
) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .credentials_provider(AwsCredentials::new(
            credentials.key.clone(),
            credentials.secret.clone(),
            None,
            None,
            PROVIDER_NAME,
        ));

    if let Some(endpoint) = endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    loader.load().await
}
