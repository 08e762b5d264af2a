//! Credential Broker
//!
//! Exchanges the long-lived key pair for short-lived, role-scoped
//! credentials via STS AssumeRole. The optional inline session policy
//! is forwarded verbatim; STS validates it server-side.

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_sts::error::{DisplayErrorContext, SdkError};
use tracing::{debug, info};

use crate::config::{AwsConfig, RoleConfig};
use crate::pipeline::CredentialBroker;
use crate::types::{Error, Result, TemporaryCredentials};

pub struct StsBroker {
    aws: AwsConfig,
    role: RoleConfig,
}

impl StsBroker {
    pub fn new(aws: AwsConfig, role: RoleConfig) -> Self {
        Self { aws, role }
    }

    /// Reject incomplete role parameters before any client is built or
    /// any network call is made.
    pub fn validate(role: &RoleConfig) -> Result<()> {
        if role.arn.is_empty() {
            return Err(Error::Config("role ARN must not be empty".to_string()));
        }
        if role.session_name.is_empty() {
            return Err(Error::Config(
                "role session name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CredentialBroker for StsBroker {
    async fn assume_role(&self) -> Result<TemporaryCredentials> {
        Self::validate(&self.role)?;

        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.aws.region.clone()))
            .credentials_provider(Credentials::new(
                self.aws.access_key_id.clone(),
                self.aws.secret_access_key.clone(),
                None,
                None,
                "long-lived-env",
            ))
            .load()
            .await;
        let sts = aws_sdk_sts::Client::new(&shared_config);

        debug!(role_arn = %self.role.arn, "assuming role");
        let response = sts
            .assume_role()
            .role_arn(&self.role.arn)
            .role_session_name(&self.role.session_name)
            .set_policy(self.role.policy.clone())
            .send()
            .await
            .map_err(|err| {
                let msg = DisplayErrorContext(&err).to_string();
                match err {
                    SdkError::ServiceError(_) => Error::Authorization(msg),
                    _ => Error::Network(msg),
                }
            })?;

        let issued = response.credentials.ok_or_else(|| {
            Error::Authorization("STS response contained no credentials".to_string())
        })?;
        if issued.session_token.is_empty() {
            return Err(Error::Authorization(
                "STS issued credentials without a session token".to_string(),
            ));
        }

        let credentials = TemporaryCredentials {
            access_key_id: issued.access_key_id,
            secret_access_key: issued.secret_access_key,
            session_token: issued.session_token,
            expiration: issued.expiration,
        };

        // Secret key and session token are deliberately left out here.
        info!(
            access_key_id = %credentials.access_key_id,
            expiration = %credentials.expiration,
            "temporary credentials issued"
        );

        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(arn: &str, session_name: &str) -> RoleConfig {
        RoleConfig {
            arn: arn.to_string(),
            session_name: session_name.to_string(),
            policy: None,
        }
    }

    #[test]
    fn validate_accepts_complete_role() {
        let role = role("arn:aws:iam::123456789012:role/media-transfer", "fh2");
        assert!(StsBroker::validate(&role).is_ok());
    }

    #[test]
    fn validate_rejects_empty_arn() {
        let err = StsBroker::validate(&role("", "fh2")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn validate_rejects_empty_session_name() {
        let arn = "arn:aws:iam::123456789012:role/media-transfer";
        let err = StsBroker::validate(&role(arn, "")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
