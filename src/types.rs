// Shared data model and error taxonomy for the transfer pipeline

use aws_smithy_types::DateTime;
use bytes::Bytes;

/// Short-lived credentials issued by STS for the duration of one run.
///
/// The session token is required: uploads signed with the long-lived
/// key pair alone are denied by the bucket policy, so there is no
/// tokenless variant of this type.
#[derive(Clone)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime,
}

// Manual Debug so a stray `{:?}` in a log line can never leak the
// secret key or session token.
impl std::fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("session_token", &"***")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// The one object this tool writes, fixed for this version.
#[derive(Debug, Clone)]
pub struct UploadTarget {
    pub bucket: String,
    pub key: String,
    pub body: Bytes,
}

/// Write acknowledgment returned by the object store.
#[derive(Debug, Clone, Default)]
pub struct UploadAck {
    pub etag: Option<String>,
    pub version_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Role assumption denied: {0}")]
    Authorization(String),

    #[error("Object store access denied: {0}")]
    AccessDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Notification endpoint returned {status}: {body}")]
    Http { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret_material() {
        let creds = TemporaryCredentials {
            access_key_id: "ASIAEXAMPLE".to_string(),
            secret_access_key: "super-secret-key".to_string(),
            session_token: "very-secret-token".to_string(),
            expiration: DateTime::from_secs(1_700_000_000),
        };

        let printed = format!("{:?}", creds);
        assert!(printed.contains("ASIAEXAMPLE"));
        assert!(!printed.contains("super-secret-key"));
        assert!(!printed.contains("very-secret-token"));
    }
}
