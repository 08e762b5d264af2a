//! Object Uploader
//!
//! Writes the fixed media object to S3 with the temporary credentials
//! from the broker. The write is an unconditional overwrite; there is
//! no conditional-write or versioning check at this layer.

use std::time::SystemTime;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, info};

use crate::pipeline::ObjectStore;
use crate::types::{Error, Result, TemporaryCredentials, UploadAck, UploadTarget};

pub const OBJECT_KEY: &str = "fh2.txt";
pub const OBJECT_BODY: &str = "Hello from FlighHub 2";

impl UploadTarget {
    /// The fixed object this version of the tool transfers.
    pub fn fixed(bucket: String) -> Self {
        Self {
            bucket,
            key: OBJECT_KEY.to_string(),
            body: Bytes::from_static(OBJECT_BODY.as_bytes()),
        }
    }
}

pub struct S3Uploader {
    region: String,
    target: UploadTarget,
}

impl S3Uploader {
    pub fn new(region: String, target: UploadTarget) -> Self {
        Self { region, target }
    }

    fn classify(code: Option<&str>, msg: String) -> Error {
        match code {
            Some("NoSuchBucket") => Error::NotFound(msg),
            _ => Error::AccessDenied(msg),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3Uploader {
    async fn put_object(&self, credentials: &TemporaryCredentials) -> Result<UploadAck> {
        // Session-scoped credentials are required here; signing with
        // the long-lived key pair alone gets access denied.
        if credentials.session_token.is_empty() {
            return Err(Error::AccessDenied(
                "upload requires session-scoped credentials".to_string(),
            ));
        }

        let expires_after = SystemTime::try_from(credentials.expiration).ok();
        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .credentials_provider(Credentials::new(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.clone(),
                Some(credentials.session_token.clone()),
                expires_after,
                "assumed-role",
            ))
            .load()
            .await;
        let s3 = aws_sdk_s3::Client::new(&shared_config);

        debug!(bucket = %self.target.bucket, key = %self.target.key, "uploading object");
        let response = s3
            .put_object()
            .bucket(&self.target.bucket)
            .key(&self.target.key)
            .body(ByteStream::from(self.target.body.clone()))
            .send()
            .await
            .map_err(|err| {
                let msg = DisplayErrorContext(&err).to_string();
                match &err {
                    SdkError::ServiceError(ctx) => Self::classify(ctx.err().code(), msg),
                    _ => Error::Network(msg),
                }
            })?;

        let ack = UploadAck {
            etag: response.e_tag,
            version_id: response.version_id,
        };
        info!(etag = ?ack.etag, version_id = ?ack.version_id, "object uploaded");

        Ok(ack)
    }
}
