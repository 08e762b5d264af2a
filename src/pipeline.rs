//! Sequential transfer pipeline: assume role, upload, notify.
//!
//! Each stage sits behind a trait so the run order and abort semantics
//! can be exercised without AWS or a live endpoint. The pipeline is
//! single-shot: one invocation per process, strictly forward, any
//! stage failure aborts the remainder.

use tracing::info;

use crate::broker::StsBroker;
use crate::config::Config;
use crate::notifier::{HttpNotifier, NotificationPayload};
use crate::types::{Result, TemporaryCredentials, UploadAck, UploadTarget};
use crate::uploader::S3Uploader;

#[async_trait::async_trait]
pub trait CredentialBroker: Send + Sync {
    async fn assume_role(&self) -> Result<TemporaryCredentials>;
}

#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(&self, credentials: &TemporaryCredentials) -> Result<UploadAck>;
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self) -> Result<String>;
}

pub struct Pipeline {
    broker: Box<dyn CredentialBroker>,
    store: Box<dyn ObjectStore>,
    notifier: Box<dyn Notifier>,
}

impl Pipeline {
    pub fn new(
        broker: Box<dyn CredentialBroker>,
        store: Box<dyn ObjectStore>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            broker,
            store,
            notifier,
        }
    }

    /// Wire up the production stages from process configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let payload = NotificationPayload::packaged()?;
        Ok(Self::new(
            Box::new(StsBroker::new(config.aws.clone(), config.role.clone())),
            Box::new(S3Uploader::new(
                config.aws.region.clone(),
                UploadTarget::fixed(config.upload.bucket.clone()),
            )),
            Box::new(HttpNotifier::new(config.notify.api_url.clone(), payload)),
        ))
    }

    /// Drive the three stages in order. The first error aborts the
    /// remaining stages and surfaces to the caller.
    pub async fn run(&self) -> Result<()> {
        let credentials = self.broker.assume_role().await?;
        self.store.put_object(&credentials).await?;
        self.notifier.notify().await?;
        info!("media file direct transfer complete");
        Ok(())
    }
}
