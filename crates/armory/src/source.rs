//! Where live inventory data comes from.

use async_trait::async_trait;
use guardian_bungie::profile::{ArmorSnapshot, ARMOR_SYNC_COMPONENTS};
use guardian_bungie::BungieClient;
use guardian_db::models::user::User;

use crate::credentials::CredentialBroker;
use crate::error::SyncError;

/// Supplies the profile sections the armor sync reads.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn armor_snapshot(&self, user: &User) -> Result<ArmorSnapshot, SyncError>;
}

/// [`ProfileSource`] backed by the Bungie.net profile endpoint.
#[derive(Clone)]
pub struct BungieProfileSource {
    broker: CredentialBroker,
    bungie: BungieClient,
}

impl BungieProfileSource {
    pub fn new(broker: CredentialBroker, bungie: BungieClient) -> Self {
        Self { broker, bungie }
    }
}

#[async_trait]
impl ProfileSource for BungieProfileSource {
    async fn armor_snapshot(&self, user: &User) -> Result<ArmorSnapshot, SyncError> {
        let (membership_type, membership_id) = user
            .destiny_membership()
            .ok_or_else(|| SyncError::Auth("user has no linked Destiny membership".into()))?;
        let access_token = self.broker.access_token(user).await?;

        let profile = self
            .bungie
            .profile(
                &access_token,
                membership_type,
                membership_id,
                &ARMOR_SYNC_COMPONENTS,
            )
            .await
            .map_err(SyncError::Upstream)?;

        profile.into_armor_snapshot().map_err(SyncError::Upstream)
    }
}
