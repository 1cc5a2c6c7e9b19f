use std::sync::Arc;

use guardian_armory::manifest::ManifestJobs;
use guardian_armory::{
    ArmorOptimizer, ArmorSynchronizer, BungieProfileSource, ChatService, CredentialBroker,
    ProfileSource,
};
use guardian_bungie::BungieClient;
use guardian_llm::TextGenerator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; every service holds the pool and HTTP clients by handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: guardian_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Direct Bungie access for the proxy endpoints.
    pub bungie: BungieClient,
    pub broker: CredentialBroker,
    pub optimizer: ArmorOptimizer,
    pub chat: ChatService,
    pub manifest: ManifestJobs,
}

impl AppState {
    /// Wire the services with live inventory data read from Bungie.
    pub fn new(
        pool: guardian_db::DbPool,
        config: ServerConfig,
        bungie: BungieClient,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let broker = CredentialBroker::new(pool.clone(), bungie.clone());
        let source = Arc::new(BungieProfileSource::new(broker, bungie.clone()));
        Self::with_profile_source(pool, config, bungie, source, generator)
    }

    /// Wire the services around an explicit inventory source.
    pub fn with_profile_source(
        pool: guardian_db::DbPool,
        config: ServerConfig,
        bungie: BungieClient,
        source: Arc<dyn ProfileSource>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let broker = CredentialBroker::new(pool.clone(), bungie.clone());
        let synchronizer = ArmorSynchronizer::new(pool.clone(), source);
        let optimizer = ArmorOptimizer::new(pool.clone(), synchronizer, Arc::clone(&generator));
        let chat = ChatService::new(pool.clone(), generator);
        let manifest = ManifestJobs::new(pool.clone(), bungie.clone());

        Self {
            pool,
            config: Arc::new(config),
            bungie,
            broker,
            optimizer,
            chat,
            manifest,
        }
    }
}
