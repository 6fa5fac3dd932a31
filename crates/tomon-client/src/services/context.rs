//! Service context - dependency container for services

use tomon_cache::SharedStateCache;
use tomon_rest::RestClient;

/// Everything a service needs: the authenticated REST client and the cache
#[derive(Debug, Clone)]
pub struct ServiceContext {
    rest: RestClient,
    cache: SharedStateCache,
}

impl ServiceContext {
    pub fn new(rest: RestClient, cache: SharedStateCache) -> Self {
        Self { rest, cache }
    }

    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    pub fn cache(&self) -> &SharedStateCache {
        &self.cache
    }
}
