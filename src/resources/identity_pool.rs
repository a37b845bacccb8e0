//! Identity pool ("Cognito") resource. Configuration only.

use crate::config::{validate_identity_pool, IdentityPoolConfig};
use crate::error::DeclareResult;
use crate::registry::Registry;
use crate::resources::Resource;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct IdentityPool {
    config: Arc<IdentityPoolConfig>,
}

impl IdentityPool {
    pub fn declare(registry: &mut Registry, config: IdentityPoolConfig) -> DeclareResult<IdentityPool> {
        validate_identity_pool(&config)?;
        let pool = IdentityPool {
            config: Arc::new(config),
        };
        registry.put_resource(Resource::IdentityPool(pool.clone()))?;
        Ok(pool)
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn mfa(&self) -> bool {
        self.config.mfa
    }

    pub fn password_policy(&self) -> &str {
        &self.config.password_policy
    }

    pub fn token_ttl(&self) -> &str {
        &self.config.token_ttl
    }

    pub fn config(&self) -> &IdentityPoolConfig {
        &self.config
    }

    pub fn same_as(&self, other: &IdentityPool) -> bool {
        Arc::ptr_eq(&self.config, &other.config)
    }
}
