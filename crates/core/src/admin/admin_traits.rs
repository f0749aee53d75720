use crate::admin::admin_model::{ActivityRecord, ActivitySource, PlatformStats};
use crate::auth::Session;
use crate::errors::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trait for scanning user-owned rows across tables
#[async_trait]
pub trait ActivityRepositoryTrait: Send + Sync {
    /// Every row's owner and creation time in `source`, across all users.
    async fn list_activity(
        &self,
        session: &Session,
        source: ActivitySource,
    ) -> Result<Vec<ActivityRecord>>;
}

/// Trait for admin analytics operations
#[async_trait]
pub trait AdminServiceTrait: Send + Sync {
    async fn get_platform_stats(
        &self,
        session: &Session,
        now: DateTime<Utc>,
    ) -> Result<PlatformStats>;
}
