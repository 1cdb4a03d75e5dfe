use crate::domain::model::{DrRoleRow, ProcedureResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Partition reachability check against the database.
#[async_trait]
pub trait Pinger: Send + Sync {
    async fn ping_partitions(&self) -> Result<ProcedureResponse>;
}

/// Source of cross-cluster replication (DR) state.
///
/// A `@Statistics DRROLE` call that does not succeed is an error, not an empty list.
#[async_trait]
pub trait ReplicationSource: Send + Sync {
    async fn dr_roles(&self) -> Result<Vec<DrRoleRow>>;
}
