//! Single-shot readiness check.
//!
//! A paused database fails `@PingPartitions`, so a paused cluster reports not-ready.

use crate::core::{Pinger, ProbeMode, Readiness, ReplicationSource};
use crate::domain::model::DrRoleRow;

pub struct ReadinessChecker<C> {
    client: C,
    mode: ProbeMode,
}

impl<C: Pinger + ReplicationSource> ReadinessChecker<C> {
    pub fn new(client: C, mode: ProbeMode) -> Self {
        Self { client, mode }
    }

    /// Every failure, whatever its cause, is reported as `NotReady`.
    pub async fn check(&self) -> Readiness {
        let partitions = self.check_partitions().await;
        if !partitions.is_ready() {
            return partitions;
        }

        match self.mode {
            ProbeMode::Partitions => Readiness::Ready,
            ProbeMode::Replication => self.check_replication().await,
        }
    }

    async fn check_partitions(&self) -> Readiness {
        match self.client.ping_partitions().await {
            Ok(response) if response.is_success() => {
                tracing::debug!("PingPartitions succeeded: {}", response.status_line());
                Readiness::Ready
            }
            Ok(response) => {
                tracing::warn!("PingPartitions failed: {}", response.status_line());
                Readiness::not_ready(response.status_line())
            }
            Err(e) => {
                tracing::warn!("PingPartitions error ({:?}): {}", e.category(), e);
                Readiness::not_ready(e.to_string())
            }
        }
    }

    async fn check_replication(&self) -> Readiness {
        let rows = match self.client.dr_roles().await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("DRROLE statistics error ({:?}): {}", e.category(), e);
                return Readiness::not_ready(e.to_string());
            }
        };

        let lagging: Vec<&DrRoleRow> = rows
            .iter()
            .filter(|row| row.is_configured() && !row.is_active())
            .collect();
        tracing::debug!("{} DR rows, {} not active", rows.len(), lagging.len());

        if lagging.is_empty() {
            return Readiness::Ready;
        }

        let mut lines: Vec<String> = lagging.iter().map(|row| row.to_string()).collect();
        lines.push("Database replication is NOT syncing".to_string());
        Readiness::not_ready(lines.join("\n"))
    }
}
