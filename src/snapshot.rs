// Snapshot aggregation: fan out provider queries, apply the failure policy, assemble.
//
// Fatal: host facts, cpu inventory, cpu times, logical count, memory, mount enumeration.
// Degraded (element dropped): per-mount usage, interface enumeration, per-interface addresses.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::instrument;

use crate::error::{ProviderError, SnapshotError, SourceKind};
use crate::models::{NetworkAddress, SystemSnapshot, SystemSnapshotParts, VolumeUsage};
use crate::network;
use crate::sources::{InterfaceSource, Providers, VolumeSource};

/// Builds one snapshot of the host. Every source is queried exactly once; the first fatal
/// failure is returned and no snapshot is produced.
#[instrument(skip(providers), fields(operation = "build_snapshot"))]
pub async fn build_snapshot(providers: &Providers) -> Result<SystemSnapshot, SnapshotError> {
    let host = providers.host.clone();
    let inventory = providers.cpu.clone();
    let times = providers.cpu.clone();
    let count = providers.cpu.clone();
    let memory = providers.memory.clone();

    let (host, cpus, cpu_time_totals, logical_cpu_count, memory, volumes, interfaces) =
        tokio::try_join!(
            query(SourceKind::HostFacts, move || host.host_facts()),
            query(SourceKind::CpuInventory, move || inventory.cpu_inventory()),
            query(SourceKind::CpuTimes, move || times.cpu_times()),
            query(SourceKind::LogicalCpuCount, move || nonzero_count(count.logical_count()?)),
            query(SourceKind::Memory, move || memory.memory()),
            collect_volumes(providers.volumes.clone()),
            collect_interfaces(providers.network.clone()),
        )?;

    let snapshot = SystemSnapshot::assemble(SystemSnapshotParts {
        host,
        interfaces,
        cpus,
        cpu_time_totals,
        logical_cpu_count,
        memory,
        volumes,
    });
    tracing::debug!(
        volumes = snapshot.volumes().len(),
        interfaces = snapshot.interfaces().len(),
        cpus = snapshot.cpus().len(),
        "snapshot assembled"
    );
    Ok(snapshot)
}

/// Runs one fatal-class query on a blocking worker.
async fn query<T, F>(kind: SourceKind, f: F) -> Result<T, SnapshotError>
where
    F: FnOnce() -> Result<T, ProviderError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| SnapshotError::Worker {
            kind,
            detail: e.to_string(),
        })?
        .map_err(|error| {
            tracing::warn!(error = %error, source = %kind, "fatal collection failure");
            SnapshotError::Source { kind, error }
        })
}

/// A host always has at least one logical CPU; zero means the provider could not tell.
fn nonzero_count(count: usize) -> Result<usize, ProviderError> {
    match count {
        0 => Err(ProviderError::Unavailable("logical cpu count")),
        n => Ok(n),
    }
}

/// Enumeration is fatal; each usage query is dispatched concurrently and lands in the slot
/// of its mount, so output order is enumeration order whatever the completion order.
async fn collect_volumes(source: Arc<dyn VolumeSource>) -> Result<Vec<VolumeUsage>, SnapshotError> {
    let mounts = {
        let source = source.clone();
        query(SourceKind::MountEnumeration, move || source.mounts()).await?
    };

    let slots = mounts.into_iter().map(|mount| {
        let source = source.clone();
        async move {
            let path = mount.path.clone();
            match tokio::task::spawn_blocking(move || source.usage(&path)).await {
                Ok(Ok(figures)) => Some(VolumeUsage {
                    path: mount.path,
                    fstype: mount.fstype,
                    total: figures.total,
                    used: figures.used,
                    free: figures.free,
                }),
                Ok(Err(e)) => {
                    tracing::debug!(
                        error = %e,
                        operation = "volume_usage",
                        mount = %mount.path,
                        "skipping volume"
                    );
                    None
                }
                Err(e) => {
                    tracing::debug!(
                        error = %e,
                        operation = "volume_usage",
                        mount = %mount.path,
                        "usage worker did not complete; skipping volume"
                    );
                    None
                }
            }
        }
    });

    Ok(join_all(slots).await.into_iter().flatten().collect())
}

/// Networking is auxiliary: nothing here can fail the snapshot.
async fn collect_interfaces(
    source: Arc<dyn InterfaceSource>,
) -> Result<Vec<NetworkAddress>, SnapshotError> {
    match tokio::task::spawn_blocking(move || network::active_addresses(source.as_ref())).await {
        Ok(addresses) => Ok(addresses),
        Err(e) => {
            tracing::debug!(
                error = %e,
                operation = "interfaces",
                "interface worker did not complete; reporting no addresses"
            );
            Ok(Vec::new())
        }
    }
}
