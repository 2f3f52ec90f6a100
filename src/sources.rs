// Capability traits over the host's OS-level data sources.
// Methods block; the aggregator moves each call onto a blocking worker.

use std::net::IpAddr;
use std::sync::Arc;

use crate::error::ProviderError;
use crate::models::{CpuInfo, CpuTimes, HostFacts, MemoryStats};
use crate::sysinfo_repo::SysinfoRepo;

pub trait HostFactsSource: Send + Sync {
    fn host_facts(&self) -> Result<HostFacts, ProviderError>;
}

pub trait CpuSource: Send + Sync {
    fn cpu_inventory(&self) -> Result<Vec<CpuInfo>, ProviderError>;

    /// Aggregate counters across all CPUs, not per core.
    fn cpu_times(&self) -> Result<Vec<CpuTimes>, ProviderError>;

    /// Logical CPUs including SMT siblings. Never a sentinel zero: a host that reports
    /// no CPUs is an error.
    fn logical_count(&self) -> Result<usize, ProviderError>;
}

pub trait MemorySource: Send + Sync {
    fn memory(&self) -> Result<MemoryStats, ProviderError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    pub path: String,
    pub fstype: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageFigures {
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

pub trait VolumeSource: Send + Sync {
    /// Mounted volumes in enumeration order, pseudo filesystems excluded.
    fn mounts(&self) -> Result<Vec<MountPoint>, ProviderError>;

    fn usage(&self, path: &str) -> Result<UsageFigures, ProviderError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterfaceFlags {
    pub up: bool,
    pub loopback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInterface {
    pub name: String,
    pub flags: InterfaceFlags,
}

/// One address entry of an interface, as the OS reported it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressRecord {
    Resolved(IpAddr),
    Unresolved(String),
}

pub trait InterfaceSource: Send + Sync {
    fn interfaces(&self) -> Result<Vec<RawInterface>, ProviderError>;

    fn addresses(&self, interface: &RawInterface) -> Result<Vec<AddressRecord>, ProviderError>;
}

/// The full set of sources a snapshot is built from.
#[derive(Clone)]
pub struct Providers {
    pub host: Arc<dyn HostFactsSource>,
    pub cpu: Arc<dyn CpuSource>,
    pub memory: Arc<dyn MemorySource>,
    pub volumes: Arc<dyn VolumeSource>,
    pub network: Arc<dyn InterfaceSource>,
}

impl Providers {
    /// Production sources for the current host.
    pub fn system() -> Self {
        let repo = Arc::new(SysinfoRepo::new());
        Self {
            host: repo.clone(),
            cpu: repo.clone(),
            memory: repo.clone(),
            volumes: repo.clone(),
            network: repo,
        }
    }
}
