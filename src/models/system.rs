// Host identity, CPU, memory and the assembled snapshot

use serde::Serialize;

use super::{NetworkAddress, VolumeUsage};

/// OS family identifier for which a kernel version is reported.
pub const LINUX_FAMILY: &str = "linux";

/// Raw host identity as returned by the host facts provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFacts {
    pub hostname: String,
    pub os_family: String,
    pub platform: String,
    pub platform_version: String,
    pub arch: String,
    pub kernel_version: Option<String>,
    pub uptime_seconds: u64,
    pub boot_timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuInfo {
    /// Logical index as enumerated by the provider.
    pub cpu: usize,
    pub model_name: String,
    /// Physical cores of the package this CPU belongs to.
    pub cores: u32,
    pub mhz: f64,
    /// Cache size in KB.
    pub cache_size: u32,
}

/// Accumulated time-in-state counters, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuTimes {
    pub cpu: String,
    pub user: f64,
    pub system: f64,
    pub idle: f64,
    pub nice: f64,
    pub iowait: f64,
    pub irq: f64,
    pub softirq: f64,
    pub steal: f64,
    pub guest: f64,
    pub guest_nice: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryStats {
    pub total: u64,
    pub used: u64,
    pub available: u64,
}

/// Everything collected for one snapshot, before normalization.
#[derive(Debug, Clone)]
pub struct SystemSnapshotParts {
    pub host: HostFacts,
    pub interfaces: Vec<NetworkAddress>,
    pub cpus: Vec<CpuInfo>,
    pub cpu_time_totals: Vec<CpuTimes>,
    pub logical_cpu_count: usize,
    pub memory: MemoryStats,
    pub volumes: Vec<VolumeUsage>,
}

/// Point-in-time capture of host facts. Read-only once assembled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSnapshot {
    hostname: String,
    os: String,
    platform: String,
    platform_version: String,
    arch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kernel_version: Option<String>,
    interfaces: Vec<NetworkAddress>,
    cpus: Vec<CpuInfo>,
    cpu_time_totals: Vec<CpuTimes>,
    logical_cpu_count: usize,
    memory: MemoryStats,
    volumes: Vec<VolumeUsage>,
    uptime_seconds: u64,
    boot_timestamp: u64,
}

impl SystemSnapshot {
    /// Normalizes collected parts into a snapshot. The kernel version survives only on
    /// the Linux family, and only when non-empty.
    pub fn assemble(parts: SystemSnapshotParts) -> Self {
        let SystemSnapshotParts {
            host,
            interfaces,
            cpus,
            cpu_time_totals,
            logical_cpu_count,
            memory,
            volumes,
        } = parts;
        let kernel_version = if host.os_family == LINUX_FAMILY {
            host.kernel_version.filter(|v| !v.is_empty())
        } else {
            None
        };
        Self {
            hostname: host.hostname,
            os: host.os_family,
            platform: host.platform,
            platform_version: host.platform_version,
            arch: host.arch,
            kernel_version,
            interfaces,
            cpus,
            cpu_time_totals,
            logical_cpu_count,
            memory,
            volumes,
            uptime_seconds: host.uptime_seconds,
            boot_timestamp: host.boot_timestamp,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn os(&self) -> &str {
        &self.os
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn platform_version(&self) -> &str {
        &self.platform_version
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    pub fn kernel_version(&self) -> Option<&str> {
        self.kernel_version.as_deref()
    }

    pub fn interfaces(&self) -> &[NetworkAddress] {
        &self.interfaces
    }

    pub fn cpus(&self) -> &[CpuInfo] {
        &self.cpus
    }

    pub fn cpu_time_totals(&self) -> &[CpuTimes] {
        &self.cpu_time_totals
    }

    pub fn logical_cpu_count(&self) -> usize {
        self.logical_cpu_count
    }

    pub fn memory(&self) -> &MemoryStats {
        &self.memory
    }

    pub fn volumes(&self) -> &[VolumeUsage] {
        &self.volumes
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.uptime_seconds
    }

    pub fn boot_timestamp(&self) -> u64 {
        self.boot_timestamp
    }
}
