// Shared test helpers: an in-memory host whose sources can be made to fail.
#![allow(dead_code)]

use hostsnap::error::ProviderError;
use hostsnap::models::*;
use hostsnap::sources::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Failure {
    HostFacts,
    CpuInventory,
    CpuTimes,
    LogicalCount,
    Memory,
    Mounts,
    Interfaces,
}

#[derive(Debug, Clone)]
pub struct FakeMount {
    pub mount: MountPoint,
    /// `None` makes the usage query fail.
    pub usage: Option<UsageFigures>,
}

#[derive(Debug, Clone)]
pub struct FakeInterface {
    pub raw: RawInterface,
    /// `None` makes the address listing fail.
    pub addresses: Option<Vec<AddressRecord>>,
}

#[derive(Debug, Clone)]
pub struct FakeHost {
    pub facts: HostFacts,
    pub cpus: Vec<CpuInfo>,
    pub times: Vec<CpuTimes>,
    pub logical: usize,
    pub memory: MemoryStats,
    pub mounts: Vec<FakeMount>,
    pub interfaces: Vec<FakeInterface>,
    pub failing: HashSet<Failure>,
    /// Earlier mounts answer later, so completion order is the reverse of enumeration order.
    pub stagger_usage: bool,
}

impl FakeHost {
    pub fn fail(mut self, failure: Failure) -> Self {
        self.failing.insert(failure);
        self
    }

    pub fn providers(self) -> Providers {
        let host = Arc::new(self);
        Providers {
            host: host.clone(),
            cpu: host.clone(),
            memory: host.clone(),
            volumes: host.clone(),
            network: host,
        }
    }

    fn check(&self, failure: Failure, what: &'static str) -> Result<(), ProviderError> {
        if self.failing.contains(&failure) {
            Err(ProviderError::Unavailable(what))
        } else {
            Ok(())
        }
    }
}

impl HostFactsSource for FakeHost {
    fn host_facts(&self) -> Result<HostFacts, ProviderError> {
        self.check(Failure::HostFacts, "host facts")?;
        Ok(self.facts.clone())
    }
}

impl CpuSource for FakeHost {
    fn cpu_inventory(&self) -> Result<Vec<CpuInfo>, ProviderError> {
        self.check(Failure::CpuInventory, "cpu inventory")?;
        Ok(self.cpus.clone())
    }

    fn cpu_times(&self) -> Result<Vec<CpuTimes>, ProviderError> {
        self.check(Failure::CpuTimes, "cpu times")?;
        Ok(self.times.clone())
    }

    fn logical_count(&self) -> Result<usize, ProviderError> {
        self.check(Failure::LogicalCount, "logical cpu count")?;
        Ok(self.logical)
    }
}

impl MemorySource for FakeHost {
    fn memory(&self) -> Result<MemoryStats, ProviderError> {
        self.check(Failure::Memory, "memory statistics")?;
        Ok(self.memory)
    }
}

impl VolumeSource for FakeHost {
    fn mounts(&self) -> Result<Vec<MountPoint>, ProviderError> {
        self.check(Failure::Mounts, "mounted volumes")?;
        Ok(self.mounts.iter().map(|m| m.mount.clone()).collect())
    }

    fn usage(&self, path: &str) -> Result<UsageFigures, ProviderError> {
        let (index, mount) = self
            .mounts
            .iter()
            .enumerate()
            .find(|(_, m)| m.mount.path == path)
            .ok_or_else(|| ProviderError::NotFound(format!("mount {path}")))?;
        if self.stagger_usage {
            let remaining = (self.mounts.len() - index) as u64;
            std::thread::sleep(Duration::from_millis(remaining * 15));
        }
        mount.usage.ok_or_else(|| ProviderError::Io {
            what: format!("statvfs {path}"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        })
    }
}

impl InterfaceSource for FakeHost {
    fn interfaces(&self) -> Result<Vec<RawInterface>, ProviderError> {
        self.check(Failure::Interfaces, "network interfaces")?;
        Ok(self.interfaces.iter().map(|i| i.raw.clone()).collect())
    }

    fn addresses(&self, interface: &RawInterface) -> Result<Vec<AddressRecord>, ProviderError> {
        self.interfaces
            .iter()
            .find(|i| i.raw.name == interface.name)
            .and_then(|i| i.addresses.clone())
            .ok_or_else(|| ProviderError::NotFound(format!("interface {}", interface.name)))
    }
}

pub fn linux_facts() -> HostFacts {
    HostFacts {
        hostname: "box1".into(),
        os_family: "linux".into(),
        platform: "ubuntu".into(),
        platform_version: "24.04".into(),
        arch: "x86_64".into(),
        kernel_version: Some("6.8.0".into()),
        uptime_seconds: 93_784,
        boot_timestamp: 1_700_000_000,
    }
}

pub fn cpu(index: usize) -> CpuInfo {
    CpuInfo {
        cpu: index,
        model_name: "Intel(R) Xeon(R) CPU E5-2680 v4 @ 2.40GHz".into(),
        cores: 2,
        mhz: 2400.0,
        cache_size: 35840,
    }
}

pub fn cpu_total() -> CpuTimes {
    CpuTimes {
        cpu: "cpu-total".into(),
        user: 47.05,
        system: 5.84,
        idle: 36991.76,
        nice: 3.56,
        iowait: 230.6,
        irq: 0.0,
        softirq: 0.01,
        steal: 0.0,
        guest: 0.0,
        guest_nice: 0.0,
    }
}

pub fn mount(path: &str, fstype: &str, usage: Option<UsageFigures>) -> FakeMount {
    FakeMount {
        mount: MountPoint {
            path: path.into(),
            fstype: fstype.into(),
        },
        usage,
    }
}

pub fn usage(total: u64, used: u64) -> Option<UsageFigures> {
    Some(UsageFigures {
        total,
        used,
        free: total - used,
    })
}

pub fn iface(name: &str, up: bool, loopback: bool, addrs: &[&str]) -> FakeInterface {
    FakeInterface {
        raw: RawInterface {
            name: name.into(),
            flags: InterfaceFlags { up, loopback },
        },
        addresses: Some(
            addrs
                .iter()
                .map(|a| AddressRecord::Resolved(a.parse().expect("test address")))
                .collect(),
        ),
    }
}

/// Healthy Linux host: two CPUs, two volumes, loopback plus one active interface.
pub fn healthy_host() -> FakeHost {
    FakeHost {
        facts: linux_facts(),
        cpus: vec![cpu(0), cpu(1)],
        times: vec![cpu_total()],
        logical: 4,
        memory: MemoryStats {
            total: 16 * 1024 * 1024 * 1024,
            used: 6 * 1024 * 1024 * 1024,
            available: 10 * 1024 * 1024 * 1024,
        },
        mounts: vec![
            mount("/", "ext4", usage(100 * 1024 * 1024 * 1024, 40 * 1024 * 1024 * 1024)),
            mount("/boot", "vfat", usage(512 * 1024 * 1024, 64 * 1024 * 1024)),
        ],
        interfaces: vec![
            iface("lo", true, true, &["127.0.0.1", "::1"]),
            iface("eth0", true, false, &["10.0.0.5", "fe80::1"]),
        ],
        failing: HashSet::new(),
        stagger_usage: false,
    }
}

/// Snapshot assembled directly from parts, for rendering tests.
pub fn snapshot_with(
    host: HostFacts,
    volumes: Vec<VolumeUsage>,
    interfaces: Vec<NetworkAddress>,
) -> SystemSnapshot {
    SystemSnapshot::assemble(SystemSnapshotParts {
        host,
        interfaces,
        cpus: vec![cpu(0)],
        cpu_time_totals: vec![cpu_total()],
        logical_cpu_count: 2,
        memory: MemoryStats {
            total: 8 * 1024 * 1024 * 1024,
            used: 2 * 1024 * 1024 * 1024,
            available: 6 * 1024 * 1024 * 1024,
        },
        volumes,
    })
}

pub fn volume(path: &str) -> VolumeUsage {
    VolumeUsage {
        path: path.into(),
        fstype: "ext4".into(),
        total: 1024 * 1024 * 1024,
        used: 512 * 1024 * 1024,
        free: 512 * 1024 * 1024,
    }
}

pub fn address(interface: &str, ip: &str) -> NetworkAddress {
    NetworkAddress {
        interface_name: interface.into(),
        ip_address: ip.into(),
    }
}
