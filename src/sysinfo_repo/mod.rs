// Host queries via sysinfo, /proc, statvfs and pnet

mod linux;

use crate::error::ProviderError;
use crate::models::{CpuInfo, CpuTimes, HostFacts, MemoryStats};
use crate::sources::{
    AddressRecord, CpuSource, HostFactsSource, InterfaceFlags, InterfaceSource, MemorySource,
    MountPoint, RawInterface, UsageFigures, VolumeSource,
};
use pnet::datalink::{self, NetworkInterface};
use std::sync::{Mutex, MutexGuard};
use sysinfo::{Disks, System};
use tracing::instrument;

pub struct SysinfoRepo {
    sys: Mutex<System>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    /// Creates an empty `System`; each query refreshes only what it reads.
    pub fn new() -> Self {
        Self {
            sys: Mutex::new(System::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, System>, ProviderError> {
        self.sys.lock().map_err(|e| ProviderError::Os {
            what: "sysinfo lock",
            detail: e.to_string(),
        })
    }
}

/// OS family of the running build; macOS is reported by its kernel family name.
pub fn os_family() -> String {
    normalize_os_family(std::env::consts::OS)
}

fn normalize_os_family(os: &str) -> String {
    match os {
        "macos" => "darwin".into(),
        other => other.into(),
    }
}

impl HostFactsSource for SysinfoRepo {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "host_facts"))]
    fn host_facts(&self) -> Result<HostFacts, ProviderError> {
        Ok(HostFacts {
            hostname: require_hostname(System::host_name())?,
            os_family: os_family(),
            platform: System::distribution_id(),
            platform_version: System::os_version().unwrap_or_default(),
            arch: System::cpu_arch(),
            kernel_version: System::kernel_version(),
            uptime_seconds: System::uptime(),
            boot_timestamp: System::boot_time(),
        })
    }
}

impl CpuSource for SysinfoRepo {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "cpu_inventory"))]
    fn cpu_inventory(&self) -> Result<Vec<CpuInfo>, ProviderError> {
        let mut sys = self.lock()?;
        sys.refresh_cpu_all();
        if sys.cpus().is_empty() {
            return Err(ProviderError::Unavailable("cpu inventory"));
        }

        // /proc/cpuinfo carries cache size and per-package cores; sysinfo does not.
        let details = linux::read_cpuinfo_linux();
        let physical = System::physical_core_count().and_then(|n| u32::try_from(n).ok());

        Ok(sys
            .cpus()
            .iter()
            .enumerate()
            .map(|(index, cpu)| {
                let detail = details.iter().find(|d| d.processor == index);
                describe_cpu(index, detail, physical, cpu.brand(), cpu.frequency())
            })
            .collect())
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "cpu_times"))]
    fn cpu_times(&self) -> Result<Vec<CpuTimes>, ProviderError> {
        Ok(linux::read_cpu_times_linux()?.into_iter().collect())
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "logical_count"))]
    fn logical_count(&self) -> Result<usize, ProviderError> {
        let mut sys = self.lock()?;
        sys.refresh_cpu_all();
        match sys.cpus().len() {
            0 => Err(ProviderError::Unavailable("logical cpu count")),
            n => Ok(n),
        }
    }
}

/// Only a missing hostname fails; an empty one is reported as-is.
fn require_hostname(name: Option<String>) -> Result<String, ProviderError> {
    name.ok_or(ProviderError::Unavailable("hostname"))
}

/// Merges /proc/cpuinfo details with what sysinfo reports. Descriptor fields nobody
/// reports are zero ("Unknown" for the model); they never fail the inventory.
fn describe_cpu(
    index: usize,
    detail: Option<&linux::CpuinfoEntry>,
    physical: Option<u32>,
    brand: &str,
    frequency_mhz: u64,
) -> CpuInfo {
    let brand = brand.trim();
    CpuInfo {
        cpu: index,
        model_name: detail
            .and_then(|d| d.model_name.clone())
            .or_else(|| (!brand.is_empty()).then(|| brand.to_string()))
            .unwrap_or_else(|| "Unknown".into()),
        cores: detail.and_then(|d| d.cores).or(physical).unwrap_or(0),
        mhz: detail
            .and_then(|d| d.mhz)
            .unwrap_or(frequency_mhz as f64),
        cache_size: detail.and_then(|d| d.cache_size_kb).unwrap_or(0),
    }
}

impl MemorySource for SysinfoRepo {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "memory"))]
    fn memory(&self) -> Result<MemoryStats, ProviderError> {
        let mut sys = self.lock()?;
        sys.refresh_memory();

        let total = sys.total_memory();
        if total == 0 {
            return Err(ProviderError::Unavailable("memory statistics"));
        }
        let available = sys.available_memory();
        Ok(MemoryStats {
            total,
            used: total.saturating_sub(available),
            available,
        })
    }
}

impl VolumeSource for SysinfoRepo {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "mounts"))]
    fn mounts(&self) -> Result<Vec<MountPoint>, ProviderError> {
        let disks = Disks::new_with_refreshed_list();
        Ok(disks
            .list()
            .iter()
            .map(|d| MountPoint {
                path: d.mount_point().to_string_lossy().into_owned(),
                fstype: d.file_system().to_string_lossy().into_owned(),
            })
            .collect())
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "volume_usage"))]
    fn usage(&self, path: &str) -> Result<UsageFigures, ProviderError> {
        #[cfg(unix)]
        {
            statvfs_usage(path)
        }
        #[cfg(not(unix))]
        {
            disks_usage(path)
        }
    }
}

/// Same arithmetic as `df`: used counts blocks reserved for root, free does not.
#[cfg(unix)]
fn statvfs_usage(path: &str) -> Result<UsageFigures, ProviderError> {
    let stat = nix::sys::statvfs::statvfs(path).map_err(|errno| ProviderError::Io {
        what: format!("statvfs {path}"),
        source: std::io::Error::from(errno),
    })?;
    let frsize = u64::from(stat.fragment_size());
    let blocks = u64::from(stat.blocks());
    let blocks_free = u64::from(stat.blocks_free());
    let blocks_available = u64::from(stat.blocks_available());
    Ok(UsageFigures {
        total: blocks.saturating_mul(frsize),
        used: blocks.saturating_sub(blocks_free).saturating_mul(frsize),
        free: blocks_available.saturating_mul(frsize),
    })
}

#[cfg(not(unix))]
fn disks_usage(path: &str) -> Result<UsageFigures, ProviderError> {
    let disks = Disks::new_with_refreshed_list();
    let disk = disks
        .list()
        .iter()
        .find(|d| d.mount_point().to_string_lossy() == path)
        .ok_or_else(|| ProviderError::NotFound(format!("mount {path}")))?;
    let total = disk.total_space();
    let free = disk.available_space();
    Ok(UsageFigures {
        total,
        used: total.saturating_sub(free),
        free,
    })
}

fn raw_interface(iface: &NetworkInterface) -> RawInterface {
    RawInterface {
        name: iface.name.clone(),
        flags: InterfaceFlags {
            up: iface.is_up(),
            loopback: iface.is_loopback(),
        },
    }
}

impl InterfaceSource for SysinfoRepo {
    #[instrument(skip(self), fields(repo = "pnet", operation = "interfaces"))]
    fn interfaces(&self) -> Result<Vec<RawInterface>, ProviderError> {
        Ok(datalink::interfaces().iter().map(raw_interface).collect())
    }

    /// Re-reads the interface table, so an interface gone since enumeration is `NotFound`.
    #[instrument(
        skip(self, interface),
        fields(repo = "pnet", operation = "interface_addresses", interface = %interface.name)
    )]
    fn addresses(&self, interface: &RawInterface) -> Result<Vec<AddressRecord>, ProviderError> {
        let found = datalink::interfaces()
            .into_iter()
            .find(|i| i.name == interface.name)
            .ok_or_else(|| ProviderError::NotFound(format!("interface {}", interface.name)))?;
        Ok(found
            .ips
            .iter()
            .map(|net| AddressRecord::Resolved(net.ip()))
            .collect())
    }
}
