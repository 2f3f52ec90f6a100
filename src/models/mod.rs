// Snapshot domain models

mod network;
mod storage;
mod system;

pub use network::NetworkAddress;
pub use storage::VolumeUsage;
pub use system::{
    CpuInfo, CpuTimes, HostFacts, LINUX_FAMILY, MemoryStats, SystemSnapshot, SystemSnapshotParts,
};
