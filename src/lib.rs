// Library for tests to access modules

pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod network;
pub mod report;
pub mod snapshot;
pub mod sources;
pub mod sysinfo_repo;
pub mod version;

pub use error::{ProviderError, SnapshotError, SourceKind};
pub use snapshot::build_snapshot;
pub use sources::Providers;
