// Provider and snapshot errors

use std::fmt;
use thiserror::Error;

/// Failure of a single OS-level query.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} not reported by the operating system")]
    Unavailable(&'static str),
    #[error("{0} not found")]
    NotFound(String),
    #[error("reading {what}: {source}")]
    Io {
        what: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {what}: {detail}")]
    Parse { what: &'static str, detail: String },
    #[error("{what}: {detail}")]
    Os { what: &'static str, detail: String },
}

/// Sources whose failure aborts the whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    HostFacts,
    CpuInventory,
    CpuTimes,
    LogicalCpuCount,
    Memory,
    MountEnumeration,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::HostFacts => "host facts",
            SourceKind::CpuInventory => "cpu inventory",
            SourceKind::CpuTimes => "cpu times",
            SourceKind::LogicalCpuCount => "logical cpu count",
            SourceKind::Memory => "memory",
            SourceKind::MountEnumeration => "mount enumeration",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal error of a snapshot build; no partial snapshot accompanies it.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("{kind} query failed: {error}")]
    Source {
        kind: SourceKind,
        #[source]
        error: ProviderError,
    },
    #[error("{kind} worker did not complete: {detail}")]
    Worker { kind: SourceKind, detail: String },
}

impl SnapshotError {
    pub fn kind(&self) -> SourceKind {
        match self {
            SnapshotError::Source { kind, .. } | SnapshotError::Worker { kind, .. } => *kind,
        }
    }
}
