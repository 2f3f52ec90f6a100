// Linux-specific readers: /proc/cpuinfo and /proc/stat.

use crate::error::ProviderError;
use crate::models::CpuTimes;

/// Kernel clock ticks per second for /proc/stat counters (USER_HZ).
const CLOCK_TICKS: f64 = 100.0;

/// Per-processor fields from /proc/cpuinfo that sysinfo does not expose.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct CpuinfoEntry {
    pub processor: usize,
    pub model_name: Option<String>,
    pub cores: Option<u32>,
    pub mhz: Option<f64>,
    pub cache_size_kb: Option<u32>,
}

/// Read /proc/cpuinfo entries. Empty on other platforms or when unreadable.
pub(super) fn read_cpuinfo_linux() -> Vec<CpuinfoEntry> {
    #[cfg(target_os = "linux")]
    {
        if let Ok(content) = std::fs::read_to_string("/proc/cpuinfo") {
            return parse_cpuinfo(&content);
        }
    }
    Vec::new()
}

/// Read the aggregate "cpu" line of /proc/stat. `Ok(None)` where /proc/stat does not exist.
pub(super) fn read_cpu_times_linux() -> Result<Option<CpuTimes>, ProviderError> {
    #[cfg(target_os = "linux")]
    {
        let content =
            std::fs::read_to_string("/proc/stat").map_err(|source| ProviderError::Io {
                what: "/proc/stat".into(),
                source,
            })?;
        parse_proc_stat_total(&content).map(Some)
    }
    #[cfg(not(target_os = "linux"))]
    Ok(None)
}

pub(super) fn parse_cpuinfo(content: &str) -> Vec<CpuinfoEntry> {
    let mut entries = Vec::new();
    let mut current: Option<CpuinfoEntry> = None;
    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key == "processor" {
            if let Some(done) = current.take() {
                entries.push(done);
            }
            current = value.parse().ok().map(|processor| CpuinfoEntry {
                processor,
                ..Default::default()
            });
            continue;
        }
        let Some(entry) = current.as_mut() else {
            continue;
        };
        match key {
            "model name" if !value.is_empty() => entry.model_name = Some(value.to_string()),
            "cpu cores" => entry.cores = value.parse().ok(),
            "cpu MHz" => entry.mhz = value.parse().ok(),
            // "512 KB"
            "cache size" => {
                entry.cache_size_kb = value
                    .split_whitespace()
                    .next()
                    .and_then(|n| n.parse().ok())
            }
            _ => {}
        }
    }
    if let Some(done) = current {
        entries.push(done);
    }
    entries
}

pub(super) fn parse_proc_stat_total(content: &str) -> Result<CpuTimes, ProviderError> {
    let line = content
        .lines()
        .find(|l| l.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| ProviderError::Parse {
            what: "/proc/stat",
            detail: "no aggregate cpu line".into(),
        })?;
    let ticks = line
        .split_whitespace()
        .skip(1)
        .map(|field| field.parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ProviderError::Parse {
            what: "/proc/stat",
            detail: e.to_string(),
        })?;
    if ticks.len() < 4 {
        return Err(ProviderError::Parse {
            what: "/proc/stat",
            detail: format!("expected at least 4 counters, got {}", ticks.len()),
        });
    }
    // Older kernels omit the trailing counters.
    let secs = |i: usize| ticks.get(i).map_or(0.0, |&t| t as f64 / CLOCK_TICKS);
    Ok(CpuTimes {
        cpu: "cpu-total".into(),
        user: secs(0),
        nice: secs(1),
        system: secs(2),
        idle: secs(3),
        iowait: secs(4),
        irq: secs(5),
        softirq: secs(6),
        steal: secs(7),
        guest: secs(8),
        guest_nice: secs(9),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CPUINFO: &str = "\
processor\t: 0
vendor_id\t: GenuineIntel
model name\t: Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz
cpu MHz\t\t: 1992.002
cache size\t: 8192 KB
cpu cores\t: 4

processor\t: 1
vendor_id\t: GenuineIntel
model name\t: Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz
cpu MHz\t\t: 2001.500
cache size\t: 8192 KB
cpu cores\t: 4
";

    #[test]
    fn parses_each_processor_block() {
        let entries = parse_cpuinfo(CPUINFO);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].processor, 0);
        assert_eq!(
            entries[0].model_name.as_deref(),
            Some("Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz")
        );
        assert_eq!(entries[0].cores, Some(4));
        assert_eq!(entries[0].cache_size_kb, Some(8192));
        assert_eq!(entries[1].processor, 1);
        assert_eq!(entries[1].mhz, Some(2001.5));
    }

    #[test]
    fn cpuinfo_without_optional_fields() {
        // aarch64 style: no model name, MHz or cache lines
        let entries = parse_cpuinfo("processor\t: 0\nBogoMIPS\t: 48.00\n\nprocessor\t: 1\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].model_name, None);
        assert_eq!(entries[1].cache_size_kb, None);
    }

    #[test]
    fn proc_stat_total_converts_ticks_to_seconds() {
        let content = "cpu  4705 356 584 3699176 23060 0 1 0 0 0\ncpu0 1393 280 290 925133 5630 0 1 0 0 0\nintr 1\n";
        let times = parse_proc_stat_total(content).unwrap();
        assert_eq!(times.cpu, "cpu-total");
        assert_eq!(times.user, 47.05);
        assert_eq!(times.nice, 3.56);
        assert_eq!(times.idle, 36991.76);
        assert_eq!(times.iowait, 230.6);
        assert_eq!(times.guest_nice, 0.0);
    }

    #[test]
    fn proc_stat_short_line_pads_missing_counters() {
        let times = parse_proc_stat_total("cpu 100 0 200 300\n").unwrap();
        assert_eq!(times.system, 2.0);
        assert_eq!(times.steal, 0.0);
    }

    #[test]
    fn proc_stat_without_aggregate_line_is_an_error() {
        let err = parse_proc_stat_total("cpu0 1 2 3 4\n").unwrap_err();
        assert!(matches!(err, ProviderError::Parse { .. }));
    }
}
