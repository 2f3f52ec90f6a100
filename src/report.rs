// Text report and JSON document for a snapshot

use std::io::{self, Write};

use crate::format::{human_boot_time, human_bytes, human_duration};
use crate::models::SystemSnapshot;

/// Pretty-printed JSON document (two-space indent).
pub fn to_json(snapshot: &SystemSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

/// Text report as a string.
pub fn render_report(snapshot: &SystemSnapshot) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_report(&mut buf, snapshot);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Text report in fixed order: identity, uptime, CPU, memory, volumes, active IPs.
/// Volume and IP sections vanish when empty and collapse to one line for a single row.
pub fn write_report<W: Write>(w: &mut W, snapshot: &SystemSnapshot) -> io::Result<()> {
    write_identity(w, snapshot)?;
    write_cpu(w, snapshot)?;
    write_memory(w, snapshot)?;
    write_volumes(w, snapshot)?;
    write_interfaces(w, snapshot)
}

fn write_identity<W: Write>(w: &mut W, s: &SystemSnapshot) -> io::Result<()> {
    writeln!(w, "Hostname: {}", s.hostname())?;
    writeln!(w, "OS: {}", s.os())?;
    writeln!(w, "Platform: {} {}", s.platform(), s.platform_version())?;
    writeln!(w, "Arch: {}", s.arch())?;
    if let Some(kernel) = s.kernel_version() {
        writeln!(w, "Kernel: {kernel}")?;
    }
    writeln!(w, "Uptime: {}", human_duration(s.uptime_seconds()))?;
    writeln!(w, "Boot Time: {}", human_boot_time(s.boot_timestamp()))
}

fn write_cpu<W: Write>(w: &mut W, s: &SystemSnapshot) -> io::Result<()> {
    let cpus = s.cpus();
    let Some(first) = cpus.first() else {
        return Ok(());
    };
    writeln!(w, "\nCPU Info:")?;
    writeln!(w, "  {:<15}: {}", "Model", first.model_name)?;
    writeln!(w, "  {:<15}: {}", "Physical cores", first.cores)?;
    writeln!(w, "  {:<15}: {}", "Logical cores", s.logical_cpu_count())?;
    writeln!(w, "  {:<15}: {:.2} MHz", "Frequency", first.mhz)?;
    writeln!(
        w,
        "  {:<15}: {}",
        "Cache",
        human_bytes(u64::from(first.cache_size) * 1024)
    )?;
    if cpus.len() > 1 {
        writeln!(
            w,
            "\n  {:<3} {:<30} {:<7} {:<9} {:<11}",
            "#", "Model", "Cores", "MHz", "Cache"
        )?;
        for (i, cpu) in cpus.iter().enumerate() {
            writeln!(
                w,
                "  {:<3} {:<30} {:<7} {:<9.2} {:<11}",
                i + 1,
                cpu.model_name,
                cpu.cores,
                cpu.mhz,
                human_bytes(u64::from(cpu.cache_size) * 1024)
            )?;
        }
    }
    Ok(())
}

fn write_memory<W: Write>(w: &mut W, s: &SystemSnapshot) -> io::Result<()> {
    let mem = s.memory();
    writeln!(w, "\nMemory:")?;
    writeln!(w, "  Total: {}", human_bytes(mem.total))?;
    writeln!(w, "  Used: {}", human_bytes(mem.used))?;
    writeln!(w, "  Free: {}", human_bytes(mem.available))
}

fn write_volumes<W: Write>(w: &mut W, s: &SystemSnapshot) -> io::Result<()> {
    match s.volumes() {
        [] => Ok(()),
        [d] => {
            writeln!(w, "\nDisk(s):")?;
            writeln!(
                w,
                "  Mount: {}, Total: {}, Used: {}, Free: {}, FS: {}",
                d.path,
                human_bytes(d.total),
                human_bytes(d.used),
                human_bytes(d.free),
                d.fstype
            )
        }
        volumes => {
            writeln!(w, "\nDisk(s):")?;
            writeln!(
                w,
                "  {:<10} {:<12} {:<12} {:<12} {:<6}",
                "Mount", "Total", "Used", "Free", "FS"
            )?;
            for d in volumes {
                writeln!(
                    w,
                    "  {:<10} {:<12} {:<12} {:<12} {:<6}",
                    d.path,
                    human_bytes(d.total),
                    human_bytes(d.used),
                    human_bytes(d.free),
                    d.fstype
                )?;
            }
            Ok(())
        }
    }
}

fn write_interfaces<W: Write>(w: &mut W, s: &SystemSnapshot) -> io::Result<()> {
    match s.interfaces() {
        [] => Ok(()),
        [a] => writeln!(w, "\nActive IPs:\n  {}: {}", a.interface_name, a.ip_address),
        addresses => {
            writeln!(w, "\nActive IPs:")?;
            writeln!(w, "  {:<25} {:<40}", "Interface", "IP")?;
            for a in addresses {
                writeln!(w, "  {:<25} {:<40}", a.interface_name, a.ip_address)?;
            }
            Ok(())
        }
    }
}
