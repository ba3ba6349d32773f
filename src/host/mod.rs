//! Host info provider
//!
//! The informational endpoints read process and host state through this
//! trait instead of making system calls directly, so handler tests can
//! substitute fixed values.

use std::time::Instant;

/// Memory gauges, each best-effort
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryInfo {
    pub total_bytes: Option<u64>,
    pub free_bytes: Option<u64>,
    pub process_rss_bytes: Option<u64>,
}

/// Read-only view of process and host state
pub trait HostInfoProvider: Send + Sync {
    fn hostname(&self) -> String;
    fn platform(&self) -> &'static str;
    fn architecture(&self) -> &'static str;
    fn cpus(&self) -> usize;
    /// Seconds since the process started
    fn uptime_secs(&self) -> u64;
    fn memory(&self) -> MemoryInfo;
    /// 1/5/15 minute load averages, where the platform exposes them
    fn load_average(&self) -> Option<[f64; 3]>;
}

/// Host info provider backed by the operating system
pub struct SystemHost {
    started: Instant,
}

impl SystemHost {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostInfoProvider for SystemHost {
    fn hostname(&self) -> String {
        hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown".to_string())
    }

    fn platform(&self) -> &'static str {
        std::env::consts::OS
    }

    fn architecture(&self) -> &'static str {
        std::env::consts::ARCH
    }

    fn cpus(&self) -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }

    fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    fn memory(&self) -> MemoryInfo {
        let (total_bytes, free_bytes) = read_meminfo().unwrap_or((None, None));
        MemoryInfo {
            total_bytes,
            free_bytes,
            process_rss_bytes: read_process_rss(),
        }
    }

    fn load_average(&self) -> Option<[f64; 3]> {
        read_loadavg()
    }
}

/// Parse MemTotal/MemAvailable out of /proc/meminfo (kB values)
#[cfg(target_os = "linux")]
fn read_meminfo() -> Option<(Option<u64>, Option<u64>)> {
    let contents = std::fs::read_to_string("/proc/meminfo").ok()?;
    let mut total = None;
    let mut free = None;

    for line in contents.lines() {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("MemTotal:") => total = parts.next().and_then(|v| v.parse::<u64>().ok()),
            Some("MemAvailable:") => free = parts.next().and_then(|v| v.parse::<u64>().ok()),
            _ => continue,
        }
    }

    Some((total.map(|kb| kb * 1024), free.map(|kb| kb * 1024)))
}

#[cfg(not(target_os = "linux"))]
fn read_meminfo() -> Option<(Option<u64>, Option<u64>)> {
    None
}

/// Resident set size of this process, from /proc/self/statm (pages)
#[cfg(target_os = "linux")]
fn read_process_rss() -> Option<u64> {
    let contents = std::fs::read_to_string("/proc/self/statm").ok()?;
    let pages: u64 = contents.split_whitespace().nth(1)?.parse().ok()?;
    Some(pages * 4096)
}

#[cfg(not(target_os = "linux"))]
fn read_process_rss() -> Option<u64> {
    None
}

#[cfg(target_os = "linux")]
fn read_loadavg() -> Option<[f64; 3]> {
    let contents = std::fs::read_to_string("/proc/loadavg").ok()?;
    let mut parts = contents.split_whitespace();
    let one: f64 = parts.next()?.parse().ok()?;
    let five: f64 = parts.next()?.parse().ok()?;
    let fifteen: f64 = parts.next()?.parse().ok()?;
    Some([one, five, fifteen])
}

#[cfg(not(target_os = "linux"))]
fn read_loadavg() -> Option<[f64; 3]> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_host_reports_current_values() {
        let host = SystemHost::new();

        assert!(!host.hostname().is_empty());
        assert!(!host.platform().is_empty());
        assert!(!host.architecture().is_empty());
        assert!(host.cpus() >= 1);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_memory_gauges_present() {
        let host = SystemHost::new();
        let memory = host.memory();

        assert!(memory.total_bytes.unwrap_or(0) > 0);
        assert!(host.load_average().is_some());
    }
}
