//! Host and process resource sampling via `sysinfo`.

use sysinfo::{Pid, ProcessesToUpdate, System};
use tokio::sync::Mutex;

use crate::obs::ExporterMetrics;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Keeps one `System` across scrapes: CPU usage is computed from the delta
/// between two refreshes, so the first sample after startup reads low.
pub struct SystemSampler {
    sys: Mutex<System>,
    pid: Option<Pid>,
}

impl Default for SystemSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemSampler {
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!(error = %e, "current pid unavailable; process memory not sampled");
                None
            }
        };
        Self {
            sys: Mutex::new(System::new()),
            pid,
        }
    }

    /// Overwrite the CPU, memory and process memory gauges.
    pub async fn sample(&self, metrics: &ExporterMetrics) {
        let mut sys = self.sys.lock().await;

        sys.refresh_cpu_usage();
        metrics
            .cpu_usage_percent
            .set(&[], f64::from(sys.global_cpu_usage()));

        sys.refresh_memory();
        metrics
            .ram_usage_mb
            .set(&[], sys.used_memory() as f64 / BYTES_PER_MB);

        if let Some(pid) = self.pid {
            sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
            if let Some(process) = sys.process(pid) {
                metrics
                    .process_resident_mb
                    .set(&[], process.memory() as f64 / BYTES_PER_MB);
            }
        }
    }
}
