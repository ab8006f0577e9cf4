//! Live view: starts the poller and redraws whenever a watched entry
//! settles.

use std::io::{self, IsTerminal};

use futures_util::StreamExt;
use serde::Serialize;

use homedash_core::status::{ContainerSummary, MetricsJudgment, ServiceSummary, signal_bars};
use homedash_core::{
    CacheEntry, Connectivity, ContainerDescriptor, Dashboard, FetchState, NetworkStatus,
    ResourceKey, ServiceDescriptor, SystemMetrics, WifiInfo,
};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output::{self, paint_severity, percent};

fn watched_keys(wifi: bool) -> Vec<ResourceKey> {
    let mut keys = vec![
        ResourceKey::SystemMetrics,
        ResourceKey::Services,
        ResourceKey::Containers { all: true },
        ResourceKey::NetworkStatus,
    ];
    if wifi {
        keys.push(ResourceKey::WifiInfo);
    }
    keys
}

/// One frame of the live view.
#[derive(Serialize)]
struct Frame {
    metrics: Option<SystemMetrics>,
    severity: Option<MetricsJudgment>,
    services: Option<ServiceSummary>,
    stopped_services: Vec<String>,
    containers: Option<ContainerSummary>,
    network: Option<NetworkStatus>,
    wifi: Option<WifiInfo>,
    /// `key -> last error` for entries whose latest fetch failed.
    errors: Vec<(String, String)>,
}

impl Frame {
    fn capture(dashboard: &Dashboard, keys: &[ResourceKey]) -> Self {
        let metrics: Option<SystemMetrics> = dashboard.value(&ResourceKey::SystemMetrics);
        let services: Option<Vec<ServiceDescriptor>> = dashboard.value(&ResourceKey::Services);
        let containers: Option<Vec<ContainerDescriptor>> =
            dashboard.value(&ResourceKey::Containers { all: true });

        let errors = keys
            .iter()
            .filter_map(|k| dashboard.read(k))
            .filter(|e| e.state == FetchState::Error)
            .map(|e: CacheEntry| (e.key.to_string(), e.last_error.unwrap_or_default()))
            .collect();

        Self {
            severity: metrics.as_ref().map(MetricsJudgment::from),
            metrics,
            services: services.as_deref().map(ServiceSummary::of),
            stopped_services: services
                .unwrap_or_default()
                .into_iter()
                .filter(|s| !s.is_running())
                .map(|s| s.name)
                .collect(),
            containers: containers.as_deref().map(ContainerSummary::of),
            network: dashboard.value(&ResourceKey::NetworkStatus),
            wifi: dashboard.value(&ResourceKey::WifiInfo),
            errors,
        }
    }

    fn render_text(&self, color: bool) -> String {
        let mut lines = vec![format!(
            "homedash  {}",
            chrono::Local::now().format("%H:%M:%S")
        )];

        match (&self.metrics, &self.severity) {
            (Some(m), Some(s)) => lines.push(format!(
                "CPU {}  MEM {}  DISK {}",
                paint_severity(&percent(m.cpu_percent), s.cpu, color),
                paint_severity(&percent(m.memory_percent), s.memory, color),
                paint_severity(&percent(m.disk_percent), s.disk, color),
            )),
            _ => lines.push("CPU -  MEM -  DISK -".into()),
        }

        if let Some(s) = self.services {
            let mut line = format!("Services    {}/{} running", s.running, s.total);
            if !self.stopped_services.is_empty() {
                line.push_str(&format!(" (down: {})", self.stopped_services.join(", ")));
            }
            lines.push(line);
        }
        if let Some(c) = self.containers {
            lines.push(format!(
                "Containers  {} running, {} stopped",
                c.running,
                c.stopped()
            ));
        }
        if let Some(ref net) = self.network {
            let links: Vec<String> = net
                .interfaces
                .iter()
                .map(|i| {
                    let link = Connectivity::from(i);
                    format!(
                        "{} {}",
                        i.name,
                        output::paint_state(&link.to_string(), link.is_connected(), color)
                    )
                })
                .collect();
            lines.push(format!(
                "Network     {}  ({} connections)",
                links.join(", "),
                net.established_connections
            ));
        }
        if let Some(ref wifi) = self.wifi {
            let status = &wifi.status;
            let line = match (&status.ssid, status.signal) {
                (Some(ssid), Some(signal)) if status.connected => {
                    format!("Wi-Fi       {ssid} {}", output::bars(signal_bars(signal)))
                }
                _ => format!("Wi-Fi       {}", Connectivity::from(status)),
            };
            lines.push(line);
        }
        for (key, error) in &self.errors {
            lines.push(paint_severity(
                &format!("! {key}: {error} (showing last known value)"),
                homedash_core::Severity::Critical,
                color,
            ));
        }
        lines.join("\n")
    }
}

fn draw(frame: &Frame, global: &GlobalOpts, color: bool) -> Result<(), CliError> {
    let out = match global.output {
        OutputFormat::Table => {
            if io::stdout().is_terminal() {
                // Clear screen, cursor home.
                print!("\x1b[2J\x1b[H");
            }
            frame.render_text(color)
        }
        OutputFormat::Json => output::render_json(frame, false)?,
        OutputFormat::JsonCompact => output::render_json(frame, true)?,
        OutputFormat::Yaml => format!("---\n{}", output::render_yaml(frame)?),
        OutputFormat::Plain => frame
            .severity
            .map_or_else(|| "unknown".into(), |s| s.worst().to_string()),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(
    dashboard: &Dashboard,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);
    let keys = watched_keys(args.wifi);

    let mut changes =
        futures_util::stream::select_all(keys.iter().map(|k| dashboard.subscribe(k).into_stream()));

    dashboard.start();
    if args.wifi {
        dashboard.set_enabled(&ResourceKey::WifiInfo, true);
    }

    let deadline = async {
        match args.duration {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            () = &mut deadline => break,
            entry = changes.next() => match entry {
                Some(entry) if entry.is_loading() || entry.state == FetchState::Idle => {}
                Some(_) => draw(&Frame::capture(dashboard, &keys), global, color)?,
                None => break,
            },
        }
    }
    tracing::debug!("watch finished");
    Ok(())
}
