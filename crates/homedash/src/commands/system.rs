//! System command handlers.

use serde::Serialize;

use homedash_core::status::{self, MetricsJudgment};
use homedash_core::{
    Command as CoreCommand, Dashboard, DeviceInfo, ResourceKey, SystemAction, SystemMetrics,
};

use crate::cli::{GlobalOpts, SystemArgs, SystemCommand};
use crate::error::CliError;
use crate::output::{self, paint_severity, percent};

use super::util;

/// Metrics plus the severity of each reading.
#[derive(Serialize)]
struct MetricsView<'a> {
    #[serde(flatten)]
    metrics: &'a SystemMetrics,
    severity: MetricsJudgment,
}

fn metrics_detail(view: &MetricsView<'_>, color: bool) -> String {
    let m = view.metrics;
    let s = &view.severity;
    let mut lines = vec![
        format!(
            "CPU:       {} of {} cores",
            paint_severity(&percent(m.cpu_percent), s.cpu, color),
            m.cpu_count
        ),
        format!(
            "Memory:    {} ({} / {})",
            paint_severity(&percent(m.memory_percent), s.memory, color),
            output::bytes(m.memory_used),
            output::bytes(m.memory_total)
        ),
        format!(
            "Disk:      {} ({} / {})",
            paint_severity(&percent(m.disk_percent), s.disk, color),
            output::bytes(m.disk_used),
            output::bytes(m.disk_total)
        ),
    ];
    if let (Some(temp), Some(sev)) = (m.cpu_temperature, s.cpu_temperature) {
        lines.push(format!(
            "CPU temp:  {}",
            paint_severity(&format!("{temp:.0}°C"), sev, color)
        ));
    }
    if let Some(ref name) = m.gpu_name {
        lines.push(format!("GPU:       {name}"));
        if let (Some(util), Some(sev)) = (m.gpu_utilization, s.gpu_utilization) {
            lines.push(format!("GPU load:  {}", paint_severity(&percent(util), sev, color)));
        }
        if let (Some(pct), Some(sev)) = (m.gpu_memory_percent, s.gpu_memory) {
            lines.push(format!("GPU mem:   {}", paint_severity(&percent(pct), sev, color)));
        }
        if let (Some(temp), Some(sev)) = (m.gpu_temperature, s.gpu_temperature) {
            lines.push(format!(
                "GPU temp:  {}",
                paint_severity(&format!("{temp:.0}°C"), sev, color)
            ));
        }
    }
    if !m.cpu_per_core.is_empty() {
        let cores: Vec<String> = m
            .cpu_per_core
            .iter()
            .map(|c| paint_severity(&format!("{c:.0}"), status::severity(*c), color))
            .collect();
        lines.push(format!("Per core:  {}", cores.join(" ")));
    }
    lines.join("\n")
}

fn info_detail(d: &DeviceInfo) -> String {
    [
        format!("Hostname:  {}", d.hostname),
        format!("OS:        {}", d.os),
        format!("Local IP:  {}", d.local_ip),
        format!("Uptime:    {}", output::uptime(d.uptime_seconds)),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: SystemArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);

    match args.command {
        SystemCommand::Metrics => {
            let metrics: SystemMetrics = dashboard.load(&ResourceKey::SystemMetrics).await?;
            let view = MetricsView {
                severity: MetricsJudgment::from(&metrics),
                metrics: &metrics,
            };
            let out = output::render_single(
                global.output,
                &view,
                |v| metrics_detail(v, color),
                |v| v.severity.worst().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SystemCommand::Info => {
            let info: DeviceInfo = dashboard.load(&ResourceKey::DeviceInfo).await?;
            let out = output::render_single(global.output, &info, info_detail, |d| {
                d.hostname.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SystemCommand::Restart => power_action(dashboard, SystemAction::Restart, global).await,
        SystemCommand::Shutdown => power_action(dashboard, SystemAction::Shutdown, global).await,
        SystemCommand::Logout => power_action(dashboard, SystemAction::Logout, global).await,
    }
}

async fn power_action(
    dashboard: &Dashboard,
    action: SystemAction,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let prompt = match action {
        SystemAction::Restart => "Reboot the host?",
        SystemAction::Shutdown => "Power off the host?",
        SystemAction::Logout => "End the desktop session?",
    };
    if !util::confirm(prompt, &format!("system {action}"), global.yes)? {
        return Ok(());
    }
    util::run_action(dashboard, CoreCommand::system(action), global).await
}
