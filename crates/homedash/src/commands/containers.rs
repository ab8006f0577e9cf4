//! Container command handlers.

use tabled::Tabled;

use homedash_core::status::{self, ContainerSummary};
use homedash_core::{
    Command as CoreCommand, ContainerDescriptor, ContainerStats, Dashboard, LifecycleAction,
    ResourceKey,
};

use crate::cli::{ContainersArgs, ContainersCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::{self, paint_severity, percent};

use super::{services, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ContainerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Image")]
    image: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Ports")]
    ports: String,
}

fn row(c: &ContainerDescriptor, color: bool) -> ContainerRow {
    ContainerRow {
        id: c.short_id().to_owned(),
        name: c.name.clone(),
        image: c.image.clone(),
        state: output::paint_state(c.state.as_str(), c.is_running(), color),
        status: c.status.clone(),
        ports: c.ports.join(", "),
    }
}

fn stats_detail(s: &ContainerStats, color: bool) -> String {
    [
        format!("Name:     {}", s.name),
        format!(
            "CPU:      {}",
            paint_severity(&percent(s.cpu_percent), status::severity(s.cpu_percent), color)
        ),
        format!(
            "Memory:   {} ({} / {})",
            paint_severity(
                &percent(s.memory_percent),
                status::severity(s.memory_percent),
                color
            ),
            s.memory_usage,
            s.memory_limit
        ),
        format!("Net I/O:  {}", s.network_io),
        format!("Block IO: {}", s.block_io),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: ContainersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);

    match args.command {
        ContainersCommand::List { running } => {
            let containers: Vec<ContainerDescriptor> = dashboard
                .load(&ResourceKey::Containers { all: !running })
                .await?;
            let out = output::render_list(
                global.output,
                &containers,
                |c| row(c, color),
                |c| c.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            if matches!(global.output, OutputFormat::Table) && !global.quiet {
                let summary = ContainerSummary::of(&containers);
                eprintln!(
                    "{} running, {} stopped",
                    summary.running,
                    summary.stopped()
                );
            }
            Ok(())
        }

        ContainersCommand::Stats { container } => {
            let found = util::resolve_container(dashboard, &container).await?;
            let stats: ContainerStats = dashboard
                .load(&ResourceKey::ContainerStats { id: found.id })
                .await?;
            let out = output::render_single(
                global.output,
                &stats,
                |s| stats_detail(s, color),
                |s| percent(s.cpu_percent),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ContainersCommand::Start { container } => {
            lifecycle(dashboard, &container, LifecycleAction::Start, global).await
        }
        ContainersCommand::Stop { container } => {
            lifecycle(dashboard, &container, LifecycleAction::Stop, global).await
        }
        ContainersCommand::Restart { container } => {
            lifecycle(dashboard, &container, LifecycleAction::Restart, global).await
        }

        ContainersCommand::Logs { container, lines } => {
            let found = util::resolve_container(dashboard, &container).await?;
            let logs = dashboard.container_logs(&found.id, lines.lines).await?;
            services::print_logs(&logs, global)
        }
    }
}

async fn lifecycle(
    dashboard: &Dashboard,
    query: &str,
    action: LifecycleAction,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let found = util::resolve_container(dashboard, query).await?;
    util::run_action(dashboard, CoreCommand::container(found.id, action), global).await
}
