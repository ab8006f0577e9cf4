//! Service command handlers.

use tabled::Tabled;

use homedash_core::status::ServiceSummary;
use homedash_core::{
    Command as CoreCommand, Dashboard, LifecycleAction, ResourceKey, ServiceDescriptor,
};

use crate::cli::{GlobalOpts, OutputFormat, ServicesArgs, ServicesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Frontend")]
    frontend: String,
    #[tabled(rename = "Backend")]
    backend: String,
    #[tabled(rename = "Description")]
    description: String,
}

fn row(s: &ServiceDescriptor, color: bool) -> ServiceRow {
    let port = |p: Option<u16>, up: bool| match p {
        Some(p) => output::paint_state(&p.to_string(), up, color),
        None => "-".into(),
    };
    ServiceRow {
        name: s.name.clone(),
        status: output::paint_state(s.status.as_str(), s.is_running(), color),
        frontend: port(s.frontend_port, s.frontend_running),
        backend: port(s.backend_port, s.backend_running),
        description: s.description.clone(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: ServicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);

    match args.command {
        ServicesCommand::List => {
            let services: Vec<ServiceDescriptor> = dashboard.load(&ResourceKey::Services).await?;
            let out = output::render_list(
                global.output,
                &services,
                |s| row(s, color),
                |s| s.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            if matches!(global.output, OutputFormat::Table) && !global.quiet {
                let summary = ServiceSummary::of(&services);
                eprintln!("{} of {} running", summary.running, summary.total);
            }
            Ok(())
        }

        ServicesCommand::Start { name } => {
            lifecycle(dashboard, &name, LifecycleAction::Start, global).await
        }
        ServicesCommand::Stop { name } => {
            lifecycle(dashboard, &name, LifecycleAction::Stop, global).await
        }
        ServicesCommand::Restart { name } => {
            lifecycle(dashboard, &name, LifecycleAction::Restart, global).await
        }

        ServicesCommand::Logs { name, lines } => {
            let logs = dashboard.service_logs(&name, lines.lines).await?;
            print_logs(&logs, global)
        }
    }
}

async fn lifecycle(
    dashboard: &Dashboard,
    name: &str,
    action: LifecycleAction,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let service = util::resolve_service(dashboard, name).await?;
    util::run_action(dashboard, CoreCommand::service(service.name, action), global).await
}

/// Logs print raw in table/plain mode and as a string array otherwise.
pub fn print_logs(logs: &[String], global: &GlobalOpts) -> Result<(), CliError> {
    let out = match global.output {
        OutputFormat::Table | OutputFormat::Plain => logs.join("\n"),
        OutputFormat::Json => output::render_json(logs, false)?,
        OutputFormat::JsonCompact => output::render_json(logs, true)?,
        OutputFormat::Yaml => output::render_yaml(logs)?,
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
