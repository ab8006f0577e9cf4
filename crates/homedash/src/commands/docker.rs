//! Docker engine command handlers.

use homedash_core::{Dashboard, DockerInfo, ResourceKey};

use crate::cli::{DockerArgs, DockerCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

fn detail(d: &DockerInfo) -> String {
    [
        format!("Version:     {}", d.server_version),
        format!("Storage:     {}", d.storage_driver),
        format!(
            "Containers:  {} ({} running, {} paused, {} stopped)",
            d.containers, d.containers_running, d.containers_paused, d.containers_stopped
        ),
        format!("Images:      {}", d.images),
        format!("CPUs:        {}", d.cpus),
        format!("Memory:      {}", output::bytes(d.memory_total)),
    ]
    .join("\n")
}

pub async fn handle(
    dashboard: &Dashboard,
    args: DockerArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DockerCommand::Info => {
            let info: DockerInfo = dashboard.load(&ResourceKey::DockerInfo).await?;
            let out = output::render_single(global.output, &info, detail, |d| {
                d.server_version.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
