//! Network command handlers.

use tabled::Tabled;

use homedash_core::{Connectivity, Dashboard, NetworkStatus, ResourceKey};

use crate::cli::{GlobalOpts, NetworkArgs, NetworkCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct InterfaceRow {
    #[tabled(rename = "Interface")]
    name: String,
    #[tabled(rename = "Link")]
    link: String,
    #[tabled(rename = "IPv4")]
    ipv4: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Sent")]
    sent: String,
    #[tabled(rename = "Received")]
    received: String,
}

fn rows(status: &NetworkStatus, color: bool) -> Vec<InterfaceRow> {
    status
        .interfaces
        .iter()
        .map(|iface| {
            let link = Connectivity::from(iface);
            let counters = status.stats.iter().find(|s| s.interface == iface.name);
            InterfaceRow {
                name: iface.name.clone(),
                link: output::paint_state(&link.to_string(), link.is_connected(), color),
                ipv4: iface.ipv4_address.clone().unwrap_or_else(|| "-".into()),
                mac: iface.mac_address.clone().unwrap_or_else(|| "-".into()),
                sent: counters.map_or_else(|| "-".into(), |c| output::bytes(c.bytes_sent)),
                received: counters.map_or_else(|| "-".into(), |c| output::bytes(c.bytes_recv)),
            }
        })
        .collect()
}

pub async fn handle(
    dashboard: &Dashboard,
    args: NetworkArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);

    match args.command {
        NetworkCommand::Status => {
            let status: NetworkStatus = dashboard.load(&ResourceKey::NetworkStatus).await?;
            let out = match global.output {
                OutputFormat::Table => format!(
                    "{}\nHost: {}  Connections: {} ({} established)",
                    output::render_table(&rows(&status, color)),
                    status.hostname,
                    status.connections_count,
                    status.established_connections
                ),
                OutputFormat::Plain => status
                    .interfaces
                    .iter()
                    .map(|i| format!("{}\t{}", i.name, Connectivity::from(i)))
                    .collect::<Vec<_>>()
                    .join("\n"),
                OutputFormat::Json => output::render_json(&status, false)?,
                OutputFormat::JsonCompact => output::render_json(&status, true)?,
                OutputFormat::Yaml => output::render_yaml(&status)?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
