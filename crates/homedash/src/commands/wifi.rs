//! Wi-Fi command handlers.

use tabled::Tabled;

use homedash_core::status::signal_bars;
use homedash_core::{
    Command as CoreCommand, Connectivity, Dashboard, ResourceKey, WifiNetwork, WifiStatus,
};

use crate::cli::{GlobalOpts, WifiArgs, WifiCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "")]
    in_use: &'static str,
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Security")]
    security: String,
}

impl From<&WifiNetwork> for NetworkRow {
    fn from(n: &WifiNetwork) -> Self {
        Self {
            in_use: if n.in_use { "*" } else { "" },
            ssid: n.ssid.clone(),
            signal: format!("{} {:>3}%", output::bars(signal_bars(n.signal)), n.signal),
            security: if n.is_secured() {
                n.security.clone()
            } else {
                "open".into()
            },
        }
    }
}

fn status_detail(s: &WifiStatus, color: bool) -> String {
    let link = Connectivity::from(s);
    let mut lines = vec![format!(
        "State:   {}",
        output::paint_state(&link.to_string(), link.is_connected(), color)
    )];
    if let Some(ref ssid) = s.ssid {
        lines.push(format!("SSID:    {ssid}"));
    }
    if let Some(signal) = s.signal {
        lines.push(format!(
            "Signal:  {} {signal}%",
            output::bars(signal_bars(signal))
        ));
    }
    if let Some(ref device) = s.device {
        lines.push(format!("Device:  {device}"));
    }
    lines.join("\n")
}

pub async fn handle(
    dashboard: &Dashboard,
    args: WifiArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);

    match args.command {
        WifiCommand::Status => {
            let status: WifiStatus = dashboard.load(&ResourceKey::WifiStatus).await?;
            let out = output::render_single(
                global.output,
                &status,
                |s| status_detail(s, color),
                |s| s.ssid.clone().unwrap_or_default(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WifiCommand::Networks => {
            let networks = dashboard.wifi_networks().await?;
            let out = output::render_list(
                global.output,
                &networks,
                |n| NetworkRow::from(n),
                |n| n.ssid.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WifiCommand::Scan => util::run_action(dashboard, CoreCommand::ScanWifi, global).await,
    }
}
