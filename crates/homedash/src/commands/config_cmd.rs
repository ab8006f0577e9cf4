//! Config subcommand handlers.

use std::io::{self, IsTerminal};

use dialoguer::Input;

use homedash_config::{DEFAULT_BACKEND, Defaults};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Backend URL from `--backend`, a prompt when interactive, or the
/// localhost default.
fn backend_url(global: &GlobalOpts) -> Result<String, CliError> {
    if let Some(ref backend) = global.backend {
        return Ok(backend.clone());
    }
    if global.yes || !io::stdin().is_terminal() {
        return Ok(DEFAULT_BACKEND.into());
    }
    Input::new()
        .with_prompt("Backend URL")
        .default(DEFAULT_BACKEND.to_owned())
        .interact_text()
        .map_err(prompt_err)
}

fn render(cfg: &Config, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Table | OutputFormat::Plain => {
            toml::to_string_pretty(cfg).map_err(|e| CliError::Render(e.to_string()))
        }
        OutputFormat::Json => output::render_json(cfg, false),
        OutputFormat::JsonCompact => output::render_json(cfg, true),
        OutputFormat::Yaml => output::render_yaml(cfg),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = render(&cfg, global.output)?;
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let mut cfg = config::load_config()?;
            let name = global.profile.clone().unwrap_or_else(|| "default".into());
            if cfg.profiles.contains_key(&name) && !force {
                return Err(CliError::ProfileExists { name });
            }

            let profile = Profile {
                backend: backend_url(global)?,
                insecure: global.insecure.then_some(true),
                timeout: global.timeout,
                ..Profile::default()
            };
            // Reject a profile that could not be used.
            homedash_config::profile_to_dashboard_config(&profile, &Defaults::default())?;

            if cfg.profiles.is_empty() {
                cfg.default_profile = Some(name.clone());
            }
            cfg.profiles.insert(name.clone(), profile);
            let path = config::save_config(&cfg)?;

            if !global.quiet {
                eprintln!("Profile '{name}' written to {}", path.display());
            }
            Ok(())
        }
    }
}
