//! CLI configuration: thin wrapper around `homedash_config`.
//!
//! Applies `GlobalOpts` flag overrides (--backend, --insecure, --timeout)
//! on top of the selected profile before translating it.

use homedash_core::DashboardConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use homedash_config::{Config, Profile, config_path, load_config, save_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Load the config file and build the `DashboardConfig` for this run.
pub fn resolve_dashboard_config(global: &GlobalOpts) -> Result<DashboardConfig, CliError> {
    let cfg = load_config()?;
    let (_, profile) = cfg
        .profile(global.profile.as_deref())
        .map_err(|_| CliError::ProfileNotFound {
            name: active_profile_name(global, &cfg),
            available: available_profiles(&cfg),
        })?;
    let profile = apply_overrides(profile, global);
    Ok(homedash_config::profile_to_dashboard_config(
        &profile,
        &cfg.defaults,
    )?)
}

/// Flag values win over profile values.
fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref backend) = global.backend {
        profile.backend.clone_from(backend);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    profile
}

pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use homedash_core::TlsVerification;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["homedash"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["config", "path"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn flags_override_profile_values() {
        let opts = global(&["--backend", "https://nas.lan:9000", "-k", "--timeout", "3"]);
        let profile = apply_overrides(Profile::default(), &opts);
        let cfg = homedash_config::profile_to_dashboard_config(
            &profile,
            &homedash_config::Defaults::default(),
        )
        .unwrap();

        assert_eq!(cfg.base_url.as_str(), "https://nas.lan:9000/");
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(cfg.timeout, Duration::from_secs(3));
    }

    #[test]
    fn no_flags_keep_profile() {
        let opts = global(&[]);
        let profile = Profile {
            backend: "http://spark:8021".into(),
            timeout: Some(20),
            ..Profile::default()
        };
        let resolved = apply_overrides(profile.clone(), &opts);
        assert_eq!(resolved, profile);
    }
}
