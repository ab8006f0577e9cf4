//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use homedash_core::{
    ActionOutcome, Command as CoreCommand, ContainerDescriptor, Dashboard, ResourceKey,
    ServiceDescriptor,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Dispatch an action behind a spinner and report its outcome on stderr.
///
/// A 2xx reply with `success: false` becomes [`CliError::ActionFailed`];
/// transport and HTTP failures keep their own error kind.
pub async fn run_action(
    dashboard: &Dashboard,
    command: CoreCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let verb = command.verb();
    let target = command.target();

    let progress = spinner(format!("{verb} {target}"), global.quiet);
    let outcome = dashboard.dispatch(command).await;
    progress.finish_and_clear();

    match outcome? {
        ActionOutcome::Succeeded { message } => {
            if !global.quiet {
                if message.is_empty() {
                    eprintln!("{target}: {verb} requested");
                } else {
                    eprintln!("{message}");
                }
            }
            Ok(())
        }
        ActionOutcome::Failed {
            error: Some(err), ..
        } => Err(err.into()),
        ActionOutcome::Failed {
            message,
            error: None,
        } => Err(CliError::ActionFailed {
            verb: verb.to_string(),
            target: target.to_string(),
            message,
        }),
    }
}

/// Steady-tick spinner on stderr, hidden when quiet or not a terminal.
pub fn spinner(message: String, quiet: bool) -> ProgressBar {
    if quiet || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(io::Error::other(e)))?;
    Ok(confirmed)
}

/// Find a service by exact name in a fresh service list.
pub async fn resolve_service(
    dashboard: &Dashboard,
    name: &str,
) -> Result<ServiceDescriptor, CliError> {
    let services: Vec<ServiceDescriptor> = dashboard.load(&ResourceKey::Services).await?;
    services
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| CliError::NotFound {
            resource_type: "service".into(),
            identifier: name.into(),
            list_command: "services list".into(),
        })
}

/// Resolve a container by name, full ID or unique ID prefix.
pub async fn resolve_container(
    dashboard: &Dashboard,
    query: &str,
) -> Result<ContainerDescriptor, CliError> {
    let containers: Vec<ContainerDescriptor> = dashboard
        .load(&ResourceKey::Containers { all: true })
        .await?;
    pick_container(containers, query)
}

fn pick_container(
    containers: Vec<ContainerDescriptor>,
    query: &str,
) -> Result<ContainerDescriptor, CliError> {
    if let Some(exact) = containers
        .iter()
        .find(|c| c.id == query || c.name == query)
    {
        return Ok(exact.clone());
    }

    let mut prefixed = containers.into_iter().filter(|c| c.id.starts_with(query));
    match (prefixed.next(), prefixed.next()) {
        (Some(found), None) => Ok(found),
        (Some(_), Some(_)) => Err(CliError::Validation {
            field: "container".into(),
            reason: format!("ID prefix '{query}' matches more than one container"),
        }),
        (None, _) => Err(CliError::NotFound {
            resource_type: "container".into(),
            identifier: query.into(),
            list_command: "containers list".into(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homedash_core::ContainerState;

    use super::*;

    fn container(id: &str, name: &str) -> ContainerDescriptor {
        ContainerDescriptor {
            id: id.into(),
            name: name.into(),
            image: "nginx:latest".into(),
            status: "Up 2 hours".into(),
            state: ContainerState::Running,
            ports: Vec::new(),
            created: "2026-01-01".into(),
        }
    }

    #[test]
    fn container_lookup_by_name_id_and_prefix() {
        let list = vec![container("abc123def456", "web"), container("abd999", "db")];

        assert_eq!(pick_container(list.clone(), "db").unwrap().id, "abd999");
        assert_eq!(
            pick_container(list.clone(), "abc123def456").unwrap().name,
            "web"
        );
        assert_eq!(pick_container(list.clone(), "abc").unwrap().name, "web");
        assert!(matches!(
            pick_container(list.clone(), "ab"),
            Err(CliError::Validation { .. })
        ));
        assert!(matches!(
            pick_container(list, "zzz"),
            Err(CliError::NotFound { .. })
        ));
    }

    #[test]
    fn confirm_is_skipped_with_yes() {
        assert!(confirm("Reboot?", "system restart", true).unwrap());
    }
}
