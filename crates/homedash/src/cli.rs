//! Clap derive structures for the `homedash` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// homedash -- monitor and control a home server from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "homedash",
    version,
    about = "Monitor and control a home server from the command line",
    long_about = "Reads host metrics, managed services, Docker containers, network and \
        Wi-Fi state from a homedash backend, and starts, stops or restarts the \
        things it manages.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "HOMEDASH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 'b', env = "HOMEDASH_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HOMEDASH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "HOMEDASH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "HOMEDASH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Host metrics, identity and power actions
    #[command(alias = "sys")]
    System(SystemArgs),

    /// Manage the projects the backend supervises
    #[command(alias = "svc")]
    Services(ServicesArgs),

    /// Manage Docker containers
    #[command(alias = "ctr")]
    Containers(ContainersArgs),

    /// Docker engine summary
    Docker(DockerArgs),

    /// Network interfaces and traffic counters
    #[command(alias = "net")]
    Network(NetworkArgs),

    /// Wi-Fi connection and visible networks
    Wifi(WifiArgs),

    /// View and change user settings
    Settings(SettingsArgs),

    /// Manage the wallpaper library
    Wallpapers(WallpapersArgs),

    /// Live view of metrics, services and containers
    Watch(WatchArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SYSTEM
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SystemArgs {
    #[command(subcommand)]
    pub command: SystemCommand,
}

#[derive(Debug, Subcommand)]
pub enum SystemCommand {
    /// CPU, memory, disk, GPU and temperature readings
    Metrics,

    /// Hostname, OS, address and uptime
    Info,

    /// Reboot the host
    Restart,

    /// Power off the host
    Shutdown,

    /// End the desktop session
    Logout,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SERVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ServicesArgs {
    #[command(subcommand)]
    pub command: ServicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List services and their status
    #[command(alias = "ls")]
    List,

    /// Start a service
    Start {
        /// Service name
        name: String,
    },

    /// Stop a service
    Stop {
        /// Service name
        name: String,
    },

    /// Restart a service
    Restart {
        /// Service name
        name: String,
    },

    /// Show recent log lines
    Logs {
        /// Service name
        name: String,

        #[command(flatten)]
        lines: LogArgs,
    },
}

/// Shared arguments for log commands.
#[derive(Debug, Args)]
pub struct LogArgs {
    /// Number of lines to show
    #[arg(long, short = 'n', default_value = "100")]
    pub lines: u32,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONTAINERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ContainersArgs {
    #[command(subcommand)]
    pub command: ContainersCommand,
}

#[derive(Debug, Subcommand)]
pub enum ContainersCommand {
    /// List containers
    #[command(alias = "ls")]
    List {
        /// Only show running containers
        #[arg(long, short = 'r')]
        running: bool,
    },

    /// Resource usage of one container
    Stats {
        /// Container name, ID or ID prefix
        container: String,
    },

    /// Start a container
    Start {
        /// Container name, ID or ID prefix
        container: String,
    },

    /// Stop a container
    Stop {
        /// Container name, ID or ID prefix
        container: String,
    },

    /// Restart a container
    Restart {
        /// Container name, ID or ID prefix
        container: String,
    },

    /// Show recent log lines
    Logs {
        /// Container name, ID or ID prefix
        container: String,

        #[command(flatten)]
        lines: LogArgs,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DOCKER / NETWORK / WIFI
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DockerArgs {
    #[command(subcommand)]
    pub command: DockerCommand,
}

#[derive(Debug, Subcommand)]
pub enum DockerCommand {
    /// Engine version, container and image counts
    Info,
}

#[derive(Debug, Args)]
pub struct NetworkArgs {
    #[command(subcommand)]
    pub command: NetworkCommand,
}

#[derive(Debug, Subcommand)]
pub enum NetworkCommand {
    /// Interfaces, counters and connection totals
    Status,
}

#[derive(Debug, Args)]
pub struct WifiArgs {
    #[command(subcommand)]
    pub command: WifiCommand,
}

#[derive(Debug, Subcommand)]
pub enum WifiCommand {
    /// Current connection
    Status,

    /// Visible networks, strongest first
    #[command(alias = "ls")]
    Networks,

    /// Trigger a rescan of nearby networks
    Scan,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SETTINGS / WALLPAPERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show the current settings
    Show,

    /// Change the display name
    SetName {
        /// New display name
        name: String,
    },

    /// Change the active wallpaper
    SetWallpaper {
        /// Wallpaper ID (see `wallpapers list`)
        wallpaper: String,
    },

    /// Change the theme
    SetTheme {
        /// Theme name (e.g. "dark")
        theme: String,
    },
}

#[derive(Debug, Args)]
pub struct WallpapersArgs {
    #[command(subcommand)]
    pub command: WallpapersCommand,
}

#[derive(Debug, Subcommand)]
pub enum WallpapersCommand {
    /// List wallpapers
    #[command(alias = "ls")]
    List,

    /// Upload an image
    Upload {
        /// Image file to upload
        path: PathBuf,
    },

    /// Delete a wallpaper
    #[command(alias = "rm")]
    Delete {
        /// Wallpaper ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  WATCH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Stop after this long (e.g. "30s", "5m"); runs until Ctrl-C otherwise
    #[arg(long, value_parser = parse_duration)]
    pub duration: Option<Duration>,

    /// Also poll Wi-Fi
    #[arg(long)]
    pub wifi: bool,
}

fn parse_duration(raw: &str) -> Result<Duration, String> {
    humantime::parse_duration(raw).map_err(|e| e.to_string())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Create a profile (uses --backend and --profile when given)
    Init {
        /// Overwrite an existing profile of the same name
        #[arg(long)]
        force: bool,
    },

    /// Print the config file location
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
