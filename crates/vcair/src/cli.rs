//! Clap derive structures for the `vcair` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vcair -- NAT, firewall and public IP management for vCloud Air edge gateways
#[derive(Debug, Parser)]
#[command(
    name = "vcair",
    version,
    about = "Manage vCloud Air edge gateway services from the command line",
    long_about = "Reads and rewrites the NAT and firewall configuration of a vCloud Air\n\
        edge gateway, and allocates or releases its public IP addresses.\n\n\
        Every change is a full read-modify-write of the gateway's service\n\
        configuration; the API answers with an asynchronous task.",
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
    /// Gateway profile to use
    #[arg(long, short = 'p', env = "VCAIR_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Edge gateway href (overrides profile)
    #[arg(long, short = 'g', env = "VCAIR_GATEWAY", global = true)]
    pub gateway: Option<String>,

    /// vCloud session token (x-vcloud-authorization); overrides the
    /// profile and VCAIR_TOKEN
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "VCAIR_OUTPUT",
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
    #[arg(long, short = 'k', env = "VCAIR_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "VCAIR_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Log every outbound XML document
    #[arg(long, env = "VCAIR_DEBUG_XML", global = true)]
    pub debug_xml: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
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

#[derive(Debug, Clone, ValueEnum)]
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
    /// Inspect the edge gateway
    #[command(alias = "gw")]
    Gateway(GatewayArgs),

    /// Manage NAT rules and 1:1 mappings
    Nat(NatArgs),

    /// Manage firewall rules
    #[command(alias = "fw")]
    Firewall(FirewallArgs),

    /// Allocate and release public IP addresses
    Ip(IpArgs),

    /// Inspect asynchronous tasks
    Task(TaskArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  GATEWAY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct GatewayArgs {
    #[command(subcommand)]
    pub command: GatewayCommand,
}

#[derive(Debug, Subcommand)]
pub enum GatewayCommand {
    /// Show gateway details and interfaces
    Show,

    /// List gateway interfaces
    #[command(alias = "ifaces")]
    Interfaces,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  NAT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct NatArgs {
    #[command(subcommand)]
    pub command: NatCommand,
}

#[derive(Debug, Subcommand)]
pub enum NatCommand {
    /// List NAT rules
    #[command(alias = "ls")]
    List,

    /// Map an internal address 1:1 to an external one on the uplink
    Map {
        /// Internal (private) address
        internal: String,

        /// External (public) address
        external: String,

        /// Description stored on every created rule
        #[arg(long, short = 'd', default_value = "")]
        description: String,

        /// Also allow all inbound traffic to the external address
        #[arg(long)]
        inbound_any: bool,

        /// Also allow all outbound traffic from the internal address
        #[arg(long)]
        outbound_any: bool,
    },

    /// Remove a 1:1 mapping and its allow-any firewall rules
    #[command(alias = "rm")]
    Unmap {
        /// Internal (private) address
        internal: String,

        /// External (public) address
        external: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FIREWALL
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FirewallArgs {
    #[command(subcommand)]
    pub command: FirewallCommand,
}

#[derive(Debug, Subcommand)]
pub enum FirewallCommand {
    /// List firewall rules
    #[command(alias = "ls")]
    List,

    /// Print the current service configuration as XML
    Export,

    /// Replace the service configuration with an XML document
    Apply {
        /// `<EdgeGatewayServiceConfiguration>` document to submit
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PUBLIC IPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct IpArgs {
    #[command(subcommand)]
    pub command: IpCommand,
}

#[derive(Debug, Subcommand)]
pub enum IpCommand {
    /// Request additional public addresses on an external network
    Allocate {
        /// Gateway interface name of the external network
        network: String,

        /// Number of addresses to request
        #[arg(long, short = 'n', default_value = "1")]
        count: String,
    },

    /// Release a public address
    Release {
        /// Gateway interface name of the external network
        network: String,

        /// Address to release
        ip: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TASKS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommand,
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Show the current state of a task
    Show {
        /// Task href as printed by a mutating command
        href: String,
    },
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
    /// Create or extend the config file with guided setup
    Init,

    /// Display current resolved configuration (tokens masked)
    Show,

    /// Print the config file location
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
