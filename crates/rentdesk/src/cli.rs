//! Clap derive structures for the `rentdesk` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// rentdesk -- operator console for a rental-equipment business
#[derive(Debug, Parser)]
#[command(
    name = "rentdesk",
    version,
    about = "Operator console for a rental business, from the command line",
    long_about = "Review rental and identity-verification requests, manage \
        per-date scheduling overrides, and watch for new pending work with \
        an audible alert.",
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
    #[arg(long, short = 'p', env = "RENTDESK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 's', env = "RENTDESK_SERVER", global = true)]
    pub server: Option<String>,

    /// Operator username (overrides profile)
    #[arg(long, short = 'u', env = "RENTDESK_USERNAME", global = true)]
    pub username: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "RENTDESK_OUTPUT",
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
    #[arg(long, short = 'k', env = "RENTDESK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "RENTDESK_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
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
    /// Review rental requests
    #[command(alias = "req", alias = "r")]
    Requests(RequestsArgs),

    /// Review identity-verification requests
    Kyc(KycArgs),

    /// Manage per-date scheduling overrides (discounts and blackouts)
    #[command(alias = "cal")]
    Calendar(CalendarArgs),

    /// Show dashboard metrics
    Stats,

    /// Staff directory and activity reports
    Staff(StaffArgs),

    /// Watch for new pending work (audible alert on increase)
    Watch(WatchArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared review arguments ──────────────────────────────────────────

/// Arguments shared by the two review-queue list commands.
#[derive(Debug, Args)]
pub struct ReviewListArgs {
    /// Include already-processed requests
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Arguments shared by approve/reject.
#[derive(Debug, Args)]
pub struct ReviewActionArgs {
    /// Request id
    pub id: String,

    /// Free-text note attached to the decision
    #[arg(long, short = 'n')]
    pub note: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REQUESTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RequestsArgs {
    #[command(subcommand)]
    pub command: RequestsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RequestsCommand {
    /// List rental requests (pending first, newest first)
    #[command(alias = "ls")]
    List(ReviewListArgs),

    /// Approve a pending rental request
    Approve(ReviewActionArgs),

    /// Reject a pending rental request
    Reject(ReviewActionArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  KYC
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct KycArgs {
    #[command(subcommand)]
    pub command: KycCommand,
}

#[derive(Debug, Subcommand)]
pub enum KycCommand {
    /// List identity-verification requests (pending first, newest first)
    #[command(alias = "ls")]
    List(ReviewListArgs),

    /// Approve a pending verification request
    Approve(ReviewActionArgs),

    /// Reject a pending verification request
    Reject(ReviewActionArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CALENDAR
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CalendarArgs {
    #[command(subcommand)]
    pub command: CalendarCommand,
}

#[derive(Debug, Subcommand)]
pub enum CalendarCommand {
    /// Show the override for a date (default: today)
    Show {
        /// Date (YYYY-MM-DD)
        date: Option<String>,
    },

    /// Set the override for a date, replacing any existing one
    Set {
        /// Date (YYYY-MM-DD)
        date: String,

        /// Discount percentage (0-100)
        #[arg(long, conflicts_with = "blackout")]
        discount: Option<u8>,

        /// Close the date for new rentals
        #[arg(long, conflicts_with = "discount")]
        blackout: bool,

        /// Free-text description
        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// Remove the override for a date (no-op if none exists)
    Clear {
        /// Date (YYYY-MM-DD)
        date: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  STAFF
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct StaffArgs {
    #[command(subcommand)]
    pub command: StaffCommand,
}

#[derive(Debug, Subcommand)]
pub enum StaffCommand {
    /// List operator accounts
    #[command(alias = "ls")]
    List,

    /// Per-operator processed-review report for today
    Report,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  WATCH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Pending-count poll interval in seconds
    #[arg(long, default_value = "30")]
    pub interval: u64,

    /// Disable the terminal bell on alerts
    #[arg(long)]
    pub no_bell: bool,
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
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
