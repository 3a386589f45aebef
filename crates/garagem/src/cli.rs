//! Clap derive structures for the `garagem` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// garagem -- back-office CLI for the dealership catalog
#[derive(Debug, Parser)]
#[command(
    name = "garagem",
    version,
    about = "Manage vehicle listings and the lead inbox from the command line",
    long_about = "Back-office companion to the dealership site.\n\n\
        Talks to the same hosted backend as the site: the public REST\n\
        table API for catalog data and the auth API for admin sign-in.",
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
    #[arg(long, short = 'p', env = "GARAGEM_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Project base URL (overrides profile)
    #[arg(long, short = 'u', env = "GARAGEM_PROJECT_URL", global = true)]
    pub project_url: Option<String>,

    /// Project anonymous API key
    #[arg(long, env = "GARAGEM_ANON_KEY", global = true, hide_env = true)]
    pub anon_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "GARAGEM_OUTPUT",
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

    /// Request timeout in seconds
    #[arg(long, env = "GARAGEM_TIMEOUT", default_value = "30", global = true)]
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
    /// Manage vehicle listings
    #[command(alias = "veh", alias = "v")]
    Vehicles(VehiclesArgs),

    /// Browse and prune captured leads
    #[command(alias = "l")]
    Leads(LeadsArgs),

    /// Sign in as an administrator
    Login(LoginArgs),

    /// Sign out and drop the stored session
    Logout,

    /// Manage CLI configuration
    #[command(alias = "cfg")]
    Config(ConfigArgs),
}

// ── Vehicles ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VehiclesArgs {
    #[command(subcommand)]
    pub command: VehiclesCommand,
}

#[derive(Debug, Subcommand)]
pub enum VehiclesCommand {
    /// List all listings, newest first
    #[command(alias = "ls")]
    List(VehiclesListArgs),

    /// Create a listing
    Add(VehicleAddArgs),

    /// Update fields of an existing listing
    Update(VehicleUpdateArgs),

    /// Delete a listing permanently
    #[command(alias = "rm")]
    Delete {
        /// Listing id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct VehiclesListArgs {
    /// Only show one category
    #[arg(long, value_enum)]
    pub category: Option<CategoryArg>,

    /// Case-insensitive brand/model search
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Nacional,
    Importado,
}

impl From<CategoryArg> for garagem_core::Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Nacional => Self::Nacional,
            CategoryArg::Importado => Self::Importado,
        }
    }
}

#[derive(Debug, Args)]
pub struct VehicleAddArgs {
    #[arg(long)]
    pub brand: String,

    #[arg(long)]
    pub model: String,

    /// Model year, free text (ranges like "2019/2020" are fine)
    #[arg(long)]
    pub year: String,

    /// Mileage in kilometers
    #[arg(long)]
    pub mileage: u32,

    /// Asking price
    #[arg(long)]
    pub price: f64,

    #[arg(long, value_enum, default_value = "nacional")]
    pub category: CategoryArg,

    /// Image file to embed (repeatable, max 5 images total)
    #[arg(long = "image-file")]
    pub image_files: Vec<PathBuf>,

    /// External image URL (repeatable, max 5 images total)
    #[arg(long = "image-url")]
    pub image_urls: Vec<String>,
}

#[derive(Debug, Args)]
pub struct VehicleUpdateArgs {
    /// Listing id
    pub id: String,

    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub year: Option<String>,

    #[arg(long)]
    pub mileage: Option<u32>,

    #[arg(long)]
    pub price: Option<f64>,

    #[arg(long, value_enum)]
    pub category: Option<CategoryArg>,

    /// Replace the image list with these files (repeatable)
    #[arg(long = "image-file")]
    pub image_files: Vec<PathBuf>,

    /// Replace the image list with these URLs (repeatable)
    #[arg(long = "image-url")]
    pub image_urls: Vec<String>,
}

// ── Leads ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LeadsArgs {
    #[command(subcommand)]
    pub command: LeadsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LeadsCommand {
    /// List captured leads, newest first
    #[command(alias = "ls")]
    List(LeadsListArgs),

    /// Show one lead in full
    Show {
        /// Lead id
        id: String,
    },

    /// Delete a lead permanently
    #[command(alias = "rm")]
    Delete {
        /// Lead id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct LeadsListArgs {
    /// Only show one lead type
    #[arg(long = "type", value_enum)]
    pub kind: Option<LeadKindArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LeadKindArg {
    Sell,
    Finance,
    Interest,
}

impl From<LeadKindArg> for garagem_core::LeadKind {
    fn from(arg: LeadKindArg) -> Self {
        match arg {
            LeadKindArg::Sell => Self::Sell,
            LeadKindArg::Finance => Self::Finance,
            LeadKindArg::Interest => Self::Interest,
        }
    }
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Administrator email (prompted when omitted)
    #[arg(long)]
    pub email: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactively create or update a profile
    Init,

    /// Print the config file path
    Path,

    /// Print the effective config with secrets masked
    Show,
}
