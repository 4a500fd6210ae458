//! CLI argument definitions for the `bom` tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use bom_grid::{ColumnKey, ColumnPreset, SortState};
use bom_model::LifecycleStage;
use bom_report::ExportFormat;

use bom_cli::render::parse_column_filter;

#[derive(Parser)]
#[command(
    name = "bom",
    version,
    about = "BOM Convergence Grid - hierarchical BOM visibility from the terminal",
    long_about = "Browse a Bill of Materials snapshot as a hierarchical grid, review change \
                  order readiness, and summarise project progress.\n\n\
                  Data comes from the BOM service (--api-url or BOM_API_URL), a JSON \
                  snapshot (--snapshot), or the bundled sample dataset."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the BOM service (overrides BOM_API_URL and settings).
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Read items from a JSON snapshot file.
    #[arg(long = "snapshot", value_name = "PATH", global = true, conflicts_with = "api_url")]
    pub snapshot: Option<PathBuf>,

    /// Use the bundled sample dataset.
    #[arg(long = "sample", global = true, conflicts_with_all = ["api_url", "snapshot"])]
    pub sample: bool,

    /// Settings file (default: platform config folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the hierarchical BOM grid.
    Grid(ViewArgs),

    /// List the distinct values of a column under the panel filters.
    Values(ValuesArgs),

    /// Review readiness grouped by change order.
    CoReview(CoReviewArgs),

    /// Show the project dashboard.
    Dashboard,

    /// Export the visible grid rows as CSV or Excel.
    Export(ExportArgs),

    /// Find items by item number, description or commodity.
    Search(SearchArgs),

    /// List grid columns and the active preset.
    Columns(ColumnsArgs),
}

/// Side-panel filters.
#[derive(Args)]
pub struct PanelArgs {
    /// Lifecycle stage to include (repeatable).
    #[arg(long = "stage", value_name = "STAGE", value_parser = parse_stage)]
    pub stages: Vec<LifecycleStage>,

    /// Make/Buy value to include (repeatable).
    #[arg(long = "make-buy", value_name = "VALUE")]
    pub make_buy: Vec<String>,

    /// Plant to include (repeatable).
    #[arg(long = "plant", value_name = "PLANT")]
    pub plants: Vec<String>,

    /// Commodity to include (repeatable).
    #[arg(long = "commodity", value_name = "COMMODITY")]
    pub commodities: Vec<String>,

    /// ERP status to include (repeatable).
    #[arg(long = "erp-status", value_name = "STATUS")]
    pub erp_status: Vec<String>,

    /// Only items with (true) or without (false) blockers.
    #[arg(long = "has-blockers", value_name = "BOOL")]
    pub has_blockers: Option<bool>,

    /// Only orderable (true) or non-orderable (false) items.
    #[arg(long = "orderable", value_name = "BOOL")]
    pub orderable: Option<bool>,

    /// Lowest overall readiness to include.
    #[arg(long = "min-readiness", value_name = "PCT", default_value_t = 0,
          value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_readiness: u8,

    /// Highest overall readiness to include.
    #[arg(long = "max-readiness", value_name = "PCT", default_value_t = 100,
          value_parser = clap::value_parser!(u8).range(0..=100))]
    pub max_readiness: u8,
}

/// Everything that shapes the visible grid rows.
#[derive(Args)]
pub struct ViewArgs {
    #[command(flatten)]
    pub panel: PanelArgs,

    /// Column filter as KEY=VALUE (repeatable; values for one key are OR-ed).
    #[arg(long = "column", value_name = "KEY=VALUE", value_parser = parse_column_filter)]
    pub column_filters: Vec<(ColumnKey, String)>,

    /// Sort siblings by KEY, optionally KEY:asc or KEY:desc.
    #[arg(long = "sort", value_name = "KEY[:DIR]", value_parser = parse_sort)]
    pub sort: Option<SortState>,

    /// Expand an item by id (repeatable, added to the configured defaults).
    #[arg(long = "expand", value_name = "ID")]
    pub expand: Vec<String>,

    /// Expand every item with children.
    #[arg(long = "expand-all", conflicts_with = "collapse_all")]
    pub expand_all: bool,

    /// Start with nothing expanded.
    #[arg(long = "collapse-all")]
    pub collapse_all: bool,

    /// Column preset (default, engineering, procurement, pm, ame).
    #[arg(long = "preset", value_name = "PRESET", value_parser = parse_preset)]
    pub preset: Option<ColumnPreset>,
}

#[derive(Args)]
pub struct ValuesArgs {
    /// Column key, e.g. plant or leadTime.
    #[arg(long = "column", value_name = "KEY", value_parser = parse_column_key)]
    pub column: ColumnKey,

    #[command(flatten)]
    pub panel: PanelArgs,
}

#[derive(Args)]
pub struct CoReviewArgs {
    /// List the items of one change order.
    #[arg(long = "co", value_name = "NUMBER")]
    pub co: Option<String>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Export format.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: ExportFormatArg,

    /// Output file (default: bom-grid-<date>.<ext> in the export folder).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for.
    #[arg(value_name = "QUERY")]
    pub query: String,
}

#[derive(Args)]
pub struct ColumnsArgs {
    /// Preset to mark (default: configured preset).
    #[arg(long = "preset", value_name = "PRESET", value_parser = parse_preset)]
    pub preset: Option<ColumnPreset>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Excel,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Excel => ExportFormat::Excel,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_stage(value: &str) -> Result<LifecycleStage, String> {
    value.parse()
}

fn parse_sort(value: &str) -> Result<SortState, String> {
    value.parse()
}

fn parse_preset(value: &str) -> Result<ColumnPreset, String> {
    value.parse()
}

fn parse_column_key(value: &str) -> Result<ColumnKey, String> {
    value.parse()
}
