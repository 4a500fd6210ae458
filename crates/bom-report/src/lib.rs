//! BOM reporting: CO readiness and project roll-ups, grid KPIs, and the
//! CSV/Excel export of the visible grid rows.

mod aggregate;
mod export;

pub use aggregate::{
    BomKpis, CoGroup, KpiTone, ProjectSummary, Share, co_groups, percentage,
};
pub use export::{
    ExportError, ExportFormat, Result, default_file_name, export_rows, write_export,
};
