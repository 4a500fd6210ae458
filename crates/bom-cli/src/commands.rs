use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use bom_grid::{GridView, PanelFilters, ReadinessRange, search};
use bom_ingest::{DashboardStore, DataSource, ItemStore};
use bom_model::Item;
use bom_report::{
    BomKpis, ExportFormat, ProjectSummary, co_groups, default_file_name, write_export,
};

use bom_cli::config::{GridSettings, Settings};

use crate::cli::{
    ColumnsArgs, CoReviewArgs, ExportArgs, PanelArgs, SearchArgs, ValuesArgs, ViewArgs,
};
use crate::summary::{
    print_co_items, print_co_review, print_columns, print_dashboard, print_grid, print_search,
    print_values,
};

/// Settings and data source shared by every command.
pub struct AppContext {
    pub settings: Settings,
    pub source: DataSource,
}

impl AppContext {
    fn load_items(&self) -> Result<ItemStore> {
        let source = self
            .source
            .open()
            .with_context(|| format!("open {}", self.source))?;
        let mut store = ItemStore::new(source);
        store
            .refresh()
            .with_context(|| format!("load items from {}", self.source))?;
        Ok(store)
    }
}

pub fn run_grid(ctx: &AppContext, args: &ViewArgs) -> Result<()> {
    let _span = info_span!("grid").entered();
    let store = ctx.load_items()?;
    let items = store.items();
    let view = build_view(args, items, &ctx.settings.grid)?;
    let rows = view.rows(items);
    print_grid(
        &rows,
        &view.visible_columns(),
        &BomKpis::from_items(items),
        view.active_filter_count(),
    );
    Ok(())
}

pub fn run_values(ctx: &AppContext, args: &ValuesArgs) -> Result<()> {
    let store = ctx.load_items()?;
    let view = GridView {
        panel: panel_filters(&args.panel)?,
        ..GridView::default()
    };
    let values = view.column_values(store.items(), args.column);
    print_values(args.column, &values);
    Ok(())
}

pub fn run_co_review(ctx: &AppContext, args: &CoReviewArgs) -> Result<()> {
    let _span = info_span!("co_review").entered();
    let store = ctx.load_items()?;
    let items = store.items();
    let groups = co_groups(items);

    let Some(number) = &args.co else {
        print_co_review(&ProjectSummary::from_items(items), &groups);
        return Ok(());
    };
    let Some(group) = groups.iter().find(|group| &group.co_number == number) else {
        bail!("no items are pending change order {number}");
    };
    let members: Vec<&Item> = group
        .item_ids
        .iter()
        .filter_map(|id| items.iter().find(|item| &item.id == id))
        .collect();
    print_co_items(group, &members);
    Ok(())
}

pub fn run_dashboard(ctx: &AppContext) -> Result<()> {
    let _span = info_span!("dashboard").entered();
    let source = ctx
        .source
        .open()
        .with_context(|| format!("open {}", ctx.source))?;
    let mut store = DashboardStore::new(source);
    let snapshot = store
        .refresh()
        .with_context(|| format!("load dashboard from {}", ctx.source))?;
    let summary = ProjectSummary::from_items(&snapshot.items);
    print_dashboard(snapshot, &summary);
    Ok(())
}

pub fn run_export(ctx: &AppContext, args: &ExportArgs) -> Result<PathBuf> {
    let _span = info_span!("export").entered();
    let store = ctx.load_items()?;
    let items = store.items();
    let view = build_view(&args.view, items, &ctx.settings.grid)?;
    let rows = view.rows(items);
    let format = ExportFormat::from(args.format);

    let path = match &args.output {
        Some(path) => path.clone(),
        None => ctx
            .settings
            .export
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(default_file_name(format, chrono::Local::now().date_naive())),
    };
    let written = write_export(&rows, format, &path)
        .with_context(|| format!("export {format} to {}", path.display()))?;
    info!(rows = rows.len(), "export complete");
    Ok(written)
}

pub fn run_search(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let store = ctx.load_items()?;
    let hits = search(store.items(), &args.query);
    print_search(&args.query, &hits);
    Ok(())
}

pub fn run_columns(ctx: &AppContext, args: &ColumnsArgs) {
    print_columns(args.preset.unwrap_or(ctx.settings.grid.preset));
}

fn panel_filters(args: &PanelArgs) -> Result<PanelFilters> {
    if args.min_readiness > args.max_readiness {
        bail!(
            "--min-readiness {} is above --max-readiness {}",
            args.min_readiness,
            args.max_readiness
        );
    }
    Ok(PanelFilters {
        lifecycle_stages: args.stages.clone(),
        make_buy: args.make_buy.clone(),
        plants: args.plants.clone(),
        commodities: args.commodities.clone(),
        erp_status: args.erp_status.clone(),
        has_blockers: args.has_blockers,
        orderable: args.orderable,
        readiness_range: ReadinessRange::new(args.min_readiness, args.max_readiness),
    })
}

/// Grid view from the command line on top of the configured defaults.
fn build_view(args: &ViewArgs, items: &[Item], settings: &GridSettings) -> Result<GridView> {
    let mut view = if args.collapse_all {
        GridView::new()
    } else {
        GridView::with_expanded(&settings.default_expanded)
    };
    for id in &args.expand {
        view.expand.expand(id);
    }
    if args.expand_all {
        view.expand.expand_all(items);
    }

    view.panel = panel_filters(&args.panel)?;
    for (key, value) in &args.column_filters {
        view.columns.add(*key, value.clone());
    }
    view.sort = args.sort.unwrap_or_default();
    view.preset = args.preset.unwrap_or(settings.preset);
    Ok(view)
}
