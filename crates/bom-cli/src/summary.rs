use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use bom_grid::{COLUMNS, ColumnKey, ColumnPreset, VisibleRow};
use bom_ingest::DashboardSnapshot;
use bom_model::{Item, LifecycleStage};
use bom_report::{BomKpis, CoGroup, KpiTone, ProjectSummary, Share, percentage};

use bom_cli::render::{percent_bar, tree_label};

pub fn print_grid(rows: &[VisibleRow<'_>], columns: &[ColumnKey], kpis: &BomKpis, filters: usize) {
    print_kpis(kpis);

    let mut table = Table::new();
    table.set_header(columns.iter().map(|key| header_cell(key.label())));
    apply_grid_table_style(&mut table);
    for (index, key) in columns.iter().enumerate() {
        if is_numeric(*key) {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    for row in rows {
        table.add_row(columns.iter().map(|key| grid_cell(row, *key)));
    }
    println!("{table}");

    let filter_note = if filters > 0 {
        format!(" ({filters} filters active)")
    } else {
        String::new()
    };
    println!("{} rows shown{filter_note}", rows.len());
}

fn print_kpis(kpis: &BomKpis) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Not Yet in ERP"),
        header_cell("Pending COs"),
        header_cell("Items Not Orderable"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        share_cell(&kpis.not_in_erp),
        Cell::new(kpis.pending_cos).fg(tone_color(kpis.pending_cos_tone)),
        share_cell(&kpis.not_orderable),
    ]);
    println!("{table}");
}

fn share_cell(share: &Share) -> Cell {
    Cell::new(format!(
        "{}% ({} of {} items)",
        share.percentage, share.count, share.total
    ))
    .fg(tone_color(share.tone))
    .add_attribute(Attribute::Bold)
}

fn grid_cell(row: &VisibleRow<'_>, key: ColumnKey) -> Cell {
    match key {
        ColumnKey::ItemNumber => {
            let cell = Cell::new(tree_label(row));
            if row.depth == 0 {
                cell.add_attribute(Attribute::Bold)
            } else {
                cell
            }
        }
        ColumnKey::OverallReadiness
        | ColumnKey::DesignReadiness
        | ColumnKey::ProcurementReadiness
        | ColumnKey::ManufacturingReadiness
        | ColumnKey::QualityReadiness => readiness_cell(&key.display(row.item)),
        ColumnKey::Orderable => {
            if row.item.orderable {
                Cell::new("Yes").fg(Color::Green)
            } else {
                Cell::new("No").fg(Color::Red)
            }
        }
        _ => {
            let text = key.display(row.item);
            if text == "-" { dim_cell(text) } else { Cell::new(text) }
        }
    }
}

fn readiness_cell(text: &str) -> Cell {
    let color = match text.parse::<u8>() {
        Ok(value) if value >= 80 => Color::Green,
        Ok(value) if value >= 50 => Color::Yellow,
        _ => Color::Red,
    };
    Cell::new(format!("{text}%")).fg(color)
}

fn is_numeric(key: ColumnKey) -> bool {
    matches!(
        key,
        ColumnKey::Level
            | ColumnKey::Aml
            | ColumnKey::LeadTime
            | ColumnKey::OverallReadiness
            | ColumnKey::DesignReadiness
            | ColumnKey::ProcurementReadiness
            | ColumnKey::ManufacturingReadiness
            | ColumnKey::QualityReadiness
    )
}

pub fn print_values(key: ColumnKey, values: &[String]) {
    println!("{} ({}): {} values", key.label(), key, values.len());
    for value in values {
        println!("  {value}");
    }
}

pub fn print_co_review(summary: &ProjectSummary, groups: &[CoGroup]) {
    println!(
        "Project: {} items, {} orderable ({}% complete), {} with blockers, average readiness {}%",
        summary.total_items,
        summary.orderable_items,
        summary.completion_percentage(),
        summary.items_with_blockers,
        summary.average_readiness
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("CO Number"),
        header_cell("Status"),
        header_cell("Items"),
        header_cell("Ready"),
        header_cell("Not Ready"),
        header_cell("Blocked"),
        header_cell("Avg Readiness"),
        header_cell("Progress"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for group in groups {
        table.add_row(vec![
            Cell::new(&group.co_number)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            status_cell(group.status.as_deref()),
            Cell::new(group.item_count),
            count_cell(group.ready_count, Color::Green),
            count_cell(group.not_ready_count(), Color::Yellow),
            count_cell(group.blocked_count, Color::Red),
            readiness_cell(&group.average_readiness.to_string()),
            Cell::new(percent_bar(group.completion_percentage(), 20)),
        ]);
    }
    println!("{table}");
}

pub fn print_co_items(group: &CoGroup, items: &[&Item]) {
    println!(
        "{} ({}): {} items, {} ready",
        group.co_number,
        group.status.as_deref().unwrap_or("-"),
        group.item_count,
        group.ready_count
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Item Number"),
        header_cell("Description"),
        header_cell("Lifecycle Stage"),
        header_cell("Readiness"),
        header_cell("Orderable"),
        header_cell("Blockers"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for item in items {
        let blockers: Vec<&str> = item.blockers.iter().map(|b| b.category.as_str()).collect();
        table.add_row(vec![
            Cell::new(&item.item_number).add_attribute(Attribute::Bold),
            Cell::new(item.description.as_deref().unwrap_or("-")),
            Cell::new(item.lifecycle_stage.as_str()),
            readiness_cell(&item.overall_readiness.to_string()),
            Cell::new(if item.orderable { "Yes" } else { "No" }),
            if blockers.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(blockers.join(", ")).fg(Color::Red)
            },
        ]);
    }
    println!("{table}");
}

pub fn print_dashboard(snapshot: &DashboardSnapshot, summary: &ProjectSummary) {
    let stats = &snapshot.statistics;
    println!("Last updated: {}", snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"));

    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Total items"), Cell::new(stats.total_items)]);
    table.add_row(vec![
        Cell::new("Orderable"),
        Cell::new(format!(
            "{} ({}%)",
            stats.orderable_items,
            percentage(stats.orderable_items, stats.total_items)
        )),
    ]);
    table.add_row(vec![
        Cell::new("Items with blockers"),
        count_cell(stats.items_with_blockers, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Average readiness"),
        Cell::new(format!("{:.1}%", stats.average_readiness)),
    ]);
    for (label, value) in [
        ("Draft items", stats.draft_items),
        ("ERP activated", stats.erp_activated),
        ("Not in ERP", stats.not_in_erp),
    ] {
        if let Some(value) = value {
            table.add_row(vec![Cell::new(label), Cell::new(value)]);
        }
    }
    table.add_row(vec![Cell::new("Pre-CO items"), Cell::new(summary.pre_co_items)]);
    println!("{table}");

    let distribution = snapshot.distribution.with_all_stages();
    let total = snapshot.items.len();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Lifecycle Stage"),
        header_cell("Items"),
        header_cell("Share"),
        header_cell(""),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (stage, count) in distribution.iter() {
        let share = percentage(count, total);
        table.add_row(vec![
            Cell::new(stage),
            Cell::new(count),
            Cell::new(format!("{share}%")),
            Cell::new(percent_bar(share, 20)).fg(stage_color(stage)),
        ]);
    }
    println!("{table}");

    let ranked = summary.blockers_by_count();
    if ranked.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Blocker Category"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (category, count) in ranked {
        table.add_row(vec![Cell::new(category), count_cell(count, Color::Red)]);
    }
    println!("{table}");
}

pub fn print_search(query: &str, hits: &[&Item]) {
    if hits.is_empty() {
        println!("No items match '{query}'");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Item Number"),
        header_cell("Description"),
        header_cell("Commodity"),
        header_cell("Lifecycle Stage"),
        header_cell("Readiness"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    for item in hits {
        table.add_row(vec![
            Cell::new(&item.item_number).add_attribute(Attribute::Bold),
            Cell::new(item.description.as_deref().unwrap_or("-")),
            Cell::new(item.commodity.as_deref().unwrap_or("-")),
            Cell::new(item.lifecycle_stage.as_str()),
            readiness_cell(&item.overall_readiness.to_string()),
        ]);
    }
    println!("{table}");
    println!("{} items match '{query}'", hits.len());
}

pub fn print_columns(preset: ColumnPreset) {
    println!("{}: {}", preset.label(), preset.description());
    let visible = preset.columns();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Label"),
        header_cell("Group"),
        header_cell("Visible"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for spec in &COLUMNS {
        let shown = if visible.contains(&spec.key) {
            Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(spec.key),
            Cell::new(spec.label),
            Cell::new(spec.group.label()),
            shown,
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn apply_grid_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(200);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn tone_color(tone: KpiTone) -> Color {
    match tone {
        KpiTone::Good => Color::Green,
        KpiTone::Warning => Color::Yellow,
        KpiTone::Critical => Color::Red,
    }
}

fn stage_color(stage: &LifecycleStage) -> Color {
    match stage {
        LifecycleStage::Draft => Color::DarkGrey,
        LifecycleStage::ReadyForCo => Color::Blue,
        LifecycleStage::CoSubmitted => Color::Magenta,
        LifecycleStage::CoApproved => Color::Cyan,
        LifecycleStage::CcoInProgress => Color::Yellow,
        LifecycleStage::Orderable => Color::Green,
        LifecycleStage::Other(_) => Color::White,
    }
}

fn status_cell(status: Option<&str>) -> Cell {
    match status {
        Some("Released") => Cell::new("Released").fg(Color::Green),
        Some(status) => Cell::new(status).fg(Color::Yellow),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
