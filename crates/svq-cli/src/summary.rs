use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use svq_model::RiskGroup;

use crate::commands::AnalyzeOutput;

pub fn print_summary(output: &AnalyzeOutput) {
    let result = &output.result;

    println!("Respondents: {}", result.total_respondents);
    println!("ID column: {}", result.id_column);
    match result.speeder_threshold {
        Some(threshold) => println!(
            "Speeder threshold: < {:.0}s ({:.1} min)",
            threshold.seconds, threshold.minutes
        ),
        None => println!("Speeder threshold: no usable timing data"),
    }
    if result.battery_length > 0 {
        println!("Longest battery: {} items", result.battery_length);
    }
    if let Some(path) = &output.syntax_file {
        println!("Exclusion syntax: {}", path.display());
    }
    if let Some(path) = &output.report_file {
        println!("JSON report: {}", path.display());
    }

    let mut signals = Table::new();
    signals.set_header(vec![header_cell("Signal"), header_cell("Respondents")]);
    apply_table_style(&mut signals);
    align_column(&mut signals, 1, CellAlignment::Right);
    signals.add_row(vec![
        Cell::new("Speeders"),
        count_cell(result.speeders.len()),
    ]);
    signals.add_row(vec![
        Cell::new("Open-ended high risk"),
        count_cell(result.open_high.len()),
    ]);
    signals.add_row(vec![
        Cell::new("Open-ended medium risk"),
        count_cell(result.open_medium.len()),
    ]);
    signals.add_row(vec![
        Cell::new("Straight-liners"),
        count_cell(result.straight_liners.len()),
    ]);
    println!();
    println!("{signals}");

    let mut groups = Table::new();
    groups.set_header(vec![
        header_cell("Risk group"),
        header_cell("Respondents"),
    ]);
    apply_table_style(&mut groups);
    align_column(&mut groups, 1, CellAlignment::Right);
    for group in RiskGroup::ALL {
        groups.add_row(vec![
            Cell::new(group.as_str()),
            count_cell(result.risk_groups.members(group).len()),
        ]);
    }
    println!();
    println!("{groups}");

    let mut tiers = Table::new();
    tiers.set_header(vec![
        header_cell("Recommendation"),
        header_cell("Respondents"),
    ]);
    apply_table_style(&mut tiers);
    align_column(&mut tiers, 1, CellAlignment::Right);
    tiers.add_row(vec![
        Cell::new("HIGH (recommend delete)").fg(Color::Red),
        count_cell(result.recommendations.high_risk.len()),
    ]);
    tiers.add_row(vec![
        Cell::new("MEDIUM (consider delete)").fg(Color::Yellow),
        count_cell(result.recommendations.medium_risk.len()),
    ]);
    tiers.add_row(vec![
        Cell::new("LOW"),
        count_cell(result.recommendations.low_risk.len()),
    ]);
    tiers.add_row(vec![
        Cell::new("TOTAL FLAGGED")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.flagged_count()).add_attribute(Attribute::Bold),
    ]);
    println!();
    println!("{tiers}");

    if !result.warnings.is_empty() {
        eprintln!();
        eprintln!("Warnings:");
        for warning in &result.warnings {
            eprintln!("- {warning}");
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
