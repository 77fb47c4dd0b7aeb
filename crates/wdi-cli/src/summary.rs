use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use wdi_model::{ChartBounds, DatasetView, Indicator, TidyDataset};

pub fn print_summary(dataset: &TidyDataset, drop_incomplete: bool) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Indicator"),
        header_cell("Column"),
        header_cell("Present"),
        header_cell("Missing"),
        header_cell("Min"),
        header_cell("Max"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for indicator in Indicator::ALL {
        let missing = dataset.missing_count(indicator);
        table.add_row(vec![
            Cell::new(indicator.label())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(indicator.column_name()),
            Cell::new(dataset.len() - missing),
            count_cell(missing, Color::Yellow),
            value_cell(indicator, dataset.min_value(indicator)),
            value_cell(indicator, dataset.max_value(indicator)),
        ]);
    }

    println!("Rows: {}", dataset.len());
    println!("Countries: {}", dataset.countries().len());
    match dataset.year_range() {
        Some((min, max)) => println!("Years: {min}-{max} ({} distinct)", dataset.years().len()),
        None => println!("Years: none"),
    }
    println!(
        "Incomplete rows: {}",
        if drop_incomplete { "dropped" } else { "kept" }
    );
    println!("{table}");
    print_bounds(ChartBounds::for_dataset(dataset).as_ref());
}

pub fn print_bounds(bounds: Option<&ChartBounds>) {
    let Some(bounds) = bounds else {
        println!("Chart: no income values to plot");
        return;
    };
    println!(
        "Chart x (GNI per capita, log): {} .. {}",
        format_value(Indicator::GniPerCapita, bounds.income.min),
        format_value(Indicator::GniPerCapita, bounds.income.max)
    );
    if let Some(range) = bounds.life_expectancy {
        println!(
            "Chart y (life expectancy): {} .. {}",
            format_value(Indicator::LifeExpectancy, range.min),
            format_value(Indicator::LifeExpectancy, range.max)
        );
    }
}

/// Print one chart frame: x = income, y = life expectancy, size = population.
pub fn print_frame(view: &DatasetView<'_>, limit: usize) {
    let plottable: Vec<_> = view.plottable().collect();
    let year = view
        .year()
        .map_or_else(|| "all years".to_string(), |y| y.to_string());
    println!(
        "Year {year}: {} countries plotted ({} rows, {} without full data)",
        plottable.len(),
        view.len(),
        view.len() - plottable.len()
    );
    if plottable.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Country"),
        header_cell("GNI per capita (x)"),
        header_cell("Life expectancy (y)"),
        header_cell("Population (size)"),
    ]);
    apply_table_style(&mut table);
    for index in 1..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let shown = if limit == 0 { plottable.len() } else { limit };
    for record in plottable.iter().take(shown) {
        table.add_row(vec![
            Cell::new(&record.country),
            value_cell(Indicator::GniPerCapita, record.gni_per_capita),
            value_cell(Indicator::LifeExpectancy, record.life_expectancy),
            value_cell(Indicator::Population, record.population),
        ]);
    }
    if plottable.len() > shown {
        table.add_row(vec![
            dim_cell(format!("... {} more", plottable.len() - shown)),
            dim_cell(""),
            dim_cell(""),
            dim_cell(""),
        ]);
    }
    println!("{table}");
}

/// Format an indicator value: population as a whole number, others with at
/// most two decimals and no trailing zeros.
pub fn format_value(indicator: Indicator, value: f64) -> String {
    match indicator {
        Indicator::Population => format!("{value:.0}"),
        Indicator::LifeExpectancy | Indicator::GniPerCapita => {
            let s = format!("{value:.2}");
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

fn value_cell(indicator: Indicator, value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format_value(indicator, value)),
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

fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
