use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use tracing::info;

use pointmap_cli::session::{RouteRow, Session, read_input};

use crate::cli::{MapArgs, RoutesArgs};

pub fn run_routes(args: &RoutesArgs) -> Result<()> {
    let session = Session::load(&args.map.schema, args.map.config.as_deref())?;
    let rows = session.route_rows(&args.source, &args.target)?;
    info!(
        source = %args.source,
        target = %args.target,
        routes = rows.len(),
        "Resolved routes"
    );
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&rows).context("serialize routes")?
        );
    } else {
        println!("{}", routes_table(&rows));
    }
    Ok(())
}

pub fn run_map(args: &MapArgs) -> Result<()> {
    let session = Session::load(&args.map.schema, args.map.config.as_deref())?;
    let input = read_input(&args.input)?;
    let output = session.map_input(&input, &args.target)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("serialize mapped record")?
    );
    Ok(())
}

fn routes_table(rows: &[RouteRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Source", "Kind", "Target", "Kind", "Check-points"]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    for row in rows {
        table.add_row(vec![
            row.source.clone(),
            row.source_kind.to_string(),
            row.target.clone(),
            row.target_kind.to_string(),
            row.check_points.join(", "),
        ]);
    }
    table
}
