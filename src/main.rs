use anyhow::{Context, Result};
use carstats::{
    load::read_csv,
    schema::{write_schema, FieldMeta},
    stats::{self, ColumnStats},
};
use prettytable::{format, Cell, Row, Table};
use std::{env, path::Path};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) locate the dataset ───────────────────────────────────────
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "data/cars.csv".to_string());

    // ─── 3) load & preview ───────────────────────────────────────────
    let frame = read_csv(&path).with_context(|| format!("loading {}", path))?;
    let (rows, cols) = frame.shape();
    info!(rows, cols, "loaded {}", path);

    println!("\n--- First 5 rows ---");
    println!("{}", frame.head(5));
    println!("--- Last 5 rows ---");
    println!("{}", frame.tail(5));

    // ─── 4) column dtypes ────────────────────────────────────────────
    let fields = frame.dtypes();
    println!("--- Columns ---");
    render_dtypes(&fields).printstd();

    // ─── 5) summary statistics ───────────────────────────────────────
    println!("\n--- Describe ---");
    render_describe(&stats::describe(&frame)).printstd();

    // ─── 6) record the inferred schema ───────────────────────────────
    let table_name = Path::new(&path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table");
    write_schema(table_name, "schemas", &fields)
        .with_context(|| format!("recording schema for {}", table_name))?;
    info!("schema recorded for `{}`", table_name);

    Ok(())
}

fn render_dtypes(fields: &[FieldMeta]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.add_row(Row::new(vec![
        Cell::new("Column").style_spec("bFg"),
        Cell::new("DType").style_spec("bFg"),
    ]));
    for field in fields {
        table.add_row(Row::new(vec![
            Cell::new(&field.name),
            Cell::new(&field.dtype.to_string()),
        ]));
    }
    table
}

fn render_describe(stats: &[ColumnStats]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.add_row(Row::new(vec![
        Cell::new("Column").style_spec("bFg"),
        Cell::new("Count").style_spec("bFg"),
        Cell::new("Nulls").style_spec("bFg"),
        Cell::new("Mean").style_spec("bFg"),
        Cell::new("Std").style_spec("bFg"),
        Cell::new("Min").style_spec("bFg"),
        Cell::new("Max").style_spec("bFg"),
    ]));
    for s in stats {
        table.add_row(Row::new(vec![
            Cell::new(&s.column),
            Cell::new(&s.count.to_string()).style_spec("r"),
            Cell::new(&s.nulls.to_string()).style_spec("r"),
            Cell::new(&fmt_opt(s.mean)).style_spec("r"),
            Cell::new(&fmt_opt(s.std)).style_spec("r"),
            Cell::new(&fmt_opt(s.min)).style_spec("r"),
            Cell::new(&fmt_opt(s.max)).style_spec("r"),
        ]));
    }
    table
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| format!("{:.3}", x)).unwrap_or_default()
}
