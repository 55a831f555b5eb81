//! Purpose: `dataextract` CLI entry point and sample wrapper walkthrough.
//! Role: Binary crate root; parses args, drives the wrapper, emits JSON on stdout.
//! Invariants: Commands emit stable JSON on stdout; non-interactive errors are
//! emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::aot::Shell;
use serde::Serialize;
use serde_json::{Map, Value, json};
use time::macros::{date, time};
use time::{Duration as Days, PrimitiveDateTime};
use tracing_subscriber::EnvFilter;

use dataextract::api::{
    Collation, ColumnType, Error, ErrorKind, Extract, Interval, Row, TableDefinition, engine,
    to_exit_code,
};

#[derive(Parser)]
#[command(
    name = "dataextract",
    version,
    about = "Create and inspect extract files through the native engine"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Engine shared library path (default: $DATAEXTRACT_LIB, then the system library)"
    )]
    lib: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Create a sample orders extract exercising every column type")]
    Create {
        #[arg(help = "Extract file to create")]
        file: PathBuf,
        #[arg(long, default_value = "Orders", help = "Table name inside the extract")]
        table: String,
        #[arg(long, default_value_t = 100, help = "Number of sample rows to insert")]
        rows: u64,
    },
    #[command(about = "Print a table's schema as JSON")]
    Schema {
        #[arg(help = "Extract file to open")]
        file: PathBuf,
        #[arg(long, default_value = "Orders", help = "Table name inside the extract")]
        table: String,
    },
    #[command(about = "Report binding and engine versions")]
    Version,
    #[command(
        after_help = r#"Examples:
  $ dataextract completion bash > ~/.local/share/bash-completion/completions/dataextract
  $ dataextract completion zsh > ~/.zfunc/_dataextract"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Some(lib) = &cli.lib {
        if let Err(err) = engine::preload(lib) {
            emit_error(&err);
            std::process::exit(to_exit_code(err.kind()));
        }
    }

    match run(cli.command) {
        Ok(Some(value)) => {
            let json = serde_json::to_string(&value)
                .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
            println!("{json}");
        }
        Ok(None) => {}
        Err(err) => {
            emit_error(&err);
            std::process::exit(to_exit_code(err.kind()));
        }
    }
}

fn run(command: Command) -> Result<Option<Value>, Error> {
    match command {
        Command::Create { file, table, rows } => run_create(&file, &table, rows).map(Some),
        Command::Schema { file, table } => run_schema(&file, &table).map(Some),
        Command::Version => run_version().map(Some),
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "dataextract", &mut io::stdout());
            Ok(None)
        }
    }
}

fn run_create(file: &Path, table_name: &str, rows: u64) -> Result<Value, Error> {
    let mut definition = orders_definition()?;
    let columns = definition.column_count()?;

    let mut extract = Extract::create(file)?;
    let mut table = extract.add_table(table_name, &definition)?;

    let mut row = Row::new(&definition)?;
    for seq in 0..rows {
        fill_order(&mut row, seq)?;
        table.insert(&row)?;
    }

    row.close()?;
    table.close()?;
    definition.close()?;
    extract.close()?;

    Ok(json!({
        "file": file.display().to_string(),
        "table": table_name,
        "rows": rows,
        "columns": columns,
    }))
}

fn run_schema(file: &Path, table_name: &str) -> Result<Value, Error> {
    let mut extract = Extract::open(file)?;
    if !extract.has_table(table_name)? {
        return Err(Error::new(ErrorKind::NoSuchDatabase)
            .with_message(format!("extract has no table named {table_name:?}"))
            .with_path(file));
    }
    let table = extract.open_table(table_name)?;
    let definition = table.definition()?;

    let mut columns = Vec::new();
    for index in 0..definition.column_count()? {
        let column_type = definition.column_type(index)?;
        let collation = match column_type {
            ColumnType::UnicodeString => {
                Some(definition.column_collation(index)?.as_str().to_string())
            }
            _ => None,
        };
        columns.push(SchemaColumn {
            index,
            name: definition.column_name(index)?,
            column_type: column_type.as_str().to_string(),
            collation,
        });
    }

    Ok(json!({
        "file": file.display().to_string(),
        "table": table_name,
        "columns": columns,
    }))
}

fn run_version() -> Result<Value, Error> {
    let engine = engine::global()?;
    Ok(json!({
        "dataextract": env!("CARGO_PKG_VERSION"),
        "engine": engine.version(),
    }))
}

#[derive(Serialize)]
struct SchemaColumn {
    index: usize,
    name: String,
    #[serde(rename = "type")]
    column_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    collation: Option<String>,
}

/// Sample orders schema covering every column type the engine supports.
/// The default collation applies to the string columns added after it,
/// except where a column overrides it.
fn orders_definition() -> Result<TableDefinition, Error> {
    let mut definition = TableDefinition::new()?;
    definition.set_default_collation(Collation::EnUsCi)?;
    definition.add_column("Order ID", ColumnType::Integer)?;
    definition.add_column("Quantity", ColumnType::Integer)?;
    definition.add_column("Price", ColumnType::Double)?;
    definition.add_column("Shipped", ColumnType::Boolean)?;
    definition.add_column("Product", ColumnType::UnicodeString)?;
    definition.add_column("Region", ColumnType::CharString)?;
    definition.add_column_with_collation("Produkt", ColumnType::UnicodeString, Collation::De)?;
    definition.add_column("Ordered At", ColumnType::DateTime)?;
    definition.add_column("Expires", ColumnType::Date)?;
    definition.add_column("Lead Time", ColumnType::Duration)?;
    definition.add_column("Warehouse", ColumnType::Spatial)?;
    Ok(definition)
}

const REGIONS: [&str; 4] = ["NA", "EMEA", "APAC", "LATAM"];

fn fill_order(row: &mut Row, seq: u64) -> Result<(), Error> {
    row.set_long_integer(0, 1_000_000 + seq as i64)?;
    row.set_integer(1, (seq % 12) as i32 + 1)?;
    if seq % 7 == 3 {
        row.set_null(2)?;
    } else {
        row.set_double(2, 9.99 + (seq % 50) as f64)?;
    }
    row.set_boolean(3, seq % 2 == 0)?;
    row.set_string(4, &format!("Widget {:03}", seq % 40))?;
    row.set_char_string(5, REGIONS[(seq % 4) as usize])?;
    row.set_string(6, "Straßenbahn")?;

    let ordered = date!(2026 - 01 - 05) + Days::days((seq % 120) as i64);
    row.set_date_time(7, PrimitiveDateTime::new(ordered, time!(9:30:00)))?;
    row.set_date(8, ordered + Days::days(90))?;
    row.set_duration(9, Interval::new(2, 12, 0, 0))?;
    row.set_spatial(10, "POINT (-122.33 47.61)")?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("error: {err}");
        if let Some(hint) = err.hint() {
            eprintln!("hint: {hint}");
        }
        return;
    }

    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(err.kind().as_str()));
    inner.insert(
        "message".to_string(),
        json!(err.message().unwrap_or(err.kind().as_str())),
    );
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    if let Some(status) = err.status() {
        inner.insert("status".to_string(), json!(status));
    }
    if let Some(column) = err.column() {
        inner.insert("column".to_string(), json!(column));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_causes(err: &Error) -> Vec<String> {
    use std::error::Error as StdError;
    let mut causes = Vec::new();
    let mut cur = StdError::source(err);
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}
