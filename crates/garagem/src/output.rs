//! Output rendering for the `--output` formats.
//!
//! Listings go through the [`Listable`] trait: each command declares its
//! table row and its plain-mode identifier once, and the dispatchers here
//! pick the representation. Structured formats (json, yaml) serialize the
//! domain type itself, not the display row, so scripts see every field.

use std::io::{self, IsTerminal, Write};

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

/// A domain type the CLI can render as a listing.
pub trait Listable: Serialize {
    /// Row shown per item in `--output table`.
    type Row: Tabled;

    fn to_row(&self) -> Self::Row;

    /// Identifier emitted in `--output plain`, one per line.
    fn id(&self) -> String;
}

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a listing in the chosen format.
pub fn render_list<T: Listable>(format: &OutputFormat, items: &[T]) -> String {
    match format {
        OutputFormat::Table => {
            let rows: Vec<T::Row> = items.iter().map(Listable::to_row).collect();
            Table::new(&rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Plain => items
            .iter()
            .map(Listable::id)
            .collect::<Vec<_>>()
            .join("\n"),
        structured => serialize(structured, items),
    }
}

/// Render one item. Table mode takes `detail`, a pre-formatted multi-line
/// view, since a one-row table reads poorly for wide records.
pub fn render_detail<T: Listable>(
    format: &OutputFormat,
    item: &T,
    detail: impl Fn(&T) -> String,
) -> String {
    match format {
        OutputFormat::Table => detail(item),
        OutputFormat::Plain => item.id(),
        structured => serialize(structured, item),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

fn serialize<T: Serialize + ?Sized>(format: &OutputFormat, data: &T) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(data).unwrap_or_else(fail),
        OutputFormat::JsonCompact => serde_json::to_string(data).unwrap_or_else(fail),
        OutputFormat::Yaml => serde_yaml::to_string(data).unwrap_or_else(fail),
        // Handled by the dispatchers above.
        OutputFormat::Table | OutputFormat::Plain => String::new(),
    }
}

fn fail<E: std::fmt::Display>(err: E) -> String {
    format!("serialization failed: {err}")
}
