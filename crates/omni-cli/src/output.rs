//! Command output: plain rows for people, `{"ok": true, "data": ...}` for
//! scripts.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

/// JSON envelope for `--json` output.
#[derive(Debug, Serialize)]
pub struct JsonOut<T> {
    pub ok: bool,
    pub data: T,
    /// Non-fatal problems met while producing `data`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Print a list, one row per item, or as a JSON array.
pub fn print_out<T: Serialize>(
    out: &mut impl Write,
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> Result<()> {
    if json {
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: true,
                data,
                warnings: Vec::new(),
            })?
        )?;
    } else {
        for d in data {
            writeln!(out, "{}", row(d))?;
        }
    }
    Ok(())
}

/// Print a single value.
pub fn print_one<T: Serialize>(
    out: &mut impl Write,
    json: bool,
    data: &T,
    row: impl Fn(&T) -> String,
) -> Result<()> {
    print_one_with_warnings(out, json, data, &[], row)
}

/// Print a single value preceded by warnings: `! ...` banner lines in text
/// mode, a `warnings` array in the JSON envelope.
pub fn print_one_with_warnings<T: Serialize>(
    out: &mut impl Write,
    json: bool,
    data: &T,
    warnings: &[String],
    row: impl Fn(&T) -> String,
) -> Result<()> {
    if json {
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: true,
                data,
                warnings: warnings.to_vec(),
            })?
        )?;
    } else {
        for warning in warnings {
            writeln!(out, "! {warning}")?;
        }
        writeln!(out, "{}", row(data))?;
    }
    Ok(())
}
