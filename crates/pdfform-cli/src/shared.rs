use std::path::Path;

use pdfform::{
    FieldValue, FillSettings, FormData, FormReader, FormWriter, OverlayData, OverlayText, PdfError,
};
use serde_json::Value;

/// Open a PDF file with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not found
/// or cannot be parsed as a valid PDF.
pub fn open_pdf(file: &Path) -> Result<FormReader, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    pdfform::load_pdf(file).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })
}

fn read_json(file: &Path, what: &str) -> Result<Value, i32> {
    let text = std::fs::read_to_string(file).map_err(|e| {
        eprintln!("Error: failed to read {what} {}: {e}", file.display());
        1
    })?;
    serde_json::from_str(&text).map_err(|e| {
        eprintln!("Error: invalid JSON in {}: {e}", file.display());
        1
    })
}

/// Read a field mapping: a JSON object whose values are strings or `null`.
pub fn read_form_data(file: &Path) -> Result<FormData, i32> {
    let Value::Object(entries) = read_json(file, "data file")? else {
        eprintln!("Error: {} must contain a JSON object", file.display());
        return Err(1);
    };

    let mut data = FormData::new();
    for (name, value) in entries {
        match value {
            Value::String(text) => data.insert(name, text),
            Value::Null => data.insert(name, FieldValue::Unset),
            other => {
                eprintln!("Error: value of field '{name}' must be a string or null, got {other}");
                return Err(1);
            }
        }
    }
    Ok(data)
}

/// Read overlay entries: a JSON array of `{"x", "y", "page", "text"}`.
pub fn read_overlay_data(file: &Path) -> Result<OverlayData, i32> {
    let value = read_json(file, "overlay file")?;
    let entries: Vec<OverlayText> = serde_json::from_value(value).map_err(|e| {
        eprintln!("Error: invalid overlay entries in {}: {e}", file.display());
        1
    })?;
    Ok(entries.into_iter().collect())
}

/// Read fill settings, falling back to the defaults when no file is given.
pub fn read_settings(file: Option<&Path>) -> Result<FillSettings, i32> {
    let Some(file) = file else {
        return Ok(FillSettings::default());
    };
    let value = read_json(file, "settings file")?;
    serde_json::from_value(value).map_err(|e| {
        eprintln!("Error: invalid settings in {}: {e}", file.display());
        1
    })
}

/// Serialize `writer` to `output`, reporting failures.
pub fn save_pdf(writer: &mut FormWriter, output: &Path) -> Result<(), i32> {
    writer.save(output).map_err(|e| {
        eprintln!("Error: failed to write {}: {e}", output.display());
        1
    })
}

/// Print `value` as a single line of JSON.
pub fn print_json(value: &Value) -> Result<(), i32> {
    let json_str = serde_json::to_string(value).map_err(|e| {
        eprintln!("Error: failed to serialize output: {e}");
        1
    })?;
    println!("{json_str}");
    Ok(())
}

/// Print a library error and map it to the exit code.
pub fn report(err: PdfError) -> i32 {
    eprintln!("Error: {err}");
    1
}
