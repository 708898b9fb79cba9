use std::path::Path;

use pdfform::{FormField, FormReader, WidgetAnnotation};

use crate::cli::OutputFormat;
use crate::shared::{open_pdf, print_json};

pub fn run(file: &Path, format: &OutputFormat, widgets: bool) -> Result<(), i32> {
    let reader = open_pdf(file)?;

    match (format, widgets) {
        (OutputFormat::Text, false) => write_text(&reader),
        (OutputFormat::Json, false) => write_json(&reader),
        (OutputFormat::Text, true) => write_widgets_text(&reader),
        (OutputFormat::Json, true) => write_widgets_json(&reader),
    }
}

fn write_text(reader: &FormReader) -> Result<(), i32> {
    println!("name\ttype\tvalue\tflags\tgroup");
    for field in reader.get_fields() {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            field.name,
            field.field_type.map(|t| t.to_string()).unwrap_or_default(),
            field.value.as_deref().unwrap_or(""),
            field.flags,
            field.is_group,
        );
    }
    Ok(())
}

fn field_to_json(field: &FormField) -> serde_json::Value {
    serde_json::json!({
        "name": field.name,
        "type": field.field_type.map(|t| t.to_string()),
        "value": field.value,
        "flags": field.flags,
        "read_only": field.is_read_only(),
        "group": field.is_group,
    })
}

fn write_json(reader: &FormReader) -> Result<(), i32> {
    let fields: Vec<_> = reader.get_fields().iter().map(field_to_json).collect();
    print_json(&serde_json::Value::Array(fields))
}

fn write_widgets_text(reader: &FormReader) -> Result<(), i32> {
    println!("page\tname");
    for widget in reader.annotations() {
        println!(
            "{}\t{}",
            widget.page_index + 1,
            widget.field_name.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn widget_to_json(widget: &WidgetAnnotation) -> serde_json::Value {
    serde_json::json!({
        "page": widget.page_index + 1,
        "name": widget.field_name,
    })
}

fn write_widgets_json(reader: &FormReader) -> Result<(), i32> {
    let widgets: Vec<_> = reader.annotations().map(|w| widget_to_json(&w)).collect();
    print_json(&serde_json::Value::Array(widgets))
}
