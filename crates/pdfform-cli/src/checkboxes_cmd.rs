use std::path::Path;

use crate::cli::OutputFormat;
use crate::shared::{open_pdf, print_json};

pub fn run(file: &Path, format: &OutputFormat) -> Result<(), i32> {
    let reader = open_pdf(file)?;
    let checkboxes = pdfform::checkbox_values_of(&reader);

    match format {
        OutputFormat::Text => {
            println!("name\tstates");
            for (name, states) in &checkboxes {
                println!("{name}\t{}", states.join(" "));
            }
            Ok(())
        }
        OutputFormat::Json => {
            let map: serde_json::Map<_, _> = checkboxes
                .into_iter()
                .map(|(name, states)| (name, serde_json::json!(states)))
                .collect();
            print_json(&serde_json::Value::Object(map))
        }
    }
}
