use std::path::Path;

use pdfform::{FormWriter, RemovalMode, UpdateSummary, update_pdf_form_fields_from_dict};
use tracing::info;

use crate::shared::{open_pdf, read_form_data, read_settings, report, save_pdf};

pub struct FillArgs<'a> {
    pub file: &'a Path,
    pub data: &'a Path,
    pub output: &'a Path,
    pub read_only: bool,
    pub delete_removed: bool,
    pub settings: Option<&'a Path>,
}

pub fn run(args: FillArgs<'_>) -> Result<(), i32> {
    let reader = open_pdf(args.file)?;
    let data = read_form_data(args.data)?;
    let mut settings = read_settings(args.settings)?;
    if args.delete_removed {
        settings.removal = RemovalMode::Delete;
    }

    let mut writer = FormWriter::from(reader);
    let summary = update_pdf_form_fields_from_dict(&mut writer, &data, args.read_only, &settings)
        .map_err(report)?;
    save_pdf(&mut writer, args.output)?;

    info!(output = %args.output.display(), changed = summary.changed(), "filled form");
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &UpdateSummary) {
    eprintln!(
        "filled {} text field(s), {} checkbox(es); removed {}; read-only only {}",
        summary.text_fields, summary.checkboxes, summary.removed, summary.read_only_only
    );
    if summary.checkbox_fallbacks > 0 {
        eprintln!(
            "warning: {} checkbox value(s) matched no state and were set to Off",
            summary.checkbox_fallbacks
        );
    }
    if summary.unsupported > 0 {
        eprintln!(
            "warning: {} matched widget(s) are neither text fields nor checkboxes",
            summary.unsupported
        );
    }
}
