use std::path::Path;

use pdfform::{FormWriter, PageSize, manual_add_annotations, overlay_data_from_fields};
use tracing::info;

use crate::shared::{open_pdf, read_form_data, read_overlay_data, read_settings, report, save_pdf};

/// Draw the entries of an overlay file onto the document.
pub fn run_overlay(
    file: &Path,
    data: &Path,
    output: &Path,
    page_size: PageSize,
    settings: Option<&Path>,
) -> Result<(), i32> {
    let reader = open_pdf(file)?;
    let overlay = read_overlay_data(data)?;
    let settings = read_settings(settings)?;

    let mut writer = manual_add_annotations(
        FormWriter::from(reader),
        &overlay,
        page_size,
        &settings.overlay,
    )
    .map_err(report)?;
    save_pdf(&mut writer, output)?;

    info!(output = %output.display(), entries = overlay.len(), "wrote overlay");
    Ok(())
}

/// Replace matched text fields with text drawn at their positions.
pub fn run_flatten(
    file: &Path,
    data: &Path,
    output: &Path,
    page_size: PageSize,
    settings: Option<&Path>,
) -> Result<(), i32> {
    let reader = open_pdf(file)?;
    let data = read_form_data(data)?;
    let settings = read_settings(settings)?;

    let mut writer = FormWriter::from(reader);
    let overlay = overlay_data_from_fields(&mut writer, &data, settings.naming);
    if overlay.is_empty() {
        eprintln!("warning: no text field matched the data file");
    }
    let mut writer =
        manual_add_annotations(writer, &overlay, page_size, &settings.overlay).map_err(report)?;
    save_pdf(&mut writer, output)?;

    info!(output = %output.display(), fields = overlay.len(), "flattened form");
    Ok(())
}
