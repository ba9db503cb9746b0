//! Terminal rendering of session views.

use std::fmt::Write as _;

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};

use crate::form::FormState;
use crate::record::{Record, CSV_HEADERS};
use crate::session::View;

/// Build the stored-records table.
#[must_use]
pub fn records_table(records: &[Record]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120)
        .set_header(CSV_HEADERS.to_vec());
    for record in records {
        table.add_row(record.cells().to_vec());
    }
    table
}

/// Summarize the form being edited.
#[must_use]
pub fn form_summary(form: &FormState, kids_editable: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Full Name:      {}", form.name);
    let _ = writeln!(out, "Parent Name:    {}", form.parent_name);
    let _ = writeln!(out, "Date of Birth:  {}", form.dob);
    let _ = writeln!(out, "Sex:            {}", form.sex);
    let _ = writeln!(out, "Married:        [{}]", checkbox(form.married()));
    let _ = writeln!(out, "Unmarried:      [{}]", checkbox(form.unmarried()));
    if kids_editable {
        let _ = writeln!(out, "Number of Kids: {}", form.kids());
    }
    out
}

/// Render a full view: warning, form, and the records table when non-empty.
#[must_use]
pub fn render_view(view: &View) -> String {
    let mut out = String::new();
    if let Some(warning) = &view.warning {
        let _ = writeln!(out, "warning: {warning}");
    }
    out.push_str(&form_summary(&view.form, view.kids_editable));
    if !view.records.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Stored Records");
        let _ = writeln!(out, "{}", records_table(&view.records));
        if view.download_available {
            let _ = writeln!(out, "Type 'download' to save the records as CSV.");
        }
    }
    out
}

fn checkbox(checked: bool) -> char {
    if checked {
        'x'
    } else {
        ' '
    }
}
