//! Rendering a homework record into a notification message.

use crate::catalog::StatusCatalog;
use crate::error::{HomewatchError, Result};
use crate::response::HomeworkRecord;

/// Render the user-facing message for a status change.
///
/// A record missing its name or status is a schema violation; a status
/// the catalog does not document is an `UnknownStatus`. The two are kept
/// distinct so the operator log says what actually went wrong.
pub fn render_status(record: &HomeworkRecord, catalog: &StatusCatalog) -> Result<String> {
    let name = record
        .name
        .as_deref()
        .ok_or_else(|| HomewatchError::Schema("homework record has no 'homework_name'".into()))?;
    let status = record
        .status
        .as_deref()
        .ok_or_else(|| HomewatchError::Schema("homework record has no 'status'".into()))?;
    let verdict = catalog
        .verdict(status)
        .ok_or_else(|| HomewatchError::UnknownStatus(status.to_string()))?;

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {verdict}"
    ))
}
