use std::path::Path;

use crate::repository::{BulkTransfer, TransferReport};
use crate::services::{ServiceError, ServiceResult};

/// Writes every table to `{base}_{table}.csv`, overwriting existing files.
pub fn export_data<R>(repo: &R, base: &Path) -> ServiceResult<TransferReport>
where
    R: BulkTransfer + ?Sized,
{
    repo.export_to_csv(base).map_err(|err| {
        log::error!("Failed to export to {}: {err}", base.display());
        ServiceError::from(err)
    })
}

/// Loads every `{base}_{table}.csv` that exists. Missing files are reported
/// in the returned [`TransferReport`] instead of failing the import.
pub fn import_data<R>(repo: &R, base: &Path) -> ServiceResult<TransferReport>
where
    R: BulkTransfer + ?Sized,
{
    let report = repo.import_from_csv(base).map_err(|err| {
        log::error!("Failed to import from {}: {err}", base.display());
        ServiceError::from(err)
    })?;

    let skipped = report.skipped();
    if !skipped.is_empty() {
        log::warn!("Import skipped missing tables: {}", skipped.join(", "));
    }

    Ok(report)
}
