//! Few-shot exemplar selection.

use tracing::debug;

use crate::config::ExemplarSelection;
use crate::dataset::record::Record;
use crate::errors::{TransformError, TransformResult};

/// Pick the configured exemplars from the dataset, in configured order.
///
/// # Errors
/// Positional selection fails if an index is past the end of the dataset or
/// the record there declares a different id. Id selection fails if no record
/// declares a requested id.
pub fn select_exemplars<'a>(
    dataset: &'a [Record],
    selection: &ExemplarSelection,
) -> TransformResult<Vec<&'a Record>> {
    let exemplars = match selection {
        ExemplarSelection::Positional(indices) => select_positional(dataset, indices)?,
        ExemplarSelection::ById(ids) => select_by_id(dataset, ids)?,
    };
    debug!(
        count = exemplars.len(),
        ids = ?exemplars.iter().map(|r| r.id).collect::<Vec<_>>(),
        "few-shot exemplars selected"
    );
    Ok(exemplars)
}

fn select_positional<'a>(dataset: &'a [Record], indices: &[usize]) -> TransformResult<Vec<&'a Record>> {
    indices
        .iter()
        .map(|&index| -> TransformResult<&'a Record> {
            let record = dataset.get(index).ok_or(TransformError::ExemplarOutOfRange {
                index,
                len: dataset.len(),
            })?;
            if i64::try_from(index).ok() != Some(record.id) {
                return Err(TransformError::ExemplarIdMismatch {
                    index,
                    found: record.id,
                });
            }
            Ok(record)
        })
        .collect()
}

fn select_by_id<'a>(dataset: &'a [Record], ids: &[i64]) -> TransformResult<Vec<&'a Record>> {
    ids.iter()
        .map(|&id| {
            dataset
                .iter()
                .find(|record| record.id == id)
                .ok_or(TransformError::ExemplarNotFound(id))
        })
        .collect()
}
