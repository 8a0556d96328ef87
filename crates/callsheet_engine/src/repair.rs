use callsheet_core::{reconcile, JobRecord};
use serde_json::Value;
use sheet_logging::{sheet_info, sheet_warn};
use thiserror::Error;

use crate::identity::{IdentityError, IdentityProvider};
use crate::store::{BlobStore, Dataset, StoreError};

/// What one repair run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairSummary {
    /// Records seen in the jobs dataset.
    pub total: usize,
    /// Records whose ownership was rewritten.
    pub repaired: usize,
    /// Array entries that were not job objects and were passed through
    /// verbatim.
    pub skipped_malformed: usize,
    /// Whether a write-back happened. False when nothing needed repair.
    pub wrote: bool,
}

#[derive(Debug, Error)]
pub enum RepairError {
    #[error("not signed in; sign in and run the repair again")]
    NotAuthenticated,
    #[error("no job data found for this account")]
    NoJobData,
    #[error("jobs dataset is not an array")]
    MalformedDataset,
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Repairs ownership of the acting user's jobs dataset in one
/// read-reconcile-write cycle.
///
/// The next state is fully computed before any write is attempted, so a
/// store failure can never leave a partial write behind. The write-back is
/// conditional on the version observed at read time; a concurrent writer
/// aborts the run with [`StoreError::Conflict`] and the caller re-runs.
pub async fn repair_job_ownership(
    identity: &dyn IdentityProvider,
    store: &dyn BlobStore,
) -> Result<RepairSummary, RepairError> {
    let actor = identity
        .current_user()
        .await?
        .ok_or(RepairError::NotAuthenticated)?;

    let blob = store
        .get(&actor.id, Dataset::Jobs)
        .await?
        .ok_or(RepairError::NoJobData)?;
    let raw_entries = match blob.value {
        Value::Array(entries) => entries,
        _ => return Err(RepairError::MalformedDataset),
    };
    let total = raw_entries.len();

    // Decode entry by entry. An entry that is not a job object cannot be
    // reconciled and passes through verbatim; it must not fault the batch.
    let mut records = Vec::with_capacity(total);
    let mut record_slots = Vec::with_capacity(total);
    let mut skipped_malformed = 0;
    for (index, entry) in raw_entries.iter().enumerate() {
        match serde_json::from_value::<JobRecord>(entry.clone()) {
            Ok(record) => {
                records.push(record);
                record_slots.push(index);
            }
            Err(err) => {
                sheet_warn!("jobs[{}] is not a job record, leaving as-is: {}", index, err);
                skipped_malformed += 1;
            }
        }
    }

    let before = records.clone();
    let outcome = reconcile(records, &actor);
    if outcome.repaired == 0 {
        sheet_info!(
            "ownership repair: {} records, nothing to fix for {}",
            total,
            actor.username
        );
        return Ok(RepairSummary {
            total,
            repaired: 0,
            skipped_malformed,
            wrote: false,
        });
    }

    // Patch the ownership keys in place on the original entries. Everything
    // else keeps its exact stored shape, wrong-typed fields included; a
    // repaired record differs from its input only in the three keys below.
    let mut next_entries = raw_entries;
    for ((index, fixed), original) in record_slots.iter().zip(outcome.jobs).zip(before) {
        if fixed != original {
            if let Some(entry) = next_entries[*index].as_object_mut() {
                entry.insert("ownerId".to_string(), Value::String(actor.id.clone()));
                entry.insert(
                    "ownerUsername".to_string(),
                    Value::String(actor.username.clone()),
                );
                entry.insert("isTeamJob".to_string(), Value::Bool(false));
            }
        }
    }

    store
        .put(
            &actor.id,
            Dataset::Jobs,
            &Value::Array(next_entries),
            blob.version.as_ref(),
        )
        .await?;

    sheet_info!(
        "ownership repair: rewrote {} of {} records to {} ({})",
        outcome.repaired,
        total,
        actor.username,
        actor.id
    );
    Ok(RepairSummary {
        total,
        repaired: outcome.repaired,
        skipped_malformed,
        wrote: true,
    })
}
