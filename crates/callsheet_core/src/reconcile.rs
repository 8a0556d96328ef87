use crate::{Identity, JobRecord};

/// Result of one reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOutcome {
    /// Output records, same length and order as the input.
    pub jobs: Vec<JobRecord>,
    /// How many records had their ownership rewritten.
    pub repaired: usize,
}

/// A job is correctly owned when either ownership field matches the actor,
/// or it is deliberately shared with the team.
pub fn has_correct_owner(job: &JobRecord, actor: &Identity) -> bool {
    job.owner_id.as_deref() == Some(actor.id.as_str())
        || job.owner_username.as_deref() == Some(actor.username.as_str())
        || job.is_team_job
}

/// Active, non-team jobs with mismatched ownership need fixing. Soft-deleted
/// records are frozen: their ownership is never touched, however wrong.
pub fn needs_fix(job: &JobRecord, actor: &Identity) -> bool {
    !job.is_deleted && !has_correct_owner(job, actor)
}

/// Rewrites ownership of orphaned jobs to the acting identity.
///
/// Pure and idempotent: a second pass with the same actor finds nothing left
/// to repair. Records that already match, are team jobs, or are deleted pass
/// through unmodified; all business fields pass through unmodified in every
/// case.
pub fn reconcile(jobs: Vec<JobRecord>, actor: &Identity) -> ReconcileOutcome {
    let mut repaired = 0;
    let jobs = jobs
        .into_iter()
        .map(|mut job| {
            if needs_fix(&job, actor) {
                job.owner_id = Some(actor.id.clone());
                job.owner_username = Some(actor.username.clone());
                job.is_team_job = false;
                repaired += 1;
            }
            job
        })
        .collect();
    ReconcileOutcome { jobs, repaired }
}
