//! Callsheet engine: IO collaborators and effect execution.
mod handle;
mod identity;
mod probe;
mod repair;
mod store;

pub use handle::{ProbeEvent, ProbeEvents, ProbeHandle, ProbePoll};
pub use identity::{HttpIdentityProvider, IdentityError, IdentityProvider};
pub use probe::{ProbeError, ProbeFailure, ProbeSettings, ReachabilityProbe, ReqwestProbe};
pub use repair::{repair_job_ownership, RepairError, RepairSummary};
pub use store::{Blob, BlobStore, Dataset, HttpBlobStore, MemoryBlobStore, StoreError, Version};
