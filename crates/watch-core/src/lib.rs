//! Watch-event normalization core for the MeshOps agents.
//!
//! The informer layer delivers a continuous stream of raw watch events for
//! the resource kinds the agents care about. This crate owns the two
//! decisions made once per event:
//!
//! 1. **Normalize**: reduce the raw object to a slim form retaining only
//!    the fields downstream reconciliation reads, consuming the raw object
//!    so the full copy cannot be retained alongside the slim one. Deletion
//!    tombstones are unwrapped, their payload reduced, and re-wrapped under
//!    the original key.
//! 2. **Equal**: decide whether two normalized observations of the same
//!    identity differ in a way that justifies re-running reconciliation,
//!    using per-kind allow-lists of relevant fields and annotations rather
//!    than full structural equality.
//!
//! Both operations are synchronous, CPU-bound, never fail, and are safe to
//! run concurrently across distinct identities. An event whose payload does
//! not match the subscribed kind is handed back as a typed
//! [`UnexpectedKind`] diagnostic; the caller decides whether to log or drop
//! it (the [`guard`] helpers do the former).

pub mod annotations;
pub mod equal;
pub mod error;
pub mod guard;
pub mod kind;
pub mod normalize;
pub mod raw;
pub mod service;
pub mod slim;

#[cfg(test)]
mod equal_test;

pub use error::UnexpectedKind;
pub use kind::{Kind, KindRegistry};
pub use normalize::NormalizeOutcome;
pub use raw::{RawEvent, RawObject, Tombstone};
pub use service::{NodeAddressing, ServiceId, ServiceInfo, ServiceParser, ServicePortInfo};
pub use slim::{
    Normalized, SlimEndpointSlice, SlimEndpoints, SlimMeshEndpoint, SlimNamespace,
    SlimNetworkPolicy, SlimNode, SlimPolicy, SlimService,
};
