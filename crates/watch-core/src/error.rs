//! Typed diagnostics returned by the normalizers.

use crate::kind::Kind;
use crate::raw::{RawEvent, RawObject};
use thiserror::Error;

/// An event payload did not match the kind the subscription was registered
/// for.
///
/// This is a value the caller inspects, not a failure of the pipeline: the
/// original event is carried back untouched so the caller can log it, drop
/// it, or re-dispatch it under another kind. Nothing in this core logs or
/// escalates on its own.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("ignoring invalid {expected} event carrying a {got}")]
pub struct UnexpectedKind {
    /// Kind the caller subscribed for.
    pub expected: Kind,
    /// Kind actually found in the payload.
    pub got: Kind,
    /// The event, exactly as received.
    pub event: RawEvent,
}

impl UnexpectedKind {
    pub(crate) fn new(expected: Kind, event: RawEvent) -> Self {
        let got = match &event {
            RawEvent::Object(obj) => obj.kind(),
            RawEvent::Tombstone(ts) => match &ts.obj {
                Some(obj) => obj.kind(),
                // A payload-free tombstone is never rejected.
                None => expected,
            },
        };
        Self {
            expected,
            got,
            event,
        }
    }

    /// The rejected event, for callers that only want the payload back.
    pub fn into_event(self) -> RawEvent {
        self.event
    }

    /// The rejected raw object, whether it arrived live or inside a
    /// tombstone; `None` only for a payload-free tombstone.
    pub fn object(&self) -> Option<&RawObject> {
        match &self.event {
            RawEvent::Object(obj) => Some(obj),
            RawEvent::Tombstone(ts) => ts.obj.as_ref(),
        }
    }
}
