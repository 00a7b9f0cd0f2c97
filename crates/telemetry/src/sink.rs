//! The `Sink` contract: the single capability the core hands finished
//! [`Event`]s to. Concrete sinks (file/stdout/discard) are external
//! collaborators, constructed only by [`crate::facade`] from a URI.

use crate::event::Event;

/// A sink consumes finished Events. Implementations must be safe to call
/// from the single collector thread; the core never invokes a sink from a
/// producer thread, so `Sink` does not need interior synchronization for
/// multi-writer access, only `Send + Sync` so it can be shared with the
/// runtime.
///
/// Failure to write is sink-local: a sink may abort the process, log and
/// drop, or retry internally, but must not propagate an error back into the
/// core — `publish` is infallible from the core's point of view.
pub trait Sink: Send + Sync {
    fn publish(&self, event: Event);
}
