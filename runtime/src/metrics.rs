//! Metric names recorded by the Store.
//!
//! The Store records through the `metrics` facade; nothing is exported unless the
//! host application installs a recorder. [`describe`] registers units and help
//! texts so that whichever recorder is installed can render them.

use metrics::{describe_counter, describe_histogram, Unit};

/// Actions accepted by `Store::send`
pub const COMMANDS_TOTAL: &str = "store.commands.total";

/// Effects started, labelled by `type`
pub const EFFECTS_EXECUTED: &str = "store.effects.executed";

/// Effects returned per reducer call
pub const EFFECTS_COUNT: &str = "store.effects.count";

/// Time spent inside the reducer
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";

/// Shutdown requests
pub const SHUTDOWN_INITIATED: &str = "store.shutdown.initiated";

/// Shutdowns that drained every pending effect
pub const SHUTDOWN_COMPLETED: &str = "store.shutdown.completed";

/// Shutdowns that gave up with effects still running
pub const SHUTDOWN_TIMEOUT: &str = "store.shutdown.timeout";

/// Actions refused because the store was shutting down
pub const SHUTDOWN_REJECTED: &str = "store.shutdown.rejected_actions";

/// Register descriptions for every Store metric.
///
/// Call once after installing a recorder.
pub fn describe() {
    describe_counter!(COMMANDS_TOTAL, Unit::Count, "Actions accepted by the store");
    describe_counter!(EFFECTS_EXECUTED, Unit::Count, "Effects started, by type");
    describe_histogram!(EFFECTS_COUNT, Unit::Count, "Effects returned per reducer call");
    describe_histogram!(REDUCER_DURATION, Unit::Seconds, "Reducer execution time");
    describe_counter!(SHUTDOWN_INITIATED, Unit::Count, "Shutdown requests");
    describe_counter!(SHUTDOWN_COMPLETED, Unit::Count, "Clean shutdowns");
    describe_counter!(SHUTDOWN_TIMEOUT, Unit::Count, "Shutdowns that timed out");
    describe_counter!(SHUTDOWN_REJECTED, Unit::Count, "Actions rejected during shutdown");
}
