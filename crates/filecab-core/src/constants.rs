//! Application-wide constants.

/// Multiplier applied to a name's character count to produce the simulated
/// file size in bytes. No real payload exists anywhere in the system.
pub const SIZE_PER_NAME_CHAR: i64 = 1024;

/// Kind recorded for names that carry no extension.
pub const UNKNOWN_KIND: &str = "unknown";

/// Default flat-file document path. Also the target of the degraded mode
/// when the relational backend is unreachable.
pub const DEFAULT_DATA_PATH: &str = "files.json";
