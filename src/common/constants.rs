/// Default simulator program.
pub const DEFAULT_SIMULATOR: &str = "ghdl";

/// Environment variable overriding the configured simulator program.
pub const SIMULATOR_ENV: &str = "GHDL";

/// Default source file extension.
pub const DEFAULT_EXTENSION: &str = "vhd";

/// Extension of object files written by the analyze and elaborate steps.
pub const OBJECT_EXT: &str = "o";

/// Prefix of the object file emitted for an elaborated unit (`e~<unit>.o`).
pub const ELABORATION_PREFIX: &str = "e~";

/// Patterns removed from the working directory on clean.
///
/// `*.cf` covers the design-library cache (`work-obj93.cf`, `work-obj08.cf`, ...).
pub const CLEAN_PATTERNS: [&str; 2] = ["*.o", "*.cf"];
