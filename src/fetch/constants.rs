//! Constants for the fetch module (limits, timeouts, politeness delay).

use std::time::Duration;

/// Default destination directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "Fetched_Images";

/// Default maximum image size (50 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 50 * 1024 * 1024;

/// Default network timeout for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default delay between consecutive requests in batch mode.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(500);

/// Longest filename (in bytes) taken from a URL or header before a substitute is generated.
///
/// Leaves room under the common 255-byte limit for a `(n)` disambiguator.
pub(crate) const MAX_FILENAME_BYTES: usize = 200;

/// Prefix for generated substitute filenames.
pub(crate) const SUBSTITUTE_PREFIX: &str = "image_";

/// Upper bound on `(n)` disambiguator attempts before falling back to a random suffix.
pub(crate) const MAX_DISAMBIGUATOR: usize = 10_000;

/// Attempts to create a fresh file before giving up when names keep appearing concurrently.
pub(crate) const MAX_CREATE_ATTEMPTS: usize = 5;
