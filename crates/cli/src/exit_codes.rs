//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                              |
//! |---------|-----------|------------------------------------------|
//! | 0       | Universal | Success                                  |
//! | 1       | Universal | General error (unspecified)              |
//! | 2       | Universal | CLI usage error (bad args, missing file) |
//! | 3-9     | review    | Discrepancy review codes                 |
//! | 10-19   | refresh   | Fetch-cycle application codes            |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
/// (1 is the general error; 2 is emitted by clap for usage errors.)
pub const EXIT_SUCCESS: u8 = 0;

// =============================================================================
// Review (3-9)
// =============================================================================

/// Review found discrepancies between state and reference.
/// Like `diff(1)`, a non-zero exit means "values differ."
pub const EXIT_REVIEW_DISCREPANCY: u8 = 3;

/// Parse error reading state or reference files.
pub const EXIT_REVIEW_PARSE: u8 = 5;

// =============================================================================
// Refresh (10-19)
// =============================================================================

/// Defaults config is missing, unparseable, or invalid.
pub const EXIT_REFRESH_CONFIG: u8 = 10;

/// Cannot read an input file or write an output file.
pub const EXIT_REFRESH_IO: u8 = 11;

/// A state, fetched, or snapshot file is not a JSON object.
pub const EXIT_REFRESH_PARSE: u8 = 12;
