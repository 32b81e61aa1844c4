//! Command implementations
//!
//! Each module corresponds to a subcommand in the CLI.

pub mod tally;
pub mod top;

// Re-export commonly used types
pub use tally::{run as tally_run, TallyOptions, TallySummary};
pub use top::run as top_run;
