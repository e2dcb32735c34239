//! Local pipeline: read the SQL file, split it, print it for manual execution.

pub mod reporter;
pub mod sql_loader;
pub mod statement_extractor;

pub use reporter::{ManualInstructions, ReportSummary, Reporter};
pub use sql_loader::read_sql_file;
pub use statement_extractor::extract_statements;
