use crate::config::SUPABASE_DASHBOARD_URL;
use crate::error::HandoffError;
use crate::types::ProjectTarget;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where the user should go to run the printed statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualInstructions {
    pub sql_file: PathBuf,
    pub editor_url: Option<String>,
}

impl ManualInstructions {
    pub fn for_target(target: &ProjectTarget, sql_file: &Path) -> Self {
        let editor_url = target
            .project_ref()
            .map(|r| format!("{SUPABASE_DASHBOARD_URL}/project/{r}/sql/new"));
        Self {
            sql_file: sql_file.to_path_buf(),
            editor_url,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub total: usize,
    pub printed: usize,
    pub failed: usize,
}

/// Prints statements for manual execution. Nothing is sent to the database.
pub struct Reporter<W: Write> {
    out: W,
    preview_width: usize,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, preview_width: usize) -> Self {
        Self { out, preview_width }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Header and summary failures abort; a failure on one statement is logged and skipped.
    pub fn report(
        &mut self,
        statements: &[String],
        instructions: &ManualInstructions,
    ) -> Result<ReportSummary, HandoffError> {
        let total = statements.len();
        let mut summary = ReportSummary {
            total,
            ..Default::default()
        };

        writeln!(
            self.out,
            "Prepared {total} SQL statements for manual execution..."
        )?;

        for (i, statement) in statements.iter().enumerate() {
            match self.write_statement(i + 1, total, statement) {
                Ok(()) => summary.printed += 1,
                Err(e) => {
                    summary.failed += 1;
                    warn!(index = i + 1, error = %e, "failed to print statement");
                }
            }
        }

        self.write_instructions(instructions)?;
        self.out.flush()?;

        info!(
            total = summary.total,
            printed = summary.printed,
            failed = summary.failed,
            "report finished"
        );
        Ok(summary)
    }

    fn write_statement(&mut self, index: usize, total: usize, statement: &str) -> io::Result<()> {
        writeln!(self.out, "\nStatement {index}/{total}:")?;
        writeln!(self.out, "   {}", preview(statement, self.preview_width))?;
        writeln!(
            self.out,
            "   Note: Direct SQL execution requires service role key or database access."
        )?;
        writeln!(
            self.out,
            "   Please run these SQL commands in your Supabase SQL Editor:"
        )?;
        writeln!(self.out, "\n{statement};\n")
    }

    fn write_instructions(&mut self, instructions: &ManualInstructions) -> io::Result<()> {
        let file = instructions.sql_file.display();
        writeln!(self.out, "\nSummary:")?;
        writeln!(
            self.out,
            "Since we don't have direct database access, please copy the SQL statements above"
        )?;
        writeln!(self.out, "and run them in your Supabase dashboard SQL Editor.")?;
        writeln!(self.out, "\nTo do this:")?;
        match &instructions.editor_url {
            Some(url) => writeln!(self.out, "1. Go to {url}")?,
            None => writeln!(
                self.out,
                "1. Open the SQL Editor of your project at {SUPABASE_DASHBOARD_URL}"
            )?,
        }
        writeln!(self.out, "2. Copy and paste the SQL from {file}")?;
        writeln!(self.out, "3. Click 'Run' to execute the statements")
    }
}

/// Single-line preview of at most `width` characters, suffixed with `...` when cut.
pub fn preview(statement: &str, width: usize) -> String {
    let flat = statement.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= width {
        return flat;
    }
    let mut cut: String = flat.chars().take(width).collect();
    cut.push_str("...");
    cut
}
