use crate::api::SupabaseApi;
use crate::config::Config;
use crate::error::HandoffError;
use crate::service::{
    ManualInstructions, ReportSummary, Reporter, extract_statements, read_sql_file,
};
use crate::types::ProjectTarget;
use std::io::Write;
use tracing::{info, warn};

/// Resolve configuration, load and split the SQL file, then print the report to `out`.
///
/// Configuration is validated before the file is touched. SQL is never sent to the backend;
/// with `check_connection` set the REST endpoint is probed once and failures only warn.
pub async fn run<W: Write>(cfg: &Config, out: W) -> Result<ReportSummary, HandoffError> {
    let target = cfg.resolve_target()?;
    info!(
        endpoint = %target.endpoint,
        credential = %target.credential.kind,
        "Using Supabase project"
    );

    if cfg.check_connection {
        check_connection(&target, cfg).await;
    }

    let sql = read_sql_file(&cfg.sql_file)?;
    let statements = extract_statements(&sql);
    info!(
        path = %cfg.sql_file.display(),
        count = statements.len(),
        "extracted SQL statements"
    );

    let instructions = ManualInstructions::for_target(&target, &cfg.sql_file);
    Reporter::new(out, cfg.preview_width).report(&statements, &instructions)
}

async fn check_connection(target: &ProjectTarget, cfg: &Config) {
    let api = match SupabaseApi::new(target, cfg.proxy.as_deref()) {
        Ok(api) => api,
        Err(e) => {
            warn!(error = %e, "could not build Supabase client; skipping endpoint check");
            return;
        }
    };
    if let Err(e) = api.probe().await {
        warn!(error = %e, "Supabase endpoint check failed; continuing with manual workflow");
    }
}
