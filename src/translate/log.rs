use super::{Translator, check_source_version};
use crate::schema::Log;
use crate::version::TARGET_VERSION;

impl Translator {
    /// Execution logs did not change shape in 1.0.3; only the version tag moves.
    pub fn translate_log(&self, old: &Log) -> Log {
        check_source_version("log", &old.version);
        tracing::debug!(
            log = old.id,
            executions = old.workflow_execs.len(),
            "translated log"
        );
        Log {
            version: TARGET_VERSION.to_string(),
            ..old.clone()
        }
    }
}
