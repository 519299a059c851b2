use super::{FieldOverrides, Translator, check_source_version};
use crate::error::TranslateError;
use crate::id_scope::IdScope;
use crate::schema::{v1_0_2, v1_0_3};
use crate::version::TARGET_VERSION;

impl Translator {
    /// Translates a standalone workflow with a fresh module-family scope.
    pub fn translate_workflow(
        &self,
        old: &v1_0_2::Workflow,
    ) -> Result<v1_0_3::Workflow, TranslateError> {
        let mut ids = IdScope::for_workflow();
        self.translate_workflow_scoped(old, &mut ids)
    }

    /// Translates a workflow, drawing new ids from a scope the caller owns.
    ///
    /// The scope is first raised above every module, abstraction and group id in the
    /// workflow, including those inside groups. Pass a scope built with
    /// [`IdScope::for_workflow`] so the three share one counter.
    pub fn translate_workflow_scoped(
        &self,
        old: &v1_0_2::Workflow,
        ids: &mut IdScope,
    ) -> Result<v1_0_3::Workflow, TranslateError> {
        check_source_version("workflow", &old.version);
        old.for_each_module(&mut |kind, id| ids.observe(kind.as_str(), id));

        let overrides = FieldOverrides::for_workflow();
        let mut workflow =
            old.try_map_specs(&mut |site, spec| overrides.upgrade_port_spec(site, spec, ids))?;
        workflow.version = TARGET_VERSION.to_string();

        tracing::debug!(
            workflow = old.id,
            modules = workflow.modules.len(),
            "translated workflow"
        );
        Ok(workflow)
    }
}
