use super::{FieldOverrides, Translator, check_source_version};
use crate::error::TranslateError;
use crate::id_scope::{IdScope, vt_type};
use crate::schema::graph::{Operation, OperationData};
use crate::schema::{v1_0_2, v1_0_3};
use crate::transcode::{PARAM_EXP_KEY, extract_parameter_exploration, rehome_annotations};
use crate::version::TARGET_VERSION;
use tracing::debug;

/// Raises `ids` above every id already used in the legacy vistrail, so objects created
/// during translation never collide with existing ones.
fn seed_ids(old: &v1_0_2::Vistrail, ids: &mut IdScope) {
    for action in &old.actions {
        ids.observe(vt_type::ACTION, action.id);
        for annotation in &action.annotations {
            ids.observe(vt_type::ANNOTATION, annotation.id);
        }
        for op in &action.operations {
            let data = match op {
                Operation::Add(add) => &add.data,
                Operation::Change(change) => &change.data,
                Operation::Delete(_) => continue,
            };
            match data {
                OperationData::Module(m) => ids.observe(vt_type::MODULE, m.id),
                OperationData::Abstraction(a) => ids.observe(vt_type::ABSTRACTION, a.id),
                OperationData::Group(g) => {
                    ids.observe(vt_type::GROUP, g.id);
                    g.workflow
                        .for_each_module(&mut |kind, id| ids.observe(kind.as_str(), id));
                }
                _ => {}
            }
        }
    }
    for tag in &old.tags {
        ids.observe(vt_type::TAG, tag.id);
    }
    for annotation in &old.annotations {
        ids.observe(vt_type::ANNOTATION, annotation.id);
    }
    for annotation in &old.action_annotations {
        ids.observe(vt_type::ACTION_ANNOTATION, annotation.id);
    }
}

impl Translator {
    /// Translates a whole vistrail.
    ///
    /// Port specs are transcoded wherever they appear: in module payloads, in group
    /// subworkflows and as payloads of their own add/change operations. The
    /// `__vistrail_vars__` annotation becomes the vistrail's variables, and every
    /// `__paramexp__` action annotation is turned into a parameter exploration. The
    /// scope used for new ids is kept on the result.
    pub fn translate_vistrail(
        &self,
        old: &v1_0_2::Vistrail,
    ) -> Result<v1_0_3::Vistrail, TranslateError> {
        check_source_version("vistrail", &old.version);
        debug!(
            vistrail = old.id,
            actions = old.actions.len(),
            "translating vistrail"
        );

        let mut ids = IdScope::for_workflow();
        seed_ids(old, &mut ids);

        let overrides = FieldOverrides::for_vistrail();
        let actions = old
            .actions
            .iter()
            .map(|action| {
                action.try_map_specs(&mut |site, spec| {
                    overrides.upgrade_port_spec(site, spec, &mut ids)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let (annotations, vistrail_variables) = rehome_annotations(&old.annotations)?;

        let mut action_annotations = Vec::with_capacity(old.action_annotations.len());
        let mut parameter_explorations = Vec::new();
        for annotation in &old.action_annotations {
            if annotation.key != PARAM_EXP_KEY {
                action_annotations.push(annotation.clone());
                continue;
            }
            if let Some(exploration) = extract_parameter_exploration(
                annotation,
                old,
                self.materializer.as_ref(),
                self.unresolved_policy,
                &mut ids,
            ) {
                parameter_explorations.push(exploration);
            }
        }

        debug!(
            vistrail = old.id,
            variables = vistrail_variables.len(),
            explorations = parameter_explorations.len(),
            "translated vistrail"
        );
        Ok(v1_0_3::Vistrail {
            id: old.id,
            entity_type: old.entity_type.clone(),
            version: TARGET_VERSION.to_string(),
            name: old.name.clone(),
            last_modified: old.last_modified.clone(),
            actions,
            tags: old.tags.clone(),
            annotations,
            action_annotations,
            vistrail_variables,
            parameter_explorations,
            id_scope: ids,
        })
    }
}
