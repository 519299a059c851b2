use super::{FieldOverrides, Translator, check_source_version};
use crate::error::TranslateError;
use crate::id_scope::{IdScope, vt_type};
use crate::schema::{v1_0_2, v1_0_3};
use crate::version::TARGET_VERSION;

impl Translator {
    /// Translates a module registry, transcoding every descriptor's port specs.
    pub fn translate_registry(
        &self,
        old: &v1_0_2::Registry,
    ) -> Result<v1_0_3::Registry, TranslateError> {
        check_source_version("registry", &old.version);

        let mut ids = IdScope::new();
        for package in &old.packages {
            ids.observe(vt_type::PACKAGE, package.id);
            for descriptor in &package.module_descriptors {
                ids.observe(vt_type::MODULE_DESCRIPTOR, descriptor.id);
                for spec in &descriptor.port_specs {
                    ids.observe(vt_type::PORT_SPEC, spec.id);
                }
            }
        }

        let overrides = FieldOverrides::for_registry();
        let packages = old
            .packages
            .iter()
            .map(|package| {
                package.try_map_specs(&mut |site, spec| {
                    overrides.upgrade_port_spec(site, spec, &mut ids)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            registry = old.id,
            packages = packages.len(),
            "translated registry"
        );
        Ok(v1_0_3::Registry {
            id: old.id,
            entity_type: old.entity_type.clone(),
            version: TARGET_VERSION.to_string(),
            root_descriptor_id: old.root_descriptor_id,
            name: old.name.clone(),
            last_modified: old.last_modified.clone(),
            packages,
            id_scope: ids,
        })
    }
}
