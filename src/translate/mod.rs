use crate::error::TranslateError;
use crate::id_scope::IdScope;
use crate::pipeline::{ActionReplay, Materialize};
use crate::schema::{Log, SpecSite, Startup, v1_0_2, v1_0_3};
use crate::transcode::{UnresolvedPolicy, copy_shared_fields, transcode_port_spec};
use crate::version::{SOURCE_VERSION, is_supported_source};

mod log;
mod registry;
pub mod startup;
mod vistrail;
mod workflow;

pub use startup::{KeyRule, RuleTable, ValueConversion, migrate_configuration};

/// Builds the new representation of one legacy port spec.
pub type PortSpecHook =
    fn(&v1_0_2::PortSpec, &mut IdScope) -> Result<v1_0_3::PortSpec, TranslateError>;

/// Per-site overrides applied on top of the generic graph copy.
///
/// A site without a hook gets the default upgrade, which copies the shared fields and
/// leaves the new `items` list empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldOverrides {
    module: Option<PortSpecHook>,
    module_descriptor: Option<PortSpecHook>,
    operation: Option<PortSpecHook>,
}

impl FieldOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_port_spec_hook(mut self, site: SpecSite, hook: PortSpecHook) -> Self {
        *self.slot(site) = Some(hook);
        self
    }

    fn slot(&mut self, site: SpecSite) -> &mut Option<PortSpecHook> {
        match site {
            SpecSite::Module => &mut self.module,
            SpecSite::ModuleDescriptor => &mut self.module_descriptor,
            SpecSite::Operation => &mut self.operation,
        }
    }

    pub fn hook(&self, site: SpecSite) -> Option<PortSpecHook> {
        match site {
            SpecSite::Module => self.module,
            SpecSite::ModuleDescriptor => self.module_descriptor,
            SpecSite::Operation => self.operation,
        }
    }

    /// Overrides used for whole vistrails: every site is transcoded.
    pub fn for_vistrail() -> Self {
        Self::new()
            .with_port_spec_hook(SpecSite::Module, transcode_port_spec)
            .with_port_spec_hook(SpecSite::ModuleDescriptor, transcode_port_spec)
            .with_port_spec_hook(SpecSite::Operation, transcode_port_spec)
    }

    pub fn for_workflow() -> Self {
        Self::new().with_port_spec_hook(SpecSite::Module, transcode_port_spec)
    }

    pub fn for_registry() -> Self {
        Self::new().with_port_spec_hook(SpecSite::ModuleDescriptor, transcode_port_spec)
    }

    /// Upgrades a legacy port spec found at `site`.
    pub fn upgrade_port_spec(
        &self,
        site: SpecSite,
        old: &v1_0_2::PortSpec,
        ids: &mut IdScope,
    ) -> Result<v1_0_3::PortSpec, TranslateError> {
        match self.hook(site) {
            Some(hook) => hook(old, ids),
            None => Ok(copy_shared_fields(old)),
        }
    }
}

/// Translates 1.0.2 documents to 1.0.3.
///
/// A translator holds no per-document state: every call creates (or borrows) its own
/// [`IdScope`], so one translator can be shared across threads.
///
/// # Example
///
/// ```rust
/// use vistrail_translate::schema::v1_0_2;
/// use vistrail_translate::transcode::UnresolvedPolicy;
/// use vistrail_translate::translate::Translator;
///
/// let translator = Translator::builder()
///     .with_unresolved_policy(UnresolvedPolicy::SkipEntry)
///     .build();
///
/// let old = v1_0_2::Vistrail {
///     version: "1.0.2".to_string(),
///     ..Default::default()
/// };
/// let new = translator.translate_vistrail(&old).unwrap();
/// assert_eq!(new.version, "1.0.3");
/// ```
pub struct Translator {
    materializer: Box<dyn Materialize>,
    unresolved_policy: UnresolvedPolicy,
    startup_rules: RuleTable,
}

pub struct TranslatorBuilder {
    materializer: Box<dyn Materialize>,
    unresolved_policy: UnresolvedPolicy,
    startup_rules: RuleTable,
}

impl TranslatorBuilder {
    pub fn new() -> Self {
        Self {
            materializer: Box::new(ActionReplay),
            unresolved_policy: UnresolvedPolicy::default(),
            startup_rules: RuleTable::v1_0_3(),
        }
    }

    /// Replaces the pipeline materializer used to resolve parameter explorations.
    pub fn with_materializer(mut self, materializer: impl Materialize + 'static) -> Self {
        self.materializer = Box::new(materializer);
        self
    }

    pub fn with_unresolved_policy(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved_policy = policy;
        self
    }

    pub fn with_startup_rules(mut self, rules: RuleTable) -> Self {
        self.startup_rules = rules;
        self
    }

    pub fn build(self) -> Translator {
        Translator {
            materializer: self.materializer,
            unresolved_policy: self.unresolved_policy,
            startup_rules: self.startup_rules,
        }
    }
}

impl Default for TranslatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Translator {
    fn default() -> Self {
        TranslatorBuilder::new().build()
    }
}

impl Translator {
    pub fn builder() -> TranslatorBuilder {
        TranslatorBuilder::new()
    }

    pub fn unresolved_policy(&self) -> UnresolvedPolicy {
        self.unresolved_policy
    }

    pub fn startup_rules(&self) -> &RuleTable {
        &self.startup_rules
    }
}

fn check_source_version(kind: &'static str, version: &str) {
    if !is_supported_source(version) {
        tracing::warn!(
            kind,
            version,
            expected = SOURCE_VERSION,
            "translating document with an unexpected version tag"
        );
    }
}

/// Translates a vistrail with the default [`Translator`].
pub fn translate_vistrail(old: &v1_0_2::Vistrail) -> Result<v1_0_3::Vistrail, TranslateError> {
    Translator::default().translate_vistrail(old)
}

/// Translates a standalone workflow with the default [`Translator`].
pub fn translate_workflow(old: &v1_0_2::Workflow) -> Result<v1_0_3::Workflow, TranslateError> {
    Translator::default().translate_workflow(old)
}

pub fn translate_log(old: &Log) -> Log {
    Translator::default().translate_log(old)
}

/// Translates a module registry with the default [`Translator`].
pub fn translate_registry(old: &v1_0_2::Registry) -> Result<v1_0_3::Registry, TranslateError> {
    Translator::default().translate_registry(old)
}

/// Migrates a startup document with the default 1.0.3 rule table.
pub fn translate_startup(old: &Startup) -> Startup {
    Translator::default().translate_startup(old)
}
