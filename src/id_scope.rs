use ahash::AHashMap;

/// Namespaced, monotonically increasing id allocator for one translation run.
///
/// Each structural type name (`"module"`, `"portSpecItem"`, ...) owns a counter. A remap
/// table can redirect one namespace onto another so that several types share a counter.
/// Scopes are plain values: create one per top-level translation and thread it through
/// explicitly, never share one between independent runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdScope {
    beginning_id: i64,
    next_ids: AHashMap<String, i64>,
    remap: AHashMap<String, String>,
}

impl IdScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope whose fresh namespaces start at `beginning_id` instead of 0.
    pub fn starting_at(beginning_id: i64) -> Self {
        Self {
            beginning_id,
            ..Self::default()
        }
    }

    /// Redirects allocations for `from` to the `to` namespace.
    pub fn with_remap(mut self, from: &str, to: &str) -> Self {
        self.remap.insert(from.to_string(), to.to_string());
        self
    }

    /// The scope used for workflows, where abstractions and groups draw their ids
    /// from the module counter.
    pub fn for_workflow() -> Self {
        Self::new()
            .with_remap(vt_type::ABSTRACTION, vt_type::MODULE)
            .with_remap(vt_type::GROUP, vt_type::MODULE)
    }

    fn namespace<'a>(&'a self, vt_type: &'a str) -> &'a str {
        self.remap.get(vt_type).map(String::as_str).unwrap_or(vt_type)
    }

    /// Allocates the next id of `vt_type`'s namespace.
    pub fn get_new_id(&mut self, vt_type: &str) -> i64 {
        let namespace = self.namespace(vt_type).to_string();
        let next = self.next_ids.entry(namespace).or_insert(self.beginning_id);
        let id = *next;
        *next += 1;
        id
    }

    /// The id the next call to [`IdScope::get_new_id`] would return, without consuming it.
    pub fn peek_id(&self, vt_type: &str) -> i64 {
        self.next_ids
            .get(self.namespace(vt_type))
            .copied()
            .unwrap_or(self.beginning_id)
    }

    /// Makes sure the next id handed out for `vt_type` is at least `next_id`.
    pub fn update_beginning_id(&mut self, vt_type: &str, next_id: i64) {
        let namespace = self.namespace(vt_type).to_string();
        let next = self.next_ids.entry(namespace).or_insert(self.beginning_id);
        if *next < next_id {
            *next = next_id;
        }
    }

    /// Records an id already present in a document so fresh ids never collide with it.
    pub fn observe(&mut self, vt_type: &str, existing_id: i64) {
        self.update_beginning_id(vt_type, existing_id.saturating_add(1));
    }
}

/// Structural type names used as id namespaces.
pub mod vt_type {
    pub const ACTION: &str = "action";
    pub const ACTION_ANNOTATION: &str = "actionAnnotation";
    pub const ANNOTATION: &str = "annotation";
    pub const MODULE: &str = "module";
    pub const MODULE_DESCRIPTOR: &str = "module_descriptor";
    pub const PACKAGE: &str = "package";
    pub const ABSTRACTION: &str = "abstraction";
    pub const GROUP: &str = "group";
    pub const PORT_SPEC: &str = "portSpec";
    pub const PORT_SPEC_ITEM: &str = "portSpecItem";
    pub const PARAMETER_EXPLORATION: &str = "parameter_exploration";
    pub const PE_FUNCTION: &str = "peFunction";
    pub const PE_PARAMETER: &str = "peParameter";
    pub const TAG: &str = "tag";
}
