use crate::error::ParamExpError;
use crate::id_scope::{IdScope, vt_type};
use crate::pipeline::Materialize;
use crate::schema::ActionAnnotation;
use crate::schema::v1_0_2::Vistrail;
use crate::schema::v1_0_3::{PEFunction, PEParameter, ParameterExploration};
use roxmltree::Node;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Action annotation key under which 1.0.2 stored a parameter exploration.
pub const PARAM_EXP_KEY: &str = "__paramexp__";

const WRAPPER_OPEN: &str = "<paramexps>";
const WRAPPER_CLOSE: &str = "</paramexps>";

/// What to do with the rest of an exploration when one of its functions or parameters
/// no longer resolves against the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedPolicy {
    /// Stop reading the current list at the first unresolved entry and keep what was
    /// collected so far. Later functions and parameters are lost.
    #[default]
    StopAtFirst,
    /// Skip only the unresolved entry and keep going.
    SkipEntry,
}

/// How the values of an explored parameter are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolator {
    Linear,
    Rgb,
    Hsv,
    List,
    UserDefined,
}

impl Interpolator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interpolator::Linear => "Linear Interpolation",
            Interpolator::Rgb => "RGB Interpolation",
            Interpolator::Hsv => "HSV Interpolation",
            Interpolator::List => "List",
            Interpolator::UserDefined => "User-defined Function",
        }
    }
}

impl fmt::Display for Interpolator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interpolator {
    type Err = ParamExpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Linear Interpolation" => Ok(Interpolator::Linear),
            "RGB Interpolation" => Ok(Interpolator::Rgb),
            "HSV Interpolation" => Ok(Interpolator::Hsv),
            "List" => Ok(Interpolator::List),
            "User-defined Function" => Ok(Interpolator::UserDefined),
            other => Err(ParamExpError::UnknownInterpolator(other.to_string())),
        }
    }
}

/// The legacy `<paramexp>` document, parsed but not yet resolved against a pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamExpDocument {
    pub dims: String,
    pub layout: String,
    pub date: String,
    pub functions: Vec<FunctionEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionEntry {
    /// Id of the function in the pipeline at the exploration's action.
    pub id: i64,
    pub alias: bool,
    pub params: Vec<ParamEntry>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamEntry {
    /// Id of the parameter in the pipeline at the exploration's action.
    pub id: i64,
    pub interp: String,
    pub dim: i32,
    pub min: Option<String>,
    pub max: Option<String>,
    pub values: Option<String>,
    pub code: Option<String>,
}

impl ParamEntry {
    /// Builds the 1.0.3 value string for this parameter from its interpolator.
    pub fn value(&self) -> Result<(Interpolator, String), ParamExpError> {
        let interpolator: Interpolator = self.interp.parse()?;
        let attr = |value: &Option<String>, attribute: &'static str| {
            value.clone().ok_or(ParamExpError::MissingAttribute {
                element: "param",
                attribute,
            })
        };
        let value = match interpolator {
            Interpolator::Linear => {
                format!("[{}, {}]", attr(&self.min, "min")?, attr(&self.max, "max")?)
            }
            Interpolator::Rgb | Interpolator::Hsv => {
                format!(
                    "[\"{}\", \"{}\"]",
                    attr(&self.min, "min")?,
                    attr(&self.max, "max")?
                )
            }
            Interpolator::List => attr(&self.values, "values")?,
            Interpolator::UserDefined => attr(&self.code, "code")?,
        };
        Ok((interpolator, value))
    }
}

fn strip_wrapper(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix(WRAPPER_OPEN).unwrap_or(text);
    let text = text.strip_suffix(WRAPPER_CLOSE).unwrap_or(text);
    text.trim()
}

fn required(
    node: Node<'_, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<String, ParamExpError> {
    node.attribute(attribute)
        .map(str::to_string)
        .ok_or(ParamExpError::MissingAttribute { element, attribute })
}

fn number<T: FromStr>(
    node: Node<'_, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<T, ParamExpError> {
    let text = required(node, element, attribute)?;
    text.trim()
        .parse()
        .map_err(|_| ParamExpError::InvalidNumber {
            attribute,
            value: text,
        })
}

fn parse_param(node: Node<'_, '_>) -> Result<ParamEntry, ParamExpError> {
    let optional = |attribute: &str| node.attribute(attribute).map(str::to_string);
    Ok(ParamEntry {
        id: number(node, "param", "id")?,
        interp: required(node, "param", "interp")?,
        dim: number(node, "param", "dim")?,
        min: optional("min"),
        max: optional("max"),
        values: optional("values"),
        code: optional("code"),
    })
}

fn parse_function(node: Node<'_, '_>) -> Result<FunctionEntry, ParamExpError> {
    let params = node
        .descendants()
        .filter(|n| n.has_tag_name("param"))
        .map(parse_param)
        .collect::<Result<_, _>>()?;
    Ok(FunctionEntry {
        id: number(node, "function", "id")?,
        alias: node.attribute("alias") == Some("True"),
        params,
    })
}

/// Parses the XML stored in a `__paramexp__` annotation.
///
/// The text may still carry the `<paramexps>` wrapper some writers added; it is
/// stripped before parsing. The root element must carry `dims`, `layout` and `date`.
pub fn parse_param_exp(text: &str) -> Result<ParamExpDocument, ParamExpError> {
    let doc = roxmltree::Document::parse(strip_wrapper(text))
        .map_err(|e| ParamExpError::Xml(e.to_string()))?;
    let root = doc.root_element();
    let functions = root
        .descendants()
        .filter(|n| n.has_tag_name("function"))
        .map(parse_function)
        .collect::<Result<_, _>>()?;
    Ok(ParamExpDocument {
        dims: required(root, "paramexp", "dims")?,
        layout: required(root, "paramexp", "layout")?,
        date: required(root, "paramexp", "date")?,
        functions,
    })
}

/// Turns one legacy `__paramexp__` action annotation into a first-class exploration.
///
/// Function and parameter ids in the XML are resolved against the pipeline at the
/// annotation's action, which `materializer` reconstructs from the legacy vistrail.
/// Entries that no longer resolve are handled according to `policy`. A parameter
/// with an unknown interpolator or a missing value attribute is dropped on its own.
///
/// Returns `None`, after logging a warning, when the XML cannot be parsed or the
/// pipeline cannot be built. Ids are allocated in the order parameters, then their
/// function, then the exploration itself.
pub fn extract_parameter_exploration(
    annotation: &ActionAnnotation,
    vistrail: &Vistrail,
    materializer: &dyn Materialize,
    policy: UnresolvedPolicy,
    ids: &mut IdScope,
) -> Option<ParameterExploration> {
    let action_id = annotation.action_id;
    if annotation.value.trim().is_empty() {
        debug!(action_id, "ignoring empty parameter exploration");
        return None;
    }
    let doc = match parse_param_exp(&annotation.value) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(action_id, error = %e, "skipping unreadable parameter exploration");
            return None;
        }
    };
    let pipeline = match materializer.materialize(vistrail, action_id) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            let e = ParamExpError::from(e);
            warn!(action_id, error = %e, "skipping parameter exploration");
            return None;
        }
    };

    let mut functions = Vec::new();
    for entry in &doc.functions {
        let Some((module, function)) = pipeline.find_function(entry.id) else {
            warn!(action_id, function_id = entry.id, "explored function not found in pipeline");
            match policy {
                UnresolvedPolicy::StopAtFirst => break,
                UnresolvedPolicy::SkipEntry => continue,
            }
        };

        let mut parameters = Vec::new();
        for param in &entry.params {
            let Some(pos) = pipeline.find_parameter(param.id).map(|p| p.pos) else {
                warn!(action_id, parameter_id = param.id, "explored parameter not found in pipeline");
                match policy {
                    UnresolvedPolicy::StopAtFirst => break,
                    UnresolvedPolicy::SkipEntry => continue,
                }
            };
            let value = match param.value() {
                Ok((_, value)) => value,
                Err(e) => {
                    warn!(action_id, parameter_id = param.id, error = %e, "dropping explored parameter");
                    continue;
                }
            };
            parameters.push(PEParameter {
                id: ids.get_new_id(vt_type::PE_PARAMETER),
                pos,
                interpolator: param.interp.clone(),
                value,
                dimension: param.dim,
            });
        }

        functions.push(PEFunction {
            id: ids.get_new_id(vt_type::PE_FUNCTION),
            module_id: module.id,
            port_name: function.name.clone(),
            is_alias: entry.alias,
            parameters,
        });
    }

    debug!(action_id, functions = functions.len(), "extracted parameter exploration");
    Some(ParameterExploration {
        id: ids.get_new_id(vt_type::PARAMETER_EXPLORATION),
        action_id,
        name: None,
        date: doc.date,
        user: annotation.user.clone(),
        dims: doc.dims,
        layout: doc.layout,
        functions,
    })
}
