use thiserror::Error;

/// Errors produced while reading a Python-style literal expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LiteralError {
    #[error("Unexpected end of literal input")]
    UnexpectedEnd,

    #[error("Unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("Unterminated string literal starting at offset {0}")]
    UnterminatedString(usize),

    #[error("Invalid escape sequence '\\{sequence}' at offset {offset}")]
    InvalidEscape { sequence: String, offset: usize },

    #[error("Invalid number '{text}' at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("Name '{name}' at offset {offset} is not a literal (only True, False and None are)")]
    UnknownName { name: String, offset: usize },

    #[error("Expected {expected} at offset {offset}, but found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        offset: usize,
    },

    #[error("Trailing input after literal at offset {0}")]
    TrailingInput(usize),

    #[error("Literal nests deeper than {limit} levels at offset {offset}")]
    TooDeep { limit: usize, offset: usize },
}

/// Errors raised when a legacy encoded field cannot be decoded into its typed form.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error(transparent)]
    Literal(#[from] LiteralError),

    #[error("Signature '{0}' is not enclosed in parentheses")]
    UnbalancedSignature(String),

    #[error("Signature '{signature}' has an empty entry at position {position}")]
    EmptySignatureEntry { signature: String, position: usize },

    #[error("Expected {expected}, but found {found}")]
    Shape { expected: &'static str, found: String },
}

/// Fatal errors of a top-level translation call.
///
/// Every variant names the structural object whose data could not be decoded, so
/// the caller can point at the offending part of the document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslateError {
    #[error("Port spec {id} ('{name}'): cannot decode {field}: {source}")]
    PortSpec {
        id: i64,
        name: String,
        field: &'static str,
        #[source]
        source: DecodeError,
    },

    #[error("Annotation {annotation_id}: cannot decode vistrail variables: {source}")]
    VistrailVariables {
        annotation_id: i64,
        #[source]
        source: DecodeError,
    },

    #[error("Action {action_id}: {source}")]
    Action {
        action_id: i64,
        #[source]
        source: Box<TranslateError>,
    },

    #[error("Group {group_id}: {source}")]
    Group {
        group_id: i64,
        #[source]
        source: Box<TranslateError>,
    },

    #[error("Package '{identifier}': {source}")]
    Package {
        identifier: String,
        #[source]
        source: Box<TranslateError>,
    },
}

/// Errors that can occur while reconstructing the pipeline at a point in history.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaterializeError {
    #[error("Action {0} does not exist in the version tree")]
    UnknownAction(i64),

    #[error("Version tree contains a cycle through action {0}")]
    CyclicHistory(i64),
}

/// Errors that cause a single parameter exploration (or part of it) to be dropped.
///
/// These never abort a translation; the extractor logs them and moves on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamExpError {
    #[error("Malformed parameter exploration XML: {0}")]
    Xml(String),

    #[error("Element <{element}> is missing attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("Attribute '{attribute}' has a non-numeric value '{value}'")]
    InvalidNumber {
        attribute: &'static str,
        value: String,
    },

    #[error("Unknown interpolator '{0}'")]
    UnknownInterpolator(String),

    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}
