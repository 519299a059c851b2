use crate::error::{DecodeError, TranslateError};
use crate::literal::{Literal, parse_literal};
use crate::schema::Annotation;
use crate::schema::v1_0_3::VistrailVariable;

/// Annotation key under which 1.0.2 stored the vistrail's variables.
pub const VISTRAIL_VARS_KEY: &str = "__vistrail_vars__";

fn shape(expected: &'static str, found: &Literal) -> DecodeError {
    DecodeError::Shape {
        expected,
        found: format!("{} {}", found.kind(), found),
    }
}

fn expect_items<const N: usize>(
    literal: Literal,
    expected: &'static str,
) -> Result<[Literal; N], DecodeError> {
    match literal {
        Literal::List(items) | Literal::Tuple(items) => {
            items.try_into().map_err(|items| shape(expected, &Literal::Tuple(items)))
        }
        other => Err(shape(expected, &other)),
    }
}

fn expect_text(literal: Literal, expected: &'static str) -> Result<String, DecodeError> {
    match literal {
        Literal::Str(s) => Ok(s),
        other => Err(shape(expected, &other)),
    }
}

fn variable(name: Literal, data: Literal) -> Result<VistrailVariable, DecodeError> {
    let name = expect_text(name, "a variable name")?;
    let [uuid, identifier, value] = expect_items::<3>(data, "a (uuid, identifier, value) triple")?;
    let [package, module, namespace] =
        expect_items::<3>(identifier, "a (package, module, namespace) identifier")?;
    Ok(VistrailVariable {
        name,
        uuid: expect_text(uuid, "a uuid string")?,
        package: package.to_field_text(),
        module: module.to_field_text(),
        namespace: namespace.to_field_text(),
        value: value.to_field_text(),
    })
}

/// Decodes the value of a `__vistrail_vars__` annotation.
///
/// The value is a Python literal mapping each variable name to
/// `(uuid, (package, module, namespace), value)`. Older writers stored a list of
/// `(name, data)` pairs instead of a dict; both are accepted. Variables come out in
/// source order.
pub fn decode_vistrail_variables(value: &str) -> Result<Vec<VistrailVariable>, DecodeError> {
    let entries = match parse_literal(value)? {
        Literal::Dict(entries) => entries,
        Literal::List(items) | Literal::Tuple(items) => items
            .into_iter()
            .map(|item| expect_items::<2>(item, "a (name, variable) pair").map(|[k, v]| (k, v)))
            .collect::<Result<Vec<_>, _>>()?,
        other => return Err(shape("a mapping of variable names", &other)),
    };
    entries
        .into_iter()
        .map(|(name, data)| variable(name, data))
        .collect()
}

/// Splits a vistrail's annotations into the ones that stay annotations and the
/// variables encoded in the `__vistrail_vars__` annotation, if there is one.
///
/// The variable annotation itself is removed from the returned list. A malformed
/// encoding fails the translation.
pub fn rehome_annotations(
    annotations: &[Annotation],
) -> Result<(Vec<Annotation>, Vec<VistrailVariable>), TranslateError> {
    let mut kept = Vec::with_capacity(annotations.len());
    let mut variables = Vec::new();
    for annotation in annotations {
        if annotation.key != VISTRAIL_VARS_KEY {
            kept.push(annotation.clone());
            continue;
        }
        let decoded = decode_vistrail_variables(&annotation.value).map_err(|source| {
            TranslateError::VistrailVariables {
                annotation_id: annotation.id,
                source,
            }
        })?;
        tracing::debug!(
            annotation_id = annotation.id,
            count = decoded.len(),
            "re-homed vistrail variables"
        );
        variables.extend(decoded);
    }
    Ok((kept, variables))
}
