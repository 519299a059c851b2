use crate::error::{DecodeError, TranslateError};
use crate::id_scope::{IdScope, vt_type};
use crate::literal::parse_literal;
use crate::schema::v1_0_2;
use crate::schema::v1_0_3::{PortSpec, PortSpecItem};
use itertools::{Itertools, izip};

/// One `package:module:namespace` entry of a packed signature string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureEntry {
    pub package: Option<String>,
    pub module: String,
    pub namespace: String,
}

/// Splits a signature such as `(pkg:Module,pkg2:Module2:ns)` into its entries.
///
/// An empty string and `()` both mean "no parameters". An entry with a single part is
/// a bare module name; the third part, when present, is the namespace and keeps any
/// further colons.
pub fn parse_signature(sigstring: &str) -> Result<Vec<SignatureEntry>, DecodeError> {
    if sigstring.is_empty() || sigstring == "()" {
        return Ok(Vec::new());
    }
    let inner = sigstring
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| DecodeError::UnbalancedSignature(sigstring.to_string()))?;

    inner
        .split(',')
        .enumerate()
        .map(|(position, entry)| {
            let empty = || DecodeError::EmptySignatureEntry {
                signature: sigstring.to_string(),
                position,
            };
            let parts: Vec<&str> = entry.splitn(3, ':').collect();
            match parts.as_slice() {
                [""] => Err(empty()),
                [module] => Ok(SignatureEntry {
                    package: None,
                    module: module.to_string(),
                    namespace: String::new(),
                }),
                [package, module] => Ok(SignatureEntry {
                    package: Some(package.to_string()),
                    module: module.to_string(),
                    namespace: String::new(),
                }),
                [package, module, namespace, ..] => Ok(SignatureEntry {
                    package: Some(package.to_string()),
                    module: module.to_string(),
                    namespace: namespace.to_string(),
                }),
                [] => Err(empty()),
            }
        })
        .collect()
}

/// Decodes a `defaults` or `labels` field into one string per element.
///
/// The field holds a Python literal: a list or tuple of strings, or a single value
/// that stands for a one-element list. A missing or blank field is an empty list.
pub fn parse_literal_list(text: Option<&str>) -> Result<Vec<String>, DecodeError> {
    let text = text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let literal = parse_literal(text)?;
    Ok(literal
        .into_sequence()
        .iter()
        .map(|item| item.to_field_text())
        .collect())
}

fn field_error<'a>(
    old: &'a v1_0_2::PortSpec,
    field: &'static str,
) -> impl FnOnce(DecodeError) -> TranslateError + 'a {
    move |source| TranslateError::PortSpec {
        id: old.id,
        name: old.name.clone(),
        field,
        source,
    }
}

/// Copies the fields both port spec versions share, without synthesizing any items.
pub fn copy_shared_fields(old: &v1_0_2::PortSpec) -> PortSpec {
    PortSpec {
        id: old.id,
        name: old.name.clone(),
        ty: old.ty.clone(),
        optional: old.optional,
        sort_key: old.sort_key,
        items: Vec::new(),
    }
}

/// Rebuilds a legacy port spec with one [`PortSpecItem`] per signature entry.
///
/// Defaults and labels are zipped positionally with the signature and padded with empty
/// strings when they are shorter. Each item consumes one `portSpecItem` id from `ids`,
/// in order. Any field that cannot be decoded fails the whole translation.
pub fn transcode_port_spec(
    old: &v1_0_2::PortSpec,
    ids: &mut IdScope,
) -> Result<PortSpec, TranslateError> {
    let signature = parse_signature(&old.sigstring).map_err(field_error(old, "sigstring"))?;
    let defaults =
        parse_literal_list(old.defaults.as_deref()).map_err(field_error(old, "defaults"))?;
    let labels = parse_literal_list(old.labels.as_deref()).map_err(field_error(old, "labels"))?;

    let count = signature.len();
    let items: Vec<PortSpecItem> = izip!(
        signature,
        defaults.into_iter().pad_using(count, |_| String::new()),
        labels.into_iter().pad_using(count, |_| String::new())
    )
    .enumerate()
    .map(|(pos, (entry, default, label))| PortSpecItem {
        id: ids.get_new_id(vt_type::PORT_SPEC_ITEM),
        pos: pos as i64,
        module: entry.module,
        package: entry.package,
        namespace: entry.namespace,
        label,
        default,
        values: String::new(),
        entry_type: String::new(),
    })
    .collect();

    tracing::trace!(port_spec = old.id, items = items.len(), "transcoded port spec");
    Ok(PortSpec {
        items,
        ..copy_shared_fields(old)
    })
}
