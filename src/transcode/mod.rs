//! Decoders for the fields whose encoding changed between 1.0.2 and 1.0.3.
//!
//! Each submodule handles one legacy encoding: packed port spec strings, the vistrail
//! variable annotation, and the parameter exploration annotation.

pub mod param_exp;
pub mod port_spec;
pub mod vistrail_vars;

pub use param_exp::{
    Interpolator, PARAM_EXP_KEY, UnresolvedPolicy, extract_parameter_exploration,
    parse_param_exp,
};
pub use port_spec::{
    SignatureEntry, copy_shared_fields, parse_literal_list, parse_signature, transcode_port_spec,
};
pub use vistrail_vars::{VISTRAIL_VARS_KEY, decode_vistrail_variables, rehome_annotations};
