//! Unit tests for the id scope, the version chain and error formatting.
use vistrail_translate::error::*;
use vistrail_translate::id_scope::{IdScope, vt_type};
use vistrail_translate::version::{
    KNOWN_VERSIONS, SOURCE_VERSION, TARGET_VERSION, is_supported_source, next_version,
    upgrade_path,
};

#[cfg(test)]
mod id_scope_tests {
    use super::*;

    #[test]
    fn test_namespaces_count_independently() {
        let mut ids = IdScope::new();
        assert_eq!(ids.get_new_id(vt_type::MODULE), 0);
        assert_eq!(ids.get_new_id(vt_type::MODULE), 1);
        assert_eq!(ids.get_new_id(vt_type::PORT_SPEC_ITEM), 0);
        assert_eq!(ids.peek_id(vt_type::MODULE), 2);
    }

    #[test]
    fn test_starting_at() {
        let mut ids = IdScope::starting_at(100);
        assert_eq!(ids.peek_id(vt_type::TAG), 100);
        assert_eq!(ids.get_new_id(vt_type::TAG), 100);
    }

    #[test]
    fn test_update_only_raises() {
        let mut ids = IdScope::new();
        ids.update_beginning_id(vt_type::ACTION, 10);
        ids.update_beginning_id(vt_type::ACTION, 4);
        assert_eq!(ids.get_new_id(vt_type::ACTION), 10);
        ids.observe(vt_type::ACTION, 3);
        assert_eq!(ids.get_new_id(vt_type::ACTION), 11);
    }

    #[test]
    fn test_observe_saturates_at_max_id() {
        let mut ids = IdScope::new();
        ids.observe(vt_type::MODULE, i64::MAX);
        assert_eq!(ids.peek_id(vt_type::MODULE), i64::MAX);
        ids.observe(vt_type::MODULE, 4);
        assert_eq!(ids.peek_id(vt_type::MODULE), i64::MAX);
    }

    #[test]
    fn test_workflow_remap() {
        let mut ids = IdScope::for_workflow();
        assert_eq!(ids.get_new_id(vt_type::MODULE), 0);
        assert_eq!(ids.get_new_id(vt_type::GROUP), 1);
        assert_eq!(ids.get_new_id(vt_type::ABSTRACTION), 2);
        assert_eq!(IdScope::new().with_remap("a", "b").peek_id("a"), 0);
    }
}

#[cfg(test)]
mod version_tests {
    use super::*;

    #[test]
    fn test_target_follows_source() {
        assert_eq!(next_version(SOURCE_VERSION), Some(TARGET_VERSION));
        assert_eq!(next_version("1.0.5"), None);
        assert_eq!(next_version("2.0"), None);
        assert!(is_supported_source("1.0.2"));
        assert!(!is_supported_source("1.0.1"));
    }

    #[test]
    fn test_upgrade_paths() {
        assert_eq!(
            upgrade_path("1.0.1", "1.0.3"),
            Some(vec!["1.0.2", "1.0.3"])
        );
        assert_eq!(upgrade_path("1.0.2", "1.0.2"), Some(vec![]));
        assert_eq!(upgrade_path("1.0.3", "1.0.2"), None);
        assert_eq!(upgrade_path("0.1", "1.0.2"), None);
        assert_eq!(KNOWN_VERSIONS.first(), Some(&"0.3.0"));
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TranslateError::Action {
            action_id: 4,
            source: Box::new(TranslateError::PortSpec {
                id: 2,
                name: "value".to_string(),
                field: "labels",
                source: DecodeError::Literal(LiteralError::UnexpectedEnd),
            }),
        };
        assert_eq!(
            err.to_string(),
            "Action 4: Port spec 2 ('value'): cannot decode labels: Unexpected end of literal input"
        );

        let err = ParamExpError::from(MaterializeError::UnknownAction(9));
        assert_eq!(err.to_string(), "Action 9 does not exist in the version tree");

        let err = DecodeError::EmptySignatureEntry {
            signature: "(a,,b)".to_string(),
            position: 1,
        };
        assert!(err.to_string().contains("position 1"));
    }

    #[test]
    fn test_error_sources_chain() {
        use std::error::Error;
        let err = TranslateError::Group {
            group_id: 1,
            source: Box::new(TranslateError::VistrailVariables {
                annotation_id: 2,
                source: DecodeError::UnbalancedSignature("x".to_string()),
            }),
        };
        let inner = err.source().unwrap();
        assert!(inner.to_string().starts_with("Annotation 2"));
    }
}
