//! Tests for the Python literal reader.
use vistrail_translate::error::LiteralError;
use vistrail_translate::literal::{Literal, MAX_DEPTH, parse_literal};

#[test]
fn test_parses_list_of_strings() {
    let literal = parse_literal("['abc', \"d'e\"]").unwrap();
    assert_eq!(
        literal,
        Literal::List(vec![
            Literal::Str("abc".to_string()),
            Literal::Str("d'e".to_string())
        ])
    );
}

#[test]
fn test_parses_scalars() {
    assert_eq!(parse_literal("True").unwrap(), Literal::Bool(true));
    assert_eq!(parse_literal("None").unwrap(), Literal::None);
    assert_eq!(parse_literal("-42").unwrap(), Literal::Int(-42));
    assert_eq!(parse_literal("2.5").unwrap(), Literal::Float(2.5));
    assert_eq!(parse_literal("  'x'  ").unwrap(), Literal::Str("x".to_string()));
}

#[test]
fn test_tuples_and_parentheses() {
    assert_eq!(parse_literal("(1)").unwrap(), Literal::Int(1));
    assert_eq!(
        parse_literal("(1,)").unwrap(),
        Literal::Tuple(vec![Literal::Int(1)])
    );
    assert_eq!(parse_literal("()").unwrap(), Literal::Tuple(vec![]));
}

#[test]
fn test_parses_nested_dict() {
    let literal = parse_literal("{'a': ('u', ('p', 'm', ''), 'v')}").unwrap();
    let Literal::Dict(entries) = literal else {
        panic!("expected a dict");
    };
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, Literal::Str("a".to_string()));
    assert!(matches!(&entries[0].1, Literal::Tuple(items) if items.len() == 3));
}

#[test]
fn test_string_escapes_and_prefixes() {
    assert_eq!(
        parse_literal(r"u'a\nb\x41'").unwrap(),
        Literal::Str("a\nbA".to_string())
    );
    assert_eq!(
        parse_literal(r"r'a\nb'").unwrap(),
        Literal::Str("a\\nb".to_string())
    );
}

#[test]
fn test_repr_display() {
    let literal = parse_literal("[1, 2.0, 'x', None, (True,)]").unwrap();
    assert_eq!(literal.to_string(), "[1, 2.0, 'x', None, (True,)]");
}

#[test]
fn test_sequence_and_text_views() {
    assert_eq!(
        Literal::Str("abc".to_string()).into_sequence(),
        vec![Literal::Str("abc".to_string())]
    );
    assert_eq!(Literal::Int(3).to_text(), "3");
    assert_eq!(Literal::Str("3".to_string()).to_text(), "3");
    assert_eq!(Literal::None.to_field_text(), "");
}

#[test]
fn test_never_evaluates_names() {
    let err = parse_literal("__import__('os')").unwrap_err();
    assert!(matches!(err, LiteralError::UnknownName { ref name, offset: 0 } if name == "__import__"));
}

#[test]
fn test_rejects_malformed_input() {
    assert!(matches!(
        parse_literal("['abc'").unwrap_err(),
        LiteralError::UnexpectedEnd
    ));
    assert!(matches!(
        parse_literal("'abc").unwrap_err(),
        LiteralError::UnterminatedString(0)
    ));
    assert!(matches!(
        parse_literal("1 2").unwrap_err(),
        LiteralError::TrailingInput(2)
    ));
}

#[test]
fn test_nesting_is_bounded() {
    let ok = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
    assert!(parse_literal(&ok).is_ok());

    let deep = format!("{}{}", "[".repeat(2000), "]".repeat(2000));
    assert_eq!(
        parse_literal(&deep).unwrap_err(),
        LiteralError::TooDeep {
            limit: MAX_DEPTH,
            offset: MAX_DEPTH,
        }
    );
    let mixed = "({[".repeat(1000);
    assert!(matches!(
        parse_literal(&mixed).unwrap_err(),
        LiteralError::TooDeep { .. }
    ));
}

#[test]
fn test_integers_beyond_i64() {
    assert_eq!(
        parse_literal("12345678901234567890").unwrap(),
        Literal::BigInt("12345678901234567890".to_string())
    );
    assert_eq!(
        parse_literal("-12345678901234567890L").unwrap(),
        Literal::BigInt("-12345678901234567890".to_string())
    );
    assert_eq!(
        parse_literal("+99999999999999999999").unwrap().to_text(),
        "99999999999999999999"
    );
    assert_eq!(parse_literal("5L").unwrap(), Literal::Int(5));
}

#[test]
fn test_float_text_matches_python() {
    let literal = parse_literal("[1e16, 1e-05, 1.5e20, 0.0001, 1e15, -2.0, 0.1]").unwrap();
    let texts: Vec<_> = literal.into_sequence().iter().map(Literal::to_text).collect();
    assert_eq!(
        texts,
        vec!["1e+16", "1e-05", "1.5e+20", "0.0001", "1000000000000000.0", "-2.0", "0.1"]
    );
    assert_eq!(Literal::Float(f64::INFINITY).to_text(), "inf");
    assert_eq!(Literal::Float(f64::NAN).to_text(), "nan");
}

#[test]
fn test_offsets_are_in_bytes() {
    assert_eq!(
        parse_literal("'é' 2").unwrap_err(),
        LiteralError::TrailingInput(5)
    );
    assert!(matches!(
        parse_literal("['ü', nope]").unwrap_err(),
        LiteralError::UnknownName { offset: 7, .. }
    ));
}
