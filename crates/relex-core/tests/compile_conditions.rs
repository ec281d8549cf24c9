//! Tests for compiling condition trees to SQL.

mod common;
use common::*;

use relex_core::ast::{field, Conditions, FieldRef, Literal, Node, SqlValue, TypeCode, Value};

#[test]
fn complex_boolean() {
    let tree = Node::any(vec![
        Node::all(vec![
            Node::any(vec![
                field("name").like("Anna"),
                Node::negate(field("age").ge(18)),
            ]),
            Node::all(vec![
                field("weight").eq(54.3),
                field("type").in_list(vec!["Str1", "Str2"]),
            ]),
        ]),
        Node::all(vec![
            field("name").ne("Petya"),
            field("type").is_null().not(),
        ]),
    ]);
    let (sql, params) = compile(&tree);
    assert_eq!(
        sql.as_deref(),
        Some(
            "(((name LIKE @p0) Or (NOT(age>=@p1))) And ((weight=@p2) And (type IN (@p3,@p4)))) Or ((name<>@p5) And (type IS NOT NULL))"
        )
    );
    let values: Vec<_> = params.parameters().iter().map(|p| p.value.clone()).collect();
    assert_eq!(
        values,
        vec![
            SqlValue::Text(String::from("Anna")),
            SqlValue::Int(18),
            SqlValue::Float(54.3),
            SqlValue::Text(String::from("Str1")),
            SqlValue::Text(String::from("Str2")),
            SqlValue::Text(String::from("Petya")),
        ]
    );
}

#[test]
fn complex_boolean_from_combinators() {
    let tree = field("name")
        .like("Anna")
        .or(field("age").ge(18).not())
        .and(field("weight").eq(54.3).and(field("type").in_list(vec!["Str1", "Str2"])))
        .or(field("name").ne("Petya").and(field("type").is_null().not()));
    let (sql, _) = compile(&tree);
    assert_eq!(
        sql.as_deref(),
        Some(
            "(((name LIKE @p0) Or (NOT(age>=@p1))) And ((weight=@p2) And (type IN (@p3,@p4)))) Or ((name<>@p5) And (type IS NOT NULL))"
        )
    );
}

#[test]
fn group_with_one_child_is_unwrapped() {
    let child = field("a").gt(1);
    let group = Node::all(vec![child.clone()]);
    assert_eq!(compile(&group).0, compile(&child).0);
    assert_eq!(compile(&Node::any(vec![Node::all(vec![child.clone()])])).0, compile(&child).0);
}

#[test]
fn empty_groups_are_elided() {
    assert_eq!(compile(&Node::all(vec![])).0, None);
    let tree = Node::all(vec![Node::all(vec![]), field("a").eq(1), Node::any(vec![])]);
    assert_eq!(compile(&tree).0.as_deref(), Some("a=@p0"));
    let tree = Node::all(vec![Node::negate(Node::all(vec![])), field("b").eq(1)]);
    assert_eq!(compile(&tree).0.as_deref(), Some("b=@p0"));
}

#[test]
fn null_equality_is_rewritten_at_construction() {
    let node = Node::condition(FieldRef::new("a"), Conditions::EQUAL, Value::null());
    let Node::Condition(condition) = &node else {
        panic!("Expected a condition");
    };
    assert_eq!(condition.op, Conditions::NULL);
    let (sql, params) = compile(&node);
    assert_eq!(sql.as_deref(), Some("a IS NULL"));
    assert!(params.is_empty());

    let node = field("a").ne(Option::<i32>::None);
    assert_eq!(compile(&node).0.as_deref(), Some("a IS NOT NULL"));
}

#[test]
fn empty_in_list_is_false() {
    let (sql, params) = compile(&field("id").in_list(Vec::<i64>::new()));
    assert_eq!(sql.as_deref(), Some("0=1"));
    assert!(params.is_empty());

    let negated = Node::condition(
        FieldRef::new("id"),
        Conditions::IN | Conditions::NOT,
        Literal::typed(SqlValue::List(vec![]), TypeCode::Int32),
    );
    assert_eq!(compile(&negated).0.as_deref(), Some("NOT (0=1)"));
}

#[test]
fn parsed_conditions_compile() {
    let cases = [
        ("a = 1", "a=@p0"),
        ("a != 1", "a<>@p0"),
        ("a !> 1", "NOT (a>@p0)"),
        ("a !like \"x%\"", "NOT (a LIKE @p0)"),
        ("a = null", "a IS NULL"),
        ("a <> null", "a IS NOT NULL"),
        ("!(a = 1 or b = 2)", "NOT((a=@p0) Or (b=@p1))"),
        ("a = \"b.c\":sql", "a=b.c"),
        ("\"x > 1\":sql and a = 1", "(x > 1) And (a=@p0)"),
        ("\"count(*)\":sql > 1", "count(*)>@p0"),
    ];
    for (text, expected) in cases {
        assert_eq!(compile(&parse_condition(text)).0.as_deref(), Some(expected), "{text}");
    }
}

#[test]
fn labels_do_not_affect_sql() {
    let plain = parse_condition("(a = 1) and (b = 2 or c = 3)");
    let labelled = parse_condition("(<first> a = 1) and (<second> b = 2 or c = 3)");
    assert_eq!(compile(&plain).0, compile(&labelled).0);
}

#[test]
fn replace_named_rewrites_one_branch() {
    let tree = parse_condition("(<slot>) and a = 1");
    assert_eq!(compile(&tree).0.as_deref(), Some("a=@p0"));
    let filled = tree.replace_named("slot", &field("b").lt(5));
    assert_eq!(compile(&filled).0.as_deref(), Some("(b<@p0) And (a=@p1)"));
    assert_eq!(compile(&tree).0.as_deref(), Some("a=@p0"));
}

#[test]
fn literals_never_appear_in_sql() {
    let malicious = "'; DROP TABLE users; --";
    let (sql, params) = compile(&field("name").eq(malicious));
    assert_eq!(sql.as_deref(), Some("name=@p0"));
    assert_eq!(
        params.parameters()[0].value,
        SqlValue::Text(String::from(malicious))
    );
}
