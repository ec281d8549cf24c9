//! Tests for late-bound variables.

mod common;
use common::*;

use std::collections::BTreeMap;

use relex_core::ast::{field, Literal, Node, SqlValue, Variable};
use relex_core::error::{CompileError, Error, VariableError};

#[test]
fn lifecycle() {
    let var = Variable::new("min");
    assert!(!var.is_set());
    assert_eq!(
        var.value(),
        Err(VariableError::Unbound {
            name: String::from("min")
        })
    );

    var.set(18_i32);
    assert!(var.is_set());
    assert_eq!(var.value().unwrap().value, SqlValue::Int(18));

    var.unset();
    assert!(matches!(var.value(), Err(VariableError::Unbound { .. })));

    var.set(21_i32);
    assert_eq!(var.value().unwrap().value, SqlValue::Int(21));
}

#[test]
fn one_tree_many_compilations() {
    let var = Variable::new("min");
    let tree = field("age").ge(var.clone());

    var.set(18_i32);
    let (sql, params) = compile(&tree);
    assert_eq!(sql.as_deref(), Some("age>=@p0"));
    assert_eq!(params.parameters()[0].value, SqlValue::Int(18));

    var.set(65_i32);
    let (_, params) = compile(&tree);
    assert_eq!(params.parameters()[0].value, SqlValue::Int(65));
}

#[test]
fn unbound_variable_fails_to_build() {
    let query = parse(r#"users(age >= "min":var)[*]"#);
    let err = builder().build_select(&query).unwrap_err();
    assert_eq!(
        err,
        Error::Compile(CompileError::Variable(VariableError::Unbound {
            name: String::from("min")
        }))
    );
}

#[test]
fn bind_and_unbind_parsed_query() {
    let query = parse(
        r#"users(age >= "min":var and (city = "city":var or id in orders(total > "total":var)[user_id]))[*]"#,
    );
    let values: BTreeMap<String, Literal> = [
        (String::from("min"), Literal::new(18_i32)),
        (String::from("city"), Literal::new("Oslo")),
        (String::from("total"), Literal::new(100_i32)),
        (String::from("unused"), Literal::new(0_i32)),
    ]
    .into_iter()
    .collect();
    assert_eq!(query.bind_variables(&values), 3);

    let command = builder().build_select(&query).unwrap();
    assert_eq!(
        command.text,
        "SELECT * FROM users WHERE (age>=@p0) And ((city=@p1) Or (id IN (SELECT user_id FROM orders WHERE total>@p2)))"
    );
    assert_eq!(command.parameters[2].value, SqlValue::Int(100));

    query.unbind_variables();
    assert!(builder().build_select(&query).is_err());
}

#[test]
fn visit_reaches_both_sides() {
    let tree = Node::condition(Variable::new("a"), relex_core::ast::Conditions::EQUAL, Variable::new("b"));
    let mut names = vec![];
    relex_core::ast::visit_variables(&tree, &mut |var: &Variable| names.push(var.name().to_owned()));
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn detached_variables_do_not_share_bindings() {
    let shared = Variable::new("x");
    let alias = shared.clone();
    let detached = shared.detached();
    assert!(shared.shares_binding(&alias));
    assert!(!shared.shares_binding(&detached));

    shared.set(1_i32);
    assert!(alias.is_set());
    assert!(!detached.is_set());
}

#[test]
fn formatted_variable() {
    let var = Variable::new("prefix").with_format("{0}%");
    var.set("Ann");
    let (sql, params) = compile(&field("name").like(var));
    assert_eq!(sql.as_deref(), Some("name LIKE @p0"));
    assert_eq!(params.parameters()[0].value, SqlValue::Text(String::from("Ann%")));
}
