//! Tests for writing queries back to Relex text.

mod common;
use common::*;

use relex_core::ast::{field, Conditions, FieldRef, Node, Query, Value, Variable};
use relex_core::{write_condition, write_query};

#[test]
fn round_trip_corpus() {
    let corpus = [
        "users[*]",
        "users[id, name]",
        "users[*; name desc, id]",
        "users.u[u.id, u.name]",
        r#""order details":table[*]"#,
        "users(age >= 18)[*]",
        r#"users(age >= 18 and name like "A%")[id, name; name desc]{10,5}"#,
        "users(a = 1 or b = 2 or c = 3)[*]",
        "users((a = 1 or b = 2) and c = 3)[*]",
        "users(a = 1 or (b = 2 and c = 3))[*]",
        r#"users(id in "1,2,3":Int32[] and id !in "4,5":Int32[] and id != 0)[*]"#,
        r#"users(name in "a;b,c":String[])[*]"#,
        "users(a = null and b != null)[*]",
        "users(!(a = 1 or b = 2))[*]",
        "users(a !> 1 and b !like 2)[*]",
        r#"users(a = "7":Int16 and b = "true":Boolean and c = 2.5 and d = 5000000000)[*]"#,
        r#"users(price = "10.50":Decimal and born < "2000-01-31":DateTime)[*]"#,
        r#"users(a = "b.id":sql and "x IS NOT NULL":sql)[*]"#,
        r#"users(name = "say ""hi""")[*]"#,
        "users(id in orders(total > 5)[user_id])[*]",
        "users((<adult> age >= 18) and !(<banned> status = 3) and (<slot>))[*]",
        r#"orders["sum(amount) as total", customer]"#,
        "users[*]{20,}",
    ];
    for text in corpus {
        round_trip(text);
    }
}

#[test]
fn write_canonical_spelling() {
    let query = parse(r#"users( age>=18 AND name LIKE "A%" )[ id ,name ; name DESCENDING ]{ 10 , 5 }"#);
    assert_eq!(
        write_query(&query).unwrap(),
        r#"users(age>=18 and name like "A%")[id, name; name desc]{10,5}"#
    );
}

#[test]
fn write_variables_and_expressions() {
    let node = Node::all(vec![
        field("age").ge(Variable::new("min age")),
        Node::condition(
            FieldRef::parse("a + b"),
            Conditions::GREATER_THAN,
            Value::literal(3),
        ),
    ]);
    let text = write_condition(&node).unwrap();
    assert_eq!(text, r#"age>="min age":var and "a + b":sql>3"#);
    assert_eq!(write_condition(&parse_condition(&text)).unwrap(), text);
}

#[test]
fn write_reserved_names_are_quoted() {
    let query = Query::new("in").filter(field("null").eq(1));
    let text = write_query(&query).unwrap();
    assert_eq!(text, r#""in":table("null":sql=1)[*]"#);
    assert_eq!(parse(&text).table.name, "in");
}
