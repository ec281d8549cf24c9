//! Condition tree nodes.

use bitflags::bitflags;

use super::query::Query;
use super::value::Value;
use super::variable::Variable;

bitflags! {
    /// Comparison operator of a condition. `NOT` composes with any base
    /// operator; `GREATER_THAN | EQUAL` is `>=`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Conditions: u8 {
        const EQUAL = 1;
        const LESS_THAN = 1 << 1;
        const GREATER_THAN = 1 << 2;
        const LIKE = 1 << 3;
        const IN = 1 << 4;
        const NULL = 1 << 5;
        const NOT = 1 << 6;
    }
}

impl Conditions {
    /// Returns the operator without the `NOT` flag.
    #[must_use]
    pub fn base(self) -> Self {
        self.difference(Self::NOT)
    }

    /// Returns true if the `NOT` flag is set.
    #[must_use]
    pub const fn is_negated(self) -> bool {
        self.contains(Self::NOT)
    }
}

/// Boolean connective of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connective {
    /// All children must hold.
    #[default]
    And,
    /// Any child must hold.
    Or,
}

impl Connective {
    /// Returns the keyword used between rendered children.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::And => "And",
            Self::Or => "Or",
        }
    }
}

/// A group of nodes joined by one connective.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupNode {
    /// Structural label.
    pub name: Option<String>,
    /// The connective.
    pub connective: Connective,
    /// Child nodes.
    pub children: Vec<Node>,
}

/// A single comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionNode {
    /// Structural label.
    pub name: Option<String>,
    /// Left operand.
    pub lvalue: Value,
    /// Operator flags.
    pub op: Conditions,
    /// Right operand.
    pub rvalue: Value,
}

impl ConditionNode {
    /// Creates a condition. An `EQUAL` or `NOT | EQUAL` comparison against
    /// the NULL literal becomes a `NULL` / `NOT | NULL` test.
    #[must_use]
    pub fn new(lvalue: Value, op: Conditions, rvalue: Value) -> Self {
        let op = if op.base() == Conditions::EQUAL && rvalue.is_null() {
            (op - Conditions::EQUAL) | Conditions::NULL
        } else {
            op
        };
        Self {
            name: None,
            lvalue,
            op,
            rvalue,
        }
    }

    /// Returns the condition with its `NOT` flag toggled.
    #[must_use]
    pub fn negated(mut self) -> Self {
        self.op.toggle(Conditions::NOT);
        self
    }
}

/// Negation of exactly one child.
#[derive(Debug, Clone, PartialEq)]
pub struct NegationNode {
    /// Structural label.
    pub name: Option<String>,
    /// The negated node.
    pub child: Box<Node>,
}

/// Verbatim SQL condition.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSqlNode {
    /// Structural label.
    pub name: Option<String>,
    /// SQL text.
    pub text: String,
}

/// A condition tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Group of children.
    Group(GroupNode),
    /// Comparison.
    Condition(ConditionNode),
    /// Negation.
    Negation(NegationNode),
    /// Raw SQL.
    RawSql(RawSqlNode),
}

/// An item reachable from a node: either another node or a nested query.
#[derive(Debug, Clone, Copy)]
pub enum TreeItem<'a> {
    /// A child node.
    Node(&'a Node),
    /// A subquery operand of a condition.
    Query(&'a Query),
}

impl Node {
    /// Creates a group.
    #[must_use]
    pub fn group(connective: Connective, children: Vec<Self>) -> Self {
        Self::Group(GroupNode {
            name: None,
            connective,
            children,
        })
    }

    /// Creates an AND group.
    #[must_use]
    pub fn all(children: Vec<Self>) -> Self {
        Self::group(Connective::And, children)
    }

    /// Creates an OR group.
    #[must_use]
    pub fn any(children: Vec<Self>) -> Self {
        Self::group(Connective::Or, children)
    }

    /// Creates a condition (see [`ConditionNode::new`] for the NULL rewrite).
    #[must_use]
    pub fn condition(lvalue: impl Into<Value>, op: Conditions, rvalue: impl Into<Value>) -> Self {
        Self::Condition(ConditionNode::new(lvalue.into(), op, rvalue.into()))
    }

    /// Wraps a node into a negation.
    #[must_use]
    pub fn negate(child: Self) -> Self {
        Self::Negation(NegationNode {
            name: None,
            child: Box::new(child),
        })
    }

    /// Creates a raw SQL node.
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self::RawSql(RawSqlNode {
            name: None,
            text: text.into(),
        })
    }

    /// Sets the structural label.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        let name = Some(name.into());
        match &mut self {
            Self::Group(g) => g.name = name,
            Self::Condition(c) => c.name = name,
            Self::Negation(n) => n.name = name,
            Self::RawSql(r) => r.name = name,
        }
        self
    }

    /// Returns the structural label.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Group(g) => g.name.as_deref(),
            Self::Condition(c) => c.name.as_deref(),
            Self::Negation(n) => n.name.as_deref(),
            Self::RawSql(r) => r.name.as_deref(),
        }
    }

    /// Joins with another node by AND, extending an unnamed AND group in
    /// place.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        self.join(Connective::And, other)
    }

    /// Joins with another node by OR, extending an unnamed OR group in
    /// place.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        self.join(Connective::Or, other)
    }

    fn join(self, connective: Connective, other: Self) -> Self {
        match self {
            Self::Group(mut g) if g.name.is_none() && g.connective == connective => {
                g.children.push(other);
                Self::Group(g)
            }
            node => Self::group(connective, vec![node, other]),
        }
    }

    /// Logical negation. Equality and NULL tests flip their `NOT` flag
    /// (rendered as `<>` / `IS NOT NULL`); any other node is wrapped in a
    /// negation node.
    #[must_use]
    pub fn not(self) -> Self {
        match self {
            Self::Condition(c)
                if matches!(c.op.base(), Conditions::EQUAL | Conditions::NULL) =>
            {
                Self::Condition(c.negated())
            }
            node => Self::negate(node),
        }
    }

    /// Returns the items directly reachable from this node. Conditions
    /// report their operands only when those are subqueries.
    #[must_use]
    pub fn nodes(&self) -> Vec<TreeItem<'_>> {
        match self {
            Self::Group(g) => g.children.iter().map(TreeItem::Node).collect(),
            Self::Negation(n) => vec![TreeItem::Node(&n.child)],
            Self::Condition(c) => [&c.lvalue, &c.rvalue]
                .into_iter()
                .filter_map(Value::as_query)
                .map(TreeItem::Query)
                .collect(),
            Self::RawSql(_) => vec![],
        }
    }

    /// Finds the first node carrying the given label, searching depth-first
    /// through groups, negations and subquery conditions.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Self> {
        if self.name() == Some(name) {
            return Some(self);
        }
        self.nodes().into_iter().find_map(|item| match item {
            TreeItem::Node(node) => node.find(name),
            TreeItem::Query(query) => query.find_node(name),
        })
    }

    /// Returns a copy of the tree where every node labelled `name` is
    /// replaced by `replacement`.
    #[must_use]
    pub fn replace_named(&self, name: &str, replacement: &Self) -> Self {
        if self.name() == Some(name) {
            return replacement.clone();
        }
        match self {
            Self::Group(g) => Self::Group(GroupNode {
                name: g.name.clone(),
                connective: g.connective,
                children: g
                    .children
                    .iter()
                    .map(|c| c.replace_named(name, replacement))
                    .collect(),
            }),
            Self::Negation(n) => Self::Negation(NegationNode {
                name: n.name.clone(),
                child: Box::new(n.child.replace_named(name, replacement)),
            }),
            node => node.clone(),
        }
    }

    /// Deep-copies the tree passing every leaf value through `f`. Subquery
    /// values are leaves: they are handed to `f` as a whole.
    #[must_use]
    pub fn map_leaves<F>(&self, f: &mut F) -> Self
    where
        F: FnMut(&Value) -> Value,
    {
        match self {
            Self::Group(g) => Self::Group(GroupNode {
                name: g.name.clone(),
                connective: g.connective,
                children: g.children.iter().map(|c| c.map_leaves(f)).collect(),
            }),
            Self::Condition(c) => Self::Condition(ConditionNode {
                name: c.name.clone(),
                lvalue: f(&c.lvalue),
                op: c.op,
                rvalue: f(&c.rvalue),
            }),
            Self::Negation(n) => Self::Negation(NegationNode {
                name: n.name.clone(),
                child: Box::new(n.child.map_leaves(f)),
            }),
            Self::RawSql(r) => Self::RawSql(r.clone()),
        }
    }
}

/// Invokes `callback` on every variable reachable from the tree, in both
/// operand positions and inside subqueries.
pub fn visit_variables<F>(node: &Node, callback: &mut F)
where
    F: FnMut(&Variable),
{
    match node {
        Node::Group(g) => {
            for child in &g.children {
                visit_variables(child, callback);
            }
        }
        Node::Negation(n) => visit_variables(&n.child, callback),
        Node::Condition(c) => {
            for value in [&c.lvalue, &c.rvalue] {
                match value {
                    Value::Variable(var) => callback(var),
                    Value::Query(query) => {
                        if let Some(condition) = &query.condition {
                            visit_variables(condition, callback);
                        }
                    }
                    _ => {}
                }
            }
        }
        Node::RawSql(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{field, FieldRef, Literal};

    #[test]
    fn test_equal_null_rewrites_to_null_test() {
        let node = Node::condition(FieldRef::new("type"), Conditions::EQUAL, Value::null());
        let Node::Condition(c) = node else {
            panic!("Expected condition");
        };
        assert_eq!(c.op, Conditions::NULL);

        let node = Node::condition(
            FieldRef::new("type"),
            Conditions::EQUAL | Conditions::NOT,
            Literal::null(),
        );
        let Node::Condition(c) = node else {
            panic!("Expected condition");
        };
        assert_eq!(c.op, Conditions::NULL | Conditions::NOT);
    }

    #[test]
    fn test_non_equality_null_is_not_rewritten() {
        let node = Node::condition(FieldRef::new("a"), Conditions::LIKE, Value::null());
        let Node::Condition(c) = node else {
            panic!("Expected condition");
        };
        assert_eq!(c.op, Conditions::LIKE);
    }

    #[test]
    fn test_and_extends_unnamed_group() {
        let node = field("a").eq(1).and(field("b").eq(2)).and(field("c").eq(3));
        let Node::Group(g) = node else {
            panic!("Expected group");
        };
        assert_eq!(g.connective, Connective::And);
        assert_eq!(g.children.len(), 3);
    }

    #[test]
    fn test_and_does_not_extend_named_group() {
        let node = field("a")
            .eq(1)
            .and(field("b").eq(2))
            .named("g")
            .and(field("c").eq(3));
        let Node::Group(g) = node else {
            panic!("Expected group");
        };
        assert_eq!(g.children.len(), 2);
        assert_eq!(g.children[0].name(), Some("g"));
    }

    #[test]
    fn test_not_flips_equality_and_wraps_others() {
        let Node::Condition(c) = field("a").eq(1).not() else {
            panic!("Expected condition");
        };
        assert_eq!(c.op, Conditions::EQUAL | Conditions::NOT);
        assert!(matches!(field("a").ge(1).not(), Node::Negation(_)));
    }

    #[test]
    fn test_find_and_replace_named() {
        let tree = field("a")
            .eq(1)
            .and(field("b").eq(2).named("b-filter"))
            .and(Node::all(vec![]).named("slot"));
        assert!(tree.find("b-filter").is_some());
        assert!(tree.find("missing").is_none());

        let rewritten = tree.replace_named("slot", &field("c").like("x%"));
        assert!(rewritten.find("slot").is_none());
        assert!(tree.find("slot").is_some());
        let Node::Group(g) = rewritten else {
            panic!("Expected group");
        };
        assert!(matches!(&g.children[2], Node::Condition(c) if c.op == Conditions::LIKE));
    }

    #[test]
    fn test_map_leaves_copies_without_mutating_source() {
        let tree = field("name").eq("x").and(field("age").gt(3));
        let mapped = tree.map_leaves(&mut |v| match v {
            Value::Field(f) if f.name == "name" => Value::Field(FieldRef::new("full_name")),
            other => other.clone(),
        });
        let Node::Group(src) = &tree else {
            panic!("Expected group");
        };
        let Node::Group(dst) = &mapped else {
            panic!("Expected group");
        };
        assert!(matches!(&src.children[0], Node::Condition(c) if c.lvalue == Value::field("name")));
        assert!(
            matches!(&dst.children[0], Node::Condition(c) if c.lvalue == Value::field("full_name"))
        );
    }

    #[test]
    fn test_visit_variables_reaches_both_sides_and_subqueries() {
        let sub = Query::new("orders").filter(field("status").eq(Value::variable("status")));
        let tree = Node::condition(Value::variable("left"), Conditions::EQUAL, Value::variable("right"))
            .and(field("id").in_query(sub));
        let mut names = vec![];
        visit_variables(&tree, &mut |v| names.push(v.name().to_owned()));
        assert_eq!(names, vec!["left", "right", "status"]);
    }

    #[test]
    fn test_nodes_reports_subquery_operands_only() {
        let plain = field("a").eq(1);
        assert!(plain.nodes().is_empty());
        let with_sub = field("a").in_query(Query::new("t"));
        assert!(matches!(with_sub.nodes()[..], [TreeItem::Query(_)]));
    }
}
