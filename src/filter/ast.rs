//! Expression tree produced by the rule compiler.

use crate::media::TagName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Comparison(Comparison),
    Group(Group),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub tag: TagName,
    pub op: ComparisonOp,
}

/// Comparison operator with its operand(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonOp {
    Is(String),
    Has(String),
    /// Endpoints as written; their order is resolved when evaluating.
    Between(String, String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GroupOp {
    And,
    Or,
}

/// AND/OR over one or more children, optionally negated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub op: GroupOp,
    pub children: Vec<Expression>,
    pub invert: bool,
}

impl Expression {
    pub fn comparison(tag: TagName, op: ComparisonOp) -> Self {
        Expression::Comparison(Comparison { tag, op })
    }

    pub fn and(children: Vec<Expression>) -> Self {
        Expression::Group(Group {
            op: GroupOp::And,
            children,
            invert: false,
        })
    }

    pub fn or(children: Vec<Expression>) -> Self {
        Expression::Group(Group {
            op: GroupOp::Or,
            children,
            invert: false,
        })
    }

    /// OR over `children`, collapsing to the lone child when there is only one.
    pub fn any_of(mut children: Vec<Expression>) -> Self {
        if children.len() == 1 {
            children.remove(0)
        } else {
            Expression::or(children)
        }
    }

    pub fn inverted(self) -> Self {
        match self {
            Expression::Group(mut group) => {
                group.invert = !group.invert;
                Expression::Group(group)
            }
            comparison => Expression::Group(Group {
                op: GroupOp::Or,
                children: vec![comparison],
                invert: true,
            }),
        }
    }
}
