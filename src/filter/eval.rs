use crate::media::TagMap;

use super::ast::{Comparison, ComparisonOp, Expression, Group, GroupOp};

/// Does `tags` match the exclusion expression?
///
/// Comparisons never fail: a missing tag or a value that does not parse
/// simply does not match.
pub fn evaluate(expr: &Expression, tags: &TagMap) -> bool {
    match expr {
        Expression::Comparison(cmp) => compare(cmp, tags),
        Expression::Group(group) => evaluate_group(group, tags),
    }
}

fn evaluate_group(group: &Group, tags: &TagMap) -> bool {
    let result = match group.op {
        GroupOp::And => group.children.iter().all(|child| evaluate(child, tags)),
        GroupOp::Or => group.children.iter().any(|child| evaluate(child, tags)),
    };
    result != group.invert
}

fn compare(cmp: &Comparison, tags: &TagMap) -> bool {
    let Some(value) = tags.get(cmp.tag) else {
        return false;
    };

    match &cmp.op {
        ComparisonOp::Is(expected) => value.to_lowercase() == expected.to_lowercase(),
        ComparisonOp::Has(needle) => value.to_lowercase().contains(&needle.to_lowercase()),
        ComparisonOp::Between(a, b) => {
            if !cmp.tag.is_date_like() {
                return false;
            }
            match (parse_int(a), parse_int(b), parse_int(value)) {
                (Some(a), Some(b), Some(v)) => (a.min(b)..=a.max(b)).contains(&v),
                _ => false,
            }
        }
    }
}

fn parse_int(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}
