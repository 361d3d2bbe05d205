mod compare_op;
pub use compare_op::CompareOp;

mod display;

mod parse;

mod simple;
pub use simple::SimpleFilter;

mod substring;
pub use substring::{SubstringFilter, SubstringPart, LIKE_ESCAPE};

use crate::stmt::Value;

/// A directory filter tree.
///
/// Incoming filters name virtual attributes; after rewriting, the same
/// algebra names `alias.field` pairs and is handed to the SQL serializer.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// All child filters must match
    And(Vec<Filter>),

    /// Any child filter must match
    Or(Vec<Filter>),

    Not(Box<Filter>),

    Simple(SimpleFilter),

    Substring(SubstringFilter),

    /// The attribute has a value
    Present(String),
}

impl Filter {
    pub fn simple(attribute: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Filter {
        SimpleFilter::new(attribute, op, value).into()
    }

    pub fn eq(attribute: impl Into<String>, value: impl Into<Value>) -> Filter {
        Filter::simple(attribute, CompareOp::Eq, value)
    }

    pub fn present(attribute: impl Into<String>) -> Filter {
        Filter::Present(attribute.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(filter: Filter) -> Filter {
        Filter::Not(Box::new(filter))
    }

    /// ANDs two optional filters. Nested `And` operands are flattened and a
    /// missing side is no constraint.
    pub fn and(lhs: impl Into<Option<Filter>>, rhs: impl Into<Option<Filter>>) -> Option<Filter> {
        Filter::and_all(lhs.into().into_iter().chain(rhs.into()))
    }

    pub fn or(lhs: impl Into<Option<Filter>>, rhs: impl Into<Option<Filter>>) -> Option<Filter> {
        Filter::or_all(lhs.into().into_iter().chain(rhs.into()))
    }

    /// ANDs all filters together. No filters is `None`, one filter is
    /// returned as is.
    pub fn and_all(filters: impl IntoIterator<Item = Filter>) -> Option<Filter> {
        let mut operands = vec![];
        for filter in filters {
            match filter {
                Filter::And(nested) => operands.extend(nested),
                filter => operands.push(filter),
            }
        }
        collapse(operands, Filter::And)
    }

    pub fn or_all(filters: impl IntoIterator<Item = Filter>) -> Option<Filter> {
        let mut operands = vec![];
        for filter in filters {
            match filter {
                Filter::Or(nested) => operands.extend(nested),
                filter => operands.push(filter),
            }
        }
        collapse(operands, Filter::Or)
    }

    /// The attribute a leaf filter tests.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Filter::Simple(filter) => Some(&filter.attribute),
            Filter::Substring(filter) => Some(&filter.attribute),
            Filter::Present(attribute) => Some(attribute),
            _ => None,
        }
    }

    /// Visits every leaf in the order the SQL serializer emits them.
    pub fn for_each_leaf<'a>(&'a self, f: &mut impl FnMut(&'a Filter)) {
        match self {
            Filter::And(operands) | Filter::Or(operands) => {
                for operand in operands {
                    operand.for_each_leaf(f);
                }
            }
            Filter::Not(operand) => operand.for_each_leaf(f),
            leaf => f(leaf),
        }
    }

    #[track_caller]
    pub fn as_simple_unwrap(&self) -> &SimpleFilter {
        match self {
            Filter::Simple(filter) => filter,
            _ => panic!("expected Simple; actual={self:#?}"),
        }
    }
}

fn collapse(mut operands: Vec<Filter>, f: impl FnOnce(Vec<Filter>) -> Filter) -> Option<Filter> {
    match operands.len() {
        0 => None,
        1 => operands.pop(),
        _ => Some(f(operands)),
    }
}

impl From<SimpleFilter> for Filter {
    fn from(value: SimpleFilter) -> Self {
        Filter::Simple(value)
    }
}

impl From<SubstringFilter> for Filter {
    fn from(value: SubstringFilter) -> Self {
        Filter::Substring(value)
    }
}
