use super::Filter;

/// Escape character of the patterns built by [`SubstringFilter::like_pattern`].
pub const LIKE_ESCAPE: char = '\\';

/// `(attr=ab*cd*)`
#[derive(Debug, Clone, PartialEq)]
pub struct SubstringFilter {
    pub attribute: String,
    pub parts: Vec<SubstringPart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstringPart {
    /// The `*` wildcard
    Any,
    Text(String),
}

impl SubstringFilter {
    pub fn new(attribute: impl Into<String>, parts: Vec<SubstringPart>) -> SubstringFilter {
        SubstringFilter {
            attribute: attribute.into(),
            parts,
        }
    }

    /// The parts as a SQL `LIKE` pattern. Literal `%`, `_` and `\` in the
    /// text are escaped with [`LIKE_ESCAPE`].
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::new();
        for part in &self.parts {
            match part {
                SubstringPart::Any => pattern.push('%'),
                SubstringPart::Text(text) => {
                    for ch in text.chars() {
                        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
                            pattern.push(LIKE_ESCAPE);
                        }
                        pattern.push(ch);
                    }
                }
            }
        }
        pattern
    }
}

impl Filter {
    pub fn is_substring(&self) -> bool {
        matches!(self, Filter::Substring(_))
    }
}
