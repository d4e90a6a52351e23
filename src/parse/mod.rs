mod document;

pub(crate) use document::parse_node;

/// Discriminator values naming each rule node kind.
pub mod statement {
    pub const AND: &str = "and";
    pub const OR: &str = "or";
    pub const NOT: &str = "not";
    pub const PREDICATE: &str = "predicate";
}
