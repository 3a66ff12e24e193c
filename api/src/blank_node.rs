//! Run-scoped blank node identity management.

use std::collections::HashMap;

/// Maps syntactic blank node labels to run-unique identifiers.
///
/// Within one parse run the same label always yields the same identifier and
/// distinct labels never collide, neither with each other nor with the
/// anonymous identifiers handed out by [`fresh`](#method.fresh). A generator
/// belongs to one [`ParserProfile`](../profile/struct.ParserProfile.html),
/// which is consumed by a single `load` call, so identities can never leak
/// between runs.
///
/// ```
/// use tripod_api::blank_node::BlankNodeGenerator;
///
/// let mut generator = BlankNodeGenerator::default();
/// let a = generator.get_or_create("x").to_owned();
/// let b = generator.get_or_create("y").to_owned();
/// assert_eq!(a, generator.get_or_create("x"));
/// assert_ne!(a, b);
/// ```
#[derive(Default)]
pub struct BlankNodeGenerator {
    mapping: HashMap<String, String>,
    counter: usize,
}

impl BlankNodeGenerator {
    /// Returns the identifier for `label`, allocating one on first use.
    pub fn get_or_create(&mut self, label: &str) -> &str {
        if !self.mapping.contains_key(label) {
            let id = self.next_id();
            self.mapping.insert(label.to_owned(), id);
        }
        &self.mapping[label]
    }

    /// Allocates an anonymous identifier from the same namespace, so it
    /// cannot collide with any labelled identity of this run.
    pub fn fresh(&mut self) -> String {
        self.next_id()
    }

    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("tpb{:08}", self.counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_label_same_id() {
        let mut generator = BlankNodeGenerator::default();
        let first = generator.get_or_create("node1").to_owned();
        generator.get_or_create("other");
        assert_eq!(first, generator.get_or_create("node1"));
    }

    #[test]
    fn fresh_never_collides_with_labels() {
        let mut generator = BlankNodeGenerator::default();
        let labelled = generator.get_or_create("a").to_owned();
        let anonymous = generator.fresh();
        assert_ne!(labelled, anonymous);
        assert_ne!(anonymous, generator.get_or_create("b"));
    }

    #[test]
    fn independent_generators_are_isolated() {
        let mut first = BlankNodeGenerator::default();
        let mut second = BlankNodeGenerator::default();
        first.get_or_create("padding");
        // Identifiers are only meaningful within a run, equality across
        // generators is neither promised nor forbidden.
        assert_ne!(first.get_or_create("x"), second.get_or_create("y"));
    }
}
