use std::collections::HashMap;

use indexmap::IndexMap;

use super::name_normalizer::{camel_to_pascal, strip_definition_prefix};
use crate::error::ParseError;
use crate::parse::definition::TypeDefinition;

/// Case-tolerant lookup table over definition keys.
///
/// Schemas spell definition keys in lower-camel or title case inconsistently
/// with the references that point at them. Keys are normalized once to a
/// canonical spelling (leading letter upper-cased) so every lookup is a single
/// map access.
#[derive(Debug, Clone, Default)]
pub struct DefinitionIndex {
    by_canonical: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

impl DefinitionIndex {
    /// Build the index, rejecting keys that collide after normalization and
    /// object definitions that reference themselves through direct properties.
    pub fn build(definitions: &IndexMap<String, TypeDefinition>) -> Result<Self, ParseError> {
        let mut by_canonical: HashMap<String, String> = HashMap::with_capacity(definitions.len());
        for name in definitions.keys() {
            let canonical = camel_to_pascal(name);
            if let Some(existing) = by_canonical.get(&canonical) {
                return Err(ParseError::AmbiguousDefinition {
                    first: existing.clone(),
                    second: name.clone(),
                });
            }
            by_canonical.insert(canonical, name.clone());
        }

        let index = Self { by_canonical };
        index.check_cycles(definitions)?;
        log::debug!("indexed {} definitions", definitions.len());
        Ok(index)
    }

    /// Canonical spelling of a reference or definition name.
    pub fn canonical_name(reference: &str) -> String {
        camel_to_pascal(strip_definition_prefix(reference))
    }

    /// The definition key a reference points at, in either casing.
    pub fn resolve_key(&self, reference: &str) -> Option<&str> {
        self.by_canonical
            .get(&Self::canonical_name(reference))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_canonical.is_empty()
    }

    fn check_cycles(
        &self,
        definitions: &IndexMap<String, TypeDefinition>,
    ) -> Result<(), ParseError> {
        let mut marks: HashMap<&str, Mark> = HashMap::new();
        let mut stack: Vec<&str> = Vec::new();
        for name in definitions.keys() {
            self.visit(name, definitions, &mut marks, &mut stack)?;
        }
        Ok(())
    }

    fn visit<'a>(
        &'a self,
        name: &'a str,
        definitions: &'a IndexMap<String, TypeDefinition>,
        marks: &mut HashMap<&'a str, Mark>,
        stack: &mut Vec<&'a str>,
    ) -> Result<(), ParseError> {
        match marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = stack.iter().position(|n| *n == name).unwrap_or(0);
                let mut cycle = stack[start..].to_vec();
                cycle.push(name);
                return Err(ParseError::CircularDefinition(cycle.join(" -> ")));
            }
            None => {}
        }

        marks.insert(name, Mark::Visiting);
        stack.push(name);

        if let Some(definition) = definitions.get(name)
            && definition.is_object()
        {
            // Array items, map values and typed properties default to literals,
            // so only untyped references can recurse.
            for property in definition.properties.values() {
                let Some(reference) = property.definition_ref() else {
                    continue;
                };
                if let Some(target) = self.resolve_key(reference)
                    && definitions.get(target).is_some_and(TypeDefinition::is_object)
                {
                    self.visit(target, definitions, marks, stack)?;
                }
            }
        }

        stack.pop();
        marks.insert(name, Mark::Done);
        Ok(())
    }
}
