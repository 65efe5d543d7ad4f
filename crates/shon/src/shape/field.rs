use std::collections::HashMap;

use crate::error::DecodeError;

/// Derives the kebab-case alias of a field name.
///
/// Words are split at each uppercase letter that follows the start of the
/// current word, and at underscores; each word is lower-cased and the words
/// are joined with `-`. `FirstName` and `first_name` both give `first-name`.
pub fn kebab_case(name: &str) -> String {
    let mut words = Vec::new();
    for part in name.split('_').filter(|p| !p.is_empty()) {
        let mut rest = part;
        while let Some(first) = rest.chars().next() {
            let start = first.len_utf8();
            let end = rest[start..]
                .find(char::is_uppercase)
                .map_or(rest.len(), |i| start + i);
            words.push(rest[..end].to_lowercase());
            rest = &rest[end..];
        }
    }
    words.join("-")
}

/// Names a field accepts: only the override when there is one, otherwise the
/// declared name and its kebab-case alias.
pub fn accepted_names(name: &str, rename: Option<&str>) -> Vec<String> {
    if let Some(rename) = rename {
        return vec![rename.to_owned()];
    }
    let kebab = kebab_case(name);
    if kebab == name {
        vec![name.to_owned()]
    } else {
        vec![name.to_owned(), kebab]
    }
}

/// Name-to-slot table of one record, built once with the record.
///
/// Lookups are exact and case-sensitive. When two fields claim the same
/// name, the one registered last wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTable {
    slots: HashMap<String, usize>,
}

impl FieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table over a serde field list; slots are indexes into `fields`.
    ///
    /// serde hands over names after `rename` and `rename_all` are applied,
    /// so a name holding an uppercase letter is taken as an explicit
    /// override and accepted verbatim only. Lower-case names also accept
    /// their kebab-case alias.
    pub fn for_fields(fields: &[&str]) -> Self {
        let mut table = Self::new();
        for (slot, field) in fields.iter().enumerate() {
            let rename = field.contains(char::is_uppercase).then_some(*field);
            table.insert(&accepted_names(field, rename), slot);
        }
        table
    }

    pub fn insert(&mut self, names: &[String], slot: usize) {
        for name in names {
            self.slots.insert(name.clone(), slot);
        }
    }

    pub fn resolve(&self, key: &str) -> Result<usize, DecodeError> {
        self.slots
            .get(key)
            .copied()
            .ok_or_else(|| DecodeError::UnknownField(key.to_owned()))
    }
}
