use std::collections::HashMap;

/// Converts `PascalCase` to `lowerCamelCase` by lowercasing the first character only.
pub fn lower_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Removes trailing ASCII digits (`entity2` -> `entity`).
///
/// A name made of digits only is returned unchanged.
pub fn strip_numeric_suffix(name: &str) -> &str {
    let stripped = name.trim_end_matches(|ch: char| ch.is_ascii_digit());
    if stripped.is_empty() {
        name
    } else {
        stripped
    }
}

/// Splits a camel or Pascal case identifier into its words.
///
/// A word starts at an uppercase letter that follows a non-uppercase character, or at an
/// uppercase letter followed by a lowercase one (`HTMLParser` -> `HTML`, `Parser`).
pub fn split_words(name: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = name.char_indices().collect();
    let mut words = Vec::new();
    let mut start = 0;
    for i in 1..chars.len() {
        let (idx, ch) = chars[i];
        if !ch.is_ascii_uppercase() {
            continue;
        }
        let after_lower = !chars[i - 1].1.is_ascii_uppercase();
        let before_lower = chars
            .get(i + 1)
            .is_some_and(|(_, next)| next.is_ascii_lowercase());
        if after_lower || before_lower {
            words.push(&name[start..idx]);
            start = idx;
        }
    }
    words.push(&name[start..]);
    words
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Names already handed out within one method.
#[derive(Debug, Default)]
pub(crate) struct NameTable {
    seen: HashMap<String, u32>,
}

impl NameTable {
    pub(crate) fn clear(&mut self) {
        self.seen.clear();
    }

    /// Returns `name`, suffixed with the number of earlier claims of the same name.
    pub(crate) fn claim(&mut self, name: &str) -> String {
        let count = self
            .seen
            .entry(name.to_string())
            .and_modify(|count| *count += 1)
            .or_insert(0);
        if *count == 0 {
            name.to_string()
        } else {
            format!("{name}{count}")
        }
    }
}
