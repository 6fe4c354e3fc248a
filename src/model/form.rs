//! Search form values.

use crate::model::FormField;
use std::collections::HashMap;

/// Text value of every form field.
///
/// Fields never set read as the empty string, which is also what the
/// request payload carries for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    values: HashMap<FormField, String>,
}

impl SearchForm {
    /// Empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a field (empty if never set).
    pub fn get(&self, field: FormField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Replace a field's value.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Mutable access to a field's buffer, for in-place editing.
    pub fn buffer_mut(&mut self, field: FormField) -> &mut String {
        self.values.entry(field).or_default()
    }

    /// Clear every field.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Whether every field is empty.
    pub fn is_blank(&self) -> bool {
        FormField::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_field_reads_empty() {
        let form = SearchForm::new();
        assert_eq!(form.get(FormField::Agency), "");
        assert!(form.is_blank());
    }

    #[test]
    fn set_then_clear() {
        let mut form = SearchForm::new();
        form.set(FormField::State, "MD");
        form.buffer_mut(FormField::Country).push_str("USA");
        assert_eq!(form.get(FormField::State), "MD");
        assert_eq!(form.get(FormField::Country), "USA");

        form.clear();
        assert!(form.is_blank());
    }
}
