//! Value/label pairs used by every dropdown-style filter.

use serde::{Deserialize, Serialize};

/// `value` is the token sent to the APIs, `label` is what gets displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }

    /// Option whose value and label are the same text.
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self { value: text.clone(), label: text }
    }
}

/// Orders options by label, ascending, ignoring case. Equal labels keep their relative order.
pub fn sort_options(options: &mut Vec<SelectOption>) {
    options.sort_by_cached_key(|option| option.label.to_lowercase());
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_case_insensitively() {
        let mut options = vec![SelectOption::same("delhi"), SelectOption::same("Agra"), SelectOption::same("bhopal")];
        sort_options(&mut options);
        let labels = options.iter().map(|o| o.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["Agra", "bhopal", "delhi"]);
    }

    #[test]
    fn same_uses_text_for_both_sides() {
        let option = SelectOption::same("MBA");
        assert_eq!(option.value, "MBA");
        assert_eq!(option.label, "MBA");
    }
}
