use std::collections::BTreeMap;
use std::fmt::Display;

pub mod airing;
pub mod anime;
pub mod character;
pub mod humanize;
pub mod template;

pub use template::render;

/// Placeholder for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Values available to a caption template, keyed by placeholder name.
#[derive(Debug, Default, Clone)]
pub struct Fields(BTreeMap<&'static str, String>);

impl Fields {
    pub fn set(&mut self, key: &'static str, value: impl Display) -> &mut Self {
        self.0.insert(key, value.to_string());
        self
    }

    /// Stores `value`, or [`NOT_AVAILABLE`] when it is absent.
    pub fn set_opt<T: Display>(&mut self, key: &'static str, value: Option<T>) -> &mut Self {
        match value {
            Some(value) => self.set(key, value),
            None => self.set(key, NOT_AVAILABLE),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

/// Turns an ISO 3166 alpha-2 code into its flag emoji. Anything that is not
/// two ASCII letters is returned unchanged.
pub fn country_flag(code: &str) -> String {
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return code.to_string();
    }
    code.to_ascii_uppercase()
        .chars()
        .filter_map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
        .collect()
}

/// Python-style rendering of a flag so stored templates keep reading the same.
pub(crate) fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "True",
        Some(false) => "False",
        None => NOT_AVAILABLE,
    }
}
