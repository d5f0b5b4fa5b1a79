//! # Availability
//!
//! Every [`MenuOption`] names the rule that decides whether it may be chosen
//! alongside the rest of an in-progress pizza. Rules live in a [`RuleBook`]
//! keyed by name, so new rules are registered without touching callers.
//!
//! | Rule                      | Disabled when the selection contains |
//! |---------------------------|--------------------------------------|
//! | `always_enable`           | never disabled                       |
//! | `disable_on_pork_sausage` | `sausage`                            |
//! | `disable_on_chx`          | `chx`                                |
//! | `disable_on_gf`           | `gf`                                 |
//! | `disable_on_red`          | `red`                                |
//! | `disable_on_meatball`     | `mb`                                 |
//! | `disable_on_brussels`     | `brussels`                           |

use std::collections::HashMap;

use crate::errors::{CatalogError, Result};
use crate::types::{MenuOption, Pizza, Selection};

pub const ALWAYS_ENABLE: &str = "always_enable";

/// A predicate over the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    AlwaysEnable,
    /// Disabled as soon as any of these shortcodes is selected.
    DisableOn(Vec<String>),
}

impl Rule {
    pub fn disable_on<I, S>(shortcodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::DisableOn(shortcodes.into_iter().map(Into::into).collect())
    }

    pub fn allows(&self, selection: &Selection) -> bool {
        match self {
            Self::AlwaysEnable => true,
            Self::DisableOn(blockers) => !blockers.iter().any(|code| selection.contains(code)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBook {
    rules: HashMap<String, Rule>,
}

impl Default for RuleBook {
    fn default() -> Self {
        let mut book = Self::empty();
        book.register(ALWAYS_ENABLE, Rule::AlwaysEnable);
        book.register("disable_on_pork_sausage", Rule::disable_on(["sausage"]));
        book.register("disable_on_chx", Rule::disable_on(["chx"]));
        book.register("disable_on_gf", Rule::disable_on(["gf"]));
        book.register("disable_on_red", Rule::disable_on(["red"]));
        book.register("disable_on_meatball", Rule::disable_on(["mb"]));
        book.register("disable_on_brussels", Rule::disable_on(["brussels"]));
        book
    }
}

impl RuleBook {
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Add or replace a rule, returning the one it replaced.
    pub fn register(&mut self, name: impl Into<String>, rule: Rule) -> Option<Rule> {
        self.rules.insert(name.into(), rule)
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Evaluate the rule called `name` against `selection`.
    pub fn evaluate(&self, name: &str, selection: &Selection) -> Result<bool> {
        self.get(name)
            .map(|rule| rule.allows(selection))
            .ok_or_else(|| CatalogError::UnknownRule {
                item: String::new(),
                rule: name.to_string(),
            })
    }

    /// Whether `option` may be chosen given `selection`.
    pub fn is_available(&self, option: &MenuOption, selection: &Selection) -> Result<bool> {
        self.get(&option.enable_function_name)
            .map(|rule| rule.allows(selection))
            .ok_or_else(|| CatalogError::UnknownRule {
                item: option.shortcode().to_string(),
                rule: option.enable_function_name.clone(),
            })
    }

    /// The first item on `pizza` that the rest of its own selection disables.
    pub fn first_unavailable<'a>(&self, pizza: &'a Pizza) -> Result<Option<&'a MenuOption>> {
        let selection = pizza.selection();
        for item in pizza.selected_items() {
            if !self.is_available(item, &selection)? {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }
}
