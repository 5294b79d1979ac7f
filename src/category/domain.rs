//! Core category domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, transaction::TransactionType};

/// The category the finance API moves transactions into when their category is deleted.
pub const FALLBACK_CATEGORY: &str = "其他";

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is blank.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_owned()))
        }
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user's categories, one ordered list per transaction type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    #[serde(default)]
    pub expense: Vec<String>,
    #[serde(default)]
    pub income: Vec<String>,
}

impl CategorySet {
    /// The categories that can be used with `type_`.
    pub fn for_type(&self, type_: TransactionType) -> &[String] {
        match type_ {
            TransactionType::Expense => &self.expense,
            TransactionType::Income => &self.income,
        }
    }

    pub fn contains(&self, type_: TransactionType, name: &str) -> bool {
        self.for_type(type_).iter().any(|category| category == name)
    }

    /// Every category name once, expense categories first.
    ///
    /// Names used by both types, such as [FALLBACK_CATEGORY], appear once.
    pub fn unique_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.expense.len() + self.income.len());

        for name in self.expense.iter().chain(self.income.iter()) {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }

        names
    }

    pub fn is_empty(&self) -> bool {
        self.expense.is_empty() && self.income.is_empty()
    }
}

/// Form data for creating a category.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: TransactionType,
}
