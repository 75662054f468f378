//! Category taxonomy: product types for sales, expense categories for
//! expenses.
//!
//! Records reference categories by id only. Grouping goes through
//! [`CategoryLookup`] and falls back to [`UNKNOWN_CATEGORY`] for dangling
//! references.

use std::collections::HashMap;

use uuid::Uuid;

/// Label used when a record points to a category that no longer exists.
pub const UNKNOWN_CATEGORY: &str = "unknown";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    ProductType,
    ExpenseCategory,
}

impl CategoryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProductType => "product type",
            Self::ExpenseCategory => "expense category",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
}

pub trait CategoryLookup {
    fn product_type_name(&self, id: Uuid) -> Option<&str>;
    fn expense_category_name(&self, id: Uuid) -> Option<&str>;

    fn product_type_label(&self, id: Uuid) -> &str {
        self.product_type_name(id).unwrap_or(UNKNOWN_CATEGORY)
    }

    fn expense_category_label(&self, id: Uuid) -> &str {
        self.expense_category_name(id).unwrap_or(UNKNOWN_CATEGORY)
    }
}

/// In-memory name index built from loaded taxonomy lists.
#[derive(Clone, Debug, Default)]
pub struct CategoryNames {
    product_types: HashMap<Uuid, String>,
    expense_categories: HashMap<Uuid, String>,
}

impl CategoryNames {
    pub fn new(product_types: &[Category], expense_categories: &[Category]) -> Self {
        let index = |categories: &[Category]| {
            categories
                .iter()
                .map(|c| (c.id, c.name.clone()))
                .collect::<HashMap<_, _>>()
        };
        Self {
            product_types: index(product_types),
            expense_categories: index(expense_categories),
        }
    }
}

impl CategoryLookup for CategoryNames {
    fn product_type_name(&self, id: Uuid) -> Option<&str> {
        self.product_types.get(&id).map(String::as_str)
    }

    fn expense_category_name(&self, id: Uuid) -> Option<&str> {
        self.expense_categories.get(&id).map(String::as_str)
    }
}
