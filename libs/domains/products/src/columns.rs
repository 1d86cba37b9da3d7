//! The one place that knows how product fields are named in the API and in
//! the `products` table.
//!
//! Row mapping, insert/update binding and filter composition all resolve
//! column names through [`ProductColumn`], so the `color` field stored in the
//! `subcategory` column is spelled out exactly once.

use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// Table backing the catalog.
pub const TABLE: &str = "products";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ProductColumn {
    #[strum(to_string = "product_id")]
    Id,
    Name,
    Price,
    CategoryId,
    Description,
    #[strum(to_string = "subcategory")]
    Color,
    Stock,
    Featured,
    ImageUrl,
}

impl ProductColumn {
    /// Column name in the `products` table.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Whether create/update write this column. The id is store-assigned.
    pub fn writable(self) -> bool {
        self != Self::Id
    }

    /// `product_id, name, ...` in declaration order, for SELECT lists.
    pub fn select_list() -> String {
        Self::iter().map(Self::name).collect::<Vec<_>>().join(", ")
    }
}
