//! Search predicate composition.
//!
//! [`conjuncts`] turns a [`ProductFilter`] into an ordered list of
//! column/comparison/value triples without touching SQL text; [`render`]
//! then numbers the placeholders once. Values are only ever bound.

use sea_orm::Value;

use crate::columns::ProductColumn;
use crate::models::ProductFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    AtLeast,
    AtMost,
    /// `LIKE`; the bound value carries the `%` wildcards
    Contains,
}

impl Comparison {
    fn operator(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::AtLeast => ">=",
            Self::AtMost => "<=",
            Self::Contains => "LIKE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conjunct {
    pub column: ProductColumn,
    pub comparison: Comparison,
    pub value: Value,
}

impl Conjunct {
    fn new(column: ProductColumn, comparison: Comparison, value: impl Into<Value>) -> Self {
        Self {
            column,
            comparison,
            value: value.into(),
        }
    }

    /// `<column> <op> $<placeholder>`
    pub fn render(&self, placeholder: usize) -> String {
        format!(
            "{} {} ${}",
            self.column.name(),
            self.comparison.operator(),
            placeholder
        )
    }
}

/// Rendered `WHERE` body plus its positional values.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub sql: String,
    pub values: Vec<Value>,
}

/// Conjuncts for every present filter, always in the order
/// category, min price, max price, color.
pub fn conjuncts(filter: &ProductFilter) -> Vec<Conjunct> {
    let mut out = Vec::with_capacity(4);

    if let Some(category_id) = filter.category_id {
        out.push(Conjunct::new(ProductColumn::CategoryId, Comparison::Eq, category_id));
    }
    if let Some(min) = filter.min_price {
        out.push(Conjunct::new(ProductColumn::Price, Comparison::AtLeast, min));
    }
    if let Some(max) = filter.max_price {
        out.push(Conjunct::new(ProductColumn::Price, Comparison::AtMost, max));
    }
    if let Some(color) = filter.color_term() {
        out.push(Conjunct::new(
            ProductColumn::Color,
            Comparison::Contains,
            format!("%{}%", color),
        ));
    }

    out
}

/// Join conjuncts onto `1=1`, numbering placeholders from `$1`.
pub fn render(conjuncts: &[Conjunct]) -> Predicate {
    let mut sql = String::from("1=1");
    let mut values = Vec::with_capacity(conjuncts.len());

    for (i, conjunct) in conjuncts.iter().enumerate() {
        sql.push_str(" AND ");
        sql.push_str(&conjunct.render(i + 1));
        values.push(conjunct.value.clone());
    }

    Predicate { sql, values }
}
