use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Served in place of a missing image. Never written to the table.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/300x300/e0e0e0/333333?text=No+Image";

pub const NAME_REQUIRED: &str = "Product name is required.";
pub const CATEGORY_REQUIRED: &str = "Valid category ID is required.";

fn validate_product_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(NAME_REQUIRED.into()));
    }
    Ok(())
}

fn validate_category_id(category_id: i32) -> Result<(), ValidationError> {
    if category_id <= 0 {
        return Err(ValidationError::new("range").with_message(CATEGORY_REQUIRED.into()));
    }
    Ok(())
}

/// Catalog entry as stored and served
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier
    pub id: i32,
    pub name: String,
    /// Exact decimal, serialized as a string (`"19.99"`)
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    pub category_id: i32,
    pub description: Option<String>,
    pub color: Option<String>,
    pub stock: i32,
    pub featured: bool,
    /// Stored image, or [`PLACEHOLDER_IMAGE_URL`] when none is stored
    pub image_url: String,
}

impl Product {
    /// Read-time image rule: a null or empty stored value becomes the placeholder.
    pub fn image_or_placeholder(stored: Option<String>) -> String {
        stored
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string())
    }
}

/// Writable fields, used by both create and full-replace update.
///
/// Missing or `null` name, price and category deserialize to their defaults so
/// that validation, not JSON parsing, reports them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(custom(function = "validate_product_name"))]
    pub name: String,
    /// Accepts a JSON number or string; defaults to 0 like the column
    #[serde(default, deserialize_with = "null_as_default")]
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(custom(function = "validate_category_id"))]
    pub category_id: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ProductInput {
    /// Validate and return the first failing rule's message.
    ///
    /// The name rule is reported before the category rule.
    pub fn first_violation(&self) -> Option<String> {
        let errors = self.validate().err()?;
        let fields = errors.field_errors();

        ["name", "category_id"]
            .into_iter()
            .filter_map(|field| fields.get(field))
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .or_else(|| Some(errors.to_string()))
    }
}

/// Search filters. Every field is optional; blank query values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Exact category id
    #[serde(rename = "cat", default, deserialize_with = "blank_as_none")]
    pub category_id: Option<i32>,
    /// Inclusive lower price bound
    #[serde(rename = "minPrice", default, deserialize_with = "blank_as_none")]
    #[param(value_type = Option<String>)]
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound
    #[serde(rename = "maxPrice", default, deserialize_with = "blank_as_none")]
    #[param(value_type = Option<String>)]
    pub max_price: Option<Decimal>,
    /// Substring of the product color
    #[serde(default, deserialize_with = "blank_as_none")]
    pub color: Option<String>,
}

impl ProductFilter {
    pub fn by_category(category_id: i32) -> Self {
        Self {
            category_id: Some(category_id),
            ..Default::default()
        }
    }

    /// Color with surrounding whitespace removed, if anything remains.
    pub fn color_term(&self) -> Option<&str> {
        self.color
            .as_deref()
            .map(str::trim)
            .filter(|color| !color.is_empty())
    }

    pub fn has_filters(&self) -> bool {
        self.category_id.is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
            || self.color_term().is_some()
    }
}

/// Body of `PATCH /products/{id}/stock`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StockAdjustment {
    /// Signed change applied to the current stock
    pub delta: i32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ProductInput {
        ProductInput {
            name: "Shirt".into(),
            price: Decimal::new(1999, 2),
            category_id: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_placeholder_for_missing_or_empty_image() {
        assert_eq!(Product::image_or_placeholder(None), PLACEHOLDER_IMAGE_URL);
        assert_eq!(Product::image_or_placeholder(Some(String::new())), PLACEHOLDER_IMAGE_URL);
        assert_eq!(
            Product::image_or_placeholder(Some("https://cdn.example.com/a.png".into())),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_valid_input_has_no_violation() {
        assert_eq!(valid_input().first_violation(), None);
    }

    #[test]
    fn test_blank_name_is_reported_first() {
        let input = ProductInput {
            name: "   ".into(),
            category_id: 0,
            ..valid_input()
        };
        assert_eq!(input.first_violation().as_deref(), Some(NAME_REQUIRED));
    }

    #[test]
    fn test_non_positive_category_is_rejected() {
        for category_id in [0, -4] {
            let input = ProductInput {
                category_id,
                ..valid_input()
            };
            assert_eq!(input.first_violation().as_deref(), Some(CATEGORY_REQUIRED));
        }
    }

    #[test]
    fn test_input_json_accepts_numeric_price_and_defaults() {
        let input: ProductInput =
            serde_json::from_str(r#"{"name":"Mug","price":7.5,"categoryId":3}"#).unwrap();
        assert_eq!(input.price, Decimal::new(75, 1));
        assert_eq!(input.stock, 0);
        assert!(!input.featured);
        assert_eq!(input.image_url, None);
    }

    #[test]
    fn test_input_json_null_or_missing_fields_reach_validation() {
        let null_name: ProductInput =
            serde_json::from_str(r#"{"name":null,"price":1,"categoryId":2}"#).unwrap();
        assert_eq!(null_name.first_violation().as_deref(), Some(NAME_REQUIRED));

        let bare: ProductInput = serde_json::from_str(r#"{"name":""}"#).unwrap();
        assert_eq!(bare.price, Decimal::ZERO);
        assert_eq!(bare.category_id, 0);
        assert_eq!(bare.first_violation().as_deref(), Some(NAME_REQUIRED));

        let no_price: ProductInput =
            serde_json::from_str(r#"{"name":"Mug","price":null,"categoryId":null}"#).unwrap();
        assert_eq!(no_price.price, Decimal::ZERO);
        assert_eq!(no_price.first_violation().as_deref(), Some(CATEGORY_REQUIRED));
    }

    #[test]
    fn test_product_json_is_camel_case_with_string_price() {
        let product = Product {
            id: 1,
            name: "Shirt".into(),
            price: Decimal::new(1999, 2),
            category_id: 2,
            description: None,
            color: Some("blue".into()),
            stock: 10,
            featured: false,
            image_url: PLACEHOLDER_IMAGE_URL.into(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], "19.99");
        assert_eq!(json["categoryId"], 2);
        assert_eq!(json["imageUrl"], PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_has_filters_ignores_blank_color() {
        assert!(!ProductFilter::default().has_filters());

        let blank = ProductFilter {
            color: Some("  ".into()),
            ..Default::default()
        };
        assert!(!blank.has_filters());
        assert_eq!(blank.color_term(), None);

        assert!(ProductFilter::by_category(5).has_filters());
        assert!(
            ProductFilter {
                max_price: Some(Decimal::from(10)),
                ..Default::default()
            }
            .has_filters()
        );
    }
}
