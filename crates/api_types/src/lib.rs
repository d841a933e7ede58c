use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Numeric field as it comes out of OCR or a hand-edited payload.
///
/// Extracted amounts are not guaranteed to be numbers: a quantity can arrive
/// as `3`, `"3x"`, or be missing entirely. The wrapper keeps the raw JSON
/// value and applies one coercion rule when items are built from drafts:
///
/// - a JSON number stays a number,
/// - any other non-null value is preserved untouched,
/// - a missing or null value becomes null.
///
/// Aggregations read the value with [`LooseNumber::or_zero`], which counts
/// anything non-numeric as 0.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LooseNumber(Value);

impl LooseNumber {
    pub const NULL: LooseNumber = LooseNumber(Value::Null);

    /// Applies the draft coercion rule to a caller-supplied value.
    #[must_use]
    pub fn from_draft(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::NULL,
            Some(value) => LooseNumber(value),
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.0.as_f64()
    }

    /// Numeric value, with anything non-numeric counted as 0.
    #[must_use]
    pub fn or_zero(&self) -> f64 {
        self.0.as_f64().unwrap_or(0.0)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Returns the raw JSON value.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// Plain-text rendering for exports and listings: numbers and strings
    /// as-is, null as the empty string.
    #[must_use]
    pub fn display_text(&self) -> String {
        match &self.0 {
            Value::Null => String::new(),
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl From<i64> for LooseNumber {
    fn from(value: i64) -> Self {
        LooseNumber(Value::from(value))
    }
}

impl From<f64> for LooseNumber {
    fn from(value: f64) -> Self {
        LooseNumber(Value::from(value))
    }
}

impl From<Value> for LooseNumber {
    fn from(value: Value) -> Self {
        LooseNumber(value)
    }
}

pub mod receipt {
    use super::*;

    /// Top-level purchase record, owning its line items.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Receipt {
        pub id: i64,
        pub store_name: Option<String>,
        /// Free-form display date as printed on the receipt; never parsed.
        pub date: Option<String>,
        pub total_amount: LooseNumber,
        pub category: Option<String>,
        /// Absolute URL or store-relative path of the source image.
        pub image_path: String,
        /// Raw OCR output; opaque to the core.
        #[serde(default)]
        pub raw_text: Option<String>,
        /// RFC3339 timestamp set once at creation; the sole listing sort key
        /// (descending). Lexicographic comparison is time-order-correct.
        pub created_at: String,
        #[serde(default)]
        pub items: Vec<LineItem>,
    }

    /// One purchased product line within a receipt.
    ///
    /// `total_price` is an independent field supplied by the caller or OCR;
    /// it is never recomputed from `quantity` × `unit_price`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct LineItem {
        /// Unique across the whole store, not just within a receipt.
        pub id: i64,
        pub receipt_id: i64,
        pub item_name: Option<String>,
        pub quantity: LooseNumber,
        pub unit_price: LooseNumber,
        pub total_price: LooseNumber,
    }

    /// Caller-supplied line item, before ids are assigned.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct LineItemDraft {
        #[serde(default)]
        pub item_name: Option<String>,
        #[serde(default)]
        pub quantity: Option<Value>,
        #[serde(default)]
        pub unit_price: Option<Value>,
        #[serde(default)]
        pub total_price: Option<Value>,
    }

    /// Body of the items replace request.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct ItemsReplace {
        #[serde(default)]
        pub items: Vec<LineItemDraft>,
    }
}

pub mod stats {
    use super::*;

    /// Total spent on one item name, across every receipt.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct SpendingEntry {
        pub item_name: String,
        pub total_spent: f64,
    }

    /// The three fixed reporting groups receipt categories fold into.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum CategoryGroup {
        #[serde(rename = "Food & Drink")]
        FoodAndDrink,
        #[serde(rename = "Shopping")]
        Shopping,
        #[serde(rename = "Other")]
        Other,
    }

    impl CategoryGroup {
        /// Returns the display label used on the wire.
        #[must_use]
        pub fn label(self) -> &'static str {
            match self {
                Self::FoodAndDrink => "Food & Drink",
                Self::Shopping => "Shopping",
                Self::Other => "Other",
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CategoryBucket {
        pub group: CategoryGroup,
        pub total: f64,
    }

    /// Response body of the category totals endpoint. Always carries all
    /// three groups, sorted by total descending.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CategoryTotals {
        pub groups: Vec<CategoryBucket>,
    }
}
