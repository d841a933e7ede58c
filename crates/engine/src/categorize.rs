//! Store-name categorization rules.

/// Ordered substring rules mapping a store name to a receipt category.
/// First hit wins.
const RULES: [(&str, &str); 14] = [
    ("circle k", "Ăn uống"),
    ("highlands", "Ăn uống"),
    ("starbucks", "Ăn uống"),
    ("phuc long", "Ăn uống"),
    ("co.op", "Siêu thị"),
    ("coop", "Siêu thị"),
    ("winmart", "Siêu thị"),
    ("lotte", "Siêu thị"),
    ("bach hoa xanh", "Siêu thị"),
    ("shopee", "Mua sắm"),
    ("lazada", "Mua sắm"),
    ("tiki", "Mua sắm"),
    ("grab", "Di chuyển"),
    ("be", "Di chuyển"),
];

/// Category label for receipts no rule recognizes.
pub const UNCATEGORIZED: &str = "Khác";

/// Best-effort category for a store name.
pub fn categorize(store_name: Option<&str>) -> &'static str {
    let Some(store_name) = store_name else {
        return UNCATEGORIZED;
    };
    let normalized = store_name.trim().to_lowercase();
    if normalized.is_empty() {
        return UNCATEGORIZED;
    }
    RULES
        .iter()
        .find(|(needle, _)| normalized.contains(needle))
        .map(|(_, category)| *category)
        .unwrap_or(UNCATEGORIZED)
}
