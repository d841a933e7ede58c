//! Pure aggregations over a receipt snapshot.

use api_types::receipt::Receipt;
use api_types::stats::{CategoryBucket, CategoryGroup, CategoryTotals, SpendingEntry};
use unicode_normalization::UnicodeNormalization;

const UNKNOWN_ITEM: &str = "(unknown)";

/// Food/drink markers matched as substrings of the normalized category.
const FOOD_DRINK_KEYWORDS: [&str; 9] = [
    "ăn", "uống", "cafe", "coffee", "trà", "tea", "nhà hàng", "quán", "food",
];

/// Total spent per item name, across every receipt, descending by total.
///
/// Missing or empty item names collapse into one `"(unknown)"` entry. The
/// sort is stable on the single numeric key, so equal totals keep the order
/// in which their groups were first seen.
pub fn spending_by_item(receipts: &[Receipt]) -> Vec<SpendingEntry> {
    let mut entries: Vec<SpendingEntry> = Vec::new();
    for receipt in receipts {
        for item in &receipt.items {
            let name = match item.item_name.as_deref() {
                Some(name) if !name.is_empty() => name,
                _ => UNKNOWN_ITEM,
            };
            let spent = item.total_price.or_zero();
            match entries.iter().position(|entry| entry.item_name == name) {
                Some(index) => entries[index].total_spent += spent,
                None => entries.push(SpendingEntry {
                    item_name: name.to_string(),
                    total_spent: spent,
                }),
            }
        }
    }
    entries.sort_by(|a, b| b.total_spent.total_cmp(&a.total_spent));
    entries
}

/// Folds a free-form receipt category into one of the three fixed groups.
///
/// The match is a case-insensitive substring test against the food/drink
/// keyword set; input is NFC-normalized first, since Vietnamese text can
/// arrive decomposed. A non-empty category with no keyword hit is Shopping;
/// an empty or missing one is Other.
pub fn group_for_category(category: Option<&str>) -> CategoryGroup {
    let normalized = normalize(category.unwrap_or(""));
    if normalized.is_empty() {
        return CategoryGroup::Other;
    }
    if FOOD_DRINK_KEYWORDS
        .iter()
        .any(|keyword| normalized.contains(*keyword))
    {
        return CategoryGroup::FoodAndDrink;
    }
    CategoryGroup::Shopping
}

fn normalize(raw: &str) -> String {
    raw.trim().nfc().collect::<String>().to_lowercase()
}

/// Receipt totals summed per category group, descending by total.
///
/// All three groups are always present, zero or not. Non-numeric totals
/// count as 0.
pub fn category_totals(receipts: &[Receipt]) -> CategoryTotals {
    let mut totals = [0.0f64; 3];
    for receipt in receipts {
        totals[group_for_category(receipt.category.as_deref()) as usize] +=
            receipt.total_amount.or_zero();
    }

    let mut groups: Vec<CategoryBucket> = [
        CategoryGroup::FoodAndDrink,
        CategoryGroup::Shopping,
        CategoryGroup::Other,
    ]
    .into_iter()
    .zip(totals)
    .map(|(group, total)| CategoryBucket { group, total })
    .collect();
    groups.sort_by(|a, b| b.total.total_cmp(&a.total));
    CategoryTotals { groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::LooseNumber;
    use api_types::receipt::LineItem;
    use serde_json::json;

    fn receipt(id: i64, category: Option<&str>, total: i64, items: Vec<LineItem>) -> Receipt {
        Receipt {
            id,
            store_name: None,
            date: None,
            total_amount: total.into(),
            category: category.map(|c| c.to_string()),
            image_path: String::new(),
            raw_text: None,
            created_at: "2026-01-25T00:00:00.000Z".to_string(),
            items,
        }
    }

    fn item(id: i64, receipt_id: i64, name: Option<&str>, total: LooseNumber) -> LineItem {
        LineItem {
            id,
            receipt_id,
            item_name: name.map(|n| n.to_string()),
            quantity: LooseNumber::NULL,
            unit_price: LooseNumber::NULL,
            total_price: total,
        }
    }

    #[test]
    fn groups_match_keywords_case_insensitively() {
        assert_eq!(
            group_for_category(Some("Ăn uống")),
            CategoryGroup::FoodAndDrink
        );
        assert_eq!(
            group_for_category(Some("CAFE TRUNG NGUYEN")),
            CategoryGroup::FoodAndDrink
        );
        assert_eq!(group_for_category(Some("Siêu thị")), CategoryGroup::Shopping);
        assert_eq!(group_for_category(Some("   ")), CategoryGroup::Other);
        assert_eq!(group_for_category(None), CategoryGroup::Other);
    }

    #[test]
    fn groups_match_decomposed_input() {
        // "trà" typed with a combining grave accent instead of the composed
        // character.
        let decomposed = "tra\u{0300} s\u{1eef}a";
        assert_eq!(
            group_for_category(Some(decomposed)),
            CategoryGroup::FoodAndDrink
        );
    }

    #[test]
    fn category_totals_cover_the_seed_scenario() {
        let receipts = vec![
            receipt(101, Some("Siêu thị"), 63_000, vec![]),
            receipt(102, Some("Ăn uống"), 77_000, vec![]),
            receipt(103, Some("Ăn uống"), 60_000, vec![]),
        ];

        let totals = category_totals(&receipts);
        assert_eq!(totals.groups.len(), 3);
        assert_eq!(totals.groups[0].group, CategoryGroup::FoodAndDrink);
        assert_eq!(totals.groups[0].total, 137_000.0);
        assert_eq!(totals.groups[1].group, CategoryGroup::Shopping);
        assert_eq!(totals.groups[1].total, 63_000.0);
        assert_eq!(totals.groups[2].group, CategoryGroup::Other);
        assert_eq!(totals.groups[2].total, 0.0);
    }

    #[test]
    fn category_totals_sum_to_the_grand_total() {
        let receipts = vec![
            receipt(1, Some("Ăn uống"), 10_000, vec![]),
            receipt(2, Some("Shopee order"), 20_000, vec![]),
            receipt(3, None, 30_000, vec![]),
        ];

        let totals = category_totals(&receipts);
        let sum: f64 = totals.groups.iter().map(|bucket| bucket.total).sum();
        assert_eq!(sum, 60_000.0);
    }

    #[test]
    fn spending_groups_by_name_and_sorts_descending() {
        let receipts = vec![
            receipt(
                1,
                None,
                0,
                vec![
                    item(1, 1, Some("Sữa"), 10_000.into()),
                    item(2, 1, Some("Mì"), 5_000.into()),
                ],
            ),
            receipt(2, None, 0, vec![item(3, 2, Some("Sữa"), 8_000.into())]),
        ];

        let entries = spending_by_item(&receipts);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].item_name, "Sữa");
        assert_eq!(entries[0].total_spent, 18_000.0);
        assert_eq!(entries[1].item_name, "Mì");
        assert_eq!(entries[1].total_spent, 5_000.0);
    }

    #[test]
    fn spending_normalizes_missing_names_and_non_numeric_prices() {
        let receipts = vec![receipt(
            1,
            None,
            0,
            vec![
                item(1, 1, None, 1_000.into()),
                item(2, 1, Some(""), 2_000.into()),
                item(3, 1, Some("Snack"), LooseNumber::from(json!("n/a"))),
            ],
        )];

        let entries = spending_by_item(&receipts);
        assert_eq!(entries[0].item_name, UNKNOWN_ITEM);
        assert_eq!(entries[0].total_spent, 3_000.0);
        let snack = entries.iter().find(|e| e.item_name == "Snack").unwrap();
        assert_eq!(snack.total_spent, 0.0);
    }

    #[test]
    fn spending_keeps_first_seen_order_on_ties() {
        let receipts = vec![receipt(
            1,
            None,
            0,
            vec![
                item(1, 1, Some("A"), 5_000.into()),
                item(2, 1, Some("B"), 5_000.into()),
                item(3, 1, Some("C"), 9_000.into()),
            ],
        )];

        let entries = spending_by_item(&receipts);
        let names: Vec<&str> = entries.iter().map(|e| e.item_name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }
}
