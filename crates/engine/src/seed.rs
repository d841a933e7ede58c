//! Fixed dataset used when the durable slot holds nothing usable.

use api_types::receipt::{LineItem, Receipt};

fn item(id: i64, receipt_id: i64, name: &str, quantity: i64, unit: i64, total: i64) -> LineItem {
    LineItem {
        id,
        receipt_id,
        item_name: Some(name.to_string()),
        quantity: quantity.into(),
        unit_price: unit.into(),
        total_price: total.into(),
    }
}

/// Three representative receipts with their line items. Receipt ids start at
/// 101 and item ids at 1001 so that generated ids never collide with them.
pub(crate) fn seed(created_at: &str) -> Vec<Receipt> {
    vec![
        Receipt {
            id: 101,
            store_name: Some("WinMart".to_string()),
            date: Some("25/01/2026".to_string()),
            total_amount: 63_000.into(),
            category: Some("Siêu thị".to_string()),
            image_path: "/demo/receipt-1.svg".to_string(),
            raw_text: Some("WINMART\n25/01/2026\nTONG THANH TOAN 63,000".to_string()),
            created_at: created_at.to_string(),
            items: vec![
                item(1001, 101, "Sữa tươi", 1, 18_000, 18_000),
                item(1002, 101, "Mì gói", 3, 7_000, 21_000),
                item(1003, 101, "Trứng gà", 1, 24_000, 24_000),
            ],
        },
        Receipt {
            id: 102,
            store_name: Some("Highlands Coffee".to_string()),
            date: Some("26/01/2026".to_string()),
            total_amount: 77_000.into(),
            category: Some("Ăn uống".to_string()),
            image_path: "/demo/receipt-2.svg".to_string(),
            raw_text: Some("HIGHLANDS COFFEE\n26/01/2026\nTOTAL 77,000".to_string()),
            created_at: created_at.to_string(),
            items: vec![
                item(2001, 102, "Cà phê sữa", 1, 39_000, 39_000),
                item(2002, 102, "Bánh ngọt", 1, 38_000, 38_000),
            ],
        },
        Receipt {
            id: 103,
            store_name: Some("Circle K".to_string()),
            date: Some("20/01/2026".to_string()),
            total_amount: 60_000.into(),
            category: Some("Ăn uống".to_string()),
            image_path: "/demo/receipt-3.svg".to_string(),
            raw_text: Some("CIRCLE K\n20/01/2026\nTONG 60,000".to_string()),
            created_at: created_at.to_string(),
            items: vec![
                item(3001, 103, "Nước suối", 2, 10_000, 20_000),
                item(3002, 103, "Snack", 2, 20_000, 40_000),
            ],
        },
    ]
}
