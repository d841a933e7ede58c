//! CSV export of the stored dataset.

use std::io::Write;

use api_types::receipt::Receipt;
use csv::Writer;
use serde::Serialize;

use crate::ResultStore;

#[derive(Serialize)]
struct ReceiptRow<'a> {
    id: i64,
    store_name: Option<&'a str>,
    date: Option<&'a str>,
    total_amount: String,
    category: Option<&'a str>,
    image_path: &'a str,
    created_at: &'a str,
}

#[derive(Serialize)]
struct ItemRow<'a> {
    receipt_id: i64,
    item_name: Option<&'a str>,
    quantity: String,
    unit_price: String,
    total_price: String,
    item_id: i64,
}

/// Writes the receipt sequence as two CSV documents, one row per receipt and
/// one per line item. Receipts are written in the order given.
pub fn export_csv<W1: Write, W2: Write>(
    receipts: &[Receipt],
    receipts_out: W1,
    items_out: W2,
) -> ResultStore<()> {
    let mut receipts_writer = Writer::from_writer(receipts_out);
    let mut items_writer = Writer::from_writer(items_out);

    for receipt in receipts {
        receipts_writer.serialize(ReceiptRow {
            id: receipt.id,
            store_name: receipt.store_name.as_deref(),
            date: receipt.date.as_deref(),
            total_amount: receipt.total_amount.display_text(),
            category: receipt.category.as_deref(),
            image_path: &receipt.image_path,
            created_at: &receipt.created_at,
        })?;

        for item in &receipt.items {
            items_writer.serialize(ItemRow {
                receipt_id: item.receipt_id,
                item_name: item.item_name.as_deref(),
                quantity: item.quantity.display_text(),
                unit_price: item.unit_price.display_text(),
                total_price: item.total_price.display_text(),
                item_id: item.id,
            })?;
        }
    }

    receipts_writer.flush().map_err(csv::Error::from)?;
    items_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
