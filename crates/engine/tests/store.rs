use std::io;
use std::sync::{Arc, Mutex};

use api_types::LooseNumber;
use api_types::receipt::LineItemDraft;
use engine::{Persistence, ReceiptStore, StoreError};
use serde_json::json;

/// In-memory durable slot, shared between the store and the test.
#[derive(Clone, Default)]
struct MemorySlot(Arc<Mutex<Option<String>>>);

impl MemorySlot {
    fn preloaded(payload: &str) -> Self {
        MemorySlot(Arc::new(Mutex::new(Some(payload.to_string()))))
    }

    fn payload(&self) -> Option<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Persistence for MemorySlot {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.0.lock().unwrap().clone())
    }

    fn save(&self, payload: &str) -> io::Result<()> {
        *self.0.lock().unwrap() = Some(payload.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.0.lock().unwrap() = None;
        Ok(())
    }
}

/// Slot whose reads fail but whose writes work.
#[derive(Clone, Default)]
struct UnreadableSlot(MemorySlot);

impl Persistence for UnreadableSlot {
    fn load(&self) -> io::Result<Option<String>> {
        Err(io::Error::other("read denied"))
    }

    fn save(&self, payload: &str) -> io::Result<()> {
        self.0.save(payload)
    }

    fn clear(&self) -> io::Result<()> {
        self.0.clear()
    }
}

/// Slot whose writes always fail.
struct ReadOnlySlot;

impl Persistence for ReadOnlySlot {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(None)
    }

    fn save(&self, _payload: &str) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }

    fn clear(&self) -> io::Result<()> {
        Ok(())
    }
}

fn seeded_store() -> (ReceiptStore, MemorySlot) {
    let slot = MemorySlot::default();
    let store = ReceiptStore::new(Box::new(slot.clone()));
    (store, slot)
}

#[test]
fn empty_slot_seeds_and_persists() {
    let (store, slot) = seeded_store();

    let receipts = store.list_receipts().unwrap();
    assert_eq!(receipts.len(), 3);
    let ids: Vec<i64> = receipts.iter().map(|r| r.id).collect();
    assert!(ids.contains(&101) && ids.contains(&102) && ids.contains(&103));

    // The seed is written back on first load.
    assert!(slot.payload().is_some());
}

#[test]
fn corrupt_slot_reseeds() {
    let slot = MemorySlot::preloaded("not json at all");
    let store = ReceiptStore::new(Box::new(slot));
    assert_eq!(store.list_receipts().unwrap().len(), 3);
}

#[test]
fn empty_sequence_reseeds() {
    let slot = MemorySlot::preloaded("[]");
    let store = ReceiptStore::new(Box::new(slot));
    assert_eq!(store.list_receipts().unwrap().len(), 3);
}

#[test]
fn unreadable_slot_reseeds() {
    let store = ReceiptStore::new(Box::new(UnreadableSlot::default()));
    assert_eq!(store.list_receipts().unwrap().len(), 3);
}

#[test]
fn get_receipt_finds_by_exact_id() {
    let (store, _slot) = seeded_store();
    let receipt = store.get_receipt(101).unwrap().unwrap();
    assert_eq!(receipt.store_name.as_deref(), Some("WinMart"));
    assert_eq!(receipt.items.len(), 3);
}

#[test]
fn get_receipt_missing_is_none_not_an_error() {
    let (store, _slot) = seeded_store();
    assert!(store.get_receipt(9999).unwrap().is_none());
}

#[test]
fn list_items_of_missing_receipt_is_empty() {
    let (store, _slot) = seeded_store();
    assert_eq!(store.list_items(101).unwrap().len(), 3);
    assert!(store.list_items(9999).unwrap().is_empty());
}

#[test]
fn created_receipts_list_newest_first() {
    let (store, _slot) = seeded_store();

    let first = store.create_receipt().unwrap();
    let second = store.create_receipt().unwrap();
    assert!(second.created_at >= first.created_at);

    let receipts = store.list_receipts().unwrap();
    assert_eq!(receipts[0].id, second.id);
    for pair in receipts.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[test]
fn create_receipt_ids_clear_the_seed_range() {
    let (store, _slot) = seeded_store();

    let created = store.create_receipt().unwrap();
    assert_eq!(created.id, 104);
    assert_eq!(created.items.len(), 1);
    assert_eq!(created.items[0].id, 10_400);
    assert_eq!(created.items[0].receipt_id, 104);
    assert_eq!(created.category.as_deref(), Some("Khác"));

    // Persisted, and prepended as the most recent entry.
    assert_eq!(store.list_receipts().unwrap().len(), 4);
}

#[test]
fn replace_items_allocates_above_store_wide_max() {
    let (store, _slot) = seeded_store();

    // Seed max item id is 3002 (on receipt 103).
    let items = store
        .replace_items(
            101,
            &[LineItemDraft {
                item_name: Some("Sữa".to_string()),
                total_price: Some(json!(18_000)),
                ..Default::default()
            }],
        )
        .unwrap()
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, 3003);
    assert_eq!(items[0].receipt_id, 101);
    assert_eq!(items[0].total_price.as_f64(), Some(18_000.0));
}

#[test]
fn replace_items_twice_never_reuses_ids() {
    let (store, _slot) = seeded_store();
    let drafts = vec![
        LineItemDraft {
            item_name: Some("Sữa".to_string()),
            quantity: Some(json!(2)),
            unit_price: Some(json!(9_000)),
            total_price: Some(json!(18_000)),
        },
        LineItemDraft {
            item_name: Some("Mì".to_string()),
            total_price: Some(json!(7_000)),
            ..Default::default()
        },
    ];

    let first = store.replace_items(101, &drafts).unwrap().unwrap();
    let second = store.replace_items(101, &drafts).unwrap().unwrap();

    let first_max = first.iter().map(|item| item.id).max().unwrap();
    let second_min = second.iter().map(|item| item.id).min().unwrap();
    assert!(second_min > first_max);

    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.item_name, b.item_name);
        assert_eq!(a.quantity, b.quantity);
        assert_eq!(a.unit_price, b.unit_price);
        assert_eq!(a.total_price, b.total_price);
    }
}

#[test]
fn replace_items_on_missing_receipt_leaves_store_untouched() {
    let (store, _slot) = seeded_store();
    let before = store.list_receipts().unwrap();

    let result = store
        .replace_items(
            9999,
            &[LineItemDraft {
                item_name: Some("Sữa".to_string()),
                ..Default::default()
            }],
        )
        .unwrap();
    assert!(result.is_none());

    assert_eq!(store.list_receipts().unwrap(), before);
}

#[test]
fn replace_items_applies_the_coercion_rule() {
    let (store, _slot) = seeded_store();

    let items = store
        .replace_items(
            102,
            &[LineItemDraft {
                item_name: None,
                quantity: Some(json!("hai")),
                unit_price: None,
                total_price: Some(json!(12_500.5)),
            }],
        )
        .unwrap()
        .unwrap();

    // Non-numeric input passes through untouched, absent becomes null,
    // numbers stay numbers.
    assert_eq!(items[0].quantity.raw(), &json!("hai"));
    assert_eq!(items[0].quantity.as_f64(), None);
    assert!(items[0].unit_price.is_null());
    assert_eq!(items[0].total_price.as_f64(), Some(12_500.5));
}

#[test]
fn item_sum_is_not_reconciled_with_the_receipt_total() {
    let (store, _slot) = seeded_store();

    store
        .replace_items(
            101,
            &[LineItemDraft {
                item_name: Some("Sữa".to_string()),
                total_price: Some(json!(1)),
                ..Default::default()
            }],
        )
        .unwrap()
        .unwrap();

    // The receipt keeps its own total; the discrepancy is informational.
    let receipt = store.get_receipt(101).unwrap().unwrap();
    assert_eq!(receipt.total_amount, LooseNumber::from(63_000));
    let item_sum: f64 = receipt.items.iter().map(|i| i.total_price.or_zero()).sum();
    assert_eq!(item_sum, 1.0);
}

#[test]
fn reset_clears_and_reseeds_on_next_access() {
    let (store, slot) = seeded_store();

    store.create_receipt().unwrap();
    store.reset().unwrap();
    assert!(slot.payload().is_none());

    let receipts = store.list_receipts().unwrap();
    assert_eq!(receipts.len(), 3);
    assert!(receipts.iter().all(|r| r.id <= 103));
}

#[test]
fn write_failure_is_fatal() {
    let store = ReceiptStore::new(Box::new(ReadOnlySlot));
    let err = store.list_receipts().unwrap_err();
    assert!(matches!(err, StoreError::Storage(_)));
}
