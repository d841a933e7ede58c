//! Durable receipt store.
//!
//! Every operation is load → mutate → save, run to completion before the
//! call returns, so sequential calls observe a consistent read-after-write
//! view. If the hosting environment issues concurrent calls anyway, the last
//! save wins; there is no merge and no optimistic-concurrency check.

use api_types::LooseNumber;
use api_types::receipt::{LineItem, LineItemDraft, Receipt};
use chrono::{SecondsFormat, Utc};

use crate::{Persistence, ResultStore, StoreError, categorize, seed};

const PLACEHOLDER_STORE: &str = "Demo Store";
const PLACEHOLDER_AMOUNT: i64 = 123_000;

/// Ordered sequence of receipt aggregates behind an injected durable slot.
pub struct ReceiptStore {
    persistence: Box<dyn Persistence>,
}

impl ReceiptStore {
    pub fn new(persistence: Box<dyn Persistence>) -> Self {
        Self { persistence }
    }

    fn now_iso() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Current snapshot. Seeds the slot when it is empty, unreadable,
    /// unparsable, or holds an empty sequence; read failures never surface.
    pub fn load_all(&self) -> ResultStore<Vec<Receipt>> {
        let payload = match self.persistence.load() {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!("receipt storage unreadable, reseeding: {err}");
                None
            }
        };

        if let Some(payload) = payload {
            match serde_json::from_str::<Vec<Receipt>>(&payload) {
                Ok(receipts) if !receipts.is_empty() => return Ok(receipts),
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!("receipt storage corrupt, reseeding: {err}");
                }
            }
        }

        let seeded = seed::seed(&Self::now_iso());
        self.save_all(&seeded)?;
        Ok(seeded)
    }

    fn save_all(&self, receipts: &[Receipt]) -> ResultStore<()> {
        let payload = serde_json::to_string_pretty(receipts).map_err(StoreError::Encode)?;
        self.persistence.save(&payload).map_err(StoreError::Storage)
    }

    /// All receipts, newest first by `created_at`.
    pub fn list_receipts(&self) -> ResultStore<Vec<Receipt>> {
        let mut receipts = self.load_all()?;
        receipts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(receipts)
    }

    /// Exact id match; a missing receipt is a normal outcome.
    pub fn get_receipt(&self, id: i64) -> ResultStore<Option<Receipt>> {
        Ok(self.load_all()?.into_iter().find(|receipt| receipt.id == id))
    }

    /// The owning receipt's items, or empty when the receipt is absent.
    pub fn list_items(&self, receipt_id: i64) -> ResultStore<Vec<LineItem>> {
        Ok(self
            .get_receipt(receipt_id)?
            .map(|receipt| receipt.items)
            .unwrap_or_default())
    }

    /// Swaps a receipt's items wholesale.
    ///
    /// The new batch gets a fresh contiguous id range starting above the
    /// current store-wide maximum item id, so ids from replaced batches are
    /// never reused. Returns `None` without mutating when the receipt does
    /// not exist.
    pub fn replace_items(
        &self,
        receipt_id: i64,
        drafts: &[LineItemDraft],
    ) -> ResultStore<Option<Vec<LineItem>>> {
        let mut receipts = self.load_all()?;
        let Some(index) = receipts.iter().position(|receipt| receipt.id == receipt_id) else {
            return Ok(None);
        };

        let next_id = 1 + receipts
            .iter()
            .flat_map(|receipt| receipt.items.iter())
            .map(|item| item.id)
            .max()
            .unwrap_or(0)
            .max(0);

        let items: Vec<LineItem> = drafts
            .iter()
            .enumerate()
            .map(|(offset, draft)| LineItem {
                id: next_id + offset as i64,
                receipt_id,
                item_name: draft.item_name.clone(),
                quantity: LooseNumber::from_draft(draft.quantity.clone()),
                unit_price: LooseNumber::from_draft(draft.unit_price.clone()),
                total_price: LooseNumber::from_draft(draft.total_price.clone()),
            })
            .collect();

        receipts[index].items = items.clone();
        self.save_all(&receipts)?;
        Ok(Some(items))
    }

    /// Synthesizes the placeholder receipt a local upload produces.
    ///
    /// No OCR runs here: the uploaded bytes are never inspected. The id is
    /// floored at 100 so generated ids cannot collide with seed ids, and the
    /// receipt is prepended so it lists as the most recent.
    pub fn create_receipt(&self) -> ResultStore<Receipt> {
        let mut receipts = self.load_all()?;
        let id = 1 + receipts
            .iter()
            .map(|receipt| receipt.id)
            .max()
            .unwrap_or(0)
            .max(100);

        let now = Utc::now();
        let created = Receipt {
            id,
            store_name: Some(PLACEHOLDER_STORE.to_string()),
            date: Some(now.format("%d/%m/%Y").to_string()),
            total_amount: PLACEHOLDER_AMOUNT.into(),
            category: Some(categorize(Some(PLACEHOLDER_STORE)).to_string()),
            image_path: "/demo/receipt-1.svg".to_string(),
            raw_text: Some("DEMO OCR TEXT".to_string()),
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            items: vec![LineItem {
                id: id * 100,
                receipt_id: id,
                item_name: Some("Mặt hàng demo".to_string()),
                quantity: 1.into(),
                unit_price: PLACEHOLDER_AMOUNT.into(),
                total_price: PLACEHOLDER_AMOUNT.into(),
            }],
        };

        receipts.insert(0, created.clone());
        self.save_all(&receipts)?;
        Ok(created)
    }

    /// Clears the durable slot; the next access re-seeds.
    pub fn reset(&self) -> ResultStore<()> {
        self.persistence.clear().map_err(StoreError::Storage)
    }
}
