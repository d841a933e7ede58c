//! Logical endpoint table.
//!
//! Request paths are recognized structurally and carried as typed variants;
//! the same table serves demo dispatch and the read fallback. The HTTP verb
//! picks the handler for a path, so `/api/receipts/{id}/items` is one route
//! listed (GET) or replaced (PUT) depending on the dispatch entry point.

use api_types::receipt::ItemsReplace;
use engine::{ReceiptStore, stats};
use serde_json::Value;

use crate::error::{GatewayError, Result};

/// A logical endpoint of the receipt API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    ListReceipts,
    Receipt { id: i64 },
    ReceiptItems { receipt_id: i64 },
    UploadReceipt,
    SpendingByItem,
    CategoryTotals,
}

impl Route {
    /// Recognizes a request path; `None` when no endpoint matches.
    pub fn parse(path: &str) -> Option<Route> {
        match path {
            "/api/receipts" => return Some(Route::ListReceipts),
            "/api/receipts/upload" => return Some(Route::UploadReceipt),
            "/api/stats/spending-by-item" => return Some(Route::SpendingByItem),
            "/api/stats/category-totals" => return Some(Route::CategoryTotals),
            _ => {}
        }

        let rest = path.strip_prefix("/api/receipts/")?;
        match rest.split_once('/') {
            None => parse_id(rest).map(|id| Route::Receipt { id }),
            Some((id, "items")) => parse_id(id).map(|receipt_id| Route::ReceiptItems { receipt_id }),
            Some(_) => None,
        }
    }

    /// Canonical path, used when dispatching the route remotely.
    pub fn path(&self) -> String {
        match self {
            Route::ListReceipts => "/api/receipts".to_string(),
            Route::Receipt { id } => format!("/api/receipts/{id}"),
            Route::ReceiptItems { receipt_id } => format!("/api/receipts/{receipt_id}/items"),
            Route::UploadReceipt => "/api/receipts/upload".to_string(),
            Route::SpendingByItem => "/api/stats/spending-by-item".to_string(),
            Route::CategoryTotals => "/api/stats/category-totals".to_string(),
        }
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Serves routes from the local store and the aggregation functions, both
/// in demo mode and as the read fallback.
///
/// A missing entity surfaces as JSON `null`, never as an error; an empty
/// collection stays `[]`. A route the verb cannot serve is
/// [`GatewayError::UnknownRoute`].
pub struct LocalRouter {
    store: ReceiptStore,
}

impl LocalRouter {
    pub fn new(store: ReceiptStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ReceiptStore {
        &self.store
    }

    /// GET-shaped dispatch.
    pub fn get(&self, route: Route) -> Result<Value> {
        match route {
            Route::ListReceipts => Ok(serde_json::to_value(self.store.list_receipts()?)?),
            Route::Receipt { id } => Ok(serde_json::to_value(self.store.get_receipt(id)?)?),
            Route::ReceiptItems { receipt_id } => {
                Ok(serde_json::to_value(self.store.list_items(receipt_id)?)?)
            }
            Route::SpendingByItem => Ok(serde_json::to_value(stats::spending_by_item(
                &self.store.load_all()?,
            ))?),
            Route::CategoryTotals => Ok(serde_json::to_value(stats::category_totals(
                &self.store.load_all()?,
            ))?),
            Route::UploadReceipt => Err(GatewayError::UnknownRoute(route.path())),
        }
    }

    /// PUT-shaped dispatch (items replace only).
    pub fn put(&self, route: Route, payload: &Value) -> Result<Value> {
        match route {
            Route::ReceiptItems { receipt_id } => {
                let body: ItemsReplace = serde_json::from_value(payload.clone())?;
                Ok(serde_json::to_value(
                    self.store.replace_items(receipt_id, &body.items)?,
                )?)
            }
            _ => Err(GatewayError::UnknownRoute(route.path())),
        }
    }

    /// POST-form dispatch (upload only). The file bytes are never inspected
    /// locally; the store synthesizes its fixed placeholder receipt.
    pub fn post_form(&self, route: Route) -> Result<Value> {
        match route {
            Route::UploadReceipt => Ok(serde_json::to_value(self.store.create_receipt()?)?),
            _ => Err(GatewayError::UnknownRoute(route.path())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_fixed_paths() {
        assert_eq!(Route::parse("/api/receipts"), Some(Route::ListReceipts));
        assert_eq!(
            Route::parse("/api/receipts/upload"),
            Some(Route::UploadReceipt)
        );
        assert_eq!(
            Route::parse("/api/stats/spending-by-item"),
            Some(Route::SpendingByItem)
        );
        assert_eq!(
            Route::parse("/api/stats/category-totals"),
            Some(Route::CategoryTotals)
        );
    }

    #[test]
    fn recognizes_parameterized_paths() {
        assert_eq!(Route::parse("/api/receipts/101"), Some(Route::Receipt { id: 101 }));
        assert_eq!(
            Route::parse("/api/receipts/101/items"),
            Some(Route::ReceiptItems { receipt_id: 101 })
        );
    }

    #[test]
    fn rejects_everything_else() {
        assert_eq!(Route::parse("/api/unknown"), None);
        assert_eq!(Route::parse("/api/receipts/abc"), None);
        assert_eq!(Route::parse("/api/receipts/-5"), None);
        assert_eq!(Route::parse("/api/receipts/101/items/extra"), None);
        assert_eq!(Route::parse("/api/receipts/101/other"), None);
        assert_eq!(Route::parse("api/receipts"), None);
    }

    #[test]
    fn path_round_trips() {
        for path in [
            "/api/receipts",
            "/api/receipts/42",
            "/api/receipts/42/items",
            "/api/receipts/upload",
            "/api/stats/spending-by-item",
            "/api/stats/category-totals",
        ] {
            let route = Route::parse(path).unwrap();
            assert_eq!(route.path(), path);
        }
    }
}
