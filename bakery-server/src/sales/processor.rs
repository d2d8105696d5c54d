//! Sale Transaction Processor
//!
//! Converts a submitted cart into a committed sale while enforcing stock
//! sufficiency atomically. The whole validate-then-decrement sequence plus
//! the sale insertion runs as one database transaction: concurrent sales
//! against the same product serialize at the storage layer, so stock can
//! never be oversold and no partial decrement is ever visible.
//!
//! The storage engine uses optimistic concurrency; a transaction that loses
//! a commit race is retried, at which point the stock check re-runs against
//! the committed state and reports a shortage to the client if one remains.
//!
//! This is the only code path that decrements product stock.

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use shared::{CustomerInfo, PaymentMethod, SaleRequest};

use crate::core::PriceSource;
use crate::db::models::Sale;
use crate::db::models::sale::ANONYMOUS_SELLER;
use crate::db::repository::{SaleRepository, parse_record_id};
use crate::sales::money;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Upper bound on lines per sale; keeps the generated transaction bounded.
const MAX_ITEMS: usize = 100;

/// Commit-race retries before giving up
const MAX_TX_ATTEMPTS: usize = 20;
/// Backoff step between retries
const TX_RETRY_BACKOFF_MS: u64 = 5;

/// Marker prefixes thrown inside the transaction and parsed back out of the
/// database error. The `|` separator never occurs in the numeric suffix.
const ERR_NOT_FOUND: &str = "SALE_NOT_FOUND:";
const ERR_BAD_QTY: &str = "SALE_BAD_QTY:";
const ERR_NO_STOCK: &str = "SALE_NO_STOCK:";

/// Who initiated the sale.
#[derive(Debug, Clone)]
pub enum SaleActor {
    /// Authenticated staff member
    Staff {
        id: RecordId,
        display_name: String,
    },
    /// Anonymous web-shop customer
    Anonymous,
}

impl SaleActor {
    fn into_parts(self) -> (Option<RecordId>, String) {
        match self {
            SaleActor::Staff { id, display_name } => (Some(id), display_name),
            SaleActor::Anonymous => (None, ANONYMOUS_SELLER.to_string()),
        }
    }
}

/// A validated line, ready for binding into the transaction.
struct ValidatedItem {
    key: String,
    label: String,
    quantity: i64,
}

/// The sale transaction processor.
#[derive(Clone)]
pub struct SaleProcessor {
    db: Surreal<Db>,
    price_source: PriceSource,
}

impl SaleProcessor {
    pub fn new(db: Surreal<Db>, price_source: PriceSource) -> Self {
        Self { db, price_source }
    }

    /// Process a sale request: validate every line, decrement stock and
    /// persist the sale — all or nothing.
    ///
    /// Replaying the same request creates a second sale and decrements
    /// stock again; idempotence is intentionally not provided.
    pub async fn process(&self, request: SaleRequest, actor: SaleActor) -> AppResult<Sale> {
        // ---- Pre-transaction validation (no mutation) ----
        if request.items.is_empty() {
            return Err(AppError::validation(
                "A sale must include at least one product",
            ));
        }
        if request.items.len() > MAX_ITEMS {
            return Err(AppError::validation(format!(
                "A sale may include at most {MAX_ITEMS} lines"
            )));
        }
        validate_required_text(&request.customer.name, "customer name", MAX_NAME_LEN)?;

        let mut items = Vec::with_capacity(request.items.len());
        for item in &request.items {
            money::validate_item_bounds(item)?;
            let rid = parse_record_id("product", &item.product_id).map_err(|_| {
                AppError::validation(format!("Invalid product reference: {}", item.product_id))
            })?;
            items.push(ValidatedItem {
                key: rid.key().to_string(),
                label: item.display_name().to_string(),
                quantity: item.quantity,
            });
        }

        let payment_method = request.payment_method.unwrap_or_default();
        let customer = normalize_customer(request.customer);
        let (sold_by, sold_by_name) = actor.into_parts();
        // Letter prefix keeps the key a plain identifier in query text
        let sale_key = format!("s{}", uuid::Uuid::new_v4().simple());

        // ---- Atomic phase, retried on commit races ----
        let query_str = build_transaction(self.price_source, items.len());
        let mut attempt = 0;
        loop {
            attempt += 1;
            let outcome = self
                .run_transaction(
                    &query_str,
                    &items,
                    &sale_key,
                    payment_method,
                    &customer,
                    &sold_by,
                    &sold_by_name,
                )
                .await;

            match outcome {
                Ok(()) => break,
                Err(msg) if is_commit_conflict(&msg) && attempt < MAX_TX_ATTEMPTS => {
                    tracing::debug!(attempt, "Sale transaction hit a commit race, retrying");
                    tokio::time::sleep(std::time::Duration::from_millis(
                        TX_RETRY_BACKOFF_MS * attempt as u64,
                    ))
                    .await;
                    continue;
                }
                Err(msg) => return Err(map_transaction_error(&msg)),
            }
        }

        // The transaction committed; read the sale back by its key.
        let repo = SaleRepository::new(self.db.clone());
        let sale = repo
            .find_by_id(&sale_key)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| {
                AppError::internal("Committed sale not found after transaction".to_string())
            })?;

        tracing::info!(
            sale_id = %sale.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            total = sale.total,
            items = sale.items.len(),
            seller = %sale.sold_by_name,
            payment = payment_method.as_str(),
            "Sale committed"
        );

        Ok(sale)
    }

    /// Execute one attempt of the transaction. Returns the raw error text
    /// on failure so the caller can distinguish retries from final errors.
    #[allow(clippy::too_many_arguments)]
    async fn run_transaction(
        &self,
        query_str: &str,
        items: &[ValidatedItem],
        sale_key: &str,
        payment_method: PaymentMethod,
        customer: &CustomerInfo,
        sold_by: &Option<RecordId>,
        sold_by_name: &str,
    ) -> Result<(), String> {
        let mut query = self.db.query(query_str.to_string());

        for (i, item) in items.iter().enumerate() {
            query = query
                .bind((format!("pid{i}"), item.key.clone()))
                .bind((format!("label{i}"), item.label.clone()))
                .bind((format!("qty{i}"), item.quantity));
        }

        let response = query
            .bind(("sale_id", sale_key.to_string()))
            .bind(("payment_method", payment_method.as_str().to_string()))
            .bind(("customer", customer.clone()))
            .bind(("sold_by", sold_by.clone()))
            .bind(("sold_by_name", sold_by_name.to_string()))
            .bind(("created_at", chrono::Utc::now().timestamp_millis()))
            .await
            .map_err(|e| e.to_string())?;

        response.check().map(|_| ()).map_err(|e| e.to_string())
    }
}

/// Build the transaction text for `n` line items.
///
/// Per item, in caller order: look the product up, then check the
/// quantity, then the stock, throwing on the first violation; finally
/// decrement. The sale is created from the snapshots. Everything between
/// BEGIN and COMMIT cancels together on the first THROW.
fn build_transaction(price_source: PriceSource, n: usize) -> String {
    let price_field = price_source.product_field();
    let mut q = String::from("BEGIN TRANSACTION;\n");

    for i in 0..n {
        q.push_str(&format!(
            "LET $p{i} = (SELECT * FROM type::thing('product', $pid{i}))[0];\n\
             IF $p{i} == NONE {{ THROW '{ERR_NOT_FOUND}' + $label{i} }};\n\
             IF $qty{i} < 1 {{ THROW '{ERR_BAD_QTY}' + $label{i} }};\n\
             IF $p{i}.stock < $qty{i} {{ THROW '{ERR_NO_STOCK}' + $p{i}.name + '|' + <string>$p{i}.stock }};\n\
             UPDATE type::thing('product', $pid{i}) SET stock -= $qty{i};\n"
        ));
    }

    let item_exprs: Vec<String> = (0..n)
        .map(|i| {
            format!(
                "{{ name: $p{i}.name, quantity: $qty{i}, unit_price: $p{i}.{price_field}, \
                 line_total: math::fixed($p{i}.{price_field} * $qty{i}, 2) }}"
            )
        })
        .collect();

    q.push_str(&format!("LET $items = [{}];\n", item_exprs.join(", ")));
    q.push_str(
        "CREATE type::thing('sale', $sale_id) CONTENT {\n\
         \titems: $items,\n\
         \ttotal: math::fixed(math::sum($items.line_total), 2),\n\
         \tpayment_method: $payment_method,\n\
         \tcustomer: $customer,\n\
         \tsold_by: $sold_by,\n\
         \tsold_by_name: $sold_by_name,\n\
         \tcreated_at: $created_at\n\
         };\n",
    );
    q.push_str("COMMIT TRANSACTION;");
    q
}

/// Trim the customer snapshot and drop empty optional fields.
fn normalize_customer(customer: CustomerInfo) -> CustomerInfo {
    let clean = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    CustomerInfo {
        name: customer.name.trim().to_string(),
        tax_id: clean(customer.tax_id),
        phone: clean(customer.phone),
        address: clean(customer.address),
    }
}

/// True for optimistic-concurrency commit failures that deserve a retry.
fn is_commit_conflict(msg: &str) -> bool {
    let lower = msg.to_lowercase();
    lower.contains("conflict") || lower.contains("resource busy")
}

/// Map a failed transaction into the client-facing error taxonomy.
///
/// The THROW markers travel inside the database error message; anything
/// without a marker is an infrastructure failure.
fn map_transaction_error(msg: &str) -> AppError {
    if let Some(pos) = msg.find(ERR_NOT_FOUND) {
        let label = msg[pos + ERR_NOT_FOUND.len()..]
            .trim_end_matches(|c: char| c == '"' || c == '\'' || c == '`')
            .trim();
        return AppError::not_found(format!("Product {} not found", label));
    }
    if let Some(pos) = msg.find(ERR_BAD_QTY) {
        let label = msg[pos + ERR_BAD_QTY.len()..]
            .trim_end_matches(|c: char| c == '"' || c == '\'' || c == '`')
            .trim();
        return AppError::validation(format!(
            "Invalid quantity for {}: must be a positive integer",
            label
        ));
    }
    if let Some(pos) = msg.find(ERR_NO_STOCK) {
        let payload = msg[pos + ERR_NO_STOCK.len()..]
            .trim_end_matches(|c: char| c == '"' || c == '\'' || c == '`')
            .trim();
        if let Some((name, available)) = payload.rsplit_once('|') {
            return AppError::insufficient_stock(format!(
                "Insufficient stock for {}. Available: {}",
                name, available
            ));
        }
        return AppError::insufficient_stock(format!("Insufficient stock for {}", payload));
    }
    AppError::database(format!("Sale transaction aborted: {msg}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_marker_maps_to_not_found() {
        let err = map_transaction_error("An error occurred: SALE_NOT_FOUND:Unicorn Cake");
        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "Product Unicorn Cake not found"),
            other => panic!("wrong error: {other:?}"),
        }
    }

    #[test]
    fn no_stock_marker_carries_name_and_available() {
        let err = map_transaction_error("An error occurred: SALE_NO_STOCK:Muffin|2");
        match err {
            AppError::InsufficientStock(msg) => {
                assert_eq!(msg, "Insufficient stock for Muffin. Available: 2")
            }
            other => panic!("wrong error: {other:?}"),
        }
    }

    #[test]
    fn bad_quantity_marker_maps_to_validation() {
        let err = map_transaction_error("An error occurred: SALE_BAD_QTY:Muffin");
        match err {
            AppError::Validation(msg) => assert!(msg.contains("Muffin")),
            other => panic!("wrong error: {other:?}"),
        }
    }

    #[test]
    fn unmarked_errors_are_infrastructure_failures() {
        let err = map_transaction_error("IO error: disk full");
        assert!(matches!(err, AppError::Database(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn commit_conflicts_are_detected() {
        assert!(is_commit_conflict(
            "Failed to commit transaction due to a read or write conflict"
        ));
        assert!(!is_commit_conflict("An error occurred: SALE_NO_STOCK:Muffin|2"));
    }

    #[test]
    fn anonymous_actor_uses_fixed_marker() {
        let (sold_by, name) = SaleActor::Anonymous.into_parts();
        assert!(sold_by.is_none());
        assert_eq!(name, ANONYMOUS_SELLER);
    }

    #[test]
    fn customer_snapshot_is_normalized() {
        let customer = normalize_customer(CustomerInfo {
            name: "  Ana  ".to_string(),
            tax_id: Some("  ".to_string()),
            phone: Some(" 555-1234 ".to_string()),
            address: None,
        });
        assert_eq!(customer.name, "Ana");
        assert!(customer.tax_id.is_none());
        assert_eq!(customer.phone.as_deref(), Some("555-1234"));
    }

    #[test]
    fn transaction_text_scales_with_items() {
        let q = build_transaction(PriceSource::Cost, 2);
        assert!(q.starts_with("BEGIN TRANSACTION;"));
        assert!(q.ends_with("COMMIT TRANSACTION;"));
        assert_eq!(q.matches("SALE_NOT_FOUND").count(), 2);
        assert_eq!(q.matches("UPDATE type::thing('product'").count(), 2);
        assert!(q.contains("unit_price: $p0.cost"));
        assert!(q.contains("CREATE type::thing('sale', $sale_id)"));
    }

    #[test]
    fn sale_price_policy_switches_snapshot_field() {
        let q = build_transaction(PriceSource::Sale, 1);
        assert!(q.contains("unit_price: $p0.sale_price"));
        assert!(!q.contains("unit_price: $p0.cost"));
    }
}
