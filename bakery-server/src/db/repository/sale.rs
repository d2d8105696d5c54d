//! Sale Repository
//!
//! Read-only queries over committed sales. Creation goes through the sale
//! transaction processor, never through this repository.

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult, parse_record_id};
use crate::db::models::Sale;

const SALE_TABLE: &str = "sale";

/// Filters for sale history queries. All fields optional and combined
/// with AND.
#[derive(Debug, Clone, Default)]
pub struct SaleFilter {
    /// Inclusive lower bound (Unix millis)
    pub from_millis: Option<i64>,
    /// Exclusive upper bound (Unix millis)
    pub to_millis: Option<i64>,
    /// Case-insensitive substring match on the seller display name
    pub seller: Option<String>,
    /// Exact payment method name
    pub payment_method: Option<String>,
    /// Restrict to one staff member's sales
    pub sold_by: Option<RecordId>,
}

#[derive(Clone)]
pub struct SaleRepository {
    base: BaseRepository,
}

impl SaleRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find sale by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Sale>> {
        let rid = parse_record_id(SALE_TABLE, id)?;
        let sale: Option<Sale> = self.base.db().select(rid).await?;
        Ok(sale)
    }

    /// Find sales matching the filter, newest first.
    ///
    /// The WHERE clause is assembled dynamically so only supplied filters
    /// are bound.
    pub async fn find_filtered(&self, filter: SaleFilter) -> RepoResult<Vec<Sale>> {
        let mut conditions: Vec<&str> = Vec::new();

        if filter.from_millis.is_some() {
            conditions.push("created_at >= $from");
        }
        if filter.to_millis.is_some() {
            conditions.push("created_at < $to");
        }
        if filter.seller.is_some() {
            conditions.push("string::contains(string::lowercase(sold_by_name), $seller)");
        }
        if filter.payment_method.is_some() {
            conditions.push("payment_method = $method");
        }
        if filter.sold_by.is_some() {
            conditions.push("sold_by = $sold_by");
        }

        let query_str = if conditions.is_empty() {
            "SELECT * FROM sale ORDER BY created_at DESC".to_string()
        } else {
            format!(
                "SELECT * FROM sale WHERE {} ORDER BY created_at DESC",
                conditions.join(" AND ")
            )
        };

        let mut query = self.base.db().query(query_str);

        if let Some(v) = filter.from_millis {
            query = query.bind(("from", v));
        }
        if let Some(v) = filter.to_millis {
            query = query.bind(("to", v));
        }
        if let Some(v) = filter.seller {
            query = query.bind(("seller", v.to_lowercase()));
        }
        if let Some(v) = filter.payment_method {
            query = query.bind(("method", v));
        }
        if let Some(v) = filter.sold_by {
            query = query.bind(("sold_by", v));
        }

        let sales: Vec<Sale> = query.await?.take(0)?;
        Ok(sales)
    }

    /// One staff member's sales inside a time window, newest first
    pub async fn find_for_staff_between(
        &self,
        staff: RecordId,
        from_millis: i64,
        to_millis: i64,
    ) -> RepoResult<Vec<Sale>> {
        self.find_filtered(SaleFilter {
            from_millis: Some(from_millis),
            to_millis: Some(to_millis),
            sold_by: Some(staff),
            ..Default::default()
        })
        .await
    }
}
