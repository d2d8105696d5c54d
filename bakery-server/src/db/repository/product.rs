//! Product Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::sales::money;

const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products, in-stock first then alphabetical
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY stock DESC, name ASC")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let rid = parse_record_id(PRODUCT_TABLE, id)?;
        let product: Option<Product> = self.base.db().select(rid).await?;
        Ok(product)
    }

    /// Find product by exact name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Product>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE name = $name LIMIT 1")
            .bind(("name", name_owned))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Create a new product; sale price is derived from cost and margin.
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.stock < 0 {
            return Err(RepoError::Validation(
                "stock must be non-negative".to_string(),
            ));
        }
        let margin = data.margin_percent.unwrap_or(30.0);
        let sale_price = money::derive_sale_price(data.cost, margin);

        let product = Product {
            id: None,
            name: data.name,
            description: data.description.unwrap_or_default(),
            cost: data.cost,
            sale_price,
            margin_percent: margin,
            stock: data.stock,
            unit: data.unit.unwrap_or_else(|| "unit".to_string()),
            image: data.image,
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product. Merges the partial payload over the stored record
    /// and re-derives the sale price whenever cost or margin change.
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let rid = parse_record_id(PRODUCT_TABLE, id)?;
        let mut product = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        if let Some(stock) = data.stock
            && stock < 0
        {
            return Err(RepoError::Validation(
                "stock must be non-negative".to_string(),
            ));
        }

        let reprice = data.cost.is_some() || data.margin_percent.is_some();
        let explicit_stock = data.stock;

        if let Some(v) = data.name {
            product.name = v;
        }
        if let Some(v) = data.description {
            product.description = v;
        }
        if let Some(v) = data.cost {
            product.cost = v;
        }
        if let Some(v) = data.margin_percent {
            product.margin_percent = v;
        }
        if let Some(v) = data.unit {
            product.unit = v;
        }
        if let Some(v) = data.image {
            product.image = Some(v);
        }
        if reprice {
            product.sale_price = money::derive_sale_price(product.cost, product.margin_percent);
        }

        // Stock is written only when the caller sent an explicit value;
        // echoing the merged value back would race with concurrent sales.
        let mut set_parts: Vec<&str> = vec![
            "name = $name",
            "description = $description",
            "cost = $cost",
            "sale_price = $sale_price",
            "margin_percent = $margin_percent",
            "unit = $unit",
            "image = $image",
        ];
        if explicit_stock.is_some() {
            set_parts.push("stock = $stock");
        }
        let query_str = format!("UPDATE $thing SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self
            .base
            .db()
            .query(query_str)
            .bind(("thing", rid))
            .bind(("name", product.name))
            .bind(("description", product.description))
            .bind(("cost", product.cost))
            .bind(("sale_price", product.sale_price))
            .bind(("margin_percent", product.margin_percent))
            .bind(("unit", product.unit))
            .bind(("image", product.image));
        if let Some(stock) = explicit_stock {
            query = query.bind(("stock", stock));
        }

        let mut result = query.await?;
        result
            .take::<Option<Product>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<Product> {
        let rid = parse_record_id(PRODUCT_TABLE, id)?;
        let deleted: Option<Product> = self.base.db().delete(rid).await?;
        deleted.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }
}
