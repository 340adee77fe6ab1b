use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::cart::{CartLine, CartMutation};
use crate::domain::category::{CatalogSeed, Category, NewCategory};
use crate::domain::checkout::CheckoutOutcome;
use crate::domain::order::{Order, ShippingInfo};
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{CategoryId, CategoryName, ProductId, Quantity, UserId};
use crate::repository::errors::RepositoryResult;

pub mod cart;
pub mod category;
pub mod checkout;
pub mod errors;
pub mod order;
pub mod product;
pub mod seed;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Restrict to products attached to one of these categories.
    pub category_ids: Option<Vec<CategoryId>>,
    /// Order by id descending instead of by name.
    pub newest_first: bool,
    /// Maximum number of products to return.
    pub limit: Option<usize>,
}

impl ProductListQuery {
    pub fn in_categories(mut self, category_ids: Vec<CategoryId>) -> Self {
        self.category_ids = Some(category_ids);
        self
    }
    pub fn newest_first(mut self) -> Self {
        self.newest_first = true;
        self
    }
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List products matching the query, each with its category name.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
    /// Retrieve a product by its identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
}

/// Administrative write operations for products.
pub trait ProductWriter {
    /// Persist a new product and return it.
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    /// Overwrite every editable field. Returns the number of affected rows.
    fn update_product(&self, id: ProductId, product: &NewProduct) -> RepositoryResult<usize>;
    /// Delete a product. Returns the number of affected rows.
    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// All categories ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    fn get_category_by_name(&self, name: &CategoryName) -> RepositoryResult<Option<Category>>;
    /// Direct children of `parent_id` ordered by name.
    fn list_child_categories(&self, parent_id: CategoryId) -> RepositoryResult<Vec<Category>>;
    /// Categories that have no children, ordered by name.
    fn list_leaf_categories(&self) -> RepositoryResult<Vec<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category and return it.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
}

/// Read-only operations on carts.
pub trait CartReader {
    /// Cart lines of `user_id` in the order they were added, joined with the
    /// current product data.
    fn list_cart_lines(&self, user_id: &UserId) -> RepositoryResult<Vec<CartLine>>;
}

/// Cart mutations. Each call runs in its own transaction and commits
/// immediately.
pub trait CartWriter {
    /// Adds `delta` units of a product, creating the line if needed.
    ///
    /// Returns [`errors::RepositoryError::NotFound`] when the product does
    /// not exist.
    fn add_to_cart(
        &self,
        user_id: &UserId,
        product_id: ProductId,
        delta: Quantity,
    ) -> RepositoryResult<CartMutation>;
    /// Sets the quantity of an existing line; zero or less removes it.
    ///
    /// Returns [`errors::RepositoryError::NotFound`] when the line does not
    /// exist.
    fn set_cart_quantity(
        &self,
        user_id: &UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> RepositoryResult<CartMutation>;
}

/// Read-only operations for order history.
pub trait OrderReader {
    /// Orders of `user_id`, newest first, each with its details.
    fn list_orders(&self, user_id: &UserId) -> RepositoryResult<Vec<Order>>;
}

/// Turns a cart into an order.
pub trait CheckoutWriter {
    /// Validates the cart against stock and, when it passes, decrements
    /// stock, inserts the order and clears the cart in one transaction.
    ///
    /// Business rejections are returned as [`CheckoutOutcome::Rejected`]
    /// after the transaction rolled back.
    fn commit_checkout(
        &self,
        user_id: &UserId,
        shipping: &ShippingInfo,
        placed_at: NaiveDateTime,
    ) -> RepositoryResult<CheckoutOutcome>;
}

/// Bulk insert of a starter catalog.
pub trait CatalogSeeder {
    /// Inserts every category and product of `seed` in one transaction,
    /// unless the catalog already has categories.
    ///
    /// Returns the number of inserted products, or `None` when the catalog
    /// was not empty. A product naming a category that is not one of the
    /// seeded children aborts the whole import with
    /// [`errors::RepositoryError::ValidationError`].
    fn seed_catalog(&self, seed: &CatalogSeed) -> RepositoryResult<Option<usize>>;
}
