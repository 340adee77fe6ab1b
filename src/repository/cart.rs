use diesel::dsl::max;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::cart::{CartItem, CartLine, CartMutation, check_add, check_set};
use crate::domain::types::{ProductId, Quantity, StockQuantity, UserId};
use crate::models::cart_item::NewCartItem;
use crate::models::product::Product as DbProduct;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CartReader, CartWriter, DieselRepository};

/// Loads the cart of `user_id` with the products as they are right now.
pub(crate) fn load_cart_lines(
    conn: &mut SqliteConnection,
    user_id: &UserId,
) -> RepositoryResult<Vec<CartLine>> {
    use crate::schema::{cart_items, products};

    let rows = cart_items::table
        .inner_join(products::table)
        .filter(cart_items::user_id.eq(user_id.as_str()))
        .order(cart_items::position.asc())
        .select((cart_items::quantity, DbProduct::as_select()))
        .load::<(i32, DbProduct)>(conn)?;

    let lines = rows
        .into_iter()
        .map(|(quantity, product)| {
            Ok(CartLine {
                product: product.try_into()?,
                quantity: Quantity::new(quantity)?,
            })
        })
        .collect::<RepositoryResult<Vec<CartLine>>>()?;

    Ok(lines)
}

impl CartReader for DieselRepository {
    fn list_cart_lines(&self, user_id: &UserId) -> RepositoryResult<Vec<CartLine>> {
        let mut conn = self.conn()?;
        load_cart_lines(&mut conn, user_id)
    }
}

impl CartWriter for DieselRepository {
    fn add_to_cart(
        &self,
        user_id: &UserId,
        product_id: ProductId,
        delta: Quantity,
    ) -> RepositoryResult<CartMutation> {
        use crate::schema::{cart_items, products};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let stock = products::table
                .filter(products::id.eq(product_id.get()))
                .select(products::stock)
                .first::<i32>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;
            let stock = StockQuantity::new(stock)?;

            let existing = cart_items::table
                .filter(cart_items::user_id.eq(user_id.as_str()))
                .filter(cart_items::product_id.eq(product_id.get()))
                .select(cart_items::quantity)
                .first::<i32>(conn)
                .optional()?
                .map(Quantity::new)
                .transpose()?;

            let quantity = match check_add(existing, delta, stock) {
                Ok(quantity) => quantity,
                Err(rejection) => return Ok(CartMutation::Rejected(rejection)),
            };

            if existing.is_some() {
                diesel::update(
                    cart_items::table
                        .filter(cart_items::user_id.eq(user_id.as_str()))
                        .filter(cart_items::product_id.eq(product_id.get())),
                )
                .set(cart_items::quantity.eq(quantity.get()))
                .execute(conn)?;
            } else {
                let last_position = cart_items::table
                    .filter(cart_items::user_id.eq(user_id.as_str()))
                    .select(max(cart_items::position))
                    .first::<Option<i32>>(conn)?;
                diesel::insert_into(cart_items::table)
                    .values(NewCartItem {
                        user_id: user_id.as_str(),
                        product_id: product_id.get(),
                        quantity: quantity.get(),
                        position: last_position.map_or(1, |p| p.saturating_add(1)),
                    })
                    .execute(conn)?;
            }

            Ok(CartMutation::Saved(CartItem {
                user_id: user_id.clone(),
                product_id,
                quantity,
            }))
        })
    }

    fn set_cart_quantity(
        &self,
        user_id: &UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> RepositoryResult<CartMutation> {
        use crate::schema::{cart_items, products};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let (current, stock) = cart_items::table
                .inner_join(products::table)
                .filter(cart_items::user_id.eq(user_id.as_str()))
                .filter(cart_items::product_id.eq(product_id.get()))
                .select((cart_items::quantity, products::stock))
                .first::<(i32, i32)>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            let line = cart_items::table
                .filter(cart_items::user_id.eq(user_id.as_str()))
                .filter(cart_items::product_id.eq(product_id.get()));

            match check_set(
                Quantity::new(current)?,
                quantity,
                StockQuantity::new(stock)?,
            ) {
                Err(rejection) => Ok(CartMutation::Rejected(rejection)),
                Ok(None) => {
                    diesel::delete(line).execute(conn)?;
                    Ok(CartMutation::Removed)
                }
                Ok(Some(quantity)) => {
                    diesel::update(line)
                        .set(cart_items::quantity.eq(quantity.get()))
                        .execute(conn)?;
                    Ok(CartMutation::Saved(CartItem {
                        user_id: user_id.clone(),
                        product_id,
                        quantity,
                    }))
                }
            }
        })
    }
}
