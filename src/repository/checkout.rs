use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::result::Error as DieselError;

use crate::domain::checkout::{CheckoutOutcome, CheckoutRejection, plan_order};
use crate::domain::order::ShippingInfo;
use crate::domain::types::{OrderId, StockQuantity, UserId};
use crate::models::order::{NewOrder as DbNewOrder, NewOrderDetail as DbNewOrderDetail};
use crate::repository::cart::load_cart_lines;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CheckoutWriter, DieselRepository};

/// Failure inside the checkout transaction. Both variants roll it back.
#[derive(Debug)]
enum CheckoutTxError {
    Repository(RepositoryError),
    Rejected(CheckoutRejection),
}

impl From<DieselError> for CheckoutTxError {
    fn from(err: DieselError) -> Self {
        CheckoutTxError::Repository(err.into())
    }
}

impl From<RepositoryError> for CheckoutTxError {
    fn from(err: RepositoryError) -> Self {
        CheckoutTxError::Repository(err)
    }
}

impl CheckoutWriter for DieselRepository {
    fn commit_checkout(
        &self,
        user_id: &UserId,
        shipping: &ShippingInfo,
        placed_at: NaiveDateTime,
    ) -> RepositoryResult<CheckoutOutcome> {
        use crate::schema::{cart_items, order_details, orders, products};

        let mut conn = self.conn()?;

        // BEGIN IMMEDIATE takes the write lock before the cart is read, so
        // concurrent checkouts run one after another.
        let result = conn.immediate_transaction::<_, CheckoutTxError, _>(|conn| {
            let lines = load_cart_lines(conn, user_id)?;
            let order = plan_order(user_id, &lines, shipping.clone(), placed_at)
                .map_err(CheckoutTxError::Rejected)?;

            for line in &lines {
                let quantity = line.quantity.get();
                let affected = diesel::update(
                    products::table
                        .filter(products::id.eq(line.product.id.get()))
                        .filter(products::stock.ge(quantity)),
                )
                .set(products::stock.eq(products::stock - quantity))
                .execute(conn)?;

                if affected == 0 {
                    let available = products::table
                        .filter(products::id.eq(line.product.id.get()))
                        .select(products::stock)
                        .first::<i32>(conn)
                        .optional()?
                        .unwrap_or(0);
                    return Err(CheckoutTxError::Rejected(
                        CheckoutRejection::InsufficientStock {
                            product_name: line.product.name.clone(),
                            available: StockQuantity::new(available)
                                .map_err(RepositoryError::from)?,
                        },
                    ));
                }
            }

            let order_id = diesel::insert_into(orders::table)
                .values(DbNewOrder::from(&order))
                .returning(orders::id)
                .get_result::<i32>(conn)?;

            let details: Vec<DbNewOrderDetail> = order
                .details
                .iter()
                .map(|detail| DbNewOrderDetail::new(order_id, detail))
                .collect();
            diesel::insert_into(order_details::table)
                .values(&details)
                .execute(conn)?;

            diesel::delete(cart_items::table.filter(cart_items::user_id.eq(user_id.as_str())))
                .execute(conn)?;

            Ok(OrderId::new(order_id).map_err(RepositoryError::from)?)
        });

        match result {
            Ok(order_id) => Ok(CheckoutOutcome::Placed(order_id)),
            Err(CheckoutTxError::Rejected(rejection)) => Ok(CheckoutOutcome::Rejected(rejection)),
            Err(CheckoutTxError::Repository(err)) => Err(err),
        }
    }
}
