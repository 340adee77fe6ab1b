use std::collections::HashMap;

use diesel::prelude::*;

use crate::domain::order::{Order, OrderDetail};
use crate::domain::types::UserId;
use crate::models::order::{Order as DbOrder, OrderDetail as DbOrderDetail};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, OrderReader};

impl OrderReader for DieselRepository {
    fn list_orders(&self, user_id: &UserId) -> RepositoryResult<Vec<Order>> {
        use crate::schema::{order_details, orders, products};

        let mut conn = self.conn()?;

        let db_orders = orders::table
            .filter(orders::user_id.eq(user_id.as_str()))
            .order((orders::created_at.desc(), orders::id.desc()))
            .select(DbOrder::as_select())
            .load::<DbOrder>(&mut conn)?;

        let order_ids: Vec<i32> = db_orders.iter().map(|order| order.id).collect();

        let rows = order_details::table
            .inner_join(products::table)
            .filter(order_details::order_id.eq_any(order_ids))
            .order(order_details::id.asc())
            .select((DbOrderDetail::as_select(), products::name))
            .load::<(DbOrderDetail, String)>(&mut conn)?;

        let mut details: HashMap<i32, Vec<OrderDetail>> = HashMap::new();
        for (detail, product_name) in rows {
            let order_id = detail.order_id;
            details
                .entry(order_id)
                .or_default()
                .push(detail.into_domain(product_name)?);
        }

        let orders = db_orders
            .into_iter()
            .map(|order| {
                let lines = details.remove(&order.id).unwrap_or_default();
                order.into_domain(lines)
            })
            .collect::<Result<Vec<Order>, _>>()?;

        Ok(orders)
    }
}
