use diesel::prelude::*;

use crate::domain::product::{NewProduct, Product};
use crate::domain::types::ProductId;
use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProductListQuery, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        let mut items = products::table
            .inner_join(categories::table)
            .select((DbProduct::as_select(), categories::name))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_ids) = &query.category_ids {
            let ids: Vec<i32> = category_ids.iter().map(|id| id.get()).collect();
            items = items.filter(products::category_id.eq_any(ids));
        }

        items = if query.newest_first {
            items.order(products::id.desc())
        } else {
            items.order((products::name.asc(), products::id.asc()))
        };

        if let Some(limit) = query.limit {
            items = items.limit(limit as i64);
        }

        let items = items
            .load::<(DbProduct, String)>(&mut conn)?
            .into_iter()
            .map(|(product, category)| product.into_domain(Some(category)))
            .collect::<Result<Vec<Product>, _>>()?;

        Ok(items)
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        let product = products::table
            .inner_join(categories::table)
            .filter(products::id.eq(id.get()))
            .select((DbProduct::as_select(), categories::name))
            .first::<(DbProduct, String)>(&mut conn)
            .optional()?;

        let product = product
            .map(|(product, category)| product.into_domain(Some(category)))
            .transpose()?;
        Ok(product)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product: DbNewProduct = product.into();

        let created = diesel::insert_into(products::table)
            .values(&db_product)
            .returning(DbProduct::as_returning())
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_product(&self, id: ProductId, product: &NewProduct) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product: DbNewProduct = product.into();

        let affected = diesel::update(products::table.filter(products::id.eq(id.get())))
            .set(&db_product)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(products::table.filter(products::id.eq(id.get()))).execute(&mut conn)?;

        Ok(affected)
    }
}
