use std::collections::HashMap;

use diesel::prelude::*;

use crate::domain::category::{CatalogSeed, NewCategory};
use crate::domain::product::NewProduct;
use crate::domain::types::CategoryId;
use crate::models::category::NewCategory as DbNewCategory;
use crate::models::product::NewProduct as DbNewProduct;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CatalogSeeder, DieselRepository};

fn insert_category(
    conn: &mut SqliteConnection,
    category: &NewCategory,
) -> RepositoryResult<CategoryId> {
    use crate::schema::categories;

    let db_category: DbNewCategory = category.into();
    let id = diesel::insert_into(categories::table)
        .values(&db_category)
        .returning(categories::id)
        .get_result::<i32>(conn)?;

    Ok(CategoryId::new(id)?)
}

impl CatalogSeeder for DieselRepository {
    fn seed_catalog(&self, seed: &CatalogSeed) -> RepositoryResult<Option<usize>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let existing = categories::table.count().get_result::<i64>(conn)?;
            if existing > 0 {
                return Ok(None);
            }

            let mut children: HashMap<&str, CategoryId> = HashMap::new();
            for root in &seed.roots {
                let root_id = insert_category(
                    conn,
                    &NewCategory {
                        name: root.name.clone(),
                        parent_id: None,
                    },
                )?;
                for child in &root.children {
                    let child_id = insert_category(
                        conn,
                        &NewCategory {
                            name: child.clone(),
                            parent_id: Some(root_id),
                        },
                    )?;
                    children.insert(child.as_str(), child_id);
                }
            }

            for product in &seed.products {
                let category_id = children
                    .get(product.category.as_str())
                    .copied()
                    .ok_or_else(|| {
                        RepositoryError::ValidationError(format!(
                            "product {} names unknown category {}",
                            product.name.as_str(),
                            product.category.as_str()
                        ))
                    })?;
                let db_product: DbNewProduct = (&NewProduct {
                    category_id,
                    name: product.name.clone(),
                    description: product.description.clone(),
                    price: product.price,
                    image_url: product.image_url.clone(),
                    stock: product.stock,
                })
                    .into();
                diesel::insert_into(products::table)
                    .values(&db_product)
                    .execute(conn)?;
            }

            Ok(Some(seed.products.len()))
        })
    }
}
