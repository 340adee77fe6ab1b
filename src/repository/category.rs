use std::collections::HashSet;

use diesel::prelude::*;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{CategoryId, CategoryName};
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let items = categories::table
            .order(categories::name.asc())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(id.get()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn get_category_by_name(&self, name: &CategoryName) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::name.eq(name.as_str()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn list_child_categories(&self, parent_id: CategoryId) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let items = categories::table
            .filter(categories::parent_id.eq(parent_id.get()))
            .order(categories::name.asc())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn list_leaf_categories(&self) -> RepositoryResult<Vec<Category>> {
        let categories = self.list_categories()?;
        let parents: HashSet<CategoryId> = categories.iter().filter_map(|c| c.parent_id).collect();

        Ok(categories
            .into_iter()
            .filter(|c| !parents.contains(&c.id))
            .collect())
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.into();

        let created = diesel::insert_into(categories::table)
            .values(&db_category)
            .returning(DbCategory::as_returning())
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.try_into()?)
    }
}
