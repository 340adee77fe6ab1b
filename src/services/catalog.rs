//! Public catalog browsing: featured products, category trees and search.

use crate::domain::category::{CategoryBranch, CategoryTree};
use crate::domain::product::Product;
use crate::domain::types::CategoryName;
use crate::repository::{CategoryReader, ProductListQuery, ProductReader};

use super::{ServiceError, ServiceResult};

/// The `count` most recently added products.
pub fn show_featured<R>(count: usize, repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader,
{
    repo.list_products(ProductListQuery::default().newest_first().limit(count))
        .map_err(|e| {
            log::error!("Failed to list featured products: {e}");
            ServiceError::Internal
        })
}

/// A root category with its direct children and their products.
///
/// Returns `Ok(None)` when no root category has this name.
pub fn show_category_tree<R>(root_name: &str, repo: &R) -> ServiceResult<Option<CategoryTree>>
where
    R: CategoryReader + ProductReader,
{
    let Ok(name) = CategoryName::new(root_name) else {
        return Ok(None);
    };

    let root = match repo.get_category_by_name(&name) {
        Ok(Some(category)) if category.is_root() => category,
        Ok(_) => return Ok(None),
        Err(e) => {
            log::error!("Failed to get category by name: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let children = repo.list_child_categories(root.id).map_err(|e| {
        log::error!("Failed to list child categories: {e}");
        ServiceError::Internal
    })?;

    let products = repo
        .list_products(
            ProductListQuery::default().in_categories(children.iter().map(|c| c.id).collect()),
        )
        .map_err(|e| {
            log::error!("Failed to list category products: {e}");
            ServiceError::Internal
        })?;

    let branches = children
        .into_iter()
        .map(|category| CategoryBranch {
            products: products
                .iter()
                .filter(|p| p.category_id == category.id)
                .cloned()
                .collect(),
            category,
        })
        .collect();

    Ok(Some(CategoryTree { root, branches }))
}

/// Products whose name or description contains `query`, ignoring case.
///
/// A blank query matches nothing.
pub fn search_products<R>(query: &str, repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Ok(vec![]);
    }

    let products = repo
        .list_products(ProductListQuery::default())
        .map_err(|e| {
            log::error!("Failed to list products for search: {e}");
            ServiceError::Internal
        })?;

    Ok(products.into_iter().filter(|p| p.matches(&needle)).collect())
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::domain::category::Category;
    use crate::domain::types::{
        CategoryId, ImageUrl, Money, ProductId, ProductName, StockQuantity,
    };
    use crate::repository::test::TestRepository;

    fn category(id: i32, name: &str, parent: Option<i32>) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(name).unwrap(),
            parent_id: parent.map(|p| CategoryId::new(p).unwrap()),
        }
    }

    fn product(id: i32, category_id: i32, name: &str, description: &str) -> Product {
        Product {
            id: ProductId::new(id).unwrap(),
            category_id: CategoryId::new(category_id).unwrap(),
            category: None,
            name: ProductName::new(name).unwrap(),
            description: description.to_string(),
            price: Money::from_cents(100).unwrap(),
            image_url: ImageUrl::new("https://example.com/p.png").unwrap(),
            stock: StockQuantity::new(1).unwrap(),
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    fn repo() -> TestRepository {
        TestRepository::new(
            vec![
                category(1, "Componentes", None),
                category(2, "Procesadores", Some(1)),
                category(3, "Memoria RAM", Some(1)),
                category(4, "Periféricos", None),
                category(5, "Teclados", Some(4)),
            ],
            vec![
                product(1, 2, "Ryzen 7", "Ocho núcleos"),
                product(2, 3, "Kit 16GB RAM DDR5", "Velocidad y rendimiento"),
                product(3, 5, "Teclado Mecánico RGB", "Luces personalizables"),
                product(4, 3, "Kit 32GB", "Más MEMORIA para tu PC"),
                product(5, 5, "Teclado compacto", ""),
            ],
        )
    }

    #[test]
    fn featured_returns_newest_first() {
        let featured = show_featured(4, &repo()).unwrap();

        let ids: Vec<i32> = featured.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![5, 4, 3, 2]);
    }

    #[test]
    fn category_tree_contains_direct_children_only() {
        let tree = show_category_tree("Componentes", &repo()).unwrap().unwrap();

        assert_eq!(tree.root.name.as_str(), "Componentes");
        let names: Vec<&str> = tree.branches.iter().map(|b| b.category.name.as_str()).collect();
        assert_eq!(names, vec!["Memoria RAM", "Procesadores"]);
        assert_eq!(tree.branches[0].products.len(), 2);
        assert_eq!(tree.branches[1].products.len(), 1);
        assert!(
            tree.branches
                .iter()
                .flat_map(|b| b.products.iter())
                .all(|p| p.name.as_str() != "Teclado Mecánico RGB")
        );
    }

    #[test]
    fn unknown_or_child_root_yields_empty_tree() {
        assert!(show_category_tree("Nope", &repo()).unwrap().is_none());
        assert!(show_category_tree("Teclados", &repo()).unwrap().is_none());
        assert!(show_category_tree("  ", &repo()).unwrap().is_none());
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_description() {
        let by_name = search_products("TECLADO", &repo()).unwrap();
        assert_eq!(by_name.len(), 2);

        let by_description = search_products("memoria", &repo()).unwrap();
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].id.get(), 4);
    }

    #[test]
    fn blank_search_returns_nothing() {
        assert!(search_products("   ", &repo()).unwrap().is_empty());
    }

    #[test]
    fn repository_failures_are_internal() {
        let repo = TestRepository::failing();

        assert_eq!(show_featured(4, &repo), Err(ServiceError::Internal));
    }
}
