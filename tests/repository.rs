use chrono::{DateTime, NaiveDateTime};
use pushkind_store::domain::cart::{CartMutation, CartRejection};
use pushkind_store::domain::category::{
    CatalogSeed, Category, NewCategory, SeedProduct, SeedRoot,
};
use pushkind_store::domain::checkout::{CheckoutOutcome, CheckoutRejection};
use pushkind_store::domain::order::ShippingInfo;
use pushkind_store::domain::product::{NewProduct, Product};
use pushkind_store::domain::types::{
    CategoryName, ImageUrl, Money, PostalCode, ProductId, ProductName, Quantity,
    ShippingAddress, ShippingCity, ShippingName, StockQuantity, UserId,
};
use pushkind_store::repository::errors::RepositoryError;
use pushkind_store::repository::{
    CartReader, CartWriter, CatalogSeeder, CategoryReader, CategoryWriter, CheckoutWriter,
    DieselRepository, OrderReader, ProductListQuery, ProductReader, ProductWriter,
};

mod common;

fn at(seconds: i64) -> NaiveDateTime {
    DateTime::from_timestamp(1_700_000_000 + seconds, 0)
        .expect("valid timestamp")
        .naive_utc()
}

fn user(name: &str) -> UserId {
    UserId::new(name).expect("valid user id")
}

fn qty(value: i32) -> Quantity {
    Quantity::new(value).expect("valid quantity")
}

fn shipping() -> ShippingInfo {
    ShippingInfo {
        name: ShippingName::new("Ada Lovelace").unwrap(),
        address: ShippingAddress::new("12 Analytical Row").unwrap(),
        city: ShippingCity::new("London").unwrap(),
        postal_code: PostalCode::new("N1 9GU").unwrap(),
    }
}

fn category(repo: &DieselRepository, name: &str, parent: Option<&Category>) -> Category {
    repo.create_category(&NewCategory {
        name: CategoryName::new(name).unwrap(),
        parent_id: parent.map(|p| p.id),
    })
    .expect("should create category")
}

fn new_product(category: &Category, name: &str, price_cents: i64, stock: i32) -> NewProduct {
    NewProduct {
        category_id: category.id,
        name: ProductName::new(name).unwrap(),
        description: format!("{name} description"),
        price: Money::from_cents(price_cents).unwrap(),
        image_url: ImageUrl::new("https://example.com/product.jpg").unwrap(),
        stock: StockQuantity::new(stock).unwrap(),
    }
}

fn product(repo: &DieselRepository, category: &Category, name: &str, cents: i64, stock: i32) -> Product {
    repo.create_product(&new_product(category, name, cents, stock))
        .expect("should create product")
}

fn stock_of(repo: &DieselRepository, id: ProductId) -> i32 {
    repo.get_product_by_id(id)
        .expect("should read product")
        .expect("product exists")
        .stock
        .get()
}

/// Catalog with one root, one leaf and the two products of the checkout
/// scenarios: A priced 100.00 with 5 in stock, B sold out.
fn store() -> (common::TestDb, DieselRepository, Product, Product) {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let root = category(&repo, "Audio", None);
    let leaf = category(&repo, "Headphones", Some(&root));
    let a = product(&repo, &leaf, "ProductA", 10_000, 5);
    let b = product(&repo, &leaf, "ProductB", 2_500, 0);
    (test_db, repo, a, b)
}

#[test]
fn add_to_cart_creates_then_increments_line() {
    let (_db, repo, a, _) = store();
    let u = user("alice");

    let first = repo.add_to_cart(&u, a.id, qty(1)).unwrap();
    assert!(matches!(first, CartMutation::Saved(ref item) if item.quantity.get() == 1));

    let second = repo.add_to_cart(&u, a.id, qty(2)).unwrap();
    assert!(matches!(second, CartMutation::Saved(ref item) if item.quantity.get() == 3));

    let lines = repo.list_cart_lines(&u).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity.get(), 3);
    assert_eq!(lines[0].product.name.as_str(), "ProductA");
}

#[test]
fn add_to_cart_rejects_sold_out_and_overflowing_quantities() {
    let (_db, repo, a, b) = store();
    let u = user("alice");

    assert_eq!(
        repo.add_to_cart(&u, b.id, qty(1)).unwrap(),
        CartMutation::Rejected(CartRejection::OutOfStock {
            available: StockQuantity::new(0).unwrap()
        })
    );

    repo.add_to_cart(&u, a.id, qty(5)).unwrap();
    assert_eq!(
        repo.add_to_cart(&u, a.id, qty(1)).unwrap(),
        CartMutation::Rejected(CartRejection::OutOfStock {
            available: StockQuantity::new(5).unwrap()
        })
    );
    assert_eq!(repo.list_cart_lines(&u).unwrap()[0].quantity.get(), 5);
}

#[test]
fn add_to_cart_of_missing_product_is_not_found() {
    let (_db, repo, _, _) = store();
    let result = repo.add_to_cart(&user("alice"), ProductId::new(999).unwrap(), qty(1));
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[test]
fn set_quantity_overwrites_removes_and_reports_missing_lines() {
    let (_db, repo, a, _) = store();
    let u = user("alice");
    repo.add_to_cart(&u, a.id, qty(1)).unwrap();

    let updated = repo.set_cart_quantity(&u, a.id, 4).unwrap();
    assert!(matches!(updated, CartMutation::Saved(ref item) if item.quantity.get() == 4));

    assert_eq!(
        repo.set_cart_quantity(&u, a.id, 6).unwrap(),
        CartMutation::Rejected(CartRejection::OutOfStock {
            available: StockQuantity::new(5).unwrap()
        })
    );

    assert_eq!(repo.set_cart_quantity(&u, a.id, 0).unwrap(), CartMutation::Removed);
    assert!(repo.list_cart_lines(&u).unwrap().is_empty());

    let again = repo.set_cart_quantity(&u, a.id, 0);
    assert!(matches!(again, Err(RepositoryError::NotFound)));
}

#[test]
fn carts_are_isolated_per_user() {
    let (_db, repo, a, _) = store();
    repo.add_to_cart(&user("alice"), a.id, qty(2)).unwrap();

    assert!(repo.list_cart_lines(&user("bob")).unwrap().is_empty());
    assert_eq!(repo.list_cart_lines(&user("alice")).unwrap().len(), 1);
}

#[test]
fn cart_lines_reflect_current_product_price() {
    let (_db, repo, a, _) = store();
    let u = user("alice");
    repo.add_to_cart(&u, a.id, qty(1)).unwrap();

    let leaf = repo.get_category_by_id(a.category_id).unwrap().unwrap();
    let changed = new_product(&leaf, "ProductA", 12_000, 5);
    assert_eq!(repo.update_product(a.id, &changed).unwrap(), 1);

    let lines = repo.list_cart_lines(&u).unwrap();
    assert_eq!(lines[0].product.price.cents(), 12_000);
}

#[test]
fn checkout_places_order_decrements_stock_and_clears_cart() {
    let (_db, repo, a, _) = store();
    let u = user("alice");
    repo.add_to_cart(&u, a.id, qty(2)).unwrap();

    let outcome = repo.commit_checkout(&u, &shipping(), at(0)).unwrap();
    let CheckoutOutcome::Placed(order_id) = outcome else {
        panic!("expected an order, got {outcome:?}");
    };

    assert_eq!(stock_of(&repo, a.id), 3);
    assert!(repo.list_cart_lines(&u).unwrap().is_empty());

    let orders = repo.list_orders(&u).unwrap();
    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.id, order_id);
    assert_eq!(order.total, Money::from_cents(20_000).unwrap());
    assert_eq!(order.shipping, shipping());
    assert_eq!(order.details.len(), 1);
    assert_eq!(order.details[0].product_name.as_str(), "ProductA");
    assert_eq!(order.details[0].quantity.get(), 2);
    assert_eq!(order.details[0].price.cents(), 10_000);
}

#[test]
fn checkout_with_short_line_changes_nothing() {
    let (_db, repo, a, b) = store();
    let u = user("alice");
    repo.add_to_cart(&u, a.id, qty(2)).unwrap();
    // B sells out after it was added to the cart.
    let leaf = repo.get_category_by_id(b.category_id).unwrap().unwrap();
    repo.update_product(b.id, &new_product(&leaf, "ProductB", 2_500, 1))
        .unwrap();
    repo.add_to_cart(&u, b.id, qty(1)).unwrap();
    repo.update_product(b.id, &new_product(&leaf, "ProductB", 2_500, 0))
        .unwrap();

    let outcome = repo.commit_checkout(&u, &shipping(), at(0)).unwrap();
    assert_eq!(
        outcome,
        CheckoutOutcome::Rejected(CheckoutRejection::InsufficientStock {
            product_name: ProductName::new("ProductB").unwrap(),
            available: StockQuantity::new(0).unwrap(),
        })
    );

    assert_eq!(stock_of(&repo, a.id), 5);
    assert_eq!(stock_of(&repo, b.id), 0);
    assert_eq!(repo.list_cart_lines(&u).unwrap().len(), 2);
    assert!(repo.list_orders(&u).unwrap().is_empty());
}

fn cart_names(repo: &DieselRepository, user_id: &UserId) -> Vec<String> {
    repo.list_cart_lines(user_id)
        .unwrap()
        .into_iter()
        .map(|line| line.product.name.into_inner())
        .collect()
}

#[test]
fn cart_lines_keep_the_order_they_were_added() {
    let (_db, repo, a, b) = store();
    let leaf = repo.get_category_by_id(a.category_id).unwrap().unwrap();
    let c = product(&repo, &leaf, "ProductC", 700, 3);
    let u = user("alice");

    // All of these land within the same second.
    let sold_out = repo.add_to_cart(&u, b.id, qty(1)).unwrap();
    assert!(matches!(sold_out, CartMutation::Rejected(_)));
    repo.add_to_cart(&u, c.id, qty(1)).unwrap();
    repo.add_to_cart(&u, a.id, qty(1)).unwrap();
    repo.add_to_cart(&u, c.id, qty(1)).unwrap();
    assert_eq!(cart_names(&repo, &u), vec!["ProductC", "ProductA"]);

    repo.set_cart_quantity(&u, c.id, 0).unwrap();
    repo.add_to_cart(&u, c.id, qty(1)).unwrap();
    assert_eq!(cart_names(&repo, &u), vec!["ProductA", "ProductC"]);
}

#[test]
fn checkout_reports_first_short_line_in_cart_order() {
    let (_db, repo, a, _) = store();
    let leaf = repo.get_category_by_id(a.category_id).unwrap().unwrap();
    let c = product(&repo, &leaf, "ProductC", 700, 3);
    let u = user("alice");
    repo.add_to_cart(&u, c.id, qty(3)).unwrap();
    repo.add_to_cart(&u, a.id, qty(5)).unwrap();

    repo.update_product(c.id, &new_product(&leaf, "ProductC", 700, 1))
        .unwrap();
    repo.update_product(a.id, &new_product(&leaf, "ProductA", 10_000, 2))
        .unwrap();

    let outcome = repo.commit_checkout(&u, &shipping(), at(0)).unwrap();
    assert_eq!(
        outcome,
        CheckoutOutcome::Rejected(CheckoutRejection::InsufficientStock {
            product_name: ProductName::new("ProductC").unwrap(),
            available: StockQuantity::new(1).unwrap(),
        })
    );
}

#[test]
fn concurrent_checkouts_never_oversell() {
    let (_db, repo, a, _) = store();
    let buyers: Vec<UserId> = (0..8).map(|i| user(&format!("buyer-{i}"))).collect();
    for buyer in &buyers {
        repo.add_to_cart(buyer, a.id, qty(1)).unwrap();
    }

    let handles: Vec<_> = buyers
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, buyer)| {
            let repo = repo.clone();
            std::thread::spawn(move || repo.commit_checkout(&buyer, &shipping(), at(i as i64)))
        })
        .collect();
    let outcomes: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("checkout thread panicked"))
        .collect();

    let mut placed = 0;
    for outcome in outcomes {
        match outcome.expect("checkout should not fail with a repository error") {
            CheckoutOutcome::Placed(_) => placed += 1,
            CheckoutOutcome::Rejected(rejection) => assert_eq!(
                rejection,
                CheckoutRejection::InsufficientStock {
                    product_name: ProductName::new("ProductA").unwrap(),
                    available: StockQuantity::new(0).unwrap(),
                }
            ),
        }
    }

    assert_eq!(placed, 5);
    assert_eq!(stock_of(&repo, a.id), 0);
    let orders: usize = buyers
        .iter()
        .map(|buyer| repo.list_orders(buyer).unwrap().len())
        .sum();
    assert_eq!(orders, 5);
}

#[test]
fn checkout_of_empty_cart_is_rejected() {
    let (_db, repo, _, _) = store();
    let outcome = repo
        .commit_checkout(&user("alice"), &shipping(), at(0))
        .unwrap();
    assert_eq!(
        outcome,
        CheckoutOutcome::Rejected(CheckoutRejection::EmptyCart)
    );
}

#[test]
fn second_checkout_fails_once_stock_is_drained() {
    let (_db, repo, a, _) = store();
    let (alice, bob) = (user("alice"), user("bob"));
    repo.add_to_cart(&alice, a.id, qty(3)).unwrap();
    repo.add_to_cart(&bob, a.id, qty(3)).unwrap();

    let first = repo.commit_checkout(&alice, &shipping(), at(0)).unwrap();
    assert!(matches!(first, CheckoutOutcome::Placed(_)));

    let second = repo.commit_checkout(&bob, &shipping(), at(1)).unwrap();
    assert_eq!(
        second,
        CheckoutOutcome::Rejected(CheckoutRejection::InsufficientStock {
            product_name: ProductName::new("ProductA").unwrap(),
            available: StockQuantity::new(2).unwrap(),
        })
    );
    assert_eq!(stock_of(&repo, a.id), 2);
    assert_eq!(repo.list_cart_lines(&bob).unwrap().len(), 1);
}

#[test]
fn order_history_is_newest_first_and_per_user() {
    let (_db, repo, a, _) = store();
    let (alice, bob) = (user("alice"), user("bob"));

    repo.add_to_cart(&alice, a.id, qty(1)).unwrap();
    repo.commit_checkout(&alice, &shipping(), at(0)).unwrap();
    repo.add_to_cart(&alice, a.id, qty(2)).unwrap();
    repo.commit_checkout(&alice, &shipping(), at(60)).unwrap();

    let orders = repo.list_orders(&alice).unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].created_at, at(60));
    assert_eq!(orders[0].total.cents(), 20_000);
    assert_eq!(orders[1].created_at, at(0));
    assert!(repo.list_orders(&bob).unwrap().is_empty());
}

#[test]
fn order_keeps_price_at_purchase() {
    let (_db, repo, a, _) = store();
    let u = user("alice");
    repo.add_to_cart(&u, a.id, qty(1)).unwrap();
    repo.commit_checkout(&u, &shipping(), at(0)).unwrap();

    let leaf = repo.get_category_by_id(a.category_id).unwrap().unwrap();
    repo.update_product(a.id, &new_product(&leaf, "ProductA", 99_900, 4))
        .unwrap();

    let orders = repo.list_orders(&u).unwrap();
    assert_eq!(orders[0].details[0].price.cents(), 10_000);
    assert_eq!(orders[0].total.cents(), 10_000);
}

#[test]
fn leaf_and_child_categories() {
    let (_db, repo, _, _) = store();
    let audio = repo
        .get_category_by_name(&CategoryName::new("Audio").unwrap())
        .unwrap()
        .expect("root exists");
    category(&repo, "Speakers", Some(&audio));
    category(&repo, "Video", None);

    let children: Vec<String> = repo
        .list_child_categories(audio.id)
        .unwrap()
        .into_iter()
        .map(|c| c.name.into_inner())
        .collect();
    assert_eq!(children, vec!["Headphones", "Speakers"]);

    let leaves: Vec<String> = repo
        .list_leaf_categories()
        .unwrap()
        .into_iter()
        .map(|c| c.name.into_inner())
        .collect();
    assert_eq!(leaves, vec!["Headphones", "Speakers", "Video"]);
}

#[test]
fn list_products_filters_by_category_and_orders_newest_first() {
    let (_db, repo, a, b) = store();
    let video = category(&repo, "Video", None);
    let c = product(&repo, &video, "ProductC", 500, 1);

    let newest: Vec<ProductId> = repo
        .list_products(ProductListQuery::default().newest_first().limit(2))
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(newest, vec![c.id, b.id]);

    let in_leaf = repo
        .list_products(ProductListQuery::default().in_categories(vec![a.category_id]))
        .unwrap();
    assert_eq!(in_leaf.len(), 2);
    assert!(
        in_leaf
            .iter()
            .all(|p| p.category.as_ref().map(|n| n.as_str()) == Some("Headphones"))
    );
}

#[test]
fn update_of_missing_product_touches_no_rows() {
    let (_db, repo, a, _) = store();
    let leaf = repo.get_category_by_id(a.category_id).unwrap().unwrap();
    let affected = repo
        .update_product(ProductId::new(999).unwrap(), &new_product(&leaf, "Ghost", 100, 1))
        .unwrap();
    assert_eq!(affected, 0);
}

#[test]
fn deleting_ordered_product_violates_constraint() {
    let (_db, repo, a, b) = store();
    let u = user("alice");
    repo.add_to_cart(&u, a.id, qty(1)).unwrap();
    repo.commit_checkout(&u, &shipping(), at(0)).unwrap();

    let result = repo.delete_product(a.id);
    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
    assert!(repo.get_product_by_id(a.id).unwrap().is_some());

    assert_eq!(repo.delete_product(b.id).unwrap(), 1);
    assert!(repo.get_product_by_id(b.id).unwrap().is_none());
}

#[test]
fn deleting_product_drops_it_from_carts() {
    let (_db, repo, a, _) = store();
    let u = user("alice");
    repo.add_to_cart(&u, a.id, qty(1)).unwrap();

    assert_eq!(repo.delete_product(a.id).unwrap(), 1);
    assert!(repo.list_cart_lines(&u).unwrap().is_empty());
}

fn small_seed(product_category: &str) -> CatalogSeed {
    CatalogSeed {
        roots: vec![SeedRoot {
            name: CategoryName::new("Audio").unwrap(),
            children: vec![
                CategoryName::new("Headphones").unwrap(),
                CategoryName::new("Speakers").unwrap(),
            ],
        }],
        products: vec![
            SeedProduct {
                category: CategoryName::new("Headphones").unwrap(),
                name: ProductName::new("Studio Monitor").unwrap(),
                description: "Closed back".to_string(),
                price: Money::from_cents(12_900).unwrap(),
                image_url: ImageUrl::new("https://example.com/monitor.jpg").unwrap(),
                stock: StockQuantity::new(10).unwrap(),
            },
            SeedProduct {
                category: CategoryName::new(product_category).unwrap(),
                name: ProductName::new("Bookshelf Pair").unwrap(),
                description: "Passive".to_string(),
                price: Money::from_cents(24_900).unwrap(),
                image_url: ImageUrl::new("https://example.com/pair.jpg").unwrap(),
                stock: StockQuantity::new(4).unwrap(),
            },
        ],
    }
}

#[test]
fn seed_catalog_fills_an_empty_database_once() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    assert_eq!(repo.seed_catalog(&small_seed("Speakers")).unwrap(), Some(2));
    assert_eq!(repo.seed_catalog(&small_seed("Speakers")).unwrap(), None);

    let leaves = repo.list_leaf_categories().unwrap();
    assert_eq!(leaves.len(), 2);
    let products = repo.list_products(ProductListQuery::default()).unwrap();
    assert_eq!(products.len(), 2);
    assert!(
        products
            .iter()
            .all(|p| leaves.iter().any(|c| c.id == p.category_id))
    );
}

#[test]
fn seed_catalog_with_unknown_category_rolls_back() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let err = repo.seed_catalog(&small_seed("Turntables")).unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError(_)));

    assert!(repo.list_categories().unwrap().is_empty());
    assert!(
        repo.list_products(ProductListQuery::default())
            .unwrap()
            .is_empty()
    );
    assert_eq!(repo.seed_catalog(&small_seed("Speakers")).unwrap(), Some(2));
}
