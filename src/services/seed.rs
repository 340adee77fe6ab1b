//! Demo catalog inserted into an empty database.

use crate::domain::category::{CatalogSeed, SeedProduct, SeedRoot};
use crate::domain::types::{
    CategoryName, ImageUrl, Money, ProductName, StockQuantity, TypeConstraintError,
};
use crate::repository::CatalogSeeder;

use super::{ServiceError, ServiceResult};

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

const CATALOG: &[(&str, &[&str])] = &[
    ("PCs Armadas", &["Gama de Entrada", "Gama Media", "Gama Alta"]),
    (
        "Componentes",
        &[
            "Procesadores",
            "Tarjetas Gráficas",
            "Tarjetas Madre",
            "Memoria RAM",
            "Almacenamiento",
            "Gabinetes",
            "Fuentes de Poder",
        ],
    ),
    ("Periféricos", &["Mouse", "Teclados", "Monitores", "Audífonos"]),
];

/// (category, name, description, price, image)
const PRODUCTS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "Gama Alta",
        "PC Gamer Pro",
        "Una bestia para jugar en 4K.",
        "35000.00",
        PLACEHOLDER_IMAGE,
    ),
    (
        "Tarjetas Gráficas",
        "Tarjeta Gráfica RTX 9090",
        "Potencia gráfica sin límites.",
        "25000.00",
        PLACEHOLDER_IMAGE,
    ),
    (
        "Memoria RAM",
        "Kit 16GB RAM DDR5",
        "Velocidad y rendimiento para tu PC.",
        "2200.00",
        "https://m.media-amazon.com/images/I/61uXihcspuL._AC_SL1500_.jpg",
    ),
    (
        "Teclados",
        "Teclado Mecánico RGB",
        "Siente cada pulsación con luces personalizables.",
        "1800.00",
        PLACEHOLDER_IMAGE,
    ),
];

const DEMO_STOCK: i32 = 10;

fn demo_seed() -> Result<CatalogSeed, TypeConstraintError> {
    let roots = CATALOG
        .iter()
        .map(|(root, children)| {
            Ok(SeedRoot {
                name: CategoryName::new(*root)?,
                children: children
                    .iter()
                    .map(|child| CategoryName::new(*child))
                    .collect::<Result<_, _>>()?,
            })
        })
        .collect::<Result<_, TypeConstraintError>>()?;

    let products = PRODUCTS
        .iter()
        .map(|(category, name, description, price, image)| {
            Ok(SeedProduct {
                category: CategoryName::new(*category)?,
                name: ProductName::new(*name)?,
                description: description.to_string(),
                price: Money::parse(price)?,
                image_url: ImageUrl::new(*image)?,
                stock: StockQuantity::new(DEMO_STOCK)?,
            })
        })
        .collect::<Result<_, TypeConstraintError>>()?;

    Ok(CatalogSeed { roots, products })
}

/// Inserts `seed` when there are no categories yet.
///
/// Either the whole catalog lands or nothing does. Returns whether anything
/// was inserted.
pub fn seed_catalog<R>(seed: &CatalogSeed, repo: &R) -> ServiceResult<bool>
where
    R: CatalogSeeder,
{
    match repo.seed_catalog(seed) {
        Ok(Some(products)) => {
            log::info!("Seeded catalog with {products} products");
            Ok(true)
        }
        Ok(None) => Ok(false),
        Err(e) => {
            log::error!("Failed to seed catalog: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Inserts the demo catalog when there are no categories yet.
pub fn seed_demo_catalog<R>(repo: &R) -> ServiceResult<bool>
where
    R: CatalogSeeder,
{
    let seed = demo_seed().map_err(|e| {
        log::error!("Demo catalog is malformed: {e}");
        ServiceError::Internal
    })?;
    seed_catalog(&seed, repo)
}
