//! Generated product catalog.
//!
//! A catalog is seeded once when a visitor loads the page and is never
//! mutated afterwards. Prices, descriptions and IDs are randomized from the
//! fixed templates below; pass a seeded RNG to get a reproducible catalog.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

use cat_care_core::{CurrencyCode, Price, ProductId};

/// Number of products shown when not configured otherwise.
pub const DEFAULT_CATALOG_SIZE: usize = 6;

/// Largest catalog that can be generated (one product per template).
pub const MAX_CATALOG_SIZE: usize = TEMPLATES.len();

/// Query string appended to every product image URL.
const IMAGE_PARAMS: &str = "?w=800&auto=format&fit=crop&q=60";

/// Length of generated product IDs.
const ID_LENGTH: usize = 9;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

const ADJECTIVES: &[&str] = &[
    "Premium",
    "High-quality",
    "Durable",
    "Comfortable",
    "Luxurious",
    "Essential",
    "Professional",
    "Natural",
];

const BENEFITS: &[&str] = &[
    "perfect for your feline friend's daily needs",
    "designed for maximum comfort and enjoyment",
    "made with the finest materials available",
    "trusted by cat owners worldwide",
    "recommended by veterinarians",
    "ideal for cats of all ages and sizes",
];

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BedsAndFurniture,
    ToysAndEntertainment,
    FoodAndTreats,
    GroomingAndCare,
}

impl Category {
    /// Human-readable category name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BedsAndFurniture => "Beds & Furniture",
            Self::ToysAndEntertainment => "Toys & Entertainment",
            Self::FoodAndTreats => "Food & Treats",
            Self::GroomingAndCare => "Grooming & Care",
        }
    }
}

/// A catalog product. Immutable for the lifetime of a storefront session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub description: String,
    pub image: String,
    pub category: Category,
}

struct ProductTemplate {
    name: &'static str,
    category: Category,
    /// Inclusive price range in cents.
    price_cents: (i64, i64),
    image: &'static str,
}

const TEMPLATES: [ProductTemplate; 16] = [
    ProductTemplate {
        name: "Luxury Memory Foam Bed",
        category: Category::BedsAndFurniture,
        price_cents: (4999, 8999),
        image: "https://images.unsplash.com/photo-1592194996308-7b43878e84a6",
    },
    ProductTemplate {
        name: "Cat Tree Condo",
        category: Category::BedsAndFurniture,
        price_cents: (9999, 19999),
        image: "https://images.unsplash.com/photo-1606675725390-c6b5ec6ce0b1",
    },
    ProductTemplate {
        name: "Window Perch Hammock",
        category: Category::BedsAndFurniture,
        price_cents: (2499, 4599),
        image: "https://images.unsplash.com/photo-1526336024174-e58f5cdd8e13",
    },
    ProductTemplate {
        name: "Cozy Cave Bed",
        category: Category::BedsAndFurniture,
        price_cents: (3999, 6999),
        image: "https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba",
    },
    ProductTemplate {
        name: "Interactive Laser Toy",
        category: Category::ToysAndEntertainment,
        price_cents: (1999, 3499),
        image: "https://images.unsplash.com/photo-1545249390-6bdfa286032f",
    },
    ProductTemplate {
        name: "Feather Wand Teaser",
        category: Category::ToysAndEntertainment,
        price_cents: (999, 1999),
        image: "https://images.unsplash.com/photo-1574158622682-e40e69881006",
    },
    ProductTemplate {
        name: "Electronic Mouse Toy",
        category: Category::ToysAndEntertainment,
        price_cents: (1499, 2999),
        image: "https://images.unsplash.com/photo-1615789591457-74a63395c990",
    },
    ProductTemplate {
        name: "Puzzle Treat Dispenser",
        category: Category::ToysAndEntertainment,
        price_cents: (1299, 2499),
        image: "https://images.unsplash.com/photo-1526336024174-e58f5cdd8e13",
    },
    ProductTemplate {
        name: "Premium Grain-Free Kibble",
        category: Category::FoodAndTreats,
        price_cents: (2999, 5499),
        image: "https://images.unsplash.com/photo-1589924691995-400dc9ecc119",
    },
    ProductTemplate {
        name: "Gourmet Wet Food Pack",
        category: Category::FoodAndTreats,
        price_cents: (2499, 3999),
        image: "https://images.unsplash.com/photo-1585264550248-1778be3b6368",
    },
    ProductTemplate {
        name: "Organic Cat Treats",
        category: Category::FoodAndTreats,
        price_cents: (899, 1699),
        image: "https://images.unsplash.com/photo-1571566882372-1598d88abd90",
    },
    ProductTemplate {
        name: "Dental Health Snacks",
        category: Category::FoodAndTreats,
        price_cents: (1199, 2199),
        image: "https://images.unsplash.com/photo-1600628421055-4d30de868b8f",
    },
    ProductTemplate {
        name: "Professional Grooming Kit",
        category: Category::GroomingAndCare,
        price_cents: (3999, 7999),
        image: "https://images.unsplash.com/photo-1603314585442-ee3b3c16fbcf",
    },
    ProductTemplate {
        name: "Self-Cleaning Litter Box",
        category: Category::GroomingAndCare,
        price_cents: (12999, 19999),
        image: "https://images.unsplash.com/photo-1585264550248-1778be3b6368",
    },
    ProductTemplate {
        name: "Cat Nail Clippers",
        category: Category::GroomingAndCare,
        price_cents: (999, 1999),
        image: "https://images.unsplash.com/photo-1574158622682-e40e69881006",
    },
    ProductTemplate {
        name: "Natural Shampoo",
        category: Category::GroomingAndCare,
        price_cents: (1499, 2499),
        image: "https://images.unsplash.com/photo-1589924691995-400dc9ecc119",
    },
];

/// The products on offer during one storefront session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    #[must_use]
    pub const fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Generate a random catalog of `size` products.
    ///
    /// Every template is priced and described, the list is shuffled, and the
    /// first `size` products are kept. `size` is clamped to
    /// [`MAX_CATALOG_SIZE`]. Product IDs are unique within the catalog.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Self {
        let mut seen = HashSet::with_capacity(TEMPLATES.len());
        let mut products: Vec<Product> = TEMPLATES
            .iter()
            .map(|template| {
                let id = loop {
                    let candidate = random_id(rng);
                    if seen.insert(candidate.clone()) {
                        break candidate;
                    }
                };
                let (min, max) = template.price_cents;
                Product {
                    id,
                    name: template.name.to_string(),
                    price: Price::from_cents(rng.random_range(min..=max), CurrencyCode::USD),
                    description: random_description(rng, template.category),
                    image: format!("{}{IMAGE_PARAMS}", template.image),
                    category: template.category,
                }
            })
            .collect();

        products.shuffle(rng);
        products.truncate(size.min(MAX_CATALOG_SIZE));
        Self { products }
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// All products, in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn random_id<R: Rng + ?Sized>(rng: &mut R) -> ProductId {
    let id: String = (0..ID_LENGTH)
        .filter_map(|_| ID_ALPHABET.choose(rng).copied().map(char::from))
        .collect();
    ProductId::new(id)
}

fn random_description<R: Rng + ?Sized>(rng: &mut R, category: Category) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("Premium");
    let benefit = BENEFITS
        .choose(rng)
        .copied()
        .unwrap_or("perfect for your feline friend's daily needs");
    format!(
        "{adjective} {} product, {benefit}.",
        category.label().to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal::Decimal;

    use super::*;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_generate_default_size() {
        let catalog = Catalog::generate(&mut seeded(1), DEFAULT_CATALOG_SIZE);
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn test_generate_clamps_to_template_count() {
        let catalog = Catalog::generate(&mut seeded(2), 100);
        assert_eq!(catalog.len(), MAX_CATALOG_SIZE);
    }

    #[test]
    fn test_generate_is_reproducible_with_seed() {
        let a = Catalog::generate(&mut seeded(42), DEFAULT_CATALOG_SIZE);
        let b = Catalog::generate(&mut seeded(42), DEFAULT_CATALOG_SIZE);
        assert_eq!(a, b);
    }

    #[test]
    fn test_ids_are_unique_base36() {
        let catalog = Catalog::generate(&mut seeded(3), MAX_CATALOG_SIZE);
        let ids: HashSet<_> = catalog.products().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), MAX_CATALOG_SIZE);

        for product in catalog.products() {
            assert_eq!(product.id.as_str().len(), ID_LENGTH);
            assert!(
                product
                    .id
                    .as_str()
                    .bytes()
                    .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
            );
        }
    }

    #[test]
    fn test_prices_stay_within_template_range() {
        let catalog = Catalog::generate(&mut seeded(4), MAX_CATALOG_SIZE);
        for product in catalog.products() {
            let template = TEMPLATES
                .iter()
                .find(|t| t.name == product.name)
                .expect("product comes from a template");
            let (min, max) = template.price_cents;
            assert!(product.price.amount >= Decimal::new(min, 2));
            assert!(product.price.amount <= Decimal::new(max, 2));
            assert_eq!(product.price.amount.scale(), 2);
        }
    }

    #[test]
    fn test_description_mentions_category() {
        let catalog = Catalog::generate(&mut seeded(5), MAX_CATALOG_SIZE);
        for product in catalog.products() {
            let category = product.category.label().to_lowercase();
            assert!(product.description.contains(&format!("{category} product, ")));
            assert!(product.description.ends_with('.'));
        }
    }

    #[test]
    fn test_image_urls_carry_sizing_params() {
        let catalog = Catalog::generate(&mut seeded(6), DEFAULT_CATALOG_SIZE);
        assert!(catalog.products().iter().all(|p| p.image.ends_with(IMAGE_PARAMS)));
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::generate(&mut seeded(7), DEFAULT_CATALOG_SIZE);
        let first = &catalog.products()[0];
        assert_eq!(catalog.get(&first.id), Some(first));
        assert_eq!(catalog.get(&ProductId::new("missing")), None);
    }
}
