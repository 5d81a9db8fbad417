//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use super::overlays::{StorefrontView, save_storefront};
use crate::error::Result;
use crate::filters;
use crate::models::Product;
use crate::state::AppState;

// =============================================================================
// Carousel (static content)
// =============================================================================

/// A cat in the hero carousel.
struct CatSlide {
    name: &'static str,
    description: &'static str,
    image: &'static str,
}

const CAT_SLIDES: [CatSlide; 11] = [
    CatSlide {
        name: "Mystic Shadow",
        description: "A mysterious black cat with piercing green eyes, embodying the perfect balance of grace and mystery in every graceful movement.",
        image: "erik-jan-leusink-IbPxGLgJiMI-unsplash.jpg",
    },
    CatSlide {
        name: "Snow Prince",
        description: "With fur as white as fresh snow and eyes that sparkle like diamonds, this majestic feline brings an air of royalty to any space.",
        image: "jari-hytonen-YCPkW_r_6uA-unsplash.jpg",
    },
    CatSlide {
        name: "Cozy Dreamer",
        description: "This gentle soul finds peace in soft blankets and warm sunbeams, sharing comfort and tranquility with everyone around.",
        image: "kari-shea-eMzblc6JmXM-unsplash.jpg",
    },
    CatSlide {
        name: "Urban Explorer",
        description: "A curious adventurer who finds joy in discovering new corners of the world, always ready for the next exciting journey.",
        image: "malek-dridi-0F7GRXNOG7g-unsplash.jpg",
    },
    CatSlide {
        name: "Twilight Warrior",
        description: "In the soft glow of dusk, this magnificent creature comes alive, moving with the silent grace of a natural-born hunter.",
        image: "andriyko-podilnyk-RCfi7vgJjUY-unsplash.jpg",
    },
    CatSlide {
        name: "Gentle Giant",
        description: "Despite the impressive size, this sweet-natured cat has a heart of gold and a purr that could melt the coldest of hearts.",
        image: "pacto-visual-cWOzOnSoh6Q-unsplash.jpg",
    },
    CatSlide {
        name: "Curious Soul",
        description: "Every day is a new adventure for this inquisitive feline, whose playful spirit brings joy and laughter to all who meet them.",
        image: "paul-hanaoka-w2DsS-ZAP4U-unsplash.jpg",
    },
    CatSlide {
        name: "Forest Spirit",
        description: "Like a guardian of ancient woods, this cat carries an air of wisdom and mystery in their enchanting gaze.",
        image: "mikhail-vasilyev-NodtnCsLdTE-unsplash.jpg",
    },
    CatSlide {
        name: "Sunlight Seeker",
        description: "Finding the perfect sunbeam is an art, and this radiant feline has mastered it with elegant precision.",
        image: "kote-puerto-so5nsYDOdxw-unsplash.jpg",
    },
    CatSlide {
        name: "Night Whispers",
        description: "In the quiet of night, this mysterious cat moves like a shadow, telling stories only the moon can hear.",
        image: "michael-sum-LEpfefQf4rU-unsplash.jpg",
    },
    CatSlide {
        name: "Serene Sage",
        description: "With wisdom beyond years, this peaceful soul brings calm and serenity to any room they grace with their presence.",
        image: "manja-vitolic-gKXKBY-C-Dk-unsplash.jpg",
    },
];

/// Carousel slide display data for templates.
#[derive(Clone)]
pub struct SlideView {
    pub name: &'static str,
    pub description: &'static str,
    pub image_path: String,
    /// 1-based position.
    pub position: usize,
    pub total: usize,
}

/// All carousel slides in display order.
#[must_use]
pub fn cat_slides() -> Vec<SlideView> {
    CAT_SLIDES
        .iter()
        .enumerate()
        .map(|(index, slide)| SlideView {
            name: slide.name,
            description: slide.description,
            image_path: format!("/static/images/cats/{}", slide.image),
            position: index + 1,
            total: CAT_SLIDES.len(),
        })
        .collect()
}

// =============================================================================
// Products
// =============================================================================

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: String,
    pub image: String,
    pub category: &'static str,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.display(),
            description: product.description.clone(),
            image: product.image.clone(),
            category: product.category.label(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub slides: Vec<SlideView>,
    pub products: Vec<ProductView>,
    pub view: StorefrontView,
}

/// Display the home page.
///
/// Every page load starts over with a new catalog, an empty cart and a new
/// order number.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let storefront = state.new_storefront();
    save_storefront(&session, &storefront).await?;

    tracing::debug!(
        products = storefront.catalog().len(),
        order_number = %storefront.order_number(),
        "New storefront session"
    );

    Ok(HomeTemplate {
        slides: cat_slides(),
        products: storefront
            .catalog()
            .products()
            .iter()
            .map(ProductView::from)
            .collect(),
        view: StorefrontView::at(&storefront, Utc::now()),
    })
}
