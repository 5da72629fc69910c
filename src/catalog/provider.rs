use rand::Rng;
use tracing::debug;

use crate::catalog::seed::{SeedProduct, SEED_PRODUCTS};
use crate::config::{FEATURED_LIMIT, QUICK_SEARCH_LIMIT};
use crate::error::{AppError, Result};
use crate::search::matches_text;
use crate::types::{PriceRange, Product, ProductType, Seller, VerificationStatus};

/// Maps the bundled seed list into display products.
///
/// Stateless: every call re-rolls the randomized fields (ratings, quantities,
/// price deltas), so two reads of the same id differ. Nothing here is a cache.
#[derive(Debug, Clone, Copy)]
pub struct CatalogProvider {
    seeds: &'static [SeedProduct],
    limit: usize,
}

impl CatalogProvider {
    pub fn new() -> Self {
        Self { seeds: SEED_PRODUCTS, limit: FEATURED_LIMIT }
    }

    /// Number of products the featured catalog exposes.
    pub fn len(&self) -> usize {
        self.seeds.len().min(self.limit)
    }

    pub fn featured_products<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Product> {
        self.seeds
            .iter()
            .take(self.limit)
            .map(|seed| decorate(seed, rng))
            .collect()
    }

    pub fn get_product<R: Rng + ?Sized>(&self, id: &str, rng: &mut R) -> Result<Product> {
        self.featured_products(rng)
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found_product(id))
    }

    /// Quick search box: text match over name/producer/region, capped.
    /// An empty query returns the head of the catalog.
    pub fn search_products<R: Rng + ?Sized>(&self, query: &str, rng: &mut R) -> Vec<Product> {
        let products = self.featured_products(rng);
        let query = query.trim();
        let hits: Vec<Product> = if query.is_empty() {
            products.into_iter().take(QUICK_SEARCH_LIMIT).collect()
        } else {
            products
                .into_iter()
                .filter(|p| matches_text(p, query))
                .take(QUICK_SEARCH_LIMIT)
                .collect()
        };
        debug!(query, hits = hits.len(), "quick search");
        hits
    }
}

impl Default for CatalogProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn decorate<R: Rng + ?Sized>(seed: &SeedProduct, rng: &mut R) -> Product {
    let price = seed.current_market_price_usd;
    let is_wine = seed.category == ProductType::Wine;
    let image_dir = if is_wine { "wines" } else { "spirits" };

    Product {
        id: seed.id.to_string(),
        name: seed.name.to_string(),
        product_type: seed.category,
        producer: seed.producer.to_string(),
        region: seed.region.to_string(),
        vintage: seed.vintage.map(|v| v.round() as i32),
        varietal: seed.sub_category.map(str::to_string),
        base_price: price,
        current_price: Some(price),
        available_quantity: rng.gen_range(1..=20),
        primary_image_url: Some(format!("/images/{image_dir}/{}.jpg", seed.slug)),
        description: Some(
            seed.tasting_notes
                .unwrap_or("Premium vintage with exceptional quality.")
                .to_string(),
        ),
        tasting_notes: seed.tasting_notes.map(str::to_string),
        investment_potential: seed.investment_potential.map(str::to_string),
        featured: rng.gen::<f64>() > 0.7,
        investment_grade: rng.gen::<f64>() > 0.5,
        five_year_price_change_pct: Some(
            seed.five_year_price_change_pct
                .unwrap_or_else(|| rng.gen_range(-10.0..30.0)),
        ),
        average_rating: Some(rng.gen_range(3.5..5.0)),
        total_reviews: Some(rng.gen_range(50..550)),
        wine_spectator_score: seed.critic_score,
        robert_parker_score: None,
        james_suckling_score: None,
        price_change_24h: Some(rng.gen_range(-3.0..3.0)),
        last_traded_price: Some(price * (1.0 + rng.gen_range(-0.05..0.05))),
        price_range_52week: Some(PriceRange { low: price * 0.8, high: price * 1.3 }),
        volume_ml: Some(750),
        alcohol_content: Some(if is_wine {
            rng.gen_range(12.0..17.0)
        } else {
            rng.gen_range(35.0..55.0)
        }),
        rarity_score: Some(rng.gen_range(7..=10)),
        food_pairings: if is_wine {
            vec!["Red meat".to_string(), "Aged cheese".to_string()]
        } else {
            vec!["Neat".to_string(), "On the rocks".to_string()]
        },
        serving_temperature: Some(if is_wine { "16-18°C" } else { "Room temperature" }.to_string()),
        aging_potential: Some(if is_wine { "10-20 years" } else { "Ready to drink" }.to_string()),
        vineyard_location: Some(seed.region.to_string()),
        estate_history: Some(format!("Established estate in {}.", seed.region)),
        production_methods: Some(
            if is_wine { "Traditional fermentation" } else { "Pot still distillation" }.to_string(),
        ),
        certifications: vec!["Organic".to_string()],
        seller: Seller {
            business_name: "Premium Wine Merchants".to_string(),
            verification_status: VerificationStatus::Verified,
            seller_rating: 4.8,
            license_number: format!("WM-{}", rng.gen_range(0..10_000)),
            license_state: "CA".to_string(),
            years_in_business: Some(10),
            total_sales: Some(2000),
        },
        slug: Some(seed.slug.to_string()),
        shipping_restrictions: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn featured_catalog_is_capped_and_ordered() {
        let mut rng = StdRng::seed_from_u64(7);
        let catalog = CatalogProvider::new();
        let products = catalog.featured_products(&mut rng);

        assert_eq!(products.len(), FEATURED_LIMIT);
        assert_eq!(catalog.len(), FEATURED_LIMIT);
        let expected: Vec<&str> = SEED_PRODUCTS.iter().take(FEATURED_LIMIT).map(|s| s.id).collect();
        let actual: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn random_fields_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for p in CatalogProvider::new().featured_products(&mut rng) {
            assert!((1..=20).contains(&p.available_quantity));
            let rating = p.average_rating.unwrap();
            assert!((3.5..5.0).contains(&rating), "rating={rating}");
            let abv = p.alcohol_content.unwrap();
            match p.product_type {
                ProductType::Wine => assert!((12.0..17.0).contains(&abv)),
                ProductType::Spirits => assert!((35.0..55.0).contains(&abv)),
            }
            let last = p.last_traded_price.unwrap();
            assert!((last - p.base_price).abs() <= p.base_price * 0.05 + 1e-9);
            assert!(p.seller.license_number.starts_with("WM-"));
        }
    }

    #[test]
    fn seed_values_win_over_random_fill() {
        let mut rng = StdRng::seed_from_u64(3);
        let lafite = CatalogProvider::new()
            .get_product("chateau-lafite-rothschild-2010", &mut rng)
            .unwrap();
        assert_eq!(lafite.five_year_price_change_pct, Some(18.4));
        assert_eq!(lafite.wine_spectator_score, Some(98));
        assert_eq!(lafite.vintage, Some(2010));
        assert_eq!(lafite.effective_price(), 1450.0);
    }

    #[test]
    fn missing_product_is_not_found() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = CatalogProvider::new().get_product("nope", &mut rng).unwrap_err();
        assert!(matches!(err, AppError::NotFound { id, .. } if id == "nope"));
    }

    #[test]
    fn products_past_the_featured_slice_are_hidden() {
        let mut rng = StdRng::seed_from_u64(3);
        let hidden = SEED_PRODUCTS[FEATURED_LIMIT].id;
        assert!(CatalogProvider::new().get_product(hidden, &mut rng).is_err());
    }

    #[test]
    fn quick_search_caps_results() {
        let mut rng = StdRng::seed_from_u64(5);
        let catalog = CatalogProvider::new();

        assert_eq!(catalog.search_products("", &mut rng).len(), QUICK_SEARCH_LIMIT);

        let hits = catalog.search_products("BORDEAUX", &mut rng);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|p| p.region.contains("Bordeaux")));

        assert!(catalog.search_products("zinfandel from mars", &mut rng).is_empty());
    }
}
