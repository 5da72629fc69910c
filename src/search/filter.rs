use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::types::{Product, ProductType};

/// Optional, conjunctive filter criteria. `None` means no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub query: Option<String>,
    pub product_type: Option<ProductType>,
    pub region: Option<String>,
    pub varietal: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub vintage: Option<i32>,
    pub min_rating: Option<f64>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns the products matching every active criterion, in input order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products.iter().filter(|p| self.matches(p)).cloned().collect()
    }

    pub fn matches(&self, p: &Product) -> bool {
        if let Some(q) = self.query.as_deref() {
            if !matches_text(p, q) {
                return false;
            }
        }
        if let Some(t) = self.product_type {
            if p.product_type != t {
                return false;
            }
        }
        if let Some(region) = self.region.as_deref() {
            if !contains_ci(&p.region, region) {
                return false;
            }
        }
        if let Some(varietal) = self.varietal.as_deref() {
            // Products without a varietal never match a varietal filter.
            if !p.varietal.as_deref().is_some_and(|v| contains_ci(v, varietal)) {
                return false;
            }
        }
        let price = p.effective_price();
        if self.price_min.is_some_and(|min| price < min) {
            return false;
        }
        if self.price_max.is_some_and(|max| price > max) {
            return false;
        }
        if let Some(vintage) = self.vintage {
            if p.vintage != Some(vintage) {
                return false;
            }
        }
        if let Some(min) = self.min_rating {
            if p.average_rating.unwrap_or(0.0) < min {
                return false;
            }
        }
        true
    }
}

/// Case-insensitive substring match over name, producer and region.
pub fn matches_text(p: &Product, query: &str) -> bool {
    contains_ci(&p.name, query) || contains_ci(&p.producer, query) || contains_ci(&p.region, query)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ---------------------------------------------------------------------------
// Raw query form
// ---------------------------------------------------------------------------

/// Filter form as it arrives over HTTP: every field is a string and an empty
/// string means "no constraint".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterForm {
    #[serde(alias = "query")]
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub region: Option<String>,
    pub varietal: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub vintage: Option<String>,
    pub rating: Option<String>,
}

impl TryFrom<FilterForm> for SearchFilters {
    type Error = AppError;

    fn try_from(form: FilterForm) -> Result<Self> {
        Ok(SearchFilters {
            query: non_empty(form.q),
            product_type: non_empty(form.product_type)
                .map(|t| t.parse::<ProductType>().map_err(AppError::Validation))
                .transpose()?,
            region: non_empty(form.region),
            varietal: non_empty(form.varietal),
            price_min: parse_finite(form.price_min, "priceMin")?,
            price_max: parse_finite(form.price_max, "priceMax")?,
            vintage: parse_field(form.vintage, "vintage")?,
            min_rating: parse_finite(form.rating, "rating")?,
        })
    }
}

/// Only the empty string is absent. Text criteria are matched verbatim.
fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

fn parse_field<T: std::str::FromStr>(v: Option<String>, name: &str) -> Result<Option<T>> {
    non_empty(v)
        .map(|s| {
            s.trim()
                .parse::<T>()
                .map_err(|_| AppError::Validation(format!("{name} must be a number, got '{s}'")))
        })
        .transpose()
}

/// `f64::from_str` accepts "NaN" and "inf"; neither bounds anything.
fn parse_finite(v: Option<String>, name: &str) -> Result<Option<f64>> {
    match parse_field::<f64>(v, name)? {
        Some(x) if !x.is_finite() => Err(AppError::Validation(format!(
            "{name} must be a finite number, got '{x}'"
        ))),
        parsed => Ok(parsed),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogProvider;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> Vec<Product> {
        let mut rng = StdRng::seed_from_u64(42);
        CatalogProvider::new().featured_products(&mut rng)
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn no_filters_returns_full_catalog_in_order() {
        let products = catalog();
        let filters = SearchFilters::default();
        assert!(filters.is_empty());
        assert_eq!(ids(&filters.apply(&products)), ids(&products));
    }

    #[test]
    fn text_query_is_case_insensitive_across_fields() {
        let products = catalog();

        let by_name = SearchFilters { query: Some("macallan".into()), ..Default::default() };
        assert_eq!(ids(&by_name.apply(&products)), vec!["macallan-25-year-old"]);

        let by_producer = SearchFilters { query: Some("MOËT".into()), ..Default::default() };
        assert_eq!(ids(&by_producer.apply(&products)), vec!["dom-perignon-2013"]);

        let by_region = SearchFilters { query: Some("napa".into()), ..Default::default() };
        assert_eq!(
            ids(&by_region.apply(&products)),
            vec!["screaming-eagle-2019", "opus-one-2018"]
        );
    }

    #[test]
    fn type_and_region_are_conjunctive() {
        let products = catalog();
        let filters = SearchFilters {
            product_type: Some(ProductType::Spirits),
            region: Some("scotland".into()),
            ..Default::default()
        };
        let hits = filters.apply(&products);
        assert_eq!(ids(&hits), vec!["macallan-25-year-old", "lagavulin-16"]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let products = catalog();
        let filters = SearchFilters {
            price_min: Some(285.0),
            price_max: Some(420.0),
            ..Default::default()
        };
        let hits = filters.apply(&products);
        assert!(hits.iter().any(|p| p.id == "dom-perignon-2013"));
        assert!(hits.iter().any(|p| p.id == "opus-one-2018"));
        assert!(hits.iter().all(|p| (285.0..=420.0).contains(&p.effective_price())));
    }

    #[test]
    fn vintage_and_varietal_reject_products_missing_the_field() {
        let products = catalog();

        let vintage = SearchFilters { vintage: Some(2013), ..Default::default() };
        assert_eq!(
            ids(&vintage.apply(&products)),
            vec!["dom-perignon-2013", "giacomo-conterno-monfortino-2013"]
        );

        let mut no_varietal = products[0].clone();
        no_varietal.varietal = None;
        let varietal = SearchFilters { varietal: Some("cabernet".into()), ..Default::default() };
        assert!(!varietal.matches(&no_varietal));
        assert!(varietal.matches(&products[0]));
    }

    #[test]
    fn rating_treats_missing_as_zero() {
        let products = catalog();
        let mut unrated = products[0].clone();
        unrated.average_rating = None;

        let filters = SearchFilters { min_rating: Some(3.5), ..Default::default() };
        assert!(!filters.matches(&unrated));
        // Generated ratings are always >= 3.5.
        assert_eq!(filters.apply(&products).len(), products.len());
    }

    #[test]
    fn result_is_subset_and_dropping_a_filter_never_shrinks() {
        let products = catalog();
        let full = SearchFilters {
            query: Some("a".into()),
            product_type: Some(ProductType::Wine),
            price_max: Some(1000.0),
            min_rating: Some(4.0),
            ..Default::default()
        };
        let narrow = full.apply(&products);
        let all_ids = ids(&products);
        assert!(ids(&narrow).iter().all(|id| all_ids.contains(id)));

        let relaxed = [
            SearchFilters { query: None, ..full.clone() },
            SearchFilters { product_type: None, ..full.clone() },
            SearchFilters { price_max: None, ..full.clone() },
            SearchFilters { min_rating: None, ..full.clone() },
        ];
        for filters in relaxed {
            let wider = filters.apply(&products);
            assert!(wider.len() >= narrow.len());
            let wider_ids = ids(&wider);
            assert!(ids(&narrow).iter().all(|id| wider_ids.contains(id)));
        }
    }

    #[test]
    fn form_treats_empty_strings_as_absent() {
        let form = FilterForm {
            q: Some(String::new()),
            product_type: Some(String::new()),
            price_min: Some(String::new()),
            rating: Some(" 4.5 ".into()),
            ..Default::default()
        };
        let filters = SearchFilters::try_from(form).unwrap();
        assert_eq!(
            filters,
            SearchFilters { min_rating: Some(4.5), ..Default::default() }
        );
    }

    #[test]
    fn form_rejects_unparseable_numbers_and_types() {
        let bad_price = FilterForm { price_max: Some("cheap".into()), ..Default::default() };
        assert!(matches!(SearchFilters::try_from(bad_price), Err(AppError::Validation(_))));

        let bad_type = FilterForm { product_type: Some("beer".into()), ..Default::default() };
        assert!(matches!(SearchFilters::try_from(bad_type), Err(AppError::Validation(_))));

        let non_finite = [
            FilterForm { price_max: Some("NaN".into()), ..Default::default() },
            FilterForm { price_min: Some("inf".into()), ..Default::default() },
            FilterForm { rating: Some("-infinity".into()), ..Default::default() },
        ];
        for form in non_finite {
            assert!(matches!(SearchFilters::try_from(form), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn text_criteria_are_not_trimmed() {
        let products = catalog();
        let form = FilterForm { region: Some(" bordeaux ".into()), ..Default::default() };
        let filters = SearchFilters::try_from(form).unwrap();
        assert_eq!(filters.region.as_deref(), Some(" bordeaux "));
        assert!(filters.apply(&products).is_empty());

        let form = FilterForm { region: Some("bordeaux".into()), ..Default::default() };
        assert!(!SearchFilters::try_from(form).unwrap().apply(&products).is_empty());
    }
}
