pub mod filter;

pub use filter::{matches_text, FilterForm, SearchFilters};
