pub mod history;
pub mod order_book;

pub use history::generate_price_history;
pub use order_book::generate_order_book;
