//! Entity generators, one module per dependency level.

mod dates;
mod orders;
mod payments;
mod products;
mod users;

pub use dates::DateWindow;
pub use orders::{OrderTotals, generate_order_items_and_finalize_totals, generate_orders};
pub use payments::generate_payments;
pub use products::{PRICE_MAX, PRICE_MIN, generate_products};
pub use users::{MAX_UNIQUE_ATTEMPTS, generate_users};

/// Inclusive bounds for line item quantities.
pub const QUANTITY_MIN: u32 = 1;
pub const QUANTITY_MAX: u32 = 5;
