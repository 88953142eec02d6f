use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;

use crate::errors::GenerationError;
use crate::model::ItemsPerOrder;
use crate::money::{round_money, zero};
use crate::random::RandomSource;
use crate::records::{Order, OrderItem, Product, User};

use super::{DateWindow, QUANTITY_MAX, QUANTITY_MIN};

/// Generate `n` orders for randomly chosen users.
///
/// `total_amount` is a zero placeholder until
/// [`generate_order_items_and_finalize_totals`] runs.
pub fn generate_orders(
    n: usize,
    users: &[User],
    reference_date: NaiveDate,
    random: &mut RandomSource,
) -> Result<Vec<Order>, GenerationError> {
    if users.is_empty() {
        return Err(GenerationError::integrity(
            "orders",
            "cannot assign orders without users",
        ));
    }

    let window = DateWindow::order(reference_date)?;
    let mut orders = Vec::with_capacity(n);

    for index in 0..n {
        let user = &users[random.choice.random_range(0..users.len())];
        let order_date = window.sample(&mut random.faker);

        orders.push(Order {
            order_id: index as u64 + 1,
            user_id: user.user_id,
            order_date,
            total_amount: zero(),
        });
    }

    Ok(orders)
}

/// Running unrounded totals keyed by order id.
#[derive(Debug, Default)]
pub struct OrderTotals {
    totals: BTreeMap<u64, Decimal>,
}

impl OrderTotals {
    pub fn add(&mut self, order_id: u64, line_total: Decimal) {
        *self.totals.entry(order_id).or_insert(Decimal::ZERO) += line_total;
    }

    pub fn get(&self, order_id: u64) -> Option<Decimal> {
        self.totals.get(&order_id).copied()
    }

    /// Write each order's rounded total. Every order must have at least one
    /// accumulated line.
    pub fn finalize(&self, orders: &mut [Order]) -> Result<(), GenerationError> {
        for order in orders.iter_mut() {
            let total = self.get(order.order_id).ok_or_else(|| {
                GenerationError::integrity(
                    "order_items",
                    format!("order {} has no items", order.order_id),
                )
            })?;
            order.total_amount = round_money(total);
        }
        Ok(())
    }
}

/// Draw line items for every order and fill in the order totals.
pub fn generate_order_items_and_finalize_totals(
    orders: &mut [Order],
    products: &[Product],
    items_per_order: ItemsPerOrder,
    random: &mut RandomSource,
) -> Result<Vec<OrderItem>, GenerationError> {
    if products.is_empty() {
        return Err(GenerationError::integrity(
            "order_items",
            "cannot draw items without products",
        ));
    }

    let ItemsPerOrder { min, max } = items_per_order;
    let mut totals = OrderTotals::default();
    let mut items = Vec::with_capacity(orders.len().saturating_mul(min));

    for order in orders.iter() {
        let count = if min == max {
            min
        } else {
            random.choice.random_range(min..=max)
        };

        for _ in 0..count {
            let product = &products[random.choice.random_range(0..products.len())];
            let quantity = random.choice.random_range(QUANTITY_MIN..=QUANTITY_MAX);
            totals.add(order.order_id, product.price * Decimal::from(quantity));

            items.push(OrderItem {
                item_id: items.len() as u64 + 1,
                order_id: order.order_id,
                product_id: product.product_id,
                quantity,
            });
        }
    }

    totals.finalize(orders)?;
    Ok(items)
}
