//! Post-generation invariant checks run before anything is written.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;

use crate::errors::GenerationError;
use crate::generators::{QUANTITY_MAX, QUANTITY_MIN};
use crate::money::{CURRENCY_SCALE, round_money};
use crate::records::{Dataset, PaymentStatus};

/// Verify the cross-entity invariants of a generated dataset.
pub fn verify_dataset(dataset: &Dataset) -> Result<(), GenerationError> {
    check_sequential("users", dataset.users.iter().map(|user| user.user_id))?;
    check_sequential("products", dataset.products.iter().map(|p| p.product_id))?;
    check_sequential("orders", dataset.orders.iter().map(|order| order.order_id))?;
    check_sequential("order_items", dataset.order_items.iter().map(|item| item.item_id))?;
    check_sequential("payments", dataset.payments.iter().map(|p| p.payment_id))?;

    let mut emails = HashSet::with_capacity(dataset.users.len());
    for user in &dataset.users {
        if !emails.insert(user.email.as_str()) {
            return Err(GenerationError::integrity(
                "users",
                format!("duplicate email {}", user.email),
            ));
        }
    }

    let user_ids: HashSet<u64> = dataset.users.iter().map(|user| user.user_id).collect();
    let prices: BTreeMap<u64, Decimal> = dataset
        .products
        .iter()
        .map(|product| (product.product_id, product.price))
        .collect();
    for product in &dataset.products {
        check_money("products", product.product_id, product.price)?;
    }

    let mut totals: BTreeMap<u64, Decimal> = BTreeMap::new();
    let orders: BTreeMap<u64, Decimal> = dataset
        .orders
        .iter()
        .map(|order| (order.order_id, order.total_amount))
        .collect();

    for order in &dataset.orders {
        if !user_ids.contains(&order.user_id) {
            return Err(GenerationError::integrity(
                "orders",
                format!("order {} references missing user {}", order.order_id, order.user_id),
            ));
        }
        check_money("orders", order.order_id, order.total_amount)?;
    }

    for item in &dataset.order_items {
        if !(QUANTITY_MIN..=QUANTITY_MAX).contains(&item.quantity) {
            return Err(GenerationError::integrity(
                "order_items",
                format!("item {} has quantity {}", item.item_id, item.quantity),
            ));
        }
        if !orders.contains_key(&item.order_id) {
            return Err(GenerationError::integrity(
                "order_items",
                format!("item {} references missing order {}", item.item_id, item.order_id),
            ));
        }
        let price = prices.get(&item.product_id).ok_or_else(|| {
            GenerationError::integrity(
                "order_items",
                format!(
                    "item {} references missing product {}",
                    item.item_id, item.product_id
                ),
            )
        })?;
        *totals.entry(item.order_id).or_insert(Decimal::ZERO) +=
            *price * Decimal::from(item.quantity);
    }

    for (order_id, total_amount) in &orders {
        let expected = totals.get(order_id).copied().map(round_money).ok_or_else(|| {
            GenerationError::integrity("orders", format!("order {order_id} has no items"))
        })?;
        if expected != *total_amount {
            return Err(GenerationError::integrity(
                "orders",
                format!("order {order_id} total {total_amount} != items sum {expected}"),
            ));
        }
    }

    for payment in &dataset.payments {
        let total = orders.get(&payment.order_id).ok_or_else(|| {
            GenerationError::integrity(
                "payments",
                format!(
                    "payment {} references missing order {}",
                    payment.payment_id, payment.order_id
                ),
            )
        })?;
        let expected = match payment.status {
            PaymentStatus::Failed => Decimal::ZERO,
            PaymentStatus::Completed | PaymentStatus::Pending => *total,
        };
        if payment.amount != expected {
            return Err(GenerationError::integrity(
                "payments",
                format!(
                    "payment {} amount {} != {} for status {}",
                    payment.payment_id,
                    payment.amount,
                    expected,
                    payment.status.as_str()
                ),
            ));
        }
        check_money("payments", payment.payment_id, payment.amount)?;
    }

    Ok(())
}

fn check_sequential(
    entity: &'static str,
    ids: impl Iterator<Item = u64>,
) -> Result<(), GenerationError> {
    for (index, id) in ids.enumerate() {
        let expected = index as u64 + 1;
        if id != expected {
            return Err(GenerationError::integrity(
                entity,
                format!("expected id {expected}, found {id}"),
            ));
        }
    }
    Ok(())
}

fn check_money(entity: &'static str, id: u64, value: Decimal) -> Result<(), GenerationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(GenerationError::integrity(
            entity,
            format!("record {id} has negative amount {value}"),
        ));
    }
    if value.scale() != CURRENCY_SCALE {
        return Err(GenerationError::integrity(
            entity,
            format!("record {id} amount {value} is not scaled to cents"),
        ));
    }
    Ok(())
}
