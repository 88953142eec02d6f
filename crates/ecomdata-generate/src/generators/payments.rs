use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use crate::errors::GenerationError;
use crate::money::zero;
use crate::random::RandomSource;
use crate::records::{Order, Payment, PaymentMethod, PaymentStatus};

/// One payment per order; failed payments carry a zero amount.
pub fn generate_payments(
    orders: &[Order],
    random: &mut RandomSource,
) -> Result<Vec<Payment>, GenerationError> {
    let statuses = WeightedIndex::new(PaymentStatus::WEIGHTS).map_err(|err| {
        GenerationError::InvalidOptions(format!("invalid payment status weights: {err}"))
    })?;
    let mut payments = Vec::with_capacity(orders.len());

    for (index, order) in orders.iter().enumerate() {
        let status = PaymentStatus::ALL[statuses.sample(&mut random.choice)];
        let method = PaymentMethod::ALL[random.choice.random_range(0..PaymentMethod::ALL.len())];
        let amount = match status {
            PaymentStatus::Failed => zero(),
            PaymentStatus::Completed | PaymentStatus::Pending => order.total_amount,
        };

        payments.push(Payment {
            payment_id: index as u64 + 1,
            order_id: order.order_id,
            method,
            status,
            amount,
        });
    }

    Ok(payments)
}
