use fake::Fake;
use fake::faker::company::en::CatchPhrase;
use rand::Rng;

use crate::errors::GenerationError;
use crate::money::money_from_f64;
use crate::random::RandomSource;
use crate::records::{Category, Product};

/// Price range in currency units, upper bound exclusive.
pub const PRICE_MIN: f64 = 5.0;
pub const PRICE_MAX: f64 = 500.0;

/// Generate `n` products with uniform categories and prices.
pub fn generate_products(
    n: usize,
    random: &mut RandomSource,
) -> Result<Vec<Product>, GenerationError> {
    let mut products = Vec::with_capacity(n);

    for index in 0..n {
        let name: String = CatchPhrase().fake_with_rng(&mut random.faker);
        let category = Category::ALL[random.choice.random_range(0..Category::ALL.len())];
        let raw_price: f64 = random.choice.random_range(PRICE_MIN..PRICE_MAX);
        let price = money_from_f64(raw_price).ok_or_else(|| {
            GenerationError::integrity("products", format!("unrepresentable price {raw_price}"))
        })?;

        products.push(Product {
            product_id: index as u64 + 1,
            name,
            category,
            price,
        });
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn prices_are_rounded_and_in_range() {
        let mut random = RandomSource::new(11);
        let products = generate_products(300, &mut random).expect("products");

        let min = Decimal::from(5);
        let max = Decimal::from(500);
        for (index, product) in products.iter().enumerate() {
            assert_eq!(product.product_id, index as u64 + 1);
            assert_eq!(product.price.scale(), 2);
            assert!(product.price >= min && product.price <= max);
            assert!(!product.name.is_empty());
        }
    }
}
