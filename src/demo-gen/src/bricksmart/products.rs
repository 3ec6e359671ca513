use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use crate::bricksmart::labels::Category;
use crate::bricksmart::labels::Subcategory;
use crate::bricksmart::names;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub subcategory: Subcategory,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub cost_price: Decimal,
}

/// Rounds to cents, half away from zero.
pub fn round_money(v: Decimal) -> Decimal {
    v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Uniform price in `[100, 1100]`.
pub fn sample_price<R: Rng>(rng: &mut R) -> Result<Decimal> {
    let v = Decimal::try_from(rng.gen::<f64>() * 1000. + 100.)?;
    Ok(round_money(v))
}

pub fn cost_price(price: Decimal) -> Decimal {
    round_money(price * Decimal::new(7, 1))
}

/// Products with ids `1..=count`.
pub fn generate_products<R: Rng>(rng: &mut R, count: usize) -> Result<Vec<Product>> {
    (1..=count as i64).map(|id| sample_product(rng, id)).collect()
}

pub fn sample_product<R: Rng>(rng: &mut R, id: i64) -> Result<Product> {
    let name = names::product_name(rng);
    let category = if rng.gen::<f64>() > 0.5 {
        Category::Food
    } else {
        Category::DailyGoods
    };
    let [first, second] = category.subcategories();
    let subcategory = if rng.gen::<f64>() > 0.5 { first } else { second };
    let price = sample_price(rng)?;
    let stock_quantity = (rng.gen::<f64>() * 100. + 1.).round() as i32;

    Ok(Product {
        id,
        name,
        category,
        subcategory,
        price,
        stock_quantity,
        cost_price: cost_price(price),
    })
}
