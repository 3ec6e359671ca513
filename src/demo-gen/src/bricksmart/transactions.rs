use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

use crate::bricksmart::dates;
use crate::bricksmart::dates::TRANSACTIONS_ANCHOR;
use crate::bricksmart::partition::generate_partitioned;
use crate::bricksmart::partition::Progress;
use crate::bricksmart::products::sample_price;
use crate::bricksmart::products::Product;
use crate::bricksmart::rules::RuleTable;
use crate::bricksmart::rules::Subject;
use crate::bricksmart::users::User;
use crate::error::Result;

/// Probability of keeping a candidate date that falls into a peak month, then on a weekend.
const DATE_BIAS: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub price: Decimal,
    pub date: NaiveDate,
    pub store_id: i32,
}

/// Uniform id in `1..=count`.
pub fn random_id<R: Rng>(rng: &mut R, count: usize) -> i64 {
    (rng.gen::<f64>() * count as f64).floor() as i64 + 1
}

/// Candidate date kept when it lands in August/December or on a weekend, each with a 10%
/// chance; otherwise a fresh date from the same window.
pub fn transaction_date<R: Rng>(rng: &mut R) -> NaiveDate {
    let candidate = dates::days_before(rng, *TRANSACTIONS_ANCHOR);
    if rng.gen::<f64>() < DATE_BIAS && dates::is_peak_month(candidate) {
        candidate
    } else if rng.gen::<f64>() < DATE_BIAS && dates::is_weekend(candidate) {
        candidate
    } else {
        dates::days_before(rng, *TRANSACTIONS_ANCHOR)
    }
}

pub fn adjust_quantity(base: i32, adjustment: i32) -> i32 {
    (base + adjustment).max(0)
}

pub fn draw_transaction<R: Rng>(
    rng: &mut R,
    id: i64,
    users: &[User],
    products: &[Product],
    rules: &RuleTable,
) -> Result<Transaction> {
    let user_id = random_id(rng, users.len());
    let product_id = random_id(rng, products.len());
    let quantity = (rng.gen::<f64>() * 5. + 1.).round() as i32;
    let price = sample_price(rng)?;
    let date = transaction_date(rng);
    let store_id = (rng.gen::<f64>() * 10. + 1.).round() as i32;

    let subject = Subject::lookup(users, products, user_id, product_id)?;

    Ok(Transaction {
        id,
        user_id,
        product_id,
        quantity: adjust_quantity(quantity, rules.adjustment(&subject)),
        price,
        date,
        store_id,
    })
}

pub fn generate_transactions<R: Rng>(
    rng: &mut R,
    users: &[User],
    products: &[Product],
    rules: &RuleTable,
    count: usize,
    partitions: usize,
    progress: Option<&Progress>,
) -> Result<Vec<Transaction>> {
    debug!(
        "transactions: {count} rows over {} users and {} products",
        users.len(),
        products.len()
    );

    // every row joins a user and a product, so nothing survives without both
    if users.is_empty() || products.is_empty() {
        debug!("transactions: no users or products, skipping");
        return Ok(Vec::new());
    }

    generate_partitioned(rng, count, partitions, progress, |rng, id| {
        draw_transaction(rng, id, users, products, rules)
    })
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::bricksmart::dates::REGISTRATION_DATE;
    use crate::bricksmart::labels::Category;
    use crate::bricksmart::labels::Gender;
    use crate::bricksmart::labels::Region;
    use crate::bricksmart::labels::Subcategory;
    use crate::bricksmart::products::generate_products;
    use crate::bricksmart::users::generate_users;
    use crate::error::DemoGenError;

    #[test]
    fn test_transactions() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(42);
        let users = generate_users(&mut rng, 200);
        let products = generate_products(&mut rng, 20)?;
        let rules = RuleTable::default();

        let txs = generate_transactions(&mut rng, &users, &products, &rules, 20_000, 4, None)?;
        assert_eq!(txs.len(), 20_000);
        let earliest = *TRANSACTIONS_ANCHOR - Duration::days(364);
        for (idx, tx) in txs.iter().enumerate() {
            assert_eq!(tx.id, idx as i64 + 1);
            assert!((1..=200).contains(&tx.user_id));
            assert!((1..=20).contains(&tx.product_id));
            assert!(tx.quantity >= 0);
            assert!((1..=11).contains(&tx.store_id));
            assert!(tx.date >= earliest && tx.date <= *TRANSACTIONS_ANCHOR);
        }
        Ok(())
    }

    #[test]
    fn test_quantity_floor() {
        assert_eq!(adjust_quantity(1, -2), 0);
        assert_eq!(adjust_quantity(3, -2), 1);
        assert_eq!(adjust_quantity(2, 3), 5);
    }

    #[test]
    fn test_two_rules_add_up() -> Result<()> {
        let users = vec![User {
            id: 1,
            name: "abcde.fghij".to_string(),
            age: 20,
            gender: Gender::Male,
            email: "abcde.fghij@example.com".to_string(),
            registration_date: *REGISTRATION_DATE,
            region: Region::Okinawa,
        }];
        let products = vec![Product {
            id: 1,
            name: "abc_def_ghi".to_string(),
            category: Category::Food,
            subcategory: Subcategory::Fruit,
            price: Decimal::new(50000, 2),
            stock_quantity: 10,
            cost_price: Decimal::new(35000, 2),
        }];
        let rules = RuleTable::default();

        // same seed, same draws: the rule-free table gives the base quantity
        let base = draw_transaction(
            &mut StdRng::seed_from_u64(5),
            1,
            &users,
            &products,
            &RuleTable::new(vec![]),
        )?;
        let adjusted = draw_transaction(&mut StdRng::seed_from_u64(5), 1, &users, &products, &rules)?;
        assert_eq!(adjusted.quantity, base.quantity + 3);
        assert_eq!(adjusted.date, base.date);
        Ok(())
    }

    #[test]
    fn test_unknown_reference() {
        let mut rng = StdRng::seed_from_u64(1);
        let res = draw_transaction(&mut rng, 1, &[], &[], &RuleTable::default());
        assert!(matches!(res, Err(DemoGenError::UnknownUser(1))));

        let txs = generate_transactions(&mut rng, &[], &[], &RuleTable::default(), 100, 2, None)
            .unwrap();
        assert!(txs.is_empty());
    }

    #[test]
    fn test_dates_lean_towards_peak_months() {
        let mut rng = StdRng::seed_from_u64(11);
        let n = 200_000;
        let peak = (0..n)
            .map(|_| transaction_date(&mut rng))
            .filter(|d| matches!(d.month(), 8 | 12))
            .count();
        // two of twelve months plus a small bias
        let share = peak as f64 / n as f64;
        assert!(share > 62. / 365. && share < 0.2);
    }
}
