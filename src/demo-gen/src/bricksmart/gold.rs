//! Per-user aggregate of purchases and ratings by product category.

use common::config::GoldAggregation;
use tracing::debug;

use crate::bricksmart::feedbacks::Feedback;
use crate::bricksmart::labels::Category;
use crate::bricksmart::products::Product;
use crate::bricksmart::transactions::Transaction;
use crate::bricksmart::users::User;

#[derive(Debug, Clone, PartialEq)]
pub struct GoldUser {
    pub user: User,
    pub food_quantity: i64,
    pub daily_quantity: i64,
    pub other_quantity: i64,
    pub food_rating: Option<f64>,
    pub daily_rating: Option<f64>,
    pub other_rating: Option<f64>,
}

#[derive(Default, Clone, Copy)]
struct Mean {
    sum: i64,
    n: i64,
}

impl Mean {
    fn push(&mut self, v: i32) {
        self.sum += v as i64;
        self.n += 1;
    }

    fn get(&self) -> Option<f64> {
        (self.n > 0).then(|| self.sum as f64 / self.n as f64)
    }
}

#[derive(Default, Clone, Copy)]
struct Acc {
    quantity: [i64; 2],
    purchased: [bool; 2],
    ratings: Mean,
    category_ratings: [Mean; 2],
}

fn slot(category: Category) -> usize {
    match category {
        Category::Food => 0,
        Category::DailyGoods => 1,
    }
}

fn get<T>(items: &[T], id: i64) -> Option<&T> {
    usize::try_from(id - 1).ok().and_then(|idx| items.get(idx))
}

/// One row per user, in user order. Rows referencing unknown users or products are skipped.
///
/// `Joined` follows a users/transactions/products/feedbacks left join on user id, where every
/// transaction is repeated once per feedback of the same user: quantities are multiplied by
/// the user's feedback count and a category's rating is the mean of all the user's ratings
/// whenever the user bought something in that category. `PerCategory` aggregates each side
/// on its own.
pub fn build_gold_users(
    users: &[User],
    products: &[Product],
    transactions: &[Transaction],
    feedbacks: &[Feedback],
    aggregation: GoldAggregation,
) -> Vec<GoldUser> {
    let mut accs = vec![Acc::default(); users.len()];

    for tx in transactions {
        let (Some(acc), Some(product)) = (
            usize::try_from(tx.user_id - 1)
                .ok()
                .and_then(|idx| accs.get_mut(idx)),
            get(products, tx.product_id),
        ) else {
            continue;
        };
        let slot = slot(product.category);
        acc.quantity[slot] += tx.quantity as i64;
        acc.purchased[slot] = true;
    }

    for fb in feedbacks {
        let Some(acc) = usize::try_from(fb.user_id - 1)
            .ok()
            .and_then(|idx| accs.get_mut(idx))
        else {
            continue;
        };
        acc.ratings.push(fb.rating);
        if let Some(product) = get(products, fb.product_id) {
            acc.category_ratings[slot(product.category)].push(fb.rating);
        }
    }

    debug!("gold: {aggregation} aggregation over {} users", users.len());

    users
        .iter()
        .zip(accs)
        .map(|(user, acc)| {
            let (quantity, ratings) = match aggregation {
                GoldAggregation::Joined => {
                    let fanout = acc.ratings.n.max(1);
                    let rating = |slot: usize| acc.purchased[slot].then(|| acc.ratings.get()).flatten();
                    (
                        [acc.quantity[0] * fanout, acc.quantity[1] * fanout],
                        [rating(0), rating(1)],
                    )
                }
                GoldAggregation::PerCategory => (acc.quantity, [
                    acc.category_ratings[0].get(),
                    acc.category_ratings[1].get(),
                ]),
            };

            GoldUser {
                user: user.clone(),
                food_quantity: quantity[0],
                daily_quantity: quantity[1],
                other_quantity: 0,
                food_rating: ratings[0],
                daily_rating: ratings[1],
                other_rating: None,
            }
        })
        .collect()
}
