use chrono::NaiveDate;
use rand::Rng;
use tracing::debug;

use crate::bricksmart::dates;
use crate::bricksmart::dates::FEEDBACKS_ANCHOR;
use crate::bricksmart::labels::FeedbackType;
use crate::bricksmart::partition::generate_partitioned;
use crate::bricksmart::partition::Progress;
use crate::bricksmart::products::Product;
use crate::bricksmart::rules::RuleTable;
use crate::bricksmart::rules::Subject;
use crate::bricksmart::transactions::random_id;
use crate::bricksmart::users::User;
use crate::error::Result;

pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub rating: i32,
    pub date: NaiveDate,
    pub typ: FeedbackType,
    pub comment: String,
}

/// Two independent draws: product above 0.66, then service above 0.33.
pub fn sample_feedback_type<R: Rng>(rng: &mut R) -> FeedbackType {
    if rng.gen::<f64>() > 0.66 {
        FeedbackType::Product
    } else if rng.gen::<f64>() > 0.33 {
        FeedbackType::Service
    } else {
        FeedbackType::Other
    }
}

pub fn clamp_rating(base: i32, adjustment: i32) -> i32 {
    (base + adjustment).clamp(0, MAX_RATING)
}

pub fn comment(id: i64) -> String {
    format!("Feedback_{id}")
}

pub fn draw_feedback<R: Rng>(
    rng: &mut R,
    id: i64,
    users: &[User],
    products: &[Product],
    rules: &RuleTable,
) -> Result<Feedback> {
    let user_id = random_id(rng, users.len());
    let product_id = random_id(rng, products.len());
    let rating = (rng.gen::<f64>() * 4. + 1.).round() as i32;
    let date = dates::days_before(rng, *FEEDBACKS_ANCHOR);
    let typ = sample_feedback_type(rng);

    let subject = Subject::lookup(users, products, user_id, product_id)?;

    Ok(Feedback {
        id,
        user_id,
        product_id,
        rating: clamp_rating(rating, rules.adjustment(&subject)),
        date,
        typ,
        comment: comment(id),
    })
}

pub fn generate_feedbacks<R: Rng>(
    rng: &mut R,
    users: &[User],
    products: &[Product],
    rules: &RuleTable,
    count: usize,
    partitions: usize,
    progress: Option<&Progress>,
) -> Result<Vec<Feedback>> {
    debug!(
        "feedbacks: {count} rows dated up to {}",
        *FEEDBACKS_ANCHOR
    );

    // every row joins a user and a product, so nothing survives without both
    if users.is_empty() || products.is_empty() {
        debug!("feedbacks: no users or products, skipping");
        return Ok(Vec::new());
    }

    generate_partitioned(rng, count, partitions, progress, |rng, id| {
        draw_feedback(rng, id, users, products, rules)
    })
}
