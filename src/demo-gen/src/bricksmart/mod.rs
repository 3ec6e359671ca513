pub mod annotations;
pub mod batch_builder;
pub mod dates;
pub mod feedbacks;
pub mod gold;
pub mod job;
pub mod labels;
pub mod names;
pub mod partition;
pub mod products;
pub mod rules;
pub mod schema;
pub mod transactions;
pub mod users;

pub use job::run;
pub use job::run_with_rng;
pub use job::Report;
