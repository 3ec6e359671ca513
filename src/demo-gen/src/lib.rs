pub mod bricksmart;
pub mod error;
