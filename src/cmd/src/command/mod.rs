pub mod generate;
pub mod rules;
