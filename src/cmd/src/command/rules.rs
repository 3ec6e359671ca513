use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::array::Int32Array;
use arrow::array::StringArray;
use arrow::datatypes::DataType;
use arrow::datatypes::Field;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use clap::Parser;
use demo_gen::bricksmart::rules::RuleTable;

use crate::error::Result;

#[derive(Parser, Clone, Debug, Default)]
pub struct Rules {}

/// One row per rule in evaluation order.
pub fn rules_batch(rules: &RuleTable) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("#", DataType::Int32, false),
        Field::new("when", DataType::Utf8, false),
        Field::new("adjustment", DataType::Int32, false),
        Field::new("description", DataType::Utf8, false),
    ]));

    let cols: Vec<ArrayRef> = vec![
        Arc::new(Int32Array::from_iter_values(1..=rules.len() as i32)),
        Arc::new(StringArray::from_iter_values(
            rules.iter().map(|r| r.predicate.to_string()),
        )),
        Arc::new(Int32Array::from_iter_values(
            rules.iter().map(|r| r.adjustment),
        )),
        Arc::new(StringArray::from_iter_values(
            rules.iter().map(|r| r.description.as_str()),
        )),
    ];

    Ok(RecordBatch::try_new(schema, cols)?)
}

pub fn run(_args: &Rules) -> Result<()> {
    let batch = rules_batch(&RuleTable::default())?;
    println!("{}", pretty_format_batches(&[batch])?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_batch() -> Result<()> {
        let batch = rules_batch(&RuleTable::default())?;
        assert_eq!(batch.num_rows(), 20);

        let out = pretty_format_batches(&[batch])?.to_string();
        assert!(out.contains("age < 25 AND subcategory = 'fruit'"));
        assert!(out.contains("region = 'Okinawa' AND subcategory = 'fruit'"));
        Ok(())
    }
}
