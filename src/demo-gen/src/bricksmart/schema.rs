use std::sync::Arc;

use arrow::datatypes::DataType;
use arrow::datatypes::Field;
use arrow::datatypes::Schema;
use arrow::datatypes::SchemaRef;
use common::types::*;
use common::DECIMAL_PRECISION;
use common::DECIMAL_SCALE;

fn money() -> DataType {
    DataType::Decimal128(DECIMAL_PRECISION, DECIMAL_SCALE)
}

fn user_fields() -> Vec<Field> {
    vec![
        Field::new(COLUMN_USER_ID, DataType::Int64, false),
        Field::new(COLUMN_NAME, DataType::Utf8, false),
        Field::new(COLUMN_AGE, DataType::Int32, false),
        Field::new(COLUMN_GENDER, DataType::Utf8, false),
        Field::new(COLUMN_EMAIL, DataType::Utf8, false),
        Field::new(COLUMN_REGISTRATION_DATE, DataType::Date32, false),
        Field::new(COLUMN_REGION, DataType::Utf8, false),
    ]
}

pub fn users() -> SchemaRef {
    Arc::new(Schema::new(user_fields()))
}

pub fn products() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(COLUMN_PRODUCT_ID, DataType::Int64, false),
        Field::new(COLUMN_PRODUCT_NAME, DataType::Utf8, false),
        Field::new(COLUMN_CATEGORY, DataType::Utf8, false),
        Field::new(COLUMN_SUBCATEGORY, DataType::Utf8, false),
        Field::new(COLUMN_PRICE, money(), false),
        Field::new(COLUMN_STOCK_QUANTITY, DataType::Int32, false),
        Field::new(COLUMN_COST_PRICE, money(), false),
    ]))
}

pub fn transactions() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(COLUMN_TRANSACTION_ID, DataType::Int64, false),
        Field::new(COLUMN_USER_ID, DataType::Int64, false),
        Field::new(COLUMN_PRODUCT_ID, DataType::Int64, false),
        Field::new(COLUMN_QUANTITY, DataType::Int32, false),
        Field::new(COLUMN_PRICE, money(), false),
        Field::new(COLUMN_TRANSACTION_DATE, DataType::Date32, false),
        Field::new(COLUMN_STORE_ID, DataType::Int32, false),
    ]))
}

pub fn feedbacks() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(COLUMN_FEEDBACK_ID, DataType::Int64, false),
        Field::new(COLUMN_USER_ID, DataType::Int64, false),
        Field::new(COLUMN_PRODUCT_ID, DataType::Int64, false),
        Field::new(COLUMN_RATING, DataType::Int32, false),
        Field::new(COLUMN_DATE, DataType::Date32, false),
        Field::new(COLUMN_TYPE, DataType::Utf8, false),
        Field::new(COLUMN_COMMENT, DataType::Utf8, false),
    ]))
}

/// User columns followed by the per-category aggregates.
pub fn gold_user() -> SchemaRef {
    let mut fields = user_fields();
    fields.extend([
        Field::new(COLUMN_FOOD_QUANTITY, DataType::Int64, false),
        Field::new(COLUMN_DAILY_QUANTITY, DataType::Int64, false),
        Field::new(COLUMN_OTHER_QUANTITY, DataType::Int64, false),
        Field::new(COLUMN_FOOD_RATING, DataType::Float64, true),
        Field::new(COLUMN_DAILY_RATING, DataType::Float64, true),
        Field::new(COLUMN_OTHER_RATING, DataType::Float64, true),
    ]);

    Arc::new(Schema::new(fields))
}
