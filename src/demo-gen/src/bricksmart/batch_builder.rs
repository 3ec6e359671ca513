use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::array::Date32Builder;
use arrow::array::Decimal128Builder;
use arrow::array::Float64Builder;
use arrow::array::Int32Builder;
use arrow::array::Int64Builder;
use arrow::array::StringBuilder;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use common::DECIMAL_PRECISION;
use common::DECIMAL_SCALE;
use rust_decimal::Decimal;

use crate::bricksmart::dates::to_date32;
use crate::bricksmart::feedbacks::Feedback;
use crate::bricksmart::gold::GoldUser;
use crate::bricksmart::products::Product;
use crate::bricksmart::schema;
use crate::bricksmart::transactions::Transaction;
use crate::bricksmart::users::User;
use crate::error::Result;

/// Accumulates rows of one table into arrow columns.
pub trait RowBuilder: Sized {
    type Row;

    fn new(cap: usize) -> Self;
    fn schema(&self) -> SchemaRef;
    fn append(&mut self, row: &Self::Row);
    /// Finishes the accumulated rows and resets the builder.
    fn build_record_batch(&mut self) -> Result<RecordBatch>;
}

/// Splits `rows` into record batches of at most `batch_size` rows.
pub fn build_batches<B: RowBuilder>(rows: &[B::Row], batch_size: usize) -> Result<Vec<RecordBatch>> {
    let batch_size = batch_size.max(1);
    let mut builder = B::new(batch_size.min(rows.len()));
    rows.chunks(batch_size)
        .map(|chunk| {
            for row in chunk {
                builder.append(row);
            }
            builder.build_record_batch()
        })
        .collect()
}

fn cents(v: Decimal) -> i128 {
    let mut v = v;
    v.rescale(DECIMAL_SCALE as u32);
    v.mantissa()
}

fn money(b: &mut Decimal128Builder) -> Result<ArrayRef> {
    Ok(Arc::new(
        b.finish()
            .with_precision_and_scale(DECIMAL_PRECISION, DECIMAL_SCALE)?,
    ))
}

struct UserColumns {
    user_id: Int64Builder,
    name: StringBuilder,
    age: Int32Builder,
    gender: StringBuilder,
    email: StringBuilder,
    registration_date: Date32Builder,
    region: StringBuilder,
}

impl UserColumns {
    fn new(cap: usize) -> Self {
        Self {
            user_id: Int64Builder::with_capacity(cap),
            name: StringBuilder::new(),
            age: Int32Builder::with_capacity(cap),
            gender: StringBuilder::new(),
            email: StringBuilder::new(),
            registration_date: Date32Builder::with_capacity(cap),
            region: StringBuilder::new(),
        }
    }

    fn append(&mut self, user: &User) {
        self.user_id.append_value(user.id);
        self.name.append_value(&user.name);
        self.age.append_value(user.age as i32);
        self.gender.append_value(user.gender.to_string());
        self.email.append_value(&user.email);
        self.registration_date
            .append_value(to_date32(user.registration_date));
        self.region.append_value(user.region.to_string());
    }

    fn finish(&mut self) -> Vec<ArrayRef> {
        vec![
            Arc::new(self.user_id.finish()),
            Arc::new(self.name.finish()),
            Arc::new(self.age.finish()),
            Arc::new(self.gender.finish()),
            Arc::new(self.email.finish()),
            Arc::new(self.registration_date.finish()),
            Arc::new(self.region.finish()),
        ]
    }
}

pub struct UsersBuilder {
    users: UserColumns,
    schema: SchemaRef,
}

impl RowBuilder for UsersBuilder {
    type Row = User;

    fn new(cap: usize) -> Self {
        Self {
            users: UserColumns::new(cap),
            schema: schema::users(),
        }
    }

    fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    fn append(&mut self, row: &User) {
        self.users.append(row);
    }

    fn build_record_batch(&mut self) -> Result<RecordBatch> {
        Ok(RecordBatch::try_new(self.schema.clone(), self.users.finish())?)
    }
}

pub struct ProductsBuilder {
    product_id: Int64Builder,
    product_name: StringBuilder,
    category: StringBuilder,
    subcategory: StringBuilder,
    price: Decimal128Builder,
    stock_quantity: Int32Builder,
    cost_price: Decimal128Builder,
    schema: SchemaRef,
}

impl RowBuilder for ProductsBuilder {
    type Row = Product;

    fn new(cap: usize) -> Self {
        Self {
            product_id: Int64Builder::with_capacity(cap),
            product_name: StringBuilder::new(),
            category: StringBuilder::new(),
            subcategory: StringBuilder::new(),
            price: Decimal128Builder::with_capacity(cap),
            stock_quantity: Int32Builder::with_capacity(cap),
            cost_price: Decimal128Builder::with_capacity(cap),
            schema: schema::products(),
        }
    }

    fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    fn append(&mut self, row: &Product) {
        self.product_id.append_value(row.id);
        self.product_name.append_value(&row.name);
        self.category.append_value(row.category.to_string());
        self.subcategory.append_value(row.subcategory.to_string());
        self.price.append_value(cents(row.price));
        self.stock_quantity.append_value(row.stock_quantity);
        self.cost_price.append_value(cents(row.cost_price));
    }

    fn build_record_batch(&mut self) -> Result<RecordBatch> {
        let cols: Vec<ArrayRef> = vec![
            Arc::new(self.product_id.finish()),
            Arc::new(self.product_name.finish()),
            Arc::new(self.category.finish()),
            Arc::new(self.subcategory.finish()),
            money(&mut self.price)?,
            Arc::new(self.stock_quantity.finish()),
            money(&mut self.cost_price)?,
        ];

        Ok(RecordBatch::try_new(self.schema.clone(), cols)?)
    }
}

pub struct TransactionsBuilder {
    transaction_id: Int64Builder,
    user_id: Int64Builder,
    product_id: Int64Builder,
    quantity: Int32Builder,
    price: Decimal128Builder,
    transaction_date: Date32Builder,
    store_id: Int32Builder,
    schema: SchemaRef,
}

impl RowBuilder for TransactionsBuilder {
    type Row = Transaction;

    fn new(cap: usize) -> Self {
        Self {
            transaction_id: Int64Builder::with_capacity(cap),
            user_id: Int64Builder::with_capacity(cap),
            product_id: Int64Builder::with_capacity(cap),
            quantity: Int32Builder::with_capacity(cap),
            price: Decimal128Builder::with_capacity(cap),
            transaction_date: Date32Builder::with_capacity(cap),
            store_id: Int32Builder::with_capacity(cap),
            schema: schema::transactions(),
        }
    }

    fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    fn append(&mut self, row: &Transaction) {
        self.transaction_id.append_value(row.id);
        self.user_id.append_value(row.user_id);
        self.product_id.append_value(row.product_id);
        self.quantity.append_value(row.quantity);
        self.price.append_value(cents(row.price));
        self.transaction_date.append_value(to_date32(row.date));
        self.store_id.append_value(row.store_id);
    }

    fn build_record_batch(&mut self) -> Result<RecordBatch> {
        let cols: Vec<ArrayRef> = vec![
            Arc::new(self.transaction_id.finish()),
            Arc::new(self.user_id.finish()),
            Arc::new(self.product_id.finish()),
            Arc::new(self.quantity.finish()),
            money(&mut self.price)?,
            Arc::new(self.transaction_date.finish()),
            Arc::new(self.store_id.finish()),
        ];

        Ok(RecordBatch::try_new(self.schema.clone(), cols)?)
    }
}

pub struct FeedbacksBuilder {
    feedback_id: Int64Builder,
    user_id: Int64Builder,
    product_id: Int64Builder,
    rating: Int32Builder,
    date: Date32Builder,
    typ: StringBuilder,
    comment: StringBuilder,
    schema: SchemaRef,
}

impl RowBuilder for FeedbacksBuilder {
    type Row = Feedback;

    fn new(cap: usize) -> Self {
        Self {
            feedback_id: Int64Builder::with_capacity(cap),
            user_id: Int64Builder::with_capacity(cap),
            product_id: Int64Builder::with_capacity(cap),
            rating: Int32Builder::with_capacity(cap),
            date: Date32Builder::with_capacity(cap),
            typ: StringBuilder::new(),
            comment: StringBuilder::new(),
            schema: schema::feedbacks(),
        }
    }

    fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    fn append(&mut self, row: &Feedback) {
        self.feedback_id.append_value(row.id);
        self.user_id.append_value(row.user_id);
        self.product_id.append_value(row.product_id);
        self.rating.append_value(row.rating);
        self.date.append_value(to_date32(row.date));
        self.typ.append_value(row.typ.to_string());
        self.comment.append_value(&row.comment);
    }

    fn build_record_batch(&mut self) -> Result<RecordBatch> {
        let cols: Vec<ArrayRef> = vec![
            Arc::new(self.feedback_id.finish()),
            Arc::new(self.user_id.finish()),
            Arc::new(self.product_id.finish()),
            Arc::new(self.rating.finish()),
            Arc::new(self.date.finish()),
            Arc::new(self.typ.finish()),
            Arc::new(self.comment.finish()),
        ];

        Ok(RecordBatch::try_new(self.schema.clone(), cols)?)
    }
}

pub struct GoldUserBuilder {
    users: UserColumns,
    food_quantity: Int64Builder,
    daily_quantity: Int64Builder,
    other_quantity: Int64Builder,
    food_rating: Float64Builder,
    daily_rating: Float64Builder,
    other_rating: Float64Builder,
    schema: SchemaRef,
}

impl RowBuilder for GoldUserBuilder {
    type Row = GoldUser;

    fn new(cap: usize) -> Self {
        Self {
            users: UserColumns::new(cap),
            food_quantity: Int64Builder::with_capacity(cap),
            daily_quantity: Int64Builder::with_capacity(cap),
            other_quantity: Int64Builder::with_capacity(cap),
            food_rating: Float64Builder::with_capacity(cap),
            daily_rating: Float64Builder::with_capacity(cap),
            other_rating: Float64Builder::with_capacity(cap),
            schema: schema::gold_user(),
        }
    }

    fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    fn append(&mut self, row: &GoldUser) {
        self.users.append(&row.user);
        self.food_quantity.append_value(row.food_quantity);
        self.daily_quantity.append_value(row.daily_quantity);
        self.other_quantity.append_value(row.other_quantity);
        self.food_rating.append_option(row.food_rating);
        self.daily_rating.append_option(row.daily_rating);
        self.other_rating.append_option(row.other_rating);
    }

    fn build_record_batch(&mut self) -> Result<RecordBatch> {
        let mut cols = self.users.finish();
        let aggregates: [ArrayRef; 6] = [
            Arc::new(self.food_quantity.finish()),
            Arc::new(self.daily_quantity.finish()),
            Arc::new(self.other_quantity.finish()),
            Arc::new(self.food_rating.finish()),
            Arc::new(self.daily_rating.finish()),
            Arc::new(self.other_rating.finish()),
        ];
        cols.extend(aggregates);

        Ok(RecordBatch::try_new(self.schema.clone(), cols)?)
    }
}
