pub const DECIMAL_PRECISION: u8 = 10;
pub const DECIMAL_SCALE: i8 = 2;

pub const TABLE_USERS: &str = "users";
pub const TABLE_PRODUCTS: &str = "products";
pub const TABLE_TRANSACTIONS: &str = "transactions";
pub const TABLE_FEEDBACKS: &str = "feedbacks";
pub const TABLE_GOLD_USER: &str = "gold_user";

pub const COLUMN_USER_ID: &str = "user_id";
pub const COLUMN_NAME: &str = "name";
pub const COLUMN_AGE: &str = "age";
pub const COLUMN_GENDER: &str = "gender";
pub const COLUMN_EMAIL: &str = "email";
pub const COLUMN_REGISTRATION_DATE: &str = "registration_date";
pub const COLUMN_REGION: &str = "region";

pub const COLUMN_PRODUCT_ID: &str = "product_id";
pub const COLUMN_PRODUCT_NAME: &str = "product_name";
pub const COLUMN_CATEGORY: &str = "category";
pub const COLUMN_SUBCATEGORY: &str = "subcategory";
pub const COLUMN_PRICE: &str = "price";
pub const COLUMN_STOCK_QUANTITY: &str = "stock_quantity";
pub const COLUMN_COST_PRICE: &str = "cost_price";

pub const COLUMN_TRANSACTION_ID: &str = "transaction_id";
pub const COLUMN_QUANTITY: &str = "quantity";
pub const COLUMN_TRANSACTION_DATE: &str = "transaction_date";
pub const COLUMN_STORE_ID: &str = "store_id";

pub const COLUMN_FEEDBACK_ID: &str = "feedback_id";
pub const COLUMN_RATING: &str = "rating";
pub const COLUMN_DATE: &str = "date";
pub const COLUMN_TYPE: &str = "type";
pub const COLUMN_COMMENT: &str = "comment";

pub const COLUMN_FOOD_QUANTITY: &str = "food_quantity";
pub const COLUMN_DAILY_QUANTITY: &str = "daily_quantity";
pub const COLUMN_OTHER_QUANTITY: &str = "other_quantity";
pub const COLUMN_FOOD_RATING: &str = "food_rating";
pub const COLUMN_DAILY_RATING: &str = "daily_rating";
pub const COLUMN_OTHER_RATING: &str = "other_rating";

pub const TAG_PII_NAME: &str = "pii_name";
pub const TAG_PII_EMAIL: &str = "pii_email";
