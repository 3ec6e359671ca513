//! Metadata statements issued after the tables are written.

use catalog::ColumnMask;
use catalog::Statement;
use common::config::Masking;
use common::types::*;

pub const MASK_EMAIL_FUNCTION: &str = "mask_email";

const USER_COLUMNS: &[(&str, &str)] = &[
    (COLUMN_USER_ID, "integer, unique (primary key)"),
    (COLUMN_NAME, "string"),
    (COLUMN_AGE, "integer, 0 or more"),
    (COLUMN_GENDER, "string, 'male' or 'female'"),
    (COLUMN_EMAIL, "string, email format"),
    (COLUMN_REGISTRATION_DATE, "date, YYYY-MM-DD format"),
    (COLUMN_REGION, "string, e.g. 'Tokyo', 'Osaka', 'Hokkaido'"),
];

const USERS_TABLE: &str = "The users table holds the users registered with the BrickSmart online \
    grocery: demographics such as age, gender and region plus contact details. Use it to \
    segment users, understand their preferences and tailor the platform to different user \
    groups, as well as to track engagement and measure marketing campaigns.";

const TRANSACTION_COLUMNS: &[(&str, &str)] = &[
    (COLUMN_TRANSACTION_ID, "integer, unique (primary key)"),
    (
        COLUMN_USER_ID,
        "integer, links to `user_id` of the `users` table (foreign key)",
    ),
    (
        COLUMN_PRODUCT_ID,
        "integer, links to `product_id` of the `products` table (foreign key)",
    ),
    (COLUMN_QUANTITY, "integer, 0 or more"),
    (COLUMN_PRICE, "decimal, 0 or more"),
    (COLUMN_TRANSACTION_DATE, "date, YYYY-MM-DD format"),
    (COLUMN_STORE_ID, "integer, id of the store the purchase was made in"),
];

const TRANSACTIONS_TABLE: &str = "The transactions table holds the sales made to BrickSmart \
    users: product, quantity, price, date and store of every purchase. Use it to analyse \
    sales trends, follow user behavior and find the most popular stores and products for \
    inventory and marketing planning.";

const PRODUCT_COLUMNS: &[(&str, &str)] = &[
    (COLUMN_PRODUCT_ID, "integer, unique (primary key)"),
    (COLUMN_PRODUCT_NAME, "string"),
    (COLUMN_CATEGORY, "string, 'food' or 'daily goods'"),
    (COLUMN_SUBCATEGORY, "string, e.g. 'vegetables', 'detergent'"),
    (COLUMN_PRICE, "decimal, 0 or more"),
    (COLUMN_STOCK_QUANTITY, "integer, units in stock"),
    (COLUMN_COST_PRICE, "decimal, purchase cost"),
];

const PRODUCTS_TABLE: &str = "The products table holds the products sold by BrickSmart: name, \
    category, subcategory, price, stock and cost. Use it for inventory management, pricing \
    analysis and product classification, and to spot growth opportunities in particular \
    categories.";

const FEEDBACK_COLUMNS: &[(&str, &str)] = &[
    (COLUMN_FEEDBACK_ID, "integer, unique (primary key)"),
    (
        COLUMN_USER_ID,
        "integer, links to `user_id` of the `users` table (foreign key)",
    ),
    (
        COLUMN_PRODUCT_ID,
        "integer, links to `product_id` of the `products` table (foreign key)",
    ),
    (COLUMN_RATING, "integer, rating from 0 to 5"),
    (COLUMN_DATE, "date, YYYY-MM-DD format"),
    (COLUMN_TYPE, "string, 'product', 'service' or 'other'"),
    (COLUMN_COMMENT, "string"),
];

const FEEDBACKS_TABLE: &str = "The feedbacks table holds user reviews of BrickSmart products: \
    rating, date and type of every review. Use it to understand user preferences, find \
    product issues and follow satisfaction over time.";

const GOLD_COLUMNS: &[(&str, &str)] = &[
    (COLUMN_FOOD_QUANTITY, "integer, total units of food bought"),
    (COLUMN_DAILY_QUANTITY, "integer, total units of daily goods bought"),
    (COLUMN_OTHER_QUANTITY, "integer, total units of other products bought"),
    (COLUMN_FOOD_RATING, "float, average review rating for food"),
    (COLUMN_DAILY_RATING, "float, average review rating for daily goods"),
    (COLUMN_OTHER_RATING, "float, average review rating for other products"),
];

const GOLD_TABLE: &str = "The gold_user table combines every user with their purchases and \
    average ratings per product category. Use it to understand consumption habits, follow \
    food trends and build recommendations tailored to individual users.";

fn comments(table: &str, columns: &[(&str, &str)], comment: &str) -> Vec<Statement> {
    columns
        .iter()
        .map(|(column, text)| Statement::column_comment(table, column, text))
        .chain([Statement::table_comment(table, comment)])
        .collect()
}

/// Column and table comments of the four base tables.
pub fn base_comments() -> Vec<Statement> {
    [
        comments(TABLE_USERS, USER_COLUMNS, USERS_TABLE),
        comments(TABLE_TRANSACTIONS, TRANSACTION_COLUMNS, TRANSACTIONS_TABLE),
        comments(TABLE_PRODUCTS, PRODUCT_COLUMNS, PRODUCTS_TABLE),
        comments(TABLE_FEEDBACKS, FEEDBACK_COLUMNS, FEEDBACKS_TABLE),
    ]
    .concat()
}

pub fn gold_comments() -> Vec<Statement> {
    let columns = [USER_COLUMNS, GOLD_COLUMNS].concat();
    comments(TABLE_GOLD_USER, &columns, GOLD_TABLE)
}

pub fn pii_tags() -> Vec<Statement> {
    [TABLE_USERS, TABLE_GOLD_USER]
        .into_iter()
        .flat_map(|table| {
            [
                Statement::tag(table, COLUMN_NAME, TAG_PII_NAME),
                Statement::tag(table, COLUMN_EMAIL, TAG_PII_EMAIL),
            ]
        })
        .collect()
}

const PRIMARY_KEYS: [(&str, &str, &str); 5] = [
    (TABLE_USERS, "users_pk", COLUMN_USER_ID),
    (TABLE_TRANSACTIONS, "transactions_pk", COLUMN_TRANSACTION_ID),
    (TABLE_PRODUCTS, "products_pk", COLUMN_PRODUCT_ID),
    (TABLE_FEEDBACKS, "feedbacks_pk", COLUMN_FEEDBACK_ID),
    (TABLE_GOLD_USER, "gold_user_pk", COLUMN_USER_ID),
];

/// `SET NOT NULL` on every key column, then the primary keys.
pub fn primary_keys() -> Vec<Statement> {
    let not_null = PRIMARY_KEYS
        .iter()
        .map(|(table, _, column)| Statement::not_null(table, column));
    let pks = PRIMARY_KEYS
        .iter()
        .map(|(table, name, column)| Statement::primary_key(table, name, column));

    not_null.chain(pks).collect()
}

pub fn foreign_keys() -> Vec<Statement> {
    vec![
        Statement::foreign_key(
            TABLE_TRANSACTIONS,
            "transactions_users_fk",
            COLUMN_USER_ID,
            TABLE_USERS,
        ),
        Statement::foreign_key(
            TABLE_TRANSACTIONS,
            "transactions_products_fk",
            COLUMN_PRODUCT_ID,
            TABLE_PRODUCTS,
        ),
        Statement::foreign_key(
            TABLE_FEEDBACKS,
            "feedbacks_users_fk",
            COLUMN_USER_ID,
            TABLE_USERS,
        ),
        Statement::foreign_key(
            TABLE_FEEDBACKS,
            "feedbacks_products_fk",
            COLUMN_PRODUCT_ID,
            TABLE_PRODUCTS,
        ),
    ]
}

pub fn email_mask(cfg: &Masking) -> ColumnMask {
    ColumnMask::new(
        MASK_EMAIL_FUNCTION,
        COLUMN_EMAIL,
        &cfg.privileged_group,
        &cfg.masked_email,
    )
}

/// The mask function followed by the masks on every email column.
pub fn masking(cfg: &Masking) -> Vec<Statement> {
    vec![
        Statement::CreateFunction(email_mask(cfg)),
        Statement::mask(TABLE_USERS, COLUMN_EMAIL, MASK_EMAIL_FUNCTION),
        Statement::mask(TABLE_GOLD_USER, COLUMN_EMAIL, MASK_EMAIL_FUNCTION),
    ]
}

#[cfg(test)]
mod tests {
    use common::config::Config;

    use super::*;

    #[test]
    fn test_comments_cover_every_column() {
        let tables = [
            (TABLE_USERS, crate::bricksmart::schema::users()),
            (TABLE_TRANSACTIONS, crate::bricksmart::schema::transactions()),
            (TABLE_PRODUCTS, crate::bricksmart::schema::products()),
            (TABLE_FEEDBACKS, crate::bricksmart::schema::feedbacks()),
        ];
        let stmts = base_comments();
        for (table, schema) in tables {
            for field in schema.fields() {
                assert!(stmts.iter().any(|s| matches!(
                    s,
                    Statement::CommentOnColumn { table: t, column, .. }
                        if t == table && column == field.name()
                )));
            }
            assert!(stmts.iter().any(
                |s| matches!(s, Statement::CommentOnTable { table: t, .. } if t == table)
            ));
        }

        let gold = gold_comments();
        assert_eq!(
            gold.len(),
            crate::bricksmart::schema::gold_user().fields().len() + 1
        );
    }

    #[test]
    fn test_constraints_render() {
        let rendered = primary_keys()
            .iter()
            .chain(foreign_keys().iter())
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        assert_eq!(rendered.len(), 14);
        assert_eq!(
            rendered[0],
            "ALTER TABLE users ALTER COLUMN user_id SET NOT NULL"
        );
        assert_eq!(
            rendered[5],
            "ALTER TABLE users ADD CONSTRAINT users_pk PRIMARY KEY (user_id)"
        );
        assert_eq!(
            rendered[10],
            "ALTER TABLE transactions ADD CONSTRAINT transactions_users_fk FOREIGN KEY (user_id) REFERENCES users (user_id) NOT ENFORCED RELY"
        );
    }

    #[test]
    fn test_masking() {
        let cfg = Config::default();
        let stmts = masking(&cfg.masking);
        assert_eq!(
            stmts[0].to_string(),
            "CREATE OR REPLACE FUNCTION mask_email(email STRING) RETURN CASE WHEN is_member('admins') THEN email ELSE '***@example.com' END"
        );
        assert_eq!(
            stmts[2].to_string(),
            "ALTER TABLE gold_user ALTER COLUMN email SET MASK mask_email"
        );
        assert_eq!(pii_tags()[3].to_string(), "ALTER TABLE gold_user ALTER COLUMN email SET TAGS ('pii_email')");
    }
}
