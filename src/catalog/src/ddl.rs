use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::mask::ColumnMask;

/// Single-quoted SQL string literal.
pub fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: String,
    pub name: String,
    pub columns: Vec<String>,
    pub ref_table: String,
    pub ref_columns: Vec<String>,
    /// Informational constraint the optimizer may rely on without checking it.
    pub rely: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    CommentOnColumn {
        table: String,
        column: String,
        comment: String,
    },
    CommentOnTable {
        table: String,
        comment: String,
    },
    SetColumnTags {
        table: String,
        column: String,
        tags: Vec<String>,
    },
    SetNotNull {
        table: String,
        column: String,
    },
    AddPrimaryKey {
        table: String,
        name: String,
        columns: Vec<String>,
    },
    AddForeignKey(ForeignKey),
    CreateFunction(ColumnMask),
    SetColumnMask {
        table: String,
        column: String,
        function: String,
    },
}

impl Statement {
    pub fn column_comment(table: &str, column: &str, comment: &str) -> Self {
        Statement::CommentOnColumn {
            table: table.to_string(),
            column: column.to_string(),
            comment: comment.to_string(),
        }
    }

    pub fn table_comment(table: &str, comment: &str) -> Self {
        Statement::CommentOnTable {
            table: table.to_string(),
            comment: comment.to_string(),
        }
    }

    pub fn tag(table: &str, column: &str, tag: &str) -> Self {
        Statement::SetColumnTags {
            table: table.to_string(),
            column: column.to_string(),
            tags: vec![tag.to_string()],
        }
    }

    pub fn not_null(table: &str, column: &str) -> Self {
        Statement::SetNotNull {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    pub fn primary_key(table: &str, name: &str, column: &str) -> Self {
        Statement::AddPrimaryKey {
            table: table.to_string(),
            name: name.to_string(),
            columns: vec![column.to_string()],
        }
    }

    pub fn foreign_key(table: &str, name: &str, column: &str, ref_table: &str) -> Self {
        Statement::AddForeignKey(ForeignKey {
            table: table.to_string(),
            name: name.to_string(),
            columns: vec![column.to_string()],
            ref_table: ref_table.to_string(),
            ref_columns: vec![column.to_string()],
            rely: true,
        })
    }

    pub fn mask(table: &str, column: &str, function: &str) -> Self {
        Statement::SetColumnMask {
            table: table.to_string(),
            column: column.to_string(),
            function: function.to_string(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::CommentOnColumn {
                table,
                column,
                comment,
            } => write!(
                f,
                "ALTER TABLE {table} ALTER COLUMN {column} COMMENT {}",
                quote(comment)
            ),
            Statement::CommentOnTable { table, comment } => {
                write!(f, "COMMENT ON TABLE {table} IS {}", quote(comment))
            }
            Statement::SetColumnTags {
                table,
                column,
                tags,
            } => write!(
                f,
                "ALTER TABLE {table} ALTER COLUMN {column} SET TAGS ({})",
                tags.iter().map(|t| quote(t)).collect::<Vec<_>>().join(", ")
            ),
            Statement::SetNotNull { table, column } => {
                write!(f, "ALTER TABLE {table} ALTER COLUMN {column} SET NOT NULL")
            }
            Statement::AddPrimaryKey {
                table,
                name,
                columns,
            } => write!(
                f,
                "ALTER TABLE {table} ADD CONSTRAINT {name} PRIMARY KEY ({})",
                columns.join(", ")
            ),
            Statement::AddForeignKey(fk) => {
                write!(
                    f,
                    "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({}) NOT ENFORCED",
                    fk.table,
                    fk.name,
                    fk.columns.join(", "),
                    fk.ref_table,
                    fk.ref_columns.join(", ")
                )?;
                if fk.rely {
                    write!(f, " RELY")?;
                }
                Ok(())
            }
            Statement::CreateFunction(mask) => write!(f, "{mask}"),
            Statement::SetColumnMask {
                table,
                column,
                function,
            } => write!(f, "ALTER TABLE {table} ALTER COLUMN {column} SET MASK {function}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(
            Statement::column_comment("users", "age", "integer, 18 or older").to_string(),
            "ALTER TABLE users ALTER COLUMN age COMMENT 'integer, 18 or older'"
        );
        assert_eq!(
            Statement::table_comment("users", "the user's table").to_string(),
            "COMMENT ON TABLE users IS 'the user\\'s table'"
        );
        assert_eq!(
            Statement::tag("users", "email", "pii_email").to_string(),
            "ALTER TABLE users ALTER COLUMN email SET TAGS ('pii_email')"
        );
        assert_eq!(
            Statement::not_null("users", "user_id").to_string(),
            "ALTER TABLE users ALTER COLUMN user_id SET NOT NULL"
        );
        assert_eq!(
            Statement::primary_key("users", "users_pk", "user_id").to_string(),
            "ALTER TABLE users ADD CONSTRAINT users_pk PRIMARY KEY (user_id)"
        );
        assert_eq!(
            Statement::foreign_key("transactions", "transactions_users_fk", "user_id", "users")
                .to_string(),
            "ALTER TABLE transactions ADD CONSTRAINT transactions_users_fk FOREIGN KEY (user_id) REFERENCES users (user_id) NOT ENFORCED RELY"
        );
        assert_eq!(
            Statement::mask("users", "email", "mask_email").to_string(),
            "ALTER TABLE users ALTER COLUMN email SET MASK mask_email"
        );
    }
}
