use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::ddl::quote;

/// Column mask function: callers in the privileged group see the value, everybody else
/// sees the replacement.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ColumnMask {
    pub name: String,
    pub param: String,
    pub privileged_group: String,
    pub replacement: String,
}

impl ColumnMask {
    pub fn new(name: &str, param: &str, privileged_group: &str, replacement: &str) -> Self {
        ColumnMask {
            name: name.to_string(),
            param: param.to_string(),
            privileged_group: privileged_group.to_string(),
            replacement: replacement.to_string(),
        }
    }

    pub fn apply<'a>(&'a self, value: &'a str, groups: &[&str]) -> &'a str {
        if groups.iter().any(|g| *g == self.privileged_group) {
            value
        } else {
            self.replacement.as_str()
        }
    }
}

impl fmt::Display for ColumnMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE OR REPLACE FUNCTION {name}({param} STRING) RETURN CASE WHEN is_member({group}) THEN {param} ELSE {replacement} END",
            name = self.name,
            param = self.param,
            group = quote(&self.privileged_group),
            replacement = quote(&self.replacement),
        )
    }
}
