//! Behavioral rules that bias generated quantities and ratings.
//!
//! Every rule whose predicate holds for a user/product pair contributes its adjustment;
//! adjustments add up and the caller clamps the final value once.

use std::fmt;

use crate::bricksmart::labels::Category;
use crate::bricksmart::labels::Gender;
use crate::bricksmart::labels::Region;
use crate::bricksmart::labels::Subcategory;
use crate::bricksmart::products::Product;
use crate::bricksmart::users::User;
use crate::error::DemoGenError;
use crate::error::Result;

/// Attributes of a joined user/product pair the rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject {
    pub age: u8,
    pub gender: Gender,
    pub region: Region,
    pub category: Category,
    pub subcategory: Subcategory,
}

impl Subject {
    pub fn new(user: &User, product: &Product) -> Self {
        Subject {
            age: user.age,
            gender: user.gender,
            region: user.region,
            category: product.category,
            subcategory: product.subcategory,
        }
    }

    /// Joins by id. Ids are `1..=len` so the lookup is positional.
    pub fn lookup(
        users: &[User],
        products: &[Product],
        user_id: i64,
        product_id: i64,
    ) -> Result<Self> {
        let user = usize::try_from(user_id - 1)
            .ok()
            .and_then(|idx| users.get(idx))
            .ok_or(DemoGenError::UnknownUser(user_id))?;
        let product = usize::try_from(product_id - 1)
            .ok()
            .and_then(|idx| products.get(idx))
            .ok_or(DemoGenError::UnknownProduct(product_id))?;

        Ok(Subject::new(user, product))
    }
}

/// Half-open age interval `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: Option<u8>,
    pub max: Option<u8>,
}

impl AgeRange {
    pub fn below(max: u8) -> Self {
        AgeRange {
            min: None,
            max: Some(max),
        }
    }

    pub fn at_least(min: u8) -> Self {
        AgeRange {
            min: Some(min),
            max: None,
        }
    }

    pub fn between(min: u8, max: u8) -> Self {
        AgeRange {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn contains(&self, age: u8) -> bool {
        self.min.map(|min| age >= min).unwrap_or(true)
            && self.max.map(|max| age < max).unwrap_or(true)
    }
}

/// Conjunction of optional conditions. An empty predicate matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Predicate {
    pub age: Option<AgeRange>,
    pub gender: Option<Gender>,
    pub region: Option<Region>,
    pub category: Option<Category>,
    pub subcategory: Option<Subcategory>,
}

impl Predicate {
    pub fn matches(&self, s: &Subject) -> bool {
        self.age.map(|r| r.contains(s.age)).unwrap_or(true)
            && self.gender.map(|v| v == s.gender).unwrap_or(true)
            && self.region.map(|v| v == s.region).unwrap_or(true)
            && self.category.map(|v| v == s.category).unwrap_or(true)
            && self.subcategory.map(|v| v == s.subcategory).unwrap_or(true)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut conds = vec![];
        if let Some(age) = &self.age {
            if let Some(min) = age.min {
                conds.push(format!("age >= {min}"));
            }
            if let Some(max) = age.max {
                conds.push(format!("age < {max}"));
            }
        }
        if let Some(v) = &self.gender {
            conds.push(format!("gender = '{v}'"));
        }
        if let Some(v) = &self.region {
            conds.push(format!("region = '{v}'"));
        }
        if let Some(v) = &self.category {
            conds.push(format!("category = '{v}'"));
        }
        if let Some(v) = &self.subcategory {
            conds.push(format!("subcategory = '{v}'"));
        }

        if conds.is_empty() {
            write!(f, "TRUE")
        } else {
            write!(f, "{}", conds.join(" AND "))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub description: String,
    pub predicate: Predicate,
    pub adjustment: i32,
}

impl Rule {
    pub fn new(description: &str, adjustment: i32) -> Self {
        Rule {
            description: description.to_string(),
            predicate: Predicate::default(),
            adjustment,
        }
    }

    pub fn age(mut self, range: AgeRange) -> Self {
        self.predicate.age = Some(range);
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.predicate.gender = Some(gender);
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.predicate.region = Some(region);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.predicate.category = Some(category);
        self
    }

    pub fn subcategory(mut self, subcategory: Subcategory) -> Self {
        self.predicate.subcategory = Some(subcategory);
        self
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+} WHEN {}", self.adjustment, self.predicate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        RuleTable { rules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn matching<'a>(&'a self, s: &'a Subject) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |r| r.predicate.matches(s))
    }

    /// Sum of the adjustments of every matching rule.
    pub fn adjustment(&self, s: &Subject) -> i32 {
        self.matching(s).map(|r| r.adjustment).sum()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        use AgeRange as A;
        use Category::*;
        use Gender::*;
        use Region::*;
        use Subcategory::*;

        RuleTable::new(vec![
            Rule::new("young users buy more fresh fruit", 1)
                .age(A::below(25))
                .subcategory(Fruit),
            Rule::new("users in their late twenties value practical daily goods", 2)
                .age(A::between(25, 30))
                .category(DailyGoods),
            Rule::new("early thirties start caring about health and buy vegetables", 1)
                .age(A::between(30, 35))
                .subcategory(Vegetables),
            Rule::new("women have specific needs for daily goods", 1)
                .gender(Female)
                .category(DailyGoods),
            Rule::new("Tokyo looks for variety in food", 1)
                .region(Tokyo)
                .category(Food),
            Rule::new("Osaka prefers practical daily goods", 1)
                .region(Osaka)
                .category(DailyGoods),
            Rule::new("Fukuoka is picky about fresh fruit", -2)
                .region(Fukuoka)
                .subcategory(Fruit),
            Rule::new("Hokkaido needs cold-climate household goods", 1)
                .region(Hokkaido)
                .category(DailyGoods),
            Rule::new("Okinawa likes local fruit", 2)
                .region(Okinawa)
                .subcategory(Fruit),
            Rule::new("middle-aged users eat more vegetables", 2)
                .age(A::between(35, 50))
                .subcategory(Vegetables),
            Rule::new("young men buy sports and outdoor goods", 1)
                .age(A::below(30))
                .gender(Male)
                .category(DailyGoods),
            Rule::new("seniors cut back on daily goods", -2)
                .age(A::at_least(60))
                .category(DailyGoods),
            Rule::new("women buy beauty and health food", 1)
                .gender(Female)
                .category(Food),
            Rule::new("young Tokyo users try new products", 1)
                .age(A::below(30))
                .region(Tokyo),
            Rule::new("middle-aged Osaka households buy more food", 2)
                .age(A::between(30, 50))
                .region(Osaka)
                .category(Food),
            Rule::new("Fukuoka likes local vegetables", 1)
                .region(Fukuoka)
                .subcategory(Vegetables),
            Rule::new("young Hokkaido users buy outdoor goods", 1)
                .age(A::below(30))
                .region(Hokkaido)
                .category(DailyGoods),
            Rule::new("Okinawa seniors stick to traditional food", -2)
                .age(A::at_least(60))
                .region(Okinawa)
                .category(Food),
            Rule::new("young users buy daily goods for convenience", 1)
                .age(A::below(25))
                .category(DailyGoods),
            Rule::new("middle-aged men take care of household goods", 1)
                .age(A::between(35, 50))
                .gender(Male)
                .category(DailyGoods),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(
        age: u8,
        gender: Gender,
        region: Region,
        subcategory: Subcategory,
    ) -> Subject {
        Subject {
            age,
            gender,
            region,
            category: subcategory.category(),
            subcategory,
        }
    }

    #[test]
    fn test_default_table() {
        let rules = RuleTable::default();
        assert_eq!(rules.len(), 20);
        let adjustments = rules.iter().map(|r| r.adjustment).collect::<Vec<_>>();
        assert_eq!(adjustments, vec![
            1, 2, 1, 1, 1, 1, -2, 1, 2, 2, 1, -2, 1, 1, 2, 1, 1, -2, 1, 1
        ]);
    }

    #[test]
    fn test_two_rules_add_up() {
        let rules = RuleTable::default();
        let s = subject(20, Gender::Male, Region::Okinawa, Subcategory::Fruit);
        let fired = rules.matching(&s).map(|r| r.adjustment).collect::<Vec<_>>();
        assert_eq!(fired, vec![1, 2]);
        assert_eq!(rules.adjustment(&s), 3);
    }

    #[test]
    fn test_overlapping_rules() {
        let rules = RuleTable::default();
        // 24 year old woman in Hokkaido buying detergent:
        // 25..30 no, female+daily +1, hokkaido+daily +1, <30 male no, hokkaido+<30+daily +1,
        // <25+daily +1
        let s = subject(24, Gender::Female, Region::Hokkaido, Subcategory::Detergent);
        assert_eq!(rules.matching(&s).count(), 4);
        assert_eq!(rules.adjustment(&s), 4);

        // 65 year old man in Okinawa buying vegetables: only the senior food rule fires
        let s = subject(65, Gender::Male, Region::Okinawa, Subcategory::Vegetables);
        assert_eq!(rules.adjustment(&s), -2);

        // nothing fires
        let s = subject(55, Gender::Male, Region::Hokkaido, Subcategory::Fruit);
        assert_eq!(rules.matching(&s).count(), 0);
        assert_eq!(rules.adjustment(&s), 0);
    }

    #[test]
    fn test_age_bounds() {
        let r = AgeRange::between(25, 30);
        assert!(!r.contains(24));
        assert!(r.contains(25));
        assert!(r.contains(29));
        assert!(!r.contains(30));
        assert!(AgeRange::at_least(60).contains(60));
        assert!(!AgeRange::below(25).contains(25));
    }

    #[test]
    fn test_render() {
        let rules = RuleTable::default();
        let rendered = rules.iter().map(|r| r.to_string()).collect::<Vec<_>>();
        assert_eq!(rendered[0], "+1 WHEN age < 25 AND subcategory = 'fruit'");
        assert_eq!(
            rendered[14],
            "+2 WHEN age >= 30 AND age < 50 AND region = 'Osaka' AND category = 'food'"
        );
        assert_eq!(
            rendered[11],
            "-2 WHEN age >= 60 AND category = 'daily goods'"
        );
        assert_eq!(Predicate::default().to_string(), "TRUE");
    }

    #[test]
    fn test_lookup() -> Result<()> {
        use chrono::NaiveDate;
        use rust_decimal::Decimal;

        let users = vec![User {
            id: 1,
            name: "abcde.fghij".to_string(),
            age: 20,
            gender: Gender::Male,
            email: "abcde.fghij@example.com".to_string(),
            registration_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            region: Region::Okinawa,
        }];
        let products = vec![Product {
            id: 1,
            name: "abc_def_ghi".to_string(),
            category: Category::Food,
            subcategory: Subcategory::Fruit,
            price: Decimal::new(10000, 2),
            stock_quantity: 1,
            cost_price: Decimal::new(7000, 2),
        }];

        let s = Subject::lookup(&users, &products, 1, 1)?;
        assert_eq!(s, subject(20, Gender::Male, Region::Okinawa, Subcategory::Fruit));
        assert!(matches!(
            Subject::lookup(&users, &products, 2, 1),
            Err(DemoGenError::UnknownUser(2))
        ));
        assert!(matches!(
            Subject::lookup(&users, &products, 1, 0),
            Err(DemoGenError::UnknownProduct(0))
        ));
        Ok(())
    }
}
