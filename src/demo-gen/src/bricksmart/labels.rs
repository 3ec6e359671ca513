use enum_iterator::Sequence;
use strum_macros::Display;
use strum_macros::EnumString;

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Display, EnumString, Sequence)]
pub enum Gender {
    #[strum(serialize = "male")]
    Male,
    #[strum(serialize = "female")]
    Female,
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Display, EnumString, Sequence)]
pub enum Region {
    Hokkaido,
    Tokyo,
    Osaka,
    Fukuoka,
    Okinawa,
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Display, EnumString, Sequence)]
pub enum Category {
    #[strum(serialize = "food")]
    Food,
    #[strum(serialize = "daily goods")]
    DailyGoods,
}

impl Category {
    pub fn subcategories(&self) -> [Subcategory; 2] {
        match self {
            Category::Food => [Subcategory::Vegetables, Subcategory::Fruit],
            Category::DailyGoods => [Subcategory::Detergent, Subcategory::ToiletPaper],
        }
    }
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Display, EnumString, Sequence)]
pub enum Subcategory {
    #[strum(serialize = "vegetables")]
    Vegetables,
    #[strum(serialize = "fruit")]
    Fruit,
    #[strum(serialize = "detergent")]
    Detergent,
    #[strum(serialize = "toilet paper")]
    ToiletPaper,
}

impl Subcategory {
    pub fn category(&self) -> Category {
        match self {
            Subcategory::Vegetables | Subcategory::Fruit => Category::Food,
            Subcategory::Detergent | Subcategory::ToiletPaper => Category::DailyGoods,
        }
    }
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Display, EnumString, Sequence)]
pub enum FeedbackType {
    #[strum(serialize = "product")]
    Product,
    #[strum(serialize = "service")]
    Service,
    #[strum(serialize = "other")]
    Other,
}

#[cfg(test)]
mod tests {
    use enum_iterator::all;

    use super::*;

    #[test]
    fn test_labels_parse_back() {
        for v in all::<Region>() {
            assert_eq!(v.to_string().parse::<Region>().unwrap(), v);
        }
        for v in all::<Subcategory>() {
            assert_eq!(v.to_string().parse::<Subcategory>().unwrap(), v);
        }
        assert_eq!("daily goods".parse::<Category>().unwrap(), Category::DailyGoods);
        assert_eq!(Gender::Female.to_string(), "female");
        assert_eq!(FeedbackType::Service.to_string(), "service");
    }

    #[test]
    fn test_subcategories_belong_to_category() {
        for cat in all::<Category>() {
            for sub in cat.subcategories() {
                assert_eq!(sub.category(), cat);
            }
        }
    }
}
