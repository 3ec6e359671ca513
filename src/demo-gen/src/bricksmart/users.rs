use chrono::NaiveDate;
use rand::Rng;

use crate::bricksmart::dates::REGISTRATION_DATE;
use crate::bricksmart::labels::Gender;
use crate::bricksmart::labels::Region;
use crate::bricksmart::names;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub email: String,
    pub registration_date: NaiveDate,
    pub region: Region,
}

/// Users with ids `1..=count`.
pub fn generate_users<R: Rng>(rng: &mut R, count: usize) -> Vec<User> {
    (1..=count as i64).map(|id| sample_user(rng, id)).collect()
}

pub fn sample_user<R: Rng>(rng: &mut R, id: i64) -> User {
    let name = names::username(rng);
    let age = (rng.gen::<f64>() * 60. + 18.).round() as u8;
    let gender = if rng.gen::<f64>() > 0.5 {
        Gender::Male
    } else {
        Gender::Female
    };

    User {
        id,
        email: names::email(&name),
        name,
        age,
        gender,
        registration_date: *REGISTRATION_DATE,
        region: sample_region(rng),
    }
}

/// Cumulative bands of 0.2, each tested against its own draw. Earlier bands win more often
/// than the widths suggest.
pub fn sample_region<R: Rng>(rng: &mut R) -> Region {
    const BANDS: [(f64, Region); 4] = [
        (0.2, Region::Hokkaido),
        (0.4, Region::Tokyo),
        (0.6, Region::Osaka),
        (0.8, Region::Fukuoka),
    ];

    for (threshold, region) in BANDS {
        if rng.gen::<f64>() < threshold {
            return region;
        }
    }

    Region::Okinawa
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_users() {
        let mut rng = StdRng::seed_from_u64(42);
        let users = generate_users(&mut rng, 5000);
        assert_eq!(users.len(), 5000);
        for (idx, user) in users.iter().enumerate() {
            assert_eq!(user.id, idx as i64 + 1);
            assert!((18..=78).contains(&user.age));
            assert!(matches!(user.gender, Gender::Male | Gender::Female));
            assert_eq!(user.email, format!("{}@example.com", user.name));
            assert_eq!(user.registration_date, *REGISTRATION_DATE);
        }
    }

    #[test]
    fn test_region_distribution() {
        let mut rng = StdRng::seed_from_u64(3);
        let n = 100_000;
        let mut counts: HashMap<Region, usize> = HashMap::new();
        for _ in 0..n {
            *counts.entry(sample_region(&mut rng)).or_default() += 1;
        }
        let share = |r: Region| counts.get(&r).copied().unwrap_or(0) as f64 / n as f64;

        // 0.2, 0.8*0.4, 0.8*0.6*0.6, 0.8*0.6*0.4*0.8, 0.8*0.6*0.4*0.2
        assert!((share(Region::Hokkaido) - 0.2).abs() < 0.01);
        assert!((share(Region::Tokyo) - 0.32).abs() < 0.01);
        assert!((share(Region::Osaka) - 0.288).abs() < 0.01);
        assert!((share(Region::Fukuoka) - 0.1536).abs() < 0.01);
        assert!((share(Region::Okinawa) - 0.0384).abs() < 0.01);
    }
}
