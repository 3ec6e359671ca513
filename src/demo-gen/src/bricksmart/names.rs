use rand::Rng;

/// Random lowercase ascii token.
pub fn random_token<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}

/// `xxxxx.xxxxx`
pub fn username<R: Rng>(rng: &mut R) -> String {
    let first = random_token(rng, 5);
    let second = random_token(rng, 5);
    format!("{first}.{second}")
}

/// `xxx_xxx_xxx`
pub fn product_name<R: Rng>(rng: &mut R) -> String {
    let parts = (0..3).map(|_| random_token(rng, 3)).collect::<Vec<_>>();
    parts.join("_")
}

pub fn email(name: &str) -> String {
    format!("{name}@example.com")
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_shapes() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let name = username(&mut rng);
            let parts = name.split('.').collect::<Vec<_>>();
            assert_eq!(parts.len(), 2);
            assert!(parts
                .iter()
                .all(|p| p.len() == 5 && p.chars().all(|c| c.is_ascii_lowercase())));

            let product = product_name(&mut rng);
            let parts = product.split('_').collect::<Vec<_>>();
            assert_eq!(parts.len(), 3);
            assert!(parts
                .iter()
                .all(|p| p.len() == 3 && p.chars().all(|c| c.is_ascii_lowercase())));
        }
        assert_eq!(email("abcde.fghij"), "abcde.fghij@example.com");
    }
}
