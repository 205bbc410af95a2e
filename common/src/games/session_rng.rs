use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        Self::new(random_seed())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }
}

pub fn random_seed() -> u64 {
    rand::rng().random()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_produces_same_sequence() {
        let mut first = SessionRng::new(42);
        let mut second = SessionRng::new(42);

        let a: Vec<usize> = (0..32).map(|_| first.random_range(0..3)).collect();
        let b: Vec<usize> = (0..32).map(|_| second.random_range(0..3)).collect();

        assert_eq!(a, b);
        assert_eq!(first.seed(), 42);
    }

    #[test]
    fn test_random_range_stays_in_bounds() {
        let mut rng = SessionRng::from_random();
        for _ in 0..1000 {
            let value: usize = rng.random_range(0..3);
            assert!(value < 3);
        }
    }
}
