use rand::Rng;

/// Returns a uniformly shuffled copy of `items`, leaving the input untouched.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

/// Fisher-Yates over a copy of `items` using the supplied rng.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();

    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }

    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn sorted(mut v: Vec<String>) -> Vec<String> {
        v.sort();
        v
    }

    #[test]
    fn test_shuffle_empty() {
        let empty: Vec<String> = vec![];
        assert_eq!(shuffle(&empty), empty);
    }

    #[test]
    fn test_shuffle_single() {
        assert_eq!(shuffle(&["cat"]), vec!["cat"]);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let words: Vec<String> = ["cat", "dog", "fox", "owl", "eel", "cat"]
            .iter()
            .map(|w| w.to_string())
            .collect();

        for seed in 0..50u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let shuffled = shuffle_with(&words, &mut rng);
            assert_eq!(shuffled.len(), words.len());
            assert_eq!(sorted(shuffled), sorted(words.clone()));
        }
    }

    #[test]
    fn test_shuffle_leaves_input_unmodified() {
        let words = vec!["a", "b", "c", "d"];
        let _ = shuffle(&words);
        assert_eq!(words, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_shuffle_reaches_every_position() {
        // Over enough seeds the first element should land in every slot
        let items = [0usize, 1, 2, 3];
        let mut seen = [false; 4];

        for seed in 0..200u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let shuffled = shuffle_with(&items, &mut rng);
            let pos = shuffled.iter().position(|&x| x == 0).unwrap();
            seen[pos] = true;
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_shuffle_deterministic_for_seed() {
        let items: Vec<u32> = (0..20).collect();
        let a = shuffle_with(&items, &mut StdRng::seed_from_u64(7));
        let b = shuffle_with(&items, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
