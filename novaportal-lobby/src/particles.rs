use rand::Rng;

/// Scatter `count` particles uniformly inside an origin-centered cube of
/// the given side length, as a flat xyz array. Every call draws fresh
/// positions; clouds are never shared between scenes.
pub fn scatter(count: usize, side: f32) -> Vec<f32> {
    let half = side / 2.0;
    let mut rng = rand::thread_rng();
    (0..count * 3).map(|_| rng.gen_range(-half..half)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── scatter ──

    #[test]
    fn test_scatter_count() {
        let positions = scatter(5000, 100.0);
        assert_eq!(positions.len(), 5000 * 3);
    }

    #[test]
    fn test_scatter_within_symmetric_range() {
        let positions = scatter(5000, 100.0);
        assert!(positions.iter().all(|&c| (-50.0..50.0).contains(&c)));
    }

    #[test]
    fn test_scatter_fresh_each_call() {
        assert_ne!(scatter(100, 100.0), scatter(100, 100.0));
    }

    #[test]
    fn test_scatter_fills_the_volume() {
        // With 15000 uniform draws both halves of every axis get hits
        let positions = scatter(5000, 100.0);
        assert!(positions.iter().any(|&c| c > 0.0));
        assert!(positions.iter().any(|&c| c < 0.0));
    }
}
