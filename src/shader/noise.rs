//! Value noise over a permutation table (coherent, [0, 1])

use super::math::{mix, smoothstep};
use rand::prelude::*;

const TABLE_SIZE: usize = 256;

/// 2D value noise. The table is filled once from the RNG handed to `new`,
/// so one instance is stable and two instances almost surely differ.
pub struct ValueNoise {
    values: [f64; TABLE_SIZE],
    /// Permutation of 0..TABLE_SIZE, stored twice so `perm[a] + b` never wraps
    perm: [usize; TABLE_SIZE * 2],
}

impl ValueNoise {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut values = [0.0; TABLE_SIZE];
        for v in values.iter_mut() {
            *v = rng.gen::<f64>();
        }

        let mut order: Vec<usize> = (0..TABLE_SIZE).collect();
        order.shuffle(rng);

        let mut perm = [0usize; TABLE_SIZE * 2];
        for (k, &p) in order.iter().enumerate() {
            perm[k] = p;
            perm[k + TABLE_SIZE] = p;
        }

        Self { values, perm }
    }

    #[inline]
    fn corner(&self, rx: usize, ry: usize) -> f64 {
        self.values[self.perm[self.perm[rx] + ry]]
    }

    /// Sample the field at a continuous coordinate
    pub fn sample(&self, px: f64, py: f64) -> f64 {
        let xf = px.floor();
        let yf = py.floor();
        let tx = px - xf;
        let ty = py - yf;

        let n = TABLE_SIZE as i64;
        let rx0 = (xf as i64).rem_euclid(n) as usize;
        let ry0 = (yf as i64).rem_euclid(n) as usize;
        let rx1 = (rx0 + 1) % TABLE_SIZE;
        let ry1 = (ry0 + 1) % TABLE_SIZE;

        let c00 = self.corner(rx0, ry0);
        let c10 = self.corner(rx1, ry0);
        let c01 = self.corner(rx0, ry1);
        let c11 = self.corner(rx1, ry1);

        let sx = smoothstep(0.0, 1.0, tx);
        let sy = smoothstep(0.0, 1.0, ty);

        let nx0 = mix(c00, c10, sx);
        let nx1 = mix(c01, c11, sx);
        mix(nx0, nx1, sy).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noise(seed: u64) -> ValueNoise {
        ValueNoise::new(&mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn output_stays_in_unit_range() {
        let n = noise(1);
        let mut y = -700.0;
        while y < 700.0 {
            let mut x = -700.0;
            while x < 700.0 {
                let v = n.sample(x, y);
                assert!((0.0..=1.0).contains(&v), "({}, {}) -> {}", x, y, v);
                x += 13.37;
            }
            y += 11.1;
        }
    }

    #[test]
    fn same_instance_is_deterministic() {
        let n = noise(7);
        for i in 0..200 {
            let (x, y) = (i as f64 * 0.37, i as f64 * 0.0015);
            assert_eq!(n.sample(x, y).to_bits(), n.sample(x, y).to_bits());
        }
    }

    #[test]
    fn separate_instances_differ() {
        let a = noise(1);
        let b = noise(2);
        let differing = (0..64)
            .filter(|&i| {
                let x = i as f64 * 0.5 + 0.25;
                (a.sample(x, 0.3) - b.sample(x, 0.3)).abs() > 1e-9
            })
            .count();
        assert!(differing > 32);
    }

    #[test]
    fn continuous_across_integer_boundaries() {
        let n = noise(3);
        for i in -5..20 {
            let edge = i as f64;
            let left = n.sample(edge - 1e-7, 0.4);
            let right = n.sample(edge, 0.4);
            assert!((left - right).abs() < 1e-4, "jump at x = {}", edge);

            let below = n.sample(2.6, edge - 1e-7);
            let above = n.sample(2.6, edge);
            assert!((below - above).abs() < 1e-4, "jump at y = {}", edge);
        }
    }

    #[test]
    fn lattice_points_hit_table_values() {
        let n = noise(4);
        let v = n.sample(3.0, 5.0);
        assert_eq!(v, n.corner(3, 5));
        // Wraps with the table, including negatives
        assert_eq!(n.sample(3.0 + 256.0, 5.0), v);
        assert_eq!(n.sample(3.0 - 256.0, 5.0 - 512.0), v);
    }
}
