use rand::prelude::*;

// Skewing factors for 3D simplex noise
const F3: f64 = 1.0 / 3.0;
const G3: f64 = 1.0 / 6.0;

const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// Seeded 3D simplex noise.
///
/// Output is smooth in all three inputs and lies in `[-1, 1]`. Two instances
/// built from the same seed produce identical fields.
#[derive(Clone)]
pub struct Simplex {
    perm: [u8; 512],
}

impl Simplex {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut p: [u8; 256] = std::array::from_fn(|i| i as u8);
        p.shuffle(&mut rng);
        let perm = std::array::from_fn(|i| p[i & 255]);
        Self { perm }
    }

    #[inline]
    fn hash(&self, i: i32, j: i32, k: i32) -> usize {
        let i = (i & 255) as usize;
        let j = (j & 255) as usize;
        let k = (k & 255) as usize;
        self.perm[i + self.perm[j + self.perm[k] as usize] as usize] as usize % 12
    }

    pub fn noise3(&self, x: f32, y: f32, z: f32) -> f32 {
        self.noise3_f64(f64::from(x), f64::from(y), f64::from(z))
    }

    /// Same field sampled in double precision, for inputs that grow without
    /// bound such as an animation clock.
    pub fn noise3_f64(&self, x: f64, y: f64, z: f64) -> f32 {
        let s = (x + y + z) * F3;
        let i = (x + s).floor() as i32;
        let j = (y + s).floor() as i32;
        let k = (z + s).floor() as i32;
        let t = (i + j + k) as f64 * G3;
        let x0 = x - (i as f64 - t);
        let y0 = y - (j as f64 - t);
        let z0 = z - (k as f64 - t);

        // Which of the six tetrahedra of the skewed cube contains the point
        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0)
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1)
            } else {
                (0, 0, 1, 1, 0, 1)
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1)
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1)
        } else {
            (0, 1, 0, 1, 1, 0)
        };

        let corners = [
            (x0, y0, z0, self.hash(i, j, k)),
            (
                x0 - i1 as f64 + G3,
                y0 - j1 as f64 + G3,
                z0 - k1 as f64 + G3,
                self.hash(i + i1, j + j1, k + k1),
            ),
            (
                x0 - i2 as f64 + 2.0 * G3,
                y0 - j2 as f64 + 2.0 * G3,
                z0 - k2 as f64 + 2.0 * G3,
                self.hash(i + i2, j + j2, k + k2),
            ),
            (
                x0 - 1.0 + 3.0 * G3,
                y0 - 1.0 + 3.0 * G3,
                z0 - 1.0 + 3.0 * G3,
                self.hash(i + 1, j + 1, k + 1),
            ),
        ];

        let mut n = 0.0;
        for (cx, cy, cz, gi) in corners {
            let t = 0.6 - cx * cx - cy * cy - cz * cz;
            if t > 0.0 {
                let g = GRAD3[gi];
                let t2 = t * t;
                n += t2 * t2 * (g[0] * cx + g[1] * cy + g[2] * cz);
            }
        }
        (32.0 * n).clamp(-1.0, 1.0) as f32
    }
}
