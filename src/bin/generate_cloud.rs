//! Writes a synthetic magnetometer-style dump: unit field directions pushed
//! through a hard-iron offset and per-axis soft-iron gain, with gaussian
//! jitter on the field magnitude, one whitespace-separated x y z triple per
//! line.

use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Small deterministic PRNG (SplitMix64) so regenerated dumps are
/// reproducible.
struct DumpRng {
    state: u64,
}

impl DumpRng {
    fn new(seed: u64) -> Self {
        DumpRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform in [-1, 1).
    fn next_signed(&mut self) -> f64 {
        2.0 * self.next_f64() - 1.0
    }

    /// Standard normal deviate, Marsaglia polar method.
    fn gauss(&mut self) -> f64 {
        loop {
            let u = self.next_signed();
            let v = self.next_signed();
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                return u * ((-2.0 * s.ln()) / s).sqrt();
            }
        }
    }

    /// Uniform direction on the unit sphere: uniform z, uniform azimuth.
    fn direction(&mut self) -> [f64; 3] {
        let z = self.next_signed();
        let phi = 2.0 * std::f64::consts::PI * self.next_f64();
        let r = (1.0 - z * z).sqrt();
        [r * phi.cos(), r * phi.sin(), z]
    }
}

fn main() {
    let out_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "magn_dump.txt".to_string());

    let mut rng = DumpRng::new(0x7261_7874);

    // Hard-iron offset (cloud centre) and soft-iron gain (per-axis
    // semi-axes), in arbitrary sensor units.
    let center = [12.5, -4.2, 7.9];
    let gain = [52.0, 44.0, 61.0];
    // Relative jitter of the field magnitude per reading.
    let field_noise = 0.008;
    let n = 2000;

    let file = File::create(&out_path).expect("Failed to create output file");
    let mut w = BufWriter::new(file);

    for _ in 0..n {
        let dir = rng.direction();
        let field = 1.0 + field_noise * rng.gauss();
        let x = center[0] + gain[0] * field * dir[0];
        let y = center[1] + gain[1] * field * dir[1];
        let z = center[2] + gain[2] * field * dir[2];
        writeln!(w, "{x:.6} {y:.6} {z:.6}").expect("Failed to write sample");
    }
    w.flush().expect("Failed to flush output file");

    println!("Wrote {n} samples to {out_path}");
}
