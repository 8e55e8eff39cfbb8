use crate::plot::ExportFormat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{Error, ErrorKind, Write};
use std::path::Path;

/// Exact fraction of the cube `[-1, 1]^d` occupied by the unit d-ball:
/// `pi^(d/2) / (gamma(d/2 + 1) * 2^d)`.
///
/// Decays super-exponentially in `d`, which is the whole point of the demo.
/// `d = 0` is 1.0 by convention.
pub fn unit_ball_fraction(dims: u32) -> f64 {
    if dims == 0 {
        return 1.0;
    }
    let d = dims as f64;
    let ball = PI.powf(d / 2.0) / libm::tgamma(d / 2.0 + 1.0);
    ball / 2.0f64.powf(d)
}

/// Outcome of one Monte Carlo volume run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VolumeEstimate {
    pub dims: u32,
    pub inside: u64,
    pub samples: u64,
}

impl VolumeEstimate {
    /// Estimated cube fraction inside the ball. NaN for an empty run.
    pub fn fraction(&self) -> f64 {
        self.inside as f64 / self.samples as f64
    }
}

/// Seeded uniform sampler of the cube `[-1, 1]^d`.
#[derive(Debug)]
pub struct HypersphereSampler {
    dims: u32,
    seed: u64,
    rng: StdRng,
}

impl HypersphereSampler {
    pub fn new(dims: u32, seed: u64) -> Result<HypersphereSampler, Error> {
        if dims == 0 {
            return Err(Error::new(ErrorKind::InvalidInput, "dims must be >= 1"));
        }
        Ok(HypersphereSampler {
            dims,
            seed,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn dims(&self) -> u32 {
        self.dims
    }

    /// Draws `n` points and counts those with squared norm at most 1.
    pub fn sample(&mut self, n: u64) -> VolumeEstimate {
        let mut inside = 0u64;
        for _ in 0..n {
            let mut norm2 = 0.0;
            for _ in 0..self.dims {
                let x: f64 = self.rng.random_range(-1.0..1.0);
                norm2 += x * x;
            }
            if norm2 <= 1.0 {
                inside += 1;
            }
        }
        VolumeEstimate {
            dims: self.dims,
            inside,
            samples: n,
        }
    }

    /// Re-seeds, so the next run repeats the draw sequence.
    pub fn restart(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }
}

/// One line of a dimensionality scan.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScanRow {
    pub dims: u32,
    pub estimate: f64,
    pub exact: f64,
    pub samples: u64,
}

impl Display for ScanRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "d={:<3} estimate={:.6} exact={:.6} (n={})",
            self.dims, self.estimate, self.exact, self.samples
        )
    }
}

/// Monte Carlo sweep over `1..=max_dims`, pairing each estimate with the
/// closed-form fraction.
pub struct DimensionScan {
    rows: Vec<ScanRow>,
}

impl DimensionScan {
    pub fn run(max_dims: u32, samples_per_dim: u64, seed: u64) -> Result<DimensionScan, Error> {
        if max_dims == 0 {
            return Err(Error::new(ErrorKind::InvalidInput, "max_dims must be >= 1"));
        }
        if samples_per_dim == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "samples_per_dim must be >= 1",
            ));
        }
        let mut rows = Vec::with_capacity(max_dims as usize);
        for dims in 1..=max_dims {
            let mut sampler = HypersphereSampler::new(dims, seed.wrapping_add(dims as u64))?;
            let estimate = sampler.sample(samples_per_dim);
            rows.push(ScanRow {
                dims,
                estimate: estimate.fraction(),
                exact: unit_ball_fraction(dims),
                samples: samples_per_dim,
            });
        }
        Ok(DimensionScan { rows })
    }

    pub fn rows(&self) -> &[ScanRow] {
        &self.rows
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, format: ExportFormat) -> Result<(), Error> {
        match format.delimiter() {
            Some(d) => {
                let mut w = File::create(path)?;
                writeln!(w, "dims{d}estimate{d}exact{d}samples", d = d)?;
                for r in &self.rows {
                    writeln!(
                        w,
                        "{}{d}{:.12}{d}{:.12}{d}{}",
                        r.dims,
                        r.estimate,
                        r.exact,
                        r.samples,
                        d = d
                    )?;
                }
                Ok(())
            }
            None => {
                let mut w = File::create(path)?;
                writeln!(w, "[")?;
                for (i, r) in self.rows.iter().enumerate() {
                    writeln!(
                        w,
                        "  {{\"dims\":{},\"estimate\":{},\"exact\":{},\"samples\":{}}}{}",
                        r.dims,
                        r.estimate,
                        r.exact,
                        r.samples,
                        if i + 1 == self.rows.len() { "" } else { "," }
                    )?;
                }
                writeln!(w, "]")?;
                Ok(())
            }
        }
    }
}
