use crate::evaluation::EvalError;
use crate::plot::ExportFormat;
use std::fs::File;
use std::io::{Error, ErrorKind, Write};
use std::path::Path;

/// Equal-width histogram over a fixed `[lo, hi)` range.
///
/// Values below the range count as underflow, values at or above `hi` as
/// overflow; neither lands in a bin.
#[derive(Debug)]
pub struct Histogram {
    lo: f64,
    hi: f64,
    counts: Vec<u64>,
    underflow: u64,
    overflow: u64,
}

impl Histogram {
    pub fn new(lo: f64, hi: f64, bins: usize) -> Result<Histogram, Error> {
        if bins == 0 {
            return Err(Error::new(ErrorKind::InvalidInput, "bins must be > 0"));
        }
        if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "histogram range must be finite with lo < hi",
            ));
        }
        Ok(Histogram {
            lo,
            hi,
            counts: vec![0; bins],
            underflow: 0,
            overflow: 0,
        })
    }

    #[inline]
    pub fn fill(&mut self, value: f64) {
        if value < self.lo || value.is_nan() {
            self.underflow += 1;
            return;
        }
        if value >= self.hi {
            self.overflow += 1;
            return;
        }
        let width = (self.hi - self.lo) / self.counts.len() as f64;
        let index = (((value - self.lo) / width) as usize).min(self.counts.len() - 1);
        self.counts[index] += 1;
    }

    pub fn fill_all(&mut self, values: &[f64]) {
        for &v in values {
            self.fill(v);
        }
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn underflow(&self) -> u64 {
        self.underflow
    }

    pub fn overflow(&self) -> u64 {
        self.overflow
    }

    /// In-range entries only.
    pub fn entries(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// The `bins + 1` bin boundaries.
    pub fn bin_edges(&self) -> Vec<f64> {
        let width = (self.hi - self.lo) / self.counts.len() as f64;
        (0..=self.counts.len())
            .map(|i| self.lo + width * i as f64)
            .collect()
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, format: ExportFormat) -> Result<(), Error> {
        let edges = self.bin_edges();
        match format.delimiter() {
            Some(d) => {
                let mut w = File::create(path)?;
                writeln!(w, "bin_low{d}bin_high{d}count", d = d)?;
                for (i, &count) in self.counts.iter().enumerate() {
                    writeln!(w, "{:.6}{d}{:.6}{d}{}", edges[i], edges[i + 1], count, d = d)?;
                }
                Ok(())
            }
            None => {
                let mut w = File::create(path)?;
                writeln!(w, "[")?;
                for (i, &count) in self.counts.iter().enumerate() {
                    writeln!(
                        w,
                        "  {{\"bin_low\":{},\"bin_high\":{},\"count\":{}}}{}",
                        edges[i],
                        edges[i + 1],
                        count,
                        if i + 1 == self.counts.len() { "" } else { "," }
                    )?;
                }
                writeln!(w, "]")?;
                Ok(())
            }
        }
    }
}

/// Signal/background overlay of one discriminant: two histograms over the
/// same binning, filled from a value sequence partitioned by truth labels.
pub struct ClassSplitHistogram {
    background: Histogram,
    signal: Histogram,
}

impl ClassSplitHistogram {
    pub fn new(lo: f64, hi: f64, bins: usize) -> Result<ClassSplitHistogram, Error> {
        Ok(ClassSplitHistogram {
            background: Histogram::new(lo, hi, bins)?,
            signal: Histogram::new(lo, hi, bins)?,
        })
    }

    /// Routes each value into the signal or background histogram according
    /// to its truth label. Validates shape the way the evaluator does.
    pub fn fill_labeled(&mut self, values: &[f64], truth: &[u8]) -> Result<(), EvalError> {
        if values.len() != truth.len() {
            return Err(EvalError::ShapeMismatch {
                predicted: values.len(),
                actual: truth.len(),
            });
        }
        if values.is_empty() {
            return Err(EvalError::EmptyInput);
        }
        for (&v, &t) in values.iter().zip(truth) {
            if t != 0 {
                self.signal.fill(v);
            } else {
                self.background.fill(v);
            }
        }
        Ok(())
    }

    pub fn background(&self) -> &Histogram {
        &self.background
    }

    pub fn signal(&self) -> &Histogram {
        &self.signal
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, format: ExportFormat) -> Result<(), Error> {
        let edges = self.background.bin_edges();
        match format.delimiter() {
            Some(d) => {
                let mut w = File::create(path)?;
                writeln!(w, "bin_low{d}bin_high{d}background{d}signal", d = d)?;
                for i in 0..self.background.bins() {
                    writeln!(
                        w,
                        "{:.6}{d}{:.6}{d}{}{d}{}",
                        edges[i],
                        edges[i + 1],
                        self.background.counts()[i],
                        self.signal.counts()[i],
                        d = d
                    )?;
                }
                Ok(())
            }
            None => {
                let mut w = File::create(path)?;
                writeln!(w, "[")?;
                for i in 0..self.background.bins() {
                    writeln!(
                        w,
                        "  {{\"bin_low\":{},\"bin_high\":{},\"background\":{},\"signal\":{}}}{}",
                        edges[i],
                        edges[i + 1],
                        self.background.counts()[i],
                        self.signal.counts()[i],
                        if i + 1 == self.background.bins() { "" } else { "," }
                    )?;
                }
                writeln!(w, "]")?;
                Ok(())
            }
        }
    }
}
