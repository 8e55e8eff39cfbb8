mod hypersphere;

pub use hypersphere::{DimensionScan, HypersphereSampler, ScanRow, VolumeEstimate, unit_ball_fraction};
