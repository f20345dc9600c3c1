pub mod descriptive;
pub mod regression;

pub use descriptive::{
    approximate_quantile_bins, describe, mean, median, quantile, standard_deviation, variance,
    DescriptiveStats,
};
pub use regression::{least_squares_linear_fit, pearson_r, zip_points, LinearFit};
