//! 最小二乘直线拟合与 Pearson 相关系数。输入为 `(x, y)` 点列。

use serde::Serialize;

use crate::error::StatsError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// 由 x、y 两列组装点列，要求长度一致
pub fn zip_points(xs: &[f64], ys: &[f64]) -> Result<Vec<(f64, f64)>, StatsError> {
    if xs.len() != ys.len() {
        return Err(StatsError::LengthMismatch { left: xs.len(), right: ys.len() });
    }
    Ok(xs.iter().copied().zip(ys.iter().copied()).collect())
}

/// 最小二乘直线拟合（正规方程）。所有 x 相同时无解。
pub fn least_squares_linear_fit(points: &[(f64, f64)]) -> Result<LinearFit, StatsError> {
    if points.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let n = points.len() as f64;
    let (mut sx, mut sy, mut sxx, mut sxy) = (0.0, 0.0, 0.0, 0.0);
    for &(x, y) in points {
        sx += x;
        sy += y;
        sxx += x * x;
        sxy += x * y;
    }

    let det = sx * sx - n * sxx;
    if det == 0.0 {
        return Err(StatsError::Degenerate("all x values are equal"));
    }
    Ok(LinearFit {
        slope: (sy * sx - n * sxy) / det,
        intercept: (sx * sxy - sy * sxx) / det,
    })
}

/// Pearson 相关系数。任一坐标方差为 0 时无定义。
pub fn pearson_r(points: &[(f64, f64)]) -> Result<f64, StatsError> {
    if points.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    if points.len() < 2 {
        return Err(StatsError::Degenerate("correlation needs at least two points"));
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for &(x, y) in points {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return Err(StatsError::Degenerate("zero variance in x or y"));
    }
    Ok(cov / denom)
}
