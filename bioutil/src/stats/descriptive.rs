//! 描述性统计：均值、方差、标准差、中位数、分位数与近似分箱。

use serde::Serialize;

use crate::error::StatsError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    /// 总体方差（除以 n）
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

fn require_nonempty(data: &[f64]) -> Result<(), StatsError> {
    if data.is_empty() {
        Err(StatsError::EmptyInput)
    } else {
        Ok(())
    }
}

fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut v = data.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

pub fn mean(data: &[f64]) -> Result<f64, StatsError> {
    require_nonempty(data)?;
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// 总体方差
pub fn variance(data: &[f64]) -> Result<f64, StatsError> {
    let m = mean(data)?;
    Ok(data.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / data.len() as f64)
}

pub fn standard_deviation(data: &[f64]) -> Result<f64, StatsError> {
    variance(data).map(f64::sqrt)
}

/// 中位数；偶数个元素时取中间两个的平均
pub fn median(data: &[f64]) -> Result<f64, StatsError> {
    require_nonempty(data)?;
    let v = sorted_copy(data);
    let n = v.len();
    if n % 2 == 0 {
        Ok((v[n / 2 - 1] + v[n / 2]) / 2.0)
    } else {
        Ok(v[n / 2])
    }
}

/// 分位数。位置为 `fraction * (n - 1)`：恰为整数时取该元素，
/// 否则取相邻两个元素的中点（不做线性插值）。
pub fn quantile(data: &[f64], fraction: f64) -> Result<f64, StatsError> {
    require_nonempty(data)?;
    if !(0.0..=1.0).contains(&fraction) {
        return Err(StatsError::InvalidFraction(fraction));
    }
    let v = sorted_copy(data);
    Ok(quantile_sorted(&v, fraction))
}

fn quantile_sorted(sorted: &[f64], fraction: f64) -> f64 {
    let position = fraction * (sorted.len() - 1) as f64;
    let lo = position.floor() as usize;
    if position.fract() == 0.0 {
        sorted[lo]
    } else {
        0.5 * (sorted[lo] + sorted[lo + 1])
    }
}

/// 近似等频分箱，返回每个箱的 `(下界, 上界)`。
///
/// 在排好序的数据上顺序扫描：当取值发生变化且已扫描的元素数达到
/// `n / num_bins * 当前箱号` 时关闭当前箱。相同取值永远落在同一个箱内，
/// 因此重复值较多时箱数可能少于 `num_bins`。最后一个箱总在末尾关闭。
pub fn approximate_quantile_bins(
    data: &[f64],
    num_bins: usize,
) -> Result<Vec<(f64, f64)>, StatsError> {
    require_nonempty(data)?;
    if num_bins == 0 {
        return Err(StatsError::InvalidBinCount);
    }
    let v = sorted_copy(data);
    let target = v.len() as f64 / num_bins as f64;

    let mut bins = Vec::with_capacity(num_bins);
    let mut bin_num = 1usize;
    let mut lower = v[0];
    for i in 1..v.len() {
        let (prev, cur) = (v[i - 1], v[i]);
        if cur != prev && i as f64 >= target * bin_num as f64 {
            bins.push((lower, prev));
            lower = cur;
            bin_num += 1;
        }
    }
    bins.push((lower, v[v.len() - 1]));
    Ok(bins)
}

/// 一次性计算常用统计量
pub fn describe(data: &[f64]) -> Result<DescriptiveStats, StatsError> {
    require_nonempty(data)?;
    let mean_val = mean(data)?;
    let var = variance(data)?;
    let v = sorted_copy(data);
    Ok(DescriptiveStats {
        count: data.len(),
        mean: mean_val,
        variance: var,
        std_dev: var.sqrt(),
        min: v[0],
        max: v[v.len() - 1],
        median: quantile_sorted(&v, 0.5),
    })
}
