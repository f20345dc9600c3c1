//! 极值选择（argmin / argmax）与平局处理。
//!
//! 所有入口都只扫描一遍输入，额外状态为 O(1)（`All` 策略除外，它需要返回全部并列位置）：
//!
//! - **First**：严格更优才替换，平局保留最先出现的位置
//! - **Random**：水塘抽样（容量 1），在并列位置中等概率随机选一个
//! - **All**：返回所有并列位置，保持输入顺序
//!
//! 随机源通过 [`UniformSource`] 注入；任何 `rand::Rng` 都可直接使用，
//! 测试中可以替换为确定性的实现。

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;

mod index;
mod keyed;
mod scan;

pub use index::{
    index_max, index_max_list, index_max_random_tie, index_min, index_min_list,
    index_min_random_tie,
};
pub use keyed::{key_max, key_max_list, key_max_random_tie, key_min, key_min_list, key_min_random_tie};
pub use scan::{select, select_all_tied, select_first, select_random_tie, Selected};

/// 比较方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Min,
    Max,
}

/// 平局处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    First,
    Random,
    All,
}

/// 候选值相对当前最优值的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    Better,
    Tie,
    Worse,
}

impl Direction {
    /// Incomparable pairs (e.g. NaN) count as `Worse`.
    #[inline]
    pub(crate) fn judge<V: PartialOrd + ?Sized>(self, candidate: &V, best: &V) -> Verdict {
        match (self, candidate.partial_cmp(best)) {
            (_, Some(Ordering::Equal)) => Verdict::Tie,
            (Direction::Min, Some(Ordering::Less)) | (Direction::Max, Some(Ordering::Greater)) => {
                Verdict::Better
            }
            _ => Verdict::Worse,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Direction::Min => "min",
            Direction::Max => "max",
        })
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(TieBreak::First),
            "random" => Ok(TieBreak::Random),
            "all" => Ok(TieBreak::All),
            other => Err(format!("unknown tie-break policy '{}' (expected first, random or all)", other)),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            TieBreak::First => "first",
            TieBreak::Random => "random",
            TieBreak::All => "all",
        })
    }
}

/// 均匀整数随机源：`below(n)` 返回 `[0, n)` 内的均匀随机整数。
///
/// 调用方保证 `n >= 1`。
pub trait UniformSource {
    fn below(&mut self, n: usize) -> usize;
}

impl<R: Rng + ?Sized> UniformSource for R {
    #[inline]
    fn below(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judge_min_and_max() {
        assert_eq!(Direction::Min.judge(&1, &2), Verdict::Better);
        assert_eq!(Direction::Min.judge(&3, &2), Verdict::Worse);
        assert_eq!(Direction::Max.judge(&3, &2), Verdict::Better);
        assert_eq!(Direction::Max.judge(&2, &2), Verdict::Tie);
    }

    #[test]
    fn judge_nan_is_worse() {
        assert_eq!(Direction::Min.judge(&f64::NAN, &1.0), Verdict::Worse);
        assert_eq!(Direction::Max.judge(&1.0, &f64::NAN), Verdict::Worse);
    }

    #[test]
    fn tie_break_from_str() {
        assert_eq!("first".parse::<TieBreak>(), Ok(TieBreak::First));
        assert_eq!("Random".parse::<TieBreak>(), Ok(TieBreak::Random));
        assert_eq!("ALL".parse::<TieBreak>(), Ok(TieBreak::All));
        assert!("best".parse::<TieBreak>().is_err());
    }

    #[test]
    fn rng_is_a_uniform_source() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..50 {
            assert!(rng.below(n) < n);
        }
        assert_eq!(rng.below(1), 0);
    }
}
