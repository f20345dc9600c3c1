//! 基于切片下标的入口。

use super::{select_all_tied, select_first, select_random_tie, Direction, UniformSource};
use crate::error::SelectError;

/// 最小元素的下标（平局取第一个）
pub fn index_min<T: PartialOrd>(values: &[T]) -> Result<usize, SelectError> {
    select_first(values.iter().enumerate(), Direction::Min)
}

/// 最大元素的下标（平局取第一个）
pub fn index_max<T: PartialOrd>(values: &[T]) -> Result<usize, SelectError> {
    select_first(values.iter().enumerate(), Direction::Max)
}

/// 最小元素的下标（平局时在并列者中等概率随机选取）
pub fn index_min_random_tie<T, S>(values: &[T], rng: &mut S) -> Result<usize, SelectError>
where
    T: PartialOrd,
    S: UniformSource + ?Sized,
{
    select_random_tie(values.iter().enumerate(), Direction::Min, rng)
}

/// 最大元素的下标（平局时在并列者中等概率随机选取）
pub fn index_max_random_tie<T, S>(values: &[T], rng: &mut S) -> Result<usize, SelectError>
where
    T: PartialOrd,
    S: UniformSource + ?Sized,
{
    select_random_tie(values.iter().enumerate(), Direction::Max, rng)
}

/// 所有最小元素的下标，升序
pub fn index_min_list<T: PartialOrd>(values: &[T]) -> Result<Vec<usize>, SelectError> {
    select_all_tied(values.iter().enumerate(), Direction::Min)
}

/// 所有最大元素的下标，升序
pub fn index_max_list<T: PartialOrd>(values: &[T]) -> Result<Vec<usize>, SelectError> {
    select_all_tied(values.iter().enumerate(), Direction::Max)
}
