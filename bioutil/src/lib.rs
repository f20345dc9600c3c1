//! # bioutil
//!
//! 一组互相独立的小工具函数：数值、统计与序列处理。
//!
//! - **极值选择**：argmin / argmax，支持"取第一个"、"并列中随机取一个"、"返回全部并列"三种平局策略
//! - **FASTA 读取**：流式逐条解析
//! - **统计**：均值、方差、中位数、分位数、近似分箱、最小二乘拟合、Pearson 相关
//! - **序列**：IUPAC 反向互补、标准遗传密码翻译
//!
//! ## 快速示例
//!
//! ```rust
//! use bioutil::select::{self, Direction, Selected, TieBreak};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let values = [5, 3, 3, 8, 3];
//! assert_eq!(select::index_min(&values), Ok(1));
//! assert_eq!(select::index_min_list(&values), Ok(vec![1, 2, 4]));
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let pick = select::index_min_random_tie(&values, &mut rng).unwrap();
//! assert!([1, 2, 4].contains(&pick));
//!
//! let all = select::select(values.iter().enumerate(), Direction::Min, TieBreak::All, &mut rng);
//! assert_eq!(all, Ok(Selected::All(vec![1, 2, 4])));
//! ```
//!
//! ## 模块说明
//!
//! - [`select`] — 单遍扫描的极值选择与平局处理
//! - [`io`] — FASTA 文件解析
//! - [`stats`] — 描述性统计与回归
//! - [`util`] — 反向互补、密码子翻译、id 生成、计数等
//! - [`error`] — 各模块的错误类型

pub mod error;
pub mod io;
pub mod select;
pub mod stats;
pub mod util;
