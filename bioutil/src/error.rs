use thiserror::Error;

/// 极值选择的唯一失败情形：输入为空。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("cannot select an extremum from an empty input")]
    EmptyInput,
}

/// 统计函数的错误类型
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("statistic of an empty sample is undefined")]
    EmptyInput,

    #[error("paired samples differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    #[error("quantile fraction must lie in [0, 1], got {0}")]
    InvalidFraction(f64),

    #[error("number of bins must be at least 1")]
    InvalidBinCount,

    #[error("degenerate input: {0}")]
    Degenerate(&'static str),
}

/// 序列处理（反向互补、密码子翻译）的错误类型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeqError {
    #[error("no complement for symbol {base:?} at position {position}")]
    InvalidBase { base: char, position: usize },

    #[error("unknown codon {0:?}")]
    UnknownCodon(String),
}
