use crate::error::SeqError;

// IUPAC 互补对；每一对同时登记大小写两个方向
const PAIRS: [(u8, u8); 11] = [
    (b'a', b't'),
    (b'c', b'g'),
    (b'w', b'w'),
    (b's', b's'),
    (b'm', b'k'),
    (b'r', b'y'),
    (b'b', b'v'),
    (b'd', b'h'),
    (b'n', b'n'),
    (b'-', b'-'),
    (b'.', b'.'),
];

const fn build_complement_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < PAIRS.len() {
        let (x, y) = PAIRS[i];
        table[x as usize] = y;
        table[y as usize] = x;
        table[x.to_ascii_uppercase() as usize] = y.to_ascii_uppercase();
        table[y.to_ascii_uppercase() as usize] = x.to_ascii_uppercase();
        i += 1;
    }
    table
}

/// 0 表示该符号没有互补碱基
static COMPLEMENT: [u8; 256] = build_complement_table();

/// 单个符号的互补（保持大小写），未知符号返回 `None`
#[inline]
pub fn complement(base: u8) -> Option<u8> {
    match COMPLEMENT[base as usize] {
        0 => None,
        c => Some(c),
    }
}

/// 反向互补。遇到无法互补的符号时报告其在输入中的位置。
pub fn revcomp(seq: &[u8]) -> Result<Vec<u8>, SeqError> {
    let mut out = Vec::with_capacity(seq.len());
    for (i, &b) in seq.iter().enumerate().rev() {
        let c = complement(b).ok_or(SeqError::InvalidBase { base: b as char, position: i })?;
        out.push(c);
    }
    Ok(out)
}
