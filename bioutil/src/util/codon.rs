use crate::error::SeqError;

// 标准遗传密码（NCBI 表 1），密码子按 TCAG 顺序编号：
// index = 16 * b1 + 4 * b2 + b3，T=0 C=1 A=2 G=3；终止密码子记为 '*'
const STANDARD_CODE: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

#[inline]
fn base_index(b: u8) -> Option<usize> {
    match b.to_ascii_uppercase() {
        b'T' | b'U' => Some(0),
        b'C' => Some(1),
        b'A' => Some(2),
        b'G' => Some(3),
        _ => None,
    }
}

/// 翻译单个密码子（大小写均可，U 视同 T）
pub fn translate_codon(codon: &[u8]) -> Result<u8, SeqError> {
    let unknown = || SeqError::UnknownCodon(String::from_utf8_lossy(codon).into_owned());
    if codon.len() != 3 {
        return Err(unknown());
    }
    let b1 = base_index(codon[0]).ok_or_else(unknown)?;
    let b2 = base_index(codon[1]).ok_or_else(unknown)?;
    let b3 = base_index(codon[2]).ok_or_else(unknown)?;
    Ok(STANDARD_CODE[b1 * 16 + b2 * 4 + b3])
}

/// 从左到右逐个密码子翻译，末尾不足 3 个碱基的部分被忽略。终止密码子输出为 `*`。
pub fn translate(seq: &[u8]) -> Result<Vec<u8>, SeqError> {
    seq.chunks_exact(3).map(translate_codon).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codons() {
        assert_eq!(translate_codon(b"ATG"), Ok(b'M'));
        assert_eq!(translate_codon(b"TGG"), Ok(b'W'));
        assert_eq!(translate_codon(b"GCC"), Ok(b'A'));
        assert_eq!(translate_codon(b"AGA"), Ok(b'R'));
        assert_eq!(translate_codon(b"CAT"), Ok(b'H'));
        assert_eq!(translate_codon(b"GGG"), Ok(b'G'));
    }

    #[test]
    fn stop_codons() {
        for c in [b"TAA", b"TAG", b"TGA"] {
            assert_eq!(translate_codon(c), Ok(b'*'));
        }
    }

    #[test]
    fn rna_and_lowercase() {
        assert_eq!(translate_codon(b"aug"), Ok(b'M'));
        assert_eq!(translate_codon(b"UUU"), Ok(b'F'));
    }

    #[test]
    fn code_has_expected_composition() {
        let count = |aa: u8| STANDARD_CODE.iter().filter(|&&x| x == aa).count();
        assert_eq!(count(b'*'), 3);
        assert_eq!(count(b'L'), 6);
        assert_eq!(count(b'S'), 6);
        assert_eq!(count(b'R'), 6);
        assert_eq!(count(b'M'), 1);
        assert_eq!(count(b'W'), 1);
    }

    #[test]
    fn unknown_codons() {
        assert_eq!(translate_codon(b"ANG"), Err(SeqError::UnknownCodon("ANG".into())));
        assert_eq!(translate_codon(b"AT"), Err(SeqError::UnknownCodon("AT".into())));
    }

    #[test]
    fn translate_sequence_ignores_partial_tail() {
        assert_eq!(translate(b"ATGGCCTAAGG").unwrap(), b"MA*");
        assert!(translate(b"AT").unwrap().is_empty());
        assert!(translate(b"ATGNNN").is_err());
    }
}
