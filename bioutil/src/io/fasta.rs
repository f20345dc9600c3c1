use anyhow::{bail, Result};
use serde::Serialize;
use std::io::BufRead;
use tracing::debug;

/// 标题行的解析方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// id 为 `>` 之后（可跳过空白）的第一个词，其余部分作为描述
    #[default]
    Token,
    /// 整行（去掉 `>` 与行尾）作为 id，不拆分描述
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FastaRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
}

/// 流式 FASTA 读取器，每次产出一条记录。
///
/// 序列行去掉全部 ASCII 空白后拼接，保留大小写。空行被忽略；
/// 第一个标题行之前出现非空序列数据视为错误。
pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    mode: HeaderMode,
    line_no: usize,
    done: bool,
    peek_header: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_mode(reader, HeaderMode::Token)
    }

    pub fn with_mode(reader: R, mode: HeaderMode) -> Self {
        Self {
            reader,
            buf: String::new(),
            mode,
            line_no: 0,
            done: false,
            peek_header: None,
        }
    }

    fn read_line(&mut self) -> Result<bool> {
        self.buf.clear();
        let n = self.reader.read_line(&mut self.buf)?;
        if n > 0 {
            self.line_no += 1;
        }
        Ok(n > 0)
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done {
            return Ok(None);
        }

        // Find header line
        let header = if let Some(h) = self.peek_header.take() {
            h
        } else {
            loop {
                if !self.read_line()? {
                    self.done = true;
                    return Ok(None);
                }
                if let Some(rest) = self.buf.strip_prefix('>') {
                    break rest.trim_end_matches(['\n', '\r']).to_string();
                }
                if !self.buf.trim().is_empty() {
                    self.done = true;
                    bail!("line {}: sequence data before the first FASTA header", self.line_no);
                }
            }
        };

        let (id, desc) = split_header(&header, self.mode);

        // Read sequence lines up to the next header
        let mut seq: Vec<u8> = Vec::new();
        loop {
            if !self.read_line()? {
                self.done = true;
                break;
            }
            if let Some(rest) = self.buf.strip_prefix('>') {
                self.peek_header = Some(rest.trim_end_matches(['\n', '\r']).to_string());
                break;
            }
            seq.extend(self.buf.bytes().filter(|b| !b.is_ascii_whitespace()));
        }

        if seq.is_empty() {
            debug!(id = %id, "FASTA record has an empty sequence");
        }
        Ok(Some(FastaRecord { id, desc, seq }))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

fn split_header(header: &str, mode: HeaderMode) -> (String, Option<String>) {
    match mode {
        HeaderMode::Full => (header.to_string(), None),
        HeaderMode::Token => {
            let mut parts = header.trim_start().splitn(2, char::is_whitespace);
            let id = parts.next().unwrap_or("").to_string();
            let desc = parts
                .next()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
            (id, desc)
        }
    }
}
