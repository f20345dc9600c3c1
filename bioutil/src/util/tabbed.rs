use std::fmt::Display;
use std::io::{self, Write};

/// 以制表符连接各字段并换行写出
pub fn write_tabbed<W: Write + ?Sized>(out: &mut W, fields: &[&dyn Display]) -> io::Result<()> {
    for (i, f) in fields.iter().enumerate() {
        if i > 0 {
            out.write_all(b"\t")?;
        }
        write!(out, "{}", f)?;
    }
    out.write_all(b"\n")
}
