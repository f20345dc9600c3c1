/// 带前缀的顺序 id 生成器：`prefix0`, `prefix1`, ...
#[derive(Debug, Clone)]
pub struct IdGen {
    prefix: String,
    next: u64,
}

impl IdGen {
    pub fn new(prefix: impl Into<String>, first_id: u64) -> Self {
        Self { prefix: prefix.into(), next: first_id }
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

impl Default for IdGen {
    fn default() -> Self {
        Self::new("", 0)
    }
}

impl Iterator for IdGen {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.next_id())
    }
}
