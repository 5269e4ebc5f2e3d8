/// Byte offsets of line starts, for O(log n) offset to line/column lookups.
///
/// Line 1 starts at offset 0, line 2 starts after the first `'\n'`, etc.
#[derive(Debug, Clone)]
pub struct LineIndex {
    offsets: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut offsets = vec![0];
        for (i, b) in content.bytes().enumerate() {
            if b == b'\n' {
                offsets.push(i + 1);
            }
        }
        Self { offsets }
    }

    /// 1-based line containing `offset`.
    pub fn line(&self, offset: usize) -> usize {
        match self.offsets.binary_search(&offset) {
            Ok(line) => line + 1, // Exact match at line start
            Err(line) => line,    // Falls within this line
        }
    }

    /// 1-based (line, column) of `offset`, the column counted in characters.
    pub fn line_col(&self, content: &str, offset: usize) -> (usize, usize) {
        let line = self.line(offset);
        let start = self.offsets[line - 1];
        let col = content[start..offset].chars().count() + 1;
        (line, col)
    }

    /// Text of the 1-based `line`, without its line terminator.
    pub fn line_text<'a>(&self, content: &'a str, line: usize) -> &'a str {
        let start = self.offsets[line - 1];
        let end = self
            .offsets
            .get(line)
            .map(|next| next - 1)
            .unwrap_or(content.len());
        content[start..end].trim_end_matches('\r')
    }
}
