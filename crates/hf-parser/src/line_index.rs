use hf_core::{SourceLocation, SourceSpan};

#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, byte)| *byte == b'\n')
                .map(|(index, _)| index + 1),
        );
        Self {
            line_starts,
            len: source.len(),
        }
    }

    pub fn location_at(&self, offset: usize) -> SourceLocation {
        let offset = offset.min(self.len);
        let line = self.line_starts.partition_point(|start| *start <= offset);
        SourceLocation {
            line,
            column: offset - self.line_starts[line - 1],
        }
    }

    pub fn span(&self, start: usize, end: usize) -> SourceSpan {
        SourceSpan {
            start: self.location_at(start),
            end: self.location_at(end),
        }
    }
}
