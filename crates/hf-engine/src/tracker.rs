use hf_core::SourceLocation;

#[derive(Debug, Clone)]
pub struct PositionTracker<'a> {
    lines: Vec<&'a str>,
    cursor: SourceLocation,
}

impl<'a> PositionTracker<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.split('\n').collect(),
            cursor: SourceLocation::start(),
        }
    }

    pub fn end_location(&self) -> SourceLocation {
        SourceLocation {
            line: self.lines.len(),
            column: self.lines.last().map_or(0, |line| line.len()),
        }
    }

    /// Appends `source[cursor, target)` to `out` and moves the cursor.
    /// Targets at or before the cursor copy nothing.
    pub fn copy_until(&mut self, target: SourceLocation, out: &mut String) {
        if target <= self.cursor {
            return;
        }
        let from = self.cursor;
        if from.line == target.line {
            out.push_str(self.slice(from.line, from.column, Some(target.column)));
        } else {
            out.push_str(self.slice(from.line, from.column, None));
            out.push('\n');
            for line in from.line + 1..target.line {
                out.push_str(self.slice(line, 0, None));
                out.push('\n');
            }
            out.push_str(self.slice(target.line, 0, Some(target.column)));
        }
        self.cursor = target;
    }

    pub fn skip_to(&mut self, target: SourceLocation) {
        if target > self.cursor {
            self.cursor = target;
        }
    }

    fn slice(&self, line: usize, start: usize, end: Option<usize>) -> &'a str {
        let text = line
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .copied()
            .unwrap_or_default();
        let end = end.unwrap_or(text.len()).min(text.len());
        text.get(start.min(end)..end).unwrap_or_default()
    }
}
