use std::{borrow::Cow, fmt::Write};

const COLUMN_GAP: &str = "  ";
const RULE: char = '-';

#[derive(Default)]
pub struct TextTableBuilder<'a, Seq> {
    headers: &'a [Cow<'a, str>],
    rows: Vec<Seq>,
    alignments: Cow<'a, [Alignment]>,
}

#[derive(Clone, Copy, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl<'a, Seq> TextTableBuilder<'a, Seq>
where
    Seq: AsRef<[Cow<'a, str>]> + Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: &'a [Alignment]) -> Self {
        self.alignments = Cow::Borrowed(alignments);
        self
    }

    pub fn headers(mut self, headers: &'a [Cow<'a, str>]) -> Self {
        self.headers = headers;
        if self.alignments.is_empty() {
            self.alignments = Cow::Owned(vec![Alignment::default(); self.headers.len()]);
        }
        self
    }

    pub fn row(mut self, row: Seq) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Seq>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Renders the header, a rule, then one line per row. Cells beyond the
    /// header count are dropped. Trailing spaces are trimmed from each line.
    pub fn build(self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        let mut col_widths: Vec<usize> = self.headers.iter().map(|h| display_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.as_ref().iter().enumerate().take(col_count) {
                col_widths[i] = col_widths[i].max(display_width(cell));
            }
        }

        let mut out = String::with_capacity(256);
        self.write_line(&mut out, self.headers, &col_widths);

        let rule_width = col_widths.iter().sum::<usize>() + COLUMN_GAP.len() * (col_count - 1);
        out.extend(std::iter::repeat_n(RULE, rule_width));
        out.push('\n');

        for row in &self.rows {
            self.write_line(&mut out, row.as_ref(), &col_widths);
        }

        out
    }

    fn write_line(&self, out: &mut String, cells: &[Cow<'_, str>], col_widths: &[usize]) {
        let mut line = String::new();
        for (i, width) in col_widths.iter().copied().enumerate() {
            if i > 0 {
                line.push_str(COLUMN_GAP);
            }
            let cell = cells.get(i).map(|c| c.as_ref()).unwrap_or("");
            let alignment = self.alignments.get(i).copied().unwrap_or_default();
            pad(&mut line, cell, width, alignment);
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

fn pad(line: &mut String, cell: &str, width: usize, alignment: Alignment) {
    let fill = width.saturating_sub(display_width(cell));
    let (left, right) = match alignment {
        Alignment::Left => (0, fill),
        Alignment::Center => (fill / 2, fill - fill / 2),
        Alignment::Right => (fill, 0),
    };
    line.extend(std::iter::repeat_n(' ', left));
    line.push_str(cell);
    line.extend(std::iter::repeat_n(' ', right));
}

/// Terminal column estimate: wide scripts take two cells.
fn display_width(text: &str) -> usize {
    text.chars()
        .map(|c| if is_wide(c) { 2 } else { 1 })
        .sum()
}

fn is_wide(c: char) -> bool {
    matches!(
        c as u32,
        0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60 | 0xFFE0..=0xFFE6 | 0x1F300..=0x1F64F | 0x1F900..=0x1F9FF
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_headers_render_nothing() {
        let table = TextTableBuilder::<Vec<Cow<'static, str>>>::new().build();
        assert!(table.is_empty());
    }

    #[test]
    fn columns_are_padded_to_widest_cell() {
        let headers = [Cow::Borrowed("Name"), Cow::Borrowed("Amount")];
        let table = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right])
            .headers(&headers)
            .row([Cow::Borrowed("Alexandra"), Cow::Borrowed("5.00")])
            .row([Cow::Borrowed("Bo"), Cow::Borrowed("120.50")])
            .build();

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Name       Amount",
                "-----------------",
                "Alexandra    5.00",
                "Bo         120.50",
            ]
        );
    }

    #[rstest]
    #[case::left(Alignment::Left, "ab")]
    #[case::center(Alignment::Center, " ab")]
    #[case::right(Alignment::Right, "  ab")]
    fn single_column_alignment(#[case] alignment: Alignment, #[case] expected: &str) {
        let headers = [Cow::Borrowed("head")];
        let alignments = [alignment];
        let table = TextTableBuilder::new()
            .alignments(&alignments)
            .headers(&headers)
            .row([Cow::Borrowed("ab")])
            .build();

        assert_eq!(table.lines().nth(2), Some(expected));
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(display_width("メンバー"), 8);
        assert_eq!(display_width("abc"), 3);
    }

    #[test]
    fn extra_cells_are_ignored() {
        let headers = [Cow::Borrowed("A")];
        let table = TextTableBuilder::new()
            .headers(&headers)
            .row(vec![Cow::Borrowed("x"), Cow::Borrowed("ignored")])
            .build();

        assert!(!table.contains("ignored"));
    }
}
