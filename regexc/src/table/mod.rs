//! Column-aligned text table rendering, used by `--debug` to dump the expression tree, NFA,
//! and DFA stages (§6).
//!
//! Rows own their cells rather than borrowing `&str` slices, since most cells here are built on
//! the fly (byte-printed mnemonics, state indices) rather than quoted out of the source text.

use std::cmp::max;

#[derive(Default, Debug, Clone)]
pub struct Table {
    row_len: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn push_row(&mut self, row: Vec<String>) {
        if row.len() > self.row_len.len() {
            self.row_len.resize(row.len(), 0);
        }
        self.row_len
            .iter_mut()
            .zip(&row)
            .for_each(|(max_len, s)| *max_len = max(*max_len, s.chars().count()));
        self.rows.push(row);
    }

    pub fn to_string(&self, sep: &str) -> String {
        let pad = |s: &str, l: usize| {
            let cs = s.chars().count();
            if cs < l {
                format!("{}{}", s, " ".repeat(l - cs))
            } else {
                s.to_string()
            }
        };
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.row_len)
                    .map(|(s, l)| format!("{}{sep}", pad(s, *l)))
                    .collect::<Vec<_>>()
                    .join("")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_columns_to_widest_cell() {
        let mut t = Table::default();
        t.push_row(vec!["a".to_string(), "bb".to_string()]);
        t.push_row(vec!["ccc".to_string(), "d".to_string()]);
        let rendered = t.to_string(" | ");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "a   | bb | ");
        assert_eq!(lines[1], "ccc | d  | ");
    }
}
