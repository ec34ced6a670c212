// src/frame/display.rs

use prettytable::{format, Cell, Row, Table};
use std::fmt;

use super::{DType, Frame};

fn right_aligned(dtype: DType) -> bool {
    matches!(dtype, DType::Int64 | DType::Float64)
}

/// Boxed preview table: source row index first, then each column.
/// Nulls render as empty cells.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let mut header = vec![Cell::new("#").style_spec("bFg")];
        header.extend(
            self.columns()
                .iter()
                .map(|c| Cell::new(c.name()).style_spec("bFg")),
        );
        table.add_row(Row::new(header));

        for (pos, src_idx) in self.index().iter().enumerate() {
            let mut cells = vec![Cell::new(&src_idx.to_string()).style_spec("r")];
            for col in self.columns() {
                let text = col.value(pos).render();
                if right_aligned(col.dtype()) {
                    cells.push(Cell::new(&text).style_spec("r"));
                } else {
                    cells.push(Cell::new(&text));
                }
            }
            table.add_row(Row::new(cells));
        }

        write!(f, "{}", table)
    }
}

#[cfg(test)]
mod tests {
    use crate::frame::{Column, ColumnData, Frame};

    #[test]
    fn render_includes_headers_and_source_indices() {
        let frame = Frame::new(vec![
            Column::new(
                "model",
                ColumnData::Utf8(vec![Some("1 Series".into()), Some("A4".into())]),
            ),
            Column::new("year", ColumnData::Int64(vec![Some(2011), None])),
        ])
        .unwrap();

        let out = frame.tail(1).to_string();
        assert!(out.contains("model"));
        assert!(out.contains("year"));
        assert!(out.contains("A4"));
        // tail(1) keeps the source position, not a renumbered 0
        assert!(out.contains('1'));
    }
}
