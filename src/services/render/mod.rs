//! Rendering adapters for a computed layout.
//!
//! The layout core never paints anything itself; an adapter turns a
//! [`CalendarLayout`] into whatever its surface needs. The plain-text
//! adapter here backs the command-line host.

use std::fmt::Write;

use crate::models::layout::{CalendarLayout, CellLayout};

pub trait LayoutRenderer {
    type Output;

    fn render(&mut self, layout: &CalendarLayout) -> Self::Output;
}

/// Lists the grid week by week with each cell's events.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    /// Also list cells that have no events
    pub show_empty_days: bool,
}

impl TextRenderer {
    fn render_cell(&self, out: &mut String, cell: &CellLayout) {
        if cell.segments.is_empty() && cell.overflow == 0 && !self.show_empty_days {
            return;
        }

        let marker = if cell.is_today {
            '*'
        } else if cell.is_in_current_period {
            ' '
        } else {
            '.'
        };
        let _ = writeln!(out, " {}{} {}", marker, cell.date.format("%a"), cell.label);

        for segment in &cell.segments {
            let _ = writeln!(
                out,
                "     [{}] {} ({}, {}d)",
                segment.row,
                segment.text,
                segment.style,
                segment.span_days()
            );
        }

        if cell.overflow > 0 {
            let _ = writeln!(out, "     +{} more", cell.overflow);
        }
    }
}

impl LayoutRenderer for TextRenderer {
    type Output = String;

    fn render(&mut self, layout: &CalendarLayout) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", layout.weekday_labels.join(" "));

        for (week, cells) in layout.weeks().enumerate() {
            if let (Some(first), Some(last)) = (cells.first(), cells.last()) {
                let _ = writeln!(out, "Week {}: {} - {}", week + 1, first.date, last.date);
            }
            for cell in cells {
                self.render_cell(&mut out, cell);
            }
        }

        out
    }
}
