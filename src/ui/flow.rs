//! Wrapping row layout for the prompt buttons.
//!
//! Pure so it can be recomputed on every width change and tested without a
//! display.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowCell {
    pub row: usize,
    pub column: usize,
}

/// Assigns each item a row and column, left to right, wrapping whenever the
/// next item would push the row past `available_width`.
///
/// An item wider than the available width still gets a row of its own; it
/// never shares a row, so rows only overflow when a single item cannot fit.
pub fn compute_flow_layout(
    available_width: i32,
    item_widths: &[i32],
    spacing: i32,
) -> Vec<FlowCell> {
    let available_width = available_width.max(0);
    let spacing = spacing.max(0);
    let mut cells = Vec::with_capacity(item_widths.len());
    let mut row = 0;
    let mut column = 0;
    let mut row_extent = 0;

    for &width in item_widths {
        let width = width.max(0);
        if column > 0 && row_extent + spacing + width > available_width {
            row += 1;
            column = 0;
        }

        row_extent = if column == 0 {
            width
        } else {
            row_extent + spacing + width
        };
        cells.push(FlowCell { row, column });
        column += 1;
    }

    cells
}

pub fn row_count(cells: &[FlowCell]) -> usize {
    cells.last().map_or(0, |cell| cell.row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: usize, column: usize) -> FlowCell {
        FlowCell { row, column }
    }

    #[test]
    fn items_that_fit_share_one_row() {
        let cells = compute_flow_layout(300, &[80, 80, 80], 10);
        assert_eq!(cells, vec![cell(0, 0), cell(0, 1), cell(0, 2)]);
        assert_eq!(row_count(&cells), 1);
    }

    #[test]
    fn exact_fit_including_spacing_does_not_wrap() {
        let cells = compute_flow_layout(170, &[80, 80], 10);
        assert_eq!(cells, vec![cell(0, 0), cell(0, 1)]);
    }

    #[test]
    fn overflowing_item_wraps_to_next_row() {
        let cells = compute_flow_layout(200, &[90, 90, 90, 50], 10);
        assert_eq!(cells, vec![cell(0, 0), cell(0, 1), cell(1, 0), cell(1, 1)]);
    }

    #[test]
    fn narrowing_width_adds_rows_and_keeps_order() {
        let widths = [60, 120, 40, 100, 70];
        let wide = compute_flow_layout(1000, &widths, 8);
        let narrow = compute_flow_layout(150, &widths, 8);

        assert_eq!(row_count(&wide), 1);
        assert_eq!(
            narrow,
            vec![cell(0, 0), cell(1, 0), cell(2, 0), cell(2, 1), cell(3, 0)]
        );
        let mut previous = (0, 0);
        for current in narrow.iter().map(|c| (c.row, c.column)).skip(1) {
            assert!(current > previous);
            previous = current;
        }
    }

    #[test]
    fn item_wider_than_available_width_sits_alone() {
        let cells = compute_flow_layout(100, &[40, 250, 40], 5);
        assert_eq!(cells, vec![cell(0, 0), cell(1, 0), cell(2, 0)]);
    }

    #[test]
    fn rows_never_exceed_width_unless_single_item() {
        let widths = [33, 71, 12, 90, 45, 45, 45, 120, 8];
        let available = 130;
        let spacing = 6;
        let cells = compute_flow_layout(available, &widths, spacing);

        for row in 0..row_count(&cells) {
            let members: Vec<i32> = cells
                .iter()
                .zip(widths.iter())
                .filter(|(c, _)| c.row == row)
                .map(|(_, w)| *w)
                .collect();
            let extent: i32 =
                members.iter().sum::<i32>() + spacing * (members.len() as i32 - 1);
            assert!(extent <= available || members.len() == 1, "row {row} overflowed");
        }
    }

    #[test]
    fn empty_input_yields_no_cells() {
        assert!(compute_flow_layout(500, &[], 10).is_empty());
        assert_eq!(row_count(&[]), 0);
    }

    #[test]
    fn zero_width_puts_every_item_on_its_own_row() {
        let cells = compute_flow_layout(0, &[10, 10, 10], 4);
        assert_eq!(cells, vec![cell(0, 0), cell(1, 0), cell(2, 0)]);
    }
}
