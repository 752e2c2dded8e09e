//! Text rendering of a placement.

use std::fmt;

/// Borrowed view of a placement that renders as an N×N grid.
///
/// Row `i` shows `Q` in column `positions[i]` and `.` everywhere else.
///
/// ```
/// use u_swarm_queens::pso::Board;
///
/// let board = Board::new(&[1, 3, 0, 2]);
/// assert_eq!(board.to_string(), ". Q . .\n. . . Q\nQ . . .\n. . Q .\n");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Board<'a> {
    positions: &'a [usize],
}

impl<'a> Board<'a> {
    pub fn new(positions: &'a [usize]) -> Self {
        Self { positions }
    }
}

impl fmt::Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.positions.len();
        for &queen in self.positions {
            for col in 0..n {
                if col > 0 {
                    f.write_str(" ")?;
                }
                f.write_str(if col == queen { "Q" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
