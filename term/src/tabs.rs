//! Tab stop tracking.

/// Sparse set of tab stop columns, stored as one bit per column.
#[derive(Clone, Debug)]
pub struct TabStops {
    stops: Vec<bool>,
}

const DEFAULT_WIDTH: usize = 8;

impl TabStops {
    /// Tab stops at every 8th column, matching the ECMA-48 default.
    pub fn new(width: usize) -> Self {
        Self::with_spacing(width, DEFAULT_WIDTH)
    }

    /// Tab stops at every `spacing`th column, for hosts that configure a
    /// non-default tab width.
    pub fn with_spacing(width: usize, spacing: usize) -> Self {
        let mut stops = vec![false; width];
        if spacing > 0 {
            let mut col = spacing;
            while col < width {
                stops[col] = true;
                col += spacing;
            }
        }
        Self { stops }
    }

    pub fn resize(&mut self, width: usize) {
        self.stops.resize(width, false);
    }

    pub fn set(&mut self, column: usize) {
        if let Some(slot) = self.stops.get_mut(column) {
            *slot = true;
        }
    }

    pub fn clear(&mut self, column: usize) {
        if let Some(slot) = self.stops.get_mut(column) {
            *slot = false;
        }
    }

    pub fn clear_all(&mut self) {
        self.stops.iter_mut().for_each(|s| *s = false);
    }

    /// The column `n` tab stops ahead of `from`, never past `limit`.
    pub fn next_n(&self, from: usize, n: usize, limit: usize) -> usize {
        let mut col = from;
        for _ in 0..n {
            match self.stops[col.saturating_add(1)..=limit]
                .iter()
                .position(|&s| s)
            {
                Some(offset) => col = col + 1 + offset,
                None => {
                    col = limit;
                    break;
                }
            }
        }
        col.min(limit)
    }

    /// The column `n` tab stops behind `from`, clamped at column 0 — never
    /// clamped by the left margin, matching ECMA-48.
    pub fn prev_n(&self, from: usize, n: usize) -> usize {
        let mut col = from;
        for _ in 0..n {
            if col == 0 {
                break;
            }
            match self.stops[..col].iter().rposition(|&s| s) {
                Some(pos) => col = pos,
                None => {
                    col = 0;
                    break;
                }
            }
        }
        col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stops_are_every_eight_columns() {
        let stops = TabStops::new(80);
        assert_eq!(stops.next_n(0, 1, 79), 8);
        assert_eq!(stops.next_n(8, 1, 79), 16);
    }

    #[test]
    fn next_n_clamps_to_limit() {
        let stops = TabStops::new(20);
        assert_eq!(stops.next_n(16, 1, 19), 19);
    }

    #[test]
    fn prev_n_clamps_to_zero() {
        let stops = TabStops::new(80);
        assert_eq!(stops.prev_n(5, 3), 0);
        assert_eq!(stops.prev_n(20, 1), 16);
    }

    #[test]
    fn clear_all_leaves_no_stops() {
        let mut stops = TabStops::new(80);
        stops.clear_all();
        assert_eq!(stops.next_n(0, 1, 79), 79);
    }
}
