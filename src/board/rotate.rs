//! Quarter-turn rotations of square grids.
//!
//! `rotate_left` and `rotate_right` are exact inverses for every side length.

/// Rotate a square grid a quarter-turn counter-clockwise.
///
/// Cell `(i, j)` moves to `(n - 1 - j, i)`.
pub fn rotate_left<T: Copy + Default, const N: usize>(grid: &[[T; N]; N]) -> [[T; N]; N] {
    let mut out = [[T::default(); N]; N];
    for (i, row) in grid.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            out[N - 1 - j][i] = value;
        }
    }
    out
}

/// Rotate a square grid a quarter-turn clockwise.
///
/// Cell `(i, j)` moves to `(j, n - 1 - i)`.
pub fn rotate_right<T: Copy + Default, const N: usize>(grid: &[[T; N]; N]) -> [[T; N]; N] {
    let mut out = [[T::default(); N]; N];
    for (i, row) in grid.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            out[j][N - 1 - i] = value;
        }
    }
    out
}
