use crate::config::ConfigError;

/// Immutable description of the tile grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub columns: usize,
    pub rows: usize,
    pub spacing: f32,
    pub tile_radius: f32,
}

impl GridSpec {
    /// Validates raw dimensions; fails fast instead of building a partial grid
    pub fn new(columns: i64, rows: i64, spacing: f32, tile_radius: f32) -> Result<Self, ConfigError> {
        if columns < 0 || rows < 0 {
            return Err(ConfigError::NegativeDimensions { columns, rows });
        }
        let too_many = || ConfigError::TooManyTiles { columns, rows };
        let (Ok(column_count), Ok(row_count)) = (usize::try_from(columns), usize::try_from(rows)) else {
            return Err(too_many());
        };
        // Row-major flat indices stay below this product
        column_count.checked_mul(row_count).ok_or_else(too_many)?;

        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(ConfigError::InvalidSpacing(spacing));
        }
        if !(tile_radius.is_finite() && tile_radius > 0.0) {
            return Err(ConfigError::InvalidRadius(tile_radius));
        }

        Ok(Self {
            columns: column_count,
            rows: row_count,
            spacing,
            tile_radius,
        })
    }

    pub fn tile_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Row-major flat index, `i` outer and `j` inner
    pub fn index(&self, column: usize, row: usize) -> usize {
        column * self.rows + row
    }

    /// Inverse of [`GridSpec::index`]
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index / self.rows, index % self.rows)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.columns).flat_map(move |i| (0..self.rows).map(move |j| (i, j)))
    }
}

/// Footprint of one tile in grid-local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePosition {
    pub column: usize,
    pub row: usize,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// World footprint of cell `(i, j)` at height `y`.
///
/// The per-axis base offset `-k * spacing` gets the same spacing term
/// subtracted again, so neighbouring tiles sit `2 * spacing` apart.
pub fn position(spec: &GridSpec, column: usize, row: usize, y: f32) -> TilePosition {
    let base = |k: usize| -(k as f32) * spec.spacing;

    TilePosition {
        column,
        row,
        x: base(column) - column as f32 * spec.spacing,
        y,
        z: base(row) - row as f32 * spec.spacing,
    }
}
