use crate::config::ConfigError;
use crate::layout::{position, GridSpec};
use crate::types::Tile;

/// Owns every tile, addressed by `(column, row)` and stored row-major
#[derive(Debug, Clone)]
pub struct TileGrid {
    spec: GridSpec,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Builds one resting tile per cell. Tiles of height `tile_height` rest
    /// sunk below the floor and rise until they stand on it.
    pub fn new(spec: GridSpec, tile_height: f32) -> Result<Self, ConfigError> {
        if !(tile_height.is_finite() && tile_height > 0.0) {
            return Err(ConfigError::InvalidTileHeight(tile_height));
        }

        let rest = -tile_height * 0.5;
        let raised = tile_height * 0.5;

        let tiles = spec
            .cells()
            .map(|(i, j)| Tile::new(position(&spec, i, j, rest), rest, raised))
            .collect();

        Ok(Self { spec, tiles })
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Tile> {
        self.flat_index(column, row).map(|k| &self.tiles[k])
    }

    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut Tile> {
        self.flat_index(column, row).map(move |k| &mut self.tiles[k])
    }

    /// Tile by row-major index `k = column * rows + row`
    pub fn by_index(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn by_index_mut(&mut self, index: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(index)
    }

    /// Visit tiles in row-major order
    pub fn for_each(&self, mut visitor: impl FnMut(&Tile)) {
        self.tiles.iter().for_each(|tile| visitor(tile));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Sets a tile's live height; its layout position is left untouched.
    /// Out-of-range cells are ignored.
    pub fn set_height(&mut self, column: usize, row: usize, y: f32) {
        if let Some(tile) = self.get_mut(column, row) {
            tile.height = y;
        }
    }

    /// Drops all tiles; used on scene teardown
    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    fn flat_index(&self, column: usize, row: usize) -> Option<usize> {
        if column < self.spec.columns && row < self.spec.rows {
            let k = self.spec.index(column, row);
            (k < self.tiles.len()).then_some(k)
        } else {
            None
        }
    }
}
