use log::debug;

/// Pixel window of one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileWindow {
    pub x_min: usize,
    pub y_min: usize,
    pub x_max: usize,
    pub y_max: usize,
}

impl TileWindow {
    pub fn width(&self) -> usize {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> usize {
        self.y_max - self.y_min
    }

    pub fn offset(&self) -> (isize, isize) {
        (self.x_min as isize, self.y_min as isize)
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width(), self.height())
    }
}

/// Row-major grid of tiles covering a raster
pub struct TileGrid {
    raster_width: usize,
    raster_height: usize,
    tile_size: usize,
    pub num_tiles_x: usize,
    pub num_tiles_y: usize,
    pub total_tiles: usize,
}

impl TileGrid {
    /// `tile_size` must be positive; the caller validates it.
    pub fn new(raster_width: usize, raster_height: usize, tile_size: usize) -> Self {
        let num_tiles_x = raster_width.div_ceil(tile_size);
        let num_tiles_y = raster_height.div_ceil(tile_size);
        let total_tiles = num_tiles_x * num_tiles_y;

        debug!(
            "TileGrid: {}x{} raster, tile_size={} → {}x{} tiles ({} total)",
            raster_width, raster_height, tile_size, num_tiles_x, num_tiles_y, total_tiles
        );

        Self {
            raster_width,
            raster_height,
            tile_size,
            num_tiles_x,
            num_tiles_y,
            total_tiles,
        }
    }

    pub fn iter(&self) -> TileIterator<'_> {
        TileIterator {
            grid: self,
            current_idx: 0,
        }
    }

    pub fn tile_window(&self, tile_idx: usize) -> TileWindow {
        let tile_y = tile_idx / self.num_tiles_x;
        let tile_x = tile_idx % self.num_tiles_x;

        TileWindow {
            x_min: tile_x * self.tile_size,
            y_min: tile_y * self.tile_size,
            x_max: ((tile_x + 1) * self.tile_size).min(self.raster_width),
            y_max: ((tile_y + 1) * self.tile_size).min(self.raster_height),
        }
    }
}

pub struct TileIterator<'a> {
    grid: &'a TileGrid,
    current_idx: usize,
}

impl Iterator for TileIterator<'_> {
    type Item = TileWindow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_idx < self.grid.total_tiles {
            let window = self.grid.tile_window(self.current_idx);
            self.current_idx += 1;
            Some(window)
        } else {
            None
        }
    }
}
