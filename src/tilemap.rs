//! Minimal tile layer and the tile-collision adapter built on it.

use crate::api::{CollisionApi, TileSource};
use crate::error::Result;
use crate::geom::Rect;
use crate::types::{EntityId, Faces, Member};
use crate::world::World;

/// Called once per entity that separated from at least one tile.
pub type TileHitFn<'a> = dyn FnMut(&mut World, EntityId, &[TileBlock]) + 'a;

/// Collision properties shared by every cell using this tile index.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tile {
    pub allow_collisions: Faces,
    pub mass: f32,
    /// When false the tile reports contact on X without pushing out.
    pub separate_x: bool,
    pub separate_y: bool,
}

impl Default for Tile {
    fn default() -> Self {
        Self::empty()
    }
}

impl Tile {
    /// Collides on every face.
    pub fn solid() -> Self {
        Self::with_faces(Faces::ANY)
    }

    /// Never collides.
    pub fn empty() -> Self {
        Self::with_faces(Faces::NONE)
    }

    pub fn with_faces(faces: Faces) -> Self {
        Self { allow_collisions: faces, mass: 1.0, separate_x: true, separate_y: true }
    }

    /// Hit when the object moves right into the tile.
    pub fn collide_left(&self) -> bool {
        self.allow_collisions.intersects(Faces::LEFT)
    }

    pub fn collide_right(&self) -> bool {
        self.allow_collisions.intersects(Faces::RIGHT)
    }

    /// Hit when the object moves down onto the tile.
    pub fn collide_up(&self) -> bool {
        self.allow_collisions.intersects(Faces::UP)
    }

    pub fn collide_down(&self) -> bool {
        self.allow_collisions.intersects(Faces::DOWN)
    }

    pub fn is_collidable(&self) -> bool {
        !self.allow_collisions.is_empty()
    }
}

/// One occupied cell: its world rectangle, grid coordinates and tile.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileBlock {
    pub rect: Rect,
    pub tile: Tile,
    pub col: u32,
    pub row: u32,
}

/// A grid of tile indices. Index 0 is an empty cell.
#[derive(Clone, Debug)]
pub struct TileLayer {
    pub tile_width: f32,
    pub tile_height: f32,
    width_in_tiles: u32,
    height_in_tiles: u32,
    data: Vec<u32>,
    tiles: Vec<Tile>,
}

impl TileLayer {
    pub fn new(tile_width: f32, tile_height: f32, width_in_tiles: u32, height_in_tiles: u32) -> Self {
        Self {
            tile_width,
            tile_height,
            width_in_tiles,
            height_in_tiles,
            data: vec![0; (width_in_tiles * height_in_tiles) as usize],
            tiles: vec![Tile::empty()],
        }
    }

    /// Build a layer from rows of tile indices. Short rows are padded with 0.
    pub fn from_rows(tile_width: f32, tile_height: f32, rows: &[Vec<u32>], tiles: Vec<Tile>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let mut layer = Self::new(tile_width, tile_height, width, rows.len() as u32);
        for (row, cells) in rows.iter().enumerate() {
            for (col, &index) in cells.iter().enumerate() {
                layer.set_tile(col as u32, row as u32, index);
            }
        }
        layer.tiles = std::iter::once(Tile::empty()).chain(tiles).collect();
        layer
    }

    /// Register a tile type and return its index.
    pub fn add_tile(&mut self, tile: Tile) -> u32 {
        self.tiles.push(tile);
        (self.tiles.len() - 1) as u32
    }

    pub fn tile_mut(&mut self, index: u32) -> Option<&mut Tile> {
        self.tiles.get_mut(index as usize)
    }

    pub fn width_in_tiles(&self) -> u32 {
        self.width_in_tiles
    }

    pub fn height_in_tiles(&self) -> u32 {
        self.height_in_tiles
    }

    pub fn width_in_pixels(&self) -> f32 {
        self.width_in_tiles as f32 * self.tile_width
    }

    pub fn height_in_pixels(&self) -> f32 {
        self.height_in_tiles as f32 * self.tile_height
    }

    /// Out-of-range cells are ignored.
    pub fn set_tile(&mut self, col: u32, row: u32, index: u32) {
        if col < self.width_in_tiles && row < self.height_in_tiles {
            self.data[(row * self.width_in_tiles + col) as usize] = index;
        }
    }

    pub fn tile_index(&self, col: u32, row: u32) -> Option<u32> {
        if col < self.width_in_tiles && row < self.height_in_tiles {
            Some(self.data[(row * self.width_in_tiles + col) as usize])
        } else {
            None
        }
    }

    /// Tile at a cell, `None` for empty or out-of-range cells.
    pub fn tile_at(&self, col: u32, row: u32) -> Option<&Tile> {
        match self.tile_index(col, row)? {
            0 => None,
            i => self.tiles.get(i as usize),
        }
    }

    pub fn cell_rect(&self, col: u32, row: u32) -> Rect {
        Rect::new(
            col as f32 * self.tile_width,
            row as f32 * self.tile_height,
            self.tile_width,
            self.tile_height,
        )
    }

    /// Separate every alive entity under `member` from the tiles it overlaps.
    ///
    /// Immovable entities and entities with no collidable faces are skipped.
    /// Clears the world's tile-overlap flag first and returns its final value.
    pub fn collide(
        &self,
        world: &mut World,
        member: Member,
        mut on_hit: Option<&mut TileHitFn<'_>>,
    ) -> Result<bool> {
        world.clear_tile_overlap();
        let ids = world.collect_entities(member)?;
        let mut hits = Vec::new();
        let mut checked = 0usize;
        for id in ids {
            let area = {
                let e = world.entity(id)?;
                if !e.alive || e.immovable || e.allow_collisions.is_empty() {
                    continue;
                }
                e.mask.bounds()
            };
            checked += 1;
            hits.clear();
            for block in self.tiles_overlapping(&area) {
                if world.separate_tile(id, &block)? {
                    hits.push(block);
                }
            }
            if !hits.is_empty()
                && let Some(cb) = on_hit.as_deref_mut()
            {
                cb(world, id, &hits);
            }
        }
        let any = world.tile_overlap();
        log::debug!("tile collide: {checked} entities, overlap={any}");
        Ok(any)
    }
}

impl TileSource for TileLayer {
    fn tiles_overlapping(&self, area: &Rect) -> Vec<TileBlock> {
        if area.x < 0.0
            || area.x > self.width_in_pixels()
            || area.y < 0.0
            || area.bottom() > self.height_in_pixels()
            || self.tile_width <= 0.0
            || self.tile_height <= 0.0
        {
            return Vec::new();
        }

        // One extra cell each way covers a box that straddles cell edges.
        let col0 = (area.x / self.tile_width).floor() as u32;
        let row0 = (area.y / self.tile_height).floor() as u32;
        // Float-to-int casts saturate, so huge areas clamp to the layer.
        let cols = ((area.width / self.tile_width).ceil() as u32).saturating_add(1);
        let rows = ((area.height / self.tile_height).ceil() as u32).saturating_add(1);
        let col1 = col0.saturating_add(cols).min(self.width_in_tiles);
        let row1 = row0.saturating_add(rows).min(self.height_in_tiles);

        let mut out = Vec::new();
        for row in row0..row1 {
            for col in col0..col1 {
                if let Some(tile) = self.tile_at(col, row)
                    && tile.is_collidable()
                {
                    out.push(TileBlock { rect: self.cell_rect(col, row), tile: *tile, col, row });
                }
            }
        }
        out
    }
}
