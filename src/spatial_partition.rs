//! Spatial grid partitioning for collision queries.
//!
//! Every collidable entity registers one [`Collider`] here: a hitbox, a
//! [`Category`], the id of the owning record and a position.  The index keeps
//! a map from grid cells to the shapes whose bounding box touches the cell, so
//! a query only runs exact overlap tests against shapes in nearby cells.
//!
//! ## Cell Size Choice
//!
//! Cell size (`GRID_CELL_SIZE` in `constants.rs`) is 16 px, roughly the size
//! of a laser.  A large meteor (radius 48) spans at most 7×7 cells, so
//! inserting and moving it touches a bounded number of buckets, while
//! lasers and small meteors share few cells with unrelated shapes.
//!
//! ## Registration lifetime
//!
//! Shapes are queryable immediately after [`SpatialIndex::add`].  The owner
//! removes its shape before (or when) the owning record is dropped, so every
//! shape in the index refers to a live entity.

use bevy::math::Vec2;
use std::collections::HashMap;

/// Grid cell coordinates.
pub type CellKey = (i32, i32);

/// Handle of a shape registered in a [`SpatialIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u32);

/// Collision geometry, centred on the collider position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hitbox {
    Circle { radius: f32 },
    /// Axis-aligned rectangle.
    Rect { half_size: Vec2 },
}

impl Hitbox {
    /// Half extents of the axis-aligned bounding box.
    fn half_extents(&self) -> Vec2 {
        match *self {
            Hitbox::Circle { radius } => Vec2::splat(radius),
            Hitbox::Rect { half_size } => half_size,
        }
    }
}

/// What kind of entity a shape belongs to.
///
/// The declaration order is the order in which contacts are reported by
/// [`SpatialIndex::intersecting`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Player,
    Shield,
    MeteorLarge,
    MeteorSmall,
    Alien,
    AlienLaser,
    Laser,
}

impl Category {
    pub fn is_meteor(self) -> bool {
        matches!(self, Category::MeteorLarge | Category::MeteorSmall)
    }
}

/// A registered shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub hitbox: Hitbox,
    pub category: Category,
    /// Id of the owning record in its entity store.
    pub owner: u32,
    pub position: Vec2,
    min_cell: CellKey,
    max_cell: CellKey,
}

/// Uniform grid over all registered shapes.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    cell_size: f32,
    next_id: u32,
    colliders: HashMap<ShapeId, Collider>,
    /// Map from cell coordinates to the shapes overlapping that cell.
    cells: HashMap<CellKey, Vec<ShapeId>>,
}

impl SpatialIndex {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            next_id: 0,
            colliders: HashMap::new(),
            cells: HashMap::new(),
        }
    }

    /// Compute grid cell coordinates for a position.
    fn world_to_cell(&self, pos: Vec2) -> CellKey {
        let x = (pos.x / self.cell_size).floor() as i32;
        let y = (pos.y / self.cell_size).floor() as i32;
        (x, y)
    }

    /// Range of cells covered by a hitbox at `position`.
    fn cell_range(&self, hitbox: &Hitbox, position: Vec2) -> (CellKey, CellKey) {
        let half = hitbox.half_extents();
        (
            self.world_to_cell(position - half),
            self.world_to_cell(position + half),
        )
    }

    fn link(&mut self, id: ShapeId, min: CellKey, max: CellKey) {
        for x in min.0..=max.0 {
            for y in min.1..=max.1 {
                self.cells.entry((x, y)).or_default().push(id);
            }
        }
    }

    fn unlink(&mut self, id: ShapeId, min: CellKey, max: CellKey) {
        for x in min.0..=max.0 {
            for y in min.1..=max.1 {
                if let Some(bucket) = self.cells.get_mut(&(x, y)) {
                    bucket.retain(|&other| other != id);
                    if bucket.is_empty() {
                        self.cells.remove(&(x, y));
                    }
                }
            }
        }
    }

    /// Register a shape.  It takes part in queries straight away.
    pub fn add(&mut self, hitbox: Hitbox, category: Category, owner: u32, position: Vec2) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        let (min_cell, max_cell) = self.cell_range(&hitbox, position);
        self.link(id, min_cell, max_cell);
        self.colliders.insert(
            id,
            Collider {
                hitbox,
                category,
                owner,
                position,
                min_cell,
                max_cell,
            },
        );
        id
    }

    /// Unregister a shape.  Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: ShapeId) -> Option<Collider> {
        let collider = self.colliders.remove(&id)?;
        self.unlink(id, collider.min_cell, collider.max_cell);
        Some(collider)
    }

    /// Drop every shape, keeping the id counter monotonic.
    pub fn remove_all(&mut self) {
        self.colliders.clear();
        self.cells.clear();
    }

    /// Move a shape, re-bucketing it only when its cell range changed.
    pub fn set_position(&mut self, id: ShapeId, position: Vec2) {
        let Some(collider) = self.colliders.get(&id).copied() else {
            return;
        };
        let (min_cell, max_cell) = self.cell_range(&collider.hitbox, position);
        if (min_cell, max_cell) != (collider.min_cell, collider.max_cell) {
            self.unlink(id, collider.min_cell, collider.max_cell);
            self.link(id, min_cell, max_cell);
        }
        if let Some(entry) = self.colliders.get_mut(&id) {
            entry.position = position;
            entry.min_cell = min_cell;
            entry.max_cell = max_cell;
        }
    }

    pub fn get(&self, id: ShapeId) -> Option<&Collider> {
        self.colliders.get(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.colliders.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Exact overlap test between two registered shapes.
    pub fn is_intersecting(&self, a: ShapeId, b: ShapeId) -> bool {
        match (self.colliders.get(&a), self.colliders.get(&b)) {
            (Some(a), Some(b)) => overlaps(&a.hitbox, a.position, &b.hitbox, b.position),
            _ => false,
        }
    }

    /// Shapes sharing at least one cell with the given box.
    /// Note: a conservative over-approximation; callers run the exact test.
    fn candidates(&self, hitbox: &Hitbox, position: Vec2) -> Vec<ShapeId> {
        let (min, max) = self.cell_range(hitbox, position);
        let mut found = Vec::new();
        for x in min.0..=max.0 {
            for y in min.1..=max.1 {
                if let Some(bucket) = self.cells.get(&(x, y)) {
                    found.extend_from_slice(bucket);
                }
            }
        }
        found.sort_unstable();
        found.dedup();
        found
    }

    /// Every shape overlapping `id`, excluding itself.
    ///
    /// Sorted by category (see [`Category`]), then by owner id, so callers
    /// resolve contacts in a deterministic order.
    pub fn intersecting(&self, id: ShapeId) -> Vec<ShapeId> {
        let Some(subject) = self.colliders.get(&id) else {
            return Vec::new();
        };
        let mut hits: Vec<ShapeId> = self
            .candidates(&subject.hitbox, subject.position)
            .into_iter()
            .filter(|&other| other != id)
            .filter(|other| {
                self.colliders.get(other).is_some_and(|c| {
                    overlaps(&subject.hitbox, subject.position, &c.hitbox, c.position)
                })
            })
            .collect();
        hits.sort_by_key(|other| {
            self.colliders
                .get(other)
                .map(|c| (c.category, c.owner))
        });
        hits
    }

    /// `true` if a hypothetical shape at `position` would overlap any
    /// registered shape not listed in `ignore`.
    pub fn overlaps_any(&self, hitbox: &Hitbox, position: Vec2, ignore: &[ShapeId]) -> bool {
        self.candidates(hitbox, position).into_iter().any(|other| {
            !ignore.contains(&other)
                && self
                    .colliders
                    .get(&other)
                    .is_some_and(|c| overlaps(hitbox, position, &c.hitbox, c.position))
        })
    }
}

/// Exact overlap test.  Touching edges do not count.
pub fn overlaps(a: &Hitbox, a_pos: Vec2, b: &Hitbox, b_pos: Vec2) -> bool {
    match (*a, *b) {
        (Hitbox::Circle { radius: ra }, Hitbox::Circle { radius: rb }) => {
            let reach = ra + rb;
            a_pos.distance_squared(b_pos) < reach * reach
        }
        (Hitbox::Circle { radius }, Hitbox::Rect { half_size }) => {
            circle_rect(a_pos, radius, b_pos, half_size)
        }
        (Hitbox::Rect { half_size }, Hitbox::Circle { radius }) => {
            circle_rect(b_pos, radius, a_pos, half_size)
        }
        (Hitbox::Rect { half_size: ha }, Hitbox::Rect { half_size: hb }) => {
            let d = (a_pos - b_pos).abs();
            d.x < ha.x + hb.x && d.y < ha.y + hb.y
        }
    }
}

fn circle_rect(center: Vec2, radius: f32, rect_pos: Vec2, half_size: Vec2) -> bool {
    let closest = center.clamp(rect_pos - half_size, rect_pos + half_size);
    center.distance_squared(closest) < radius * radius
}
