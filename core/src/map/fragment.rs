//! Pieces of terrain that can be copied from a map, transformed and
//! pasted back.

use std::collections::BTreeSet;

use crate::error::ActionError;
use crate::geo::{ Rotation, Z6 };
use crate::grid::{ Cube, HexLocation };
use crate::terrain::TerrainCode;

use super::Map;

/// A piece of terrain cut from a map, as offsets relative to some
/// anchor with the terrain at each offset. No offset occurs twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapFragment {
    items: Vec<(HexLocation, TerrainCode)>,
    area: BTreeSet<HexLocation>,
}

impl MapFragment {
    pub fn new() -> MapFragment {
        MapFragment::default()
    }

    /// Copy the terrain of the given area of a map.
    pub fn from_area(map: &Map, area: impl IntoIterator<Item=HexLocation>) -> MapFragment {
        let mut fragment = MapFragment::new();
        for loc in area {
            fragment.add_tile(map, loc);
        }
        fragment
    }

    /// A fragment of the given offsets and terrain. Fails if there are
    /// no items or an offset occurs more than once.
    pub fn from_items(items: impl IntoIterator<Item=(HexLocation, TerrainCode)>)
        -> Result<MapFragment, ActionError>
    {
        let mut fragment = MapFragment::new();
        for (offset, t) in items {
            if t.is_none() {
                return Err(ActionError::creation_failed(
                    format!("no terrain at offset {} in map fragment", offset)))
            }
            if !fragment.add_item(offset, t) {
                return Err(ActionError::creation_failed(
                    format!("duplicate offset {} in map fragment", offset)))
            }
        }
        if fragment.is_empty() {
            return Err(ActionError::creation_failed("empty map fragment"))
        }
        Ok(fragment)
    }

    /// Copy the terrain at `loc`, unless it is already part of the fragment
    /// or has no terrain.
    pub fn add_tile(&mut self, map: &Map, loc: HexLocation) -> bool {
        let t = map.terrain(loc);
        !t.is_none() && self.add_item(loc, t)
    }

    pub fn add_item(&mut self, offset: HexLocation, t: TerrainCode) -> bool {
        if self.area.insert(offset) {
            self.items.push((offset, t));
            true
        } else {
            false
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item=&(HexLocation, TerrainCode)> {
        self.items.iter()
    }

    pub fn area(&self) -> &BTreeSet<HexLocation> {
        &self.area
    }

    /// The area of the fragment when pasted at `loc`.
    pub fn offset_area(&self, loc: HexLocation) -> BTreeSet<HexLocation> {
        self.items.iter().map(|(o, _)| o.vector_sum(loc)).collect()
    }

    /// Paste the fragment with its origin at `loc`. Terrain falling
    /// off the map is discarded.
    pub fn paste_into(&self, map: &mut Map, loc: HexLocation) {
        for (o, t) in self.items.iter() {
            map.set_terrain(o.vector_sum(loc), *t);
        }
    }

    pub fn shift(&mut self, offset: HexLocation) {
        self.remap(|o| o.vector_sum(offset));
    }

    /// The middle of the bounding box of the offsets.
    pub fn center_of_bounds(&self) -> Option<HexLocation> {
        let xs = self.items.iter().map(|(o, _)| o.x);
        let ys = self.items.iter().map(|(o, _)| o.y);
        let (x0, x1) = (xs.clone().min()?, xs.max()?);
        let (y0, y1) = (ys.clone().min()?, ys.max()?);
        Some(HexLocation::new((x0 + x1) / 2, (y0 + y1) / 2))
    }

    /// The average of the offsets.
    pub fn center_of_mass(&self) -> Option<HexLocation> {
        if self.items.is_empty() {
            return None
        }
        let sum = self.items.iter().fold(HexLocation::ORIGIN, |s, (o, _)| s.vector_sum(*o));
        let n = self.items.len() as i32;
        Some(HexLocation::new(sum.x / n, sum.y / n))
    }

    /// Shift the fragment so that the middle of its bounding box is the origin.
    pub fn center_by_bounds(&mut self) {
        if let Some(c) = self.center_of_bounds() {
            self.shift(HexLocation::ORIGIN.vector_difference(c));
        }
    }

    pub fn center_by_mass(&mut self) {
        if let Some(c) = self.center_of_mass() {
            self.shift(HexLocation::ORIGIN.vector_difference(c));
        }
    }

    /// Rotate the fragment by 60 degrees around the origin.
    pub fn rotate_60(&mut self, r: Rotation) {
        self.remap(|o| {
            let v = Cube::from(o) - Cube::origin();
            HexLocation::from(Cube::origin() + v.rotate(r, Z6::One))
        });
    }

    fn remap(&mut self, f: impl Fn(HexLocation) -> HexLocation) {
        for (o, _) in self.items.iter_mut() {
            *o = f(*o);
        }
        self.area = self.items.iter().map(|(o, _)| *o).collect();
    }
}
