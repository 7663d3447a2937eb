//! Reversible operations on a map.
//!
//! Performing an [`Action`] yields its inverse, which is itself an action.
//! Operations without a cheap inverse are undone by restoring a snapshot
//! of the whole map.
//!
//! [`Action`]: enum.Action.html

pub mod context;
pub mod stack;

pub use context::ActionContext;
pub use stack::ActionStack;

use std::collections::BTreeSet;

use tracing::warn;

use crate::board::BoardOracle;
use crate::error::ActionError;
use crate::grid::HexLocation;
use crate::map::{ Map, MapFragment, MAX_PLAYERS };
use crate::movement::Unit;
use crate::terrain::TerrainCode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Replace the whole map.
    WholeMap(Box<Map>),
    /// Perform the actions in order.
    Chain(Vec<Action>),
    PaintHex {
        loc: HexLocation,
        terrain: TerrainCode,
    },
    PaintArea {
        area: BTreeSet<HexLocation>,
        terrain: TerrainCode,
    },
    /// Paint the contiguous region of the terrain at `loc`.
    Fill {
        loc: HexLocation,
        terrain: TerrainCode,
    },
    /// Paste a fragment with its origin at `loc`.
    Paste {
        fragment: MapFragment,
        loc: HexLocation,
    },
    Select(BTreeSet<HexLocation>),
    Deselect(BTreeSet<HexLocation>),
    /// Toggle the selection of each location.
    SelectXor(BTreeSet<HexLocation>),
    SelectAll,
    SelectInverse,
    ResizeMap {
        width: i32,
        height: i32,
        x_offset: i32,
        y_offset: i32,
        fill: Option<TerrainCode>,
    },
    FlipX,
    FlipY,
    /// Rotate the map clockwise by a number of quarter turns.
    RotateMap {
        quarter_turns: i32,
    },
    /// Set or clear the starting position of a player, taking it
    /// from any other player starting there.
    StartingPosition {
        player: usize,
        loc: Option<HexLocation>,
    },
    /// Move a unit, leaving it with the given movement points.
    MoveUnit {
        from: HexLocation,
        to: HexLocation,
        moves_left: u32,
    },
}

impl Action {
    pub fn paint_hex(loc: HexLocation, terrain: TerrainCode) -> Result<Action, ActionError> {
        check_terrain(terrain)?;
        Ok(Action::PaintHex { loc, terrain })
    }

    pub fn paint_area(
        area: impl IntoIterator<Item=HexLocation>,
        terrain: TerrainCode,
    ) -> Result<Action, ActionError> {
        check_terrain(terrain)?;
        Ok(Action::PaintArea { area: area.into_iter().collect(), terrain })
    }

    pub fn fill(loc: HexLocation, terrain: TerrainCode) -> Result<Action, ActionError> {
        check_terrain(terrain)?;
        Ok(Action::Fill { loc, terrain })
    }

    pub fn paste(fragment: MapFragment, loc: HexLocation) -> Result<Action, ActionError> {
        if fragment.is_empty() {
            return Err(ActionError::creation_failed("empty map fragment"))
        }
        for (_, t) in fragment.iter() {
            check_terrain(*t)?;
        }
        Ok(Action::Paste { fragment, loc })
    }

    pub fn resize_map(
        width: i32,
        height: i32,
        x_offset: i32,
        y_offset: i32,
        fill: Option<TerrainCode>,
    ) -> Result<Action, ActionError> {
        if width <= 0 || height <= 0 {
            return Err(ActionError::creation_failed(
                format!("invalid map size {}x{}", width, height)))
        }
        if let Some(t) = fill {
            check_terrain(t)?;
        }
        Ok(Action::ResizeMap { width, height, x_offset, y_offset, fill })
    }

    pub fn starting_position(player: usize, loc: Option<HexLocation>) -> Result<Action, ActionError> {
        check_player(player)?;
        Ok(Action::StartingPosition { player, loc })
    }

    /// A short name for log messages.
    pub fn name(&self) -> &'static str {
        match self {
            Action::WholeMap(_)             => "whole map",
            Action::Chain(_)                => "chain",
            Action::PaintHex { .. }         => "paint hex",
            Action::PaintArea { .. }        => "paint area",
            Action::Fill { .. }             => "fill",
            Action::Paste { .. }            => "paste",
            Action::Select(_)               => "select",
            Action::Deselect(_)             => "deselect",
            Action::SelectXor(_)            => "select xor",
            Action::SelectAll               => "select all",
            Action::SelectInverse           => "select inverse",
            Action::ResizeMap { .. }        => "resize map",
            Action::FlipX                   => "flip x",
            Action::FlipY                   => "flip y",
            Action::RotateMap { .. }        => "rotate map",
            Action::StartingPosition { .. } => "starting position",
            Action::MoveUnit { .. }         => "move unit",
        }
    }

    /// Chain another action after this one.
    pub fn append(self, next: Action) -> Action {
        match self {
            Action::Chain(mut actions) => {
                actions.push(next);
                Action::Chain(actions)
            }
            a => Action::Chain(vec![a, next])
        }
    }

    /// Chain another action before this one.
    pub fn prepend(self, first: Action) -> Action {
        match self {
            Action::Chain(mut actions) => {
                actions.insert(0, first);
                Action::Chain(actions)
            }
            a => Action::Chain(vec![first, a])
        }
    }

    /// Apply the action to the map, returning the action that undoes it.
    ///
    /// If the action fails the map is left unchanged.
    pub fn perform(&self, map: &mut Map) -> Result<Action, ActionError> {
        let undo = match self {
            Action::Chain(actions) => return perform_chain(actions, map),
            Action::WholeMap(_) => Action::WholeMap(Box::new(map.clone())),
            Action::PaintHex { loc, .. } => Action::PaintHex { loc: *loc, terrain: map.terrain(*loc) },
            Action::PaintArea { area, .. } => Action::Paste {
                fragment: MapFragment::from_area(map, area.iter().cloned()),
                loc: HexLocation::ORIGIN,
            },
            Action::Fill { loc, terrain } => {
                let area = map.contiguous_terrain_tiles(*loc);
                return Action::PaintArea { area, terrain: *terrain }.perform(map)
            }
            Action::Paste { fragment, loc } => Action::Paste {
                fragment: MapFragment::from_area(map, fragment.offset_area(*loc)),
                loc: HexLocation::ORIGIN,
            },
            Action::Select(area) => Action::SelectXor(area.iter()
                .filter(|l| map.on_board_with_border(**l) && !map.in_selection(**l))
                .cloned()
                .collect()),
            Action::Deselect(area) => Action::SelectXor(area.iter()
                .filter(|l| map.in_selection(**l))
                .cloned()
                .collect()),
            Action::SelectXor(area) => Action::SelectXor(area.iter()
                .filter(|l| map.on_board_with_border(**l))
                .cloned()
                .collect()),
            Action::SelectAll => Action::SelectXor(map.locations_with_border()
                .filter(|l| !map.in_selection(*l))
                .collect()),
            Action::SelectInverse => Action::SelectInverse,
            Action::ResizeMap { .. } | Action::FlipX | Action::FlipY =>
                Action::WholeMap(Box::new(map.clone())),
            Action::RotateMap { quarter_turns } => match quarter_turns.rem_euclid(4) {
                0 => Action::RotateMap { quarter_turns: 0 },
                2 => Action::WholeMap(Box::new(map.clone())),
                _ => return Err(ActionError::NotImplemented("rotate map by a quarter turn")),
            },
            Action::StartingPosition { player, loc } => {
                check_player(*player)?;
                let old = Action::StartingPosition { player: *player, loc: map.starting_position(*player) };
                match loc.and_then(|l| map.is_starting_position(l).map(|p| (p, l))) {
                    Some((other, l)) if other != *player =>
                        old.append(Action::StartingPosition { player: other, loc: Some(l) }),
                    _ => old,
                }
            }
            Action::MoveUnit { from, to, .. } => {
                let unit = check_move(map, *from, *to)?;
                Action::MoveUnit { from: *to, to: *from, moves_left: unit.moves }
            }
        };
        self.perform_without_undo(map)?;
        Ok(undo)
    }

    /// Apply the action to the map without computing its inverse.
    pub fn perform_without_undo(&self, map: &mut Map) -> Result<(), ActionError> {
        match self {
            Action::WholeMap(m) => *map = (**m).clone(),
            Action::Chain(actions) => {
                for a in actions {
                    a.perform_without_undo(map)?;
                }
            }
            Action::PaintHex { loc, terrain } => {
                map.set_terrain(*loc, *terrain);
            }
            Action::PaintArea { area, terrain } => {
                for loc in area {
                    map.set_terrain(*loc, *terrain);
                }
            }
            Action::Fill { loc, terrain } => {
                for l in map.contiguous_terrain_tiles(*loc) {
                    map.set_terrain(l, *terrain);
                }
            }
            Action::Paste { fragment, loc } => fragment.paste_into(map, *loc),
            Action::Select(area) => {
                for loc in area {
                    map.add_to_selection(*loc);
                }
            }
            Action::Deselect(area) => {
                for loc in area {
                    map.remove_from_selection(*loc);
                }
            }
            Action::SelectXor(area) => {
                for loc in area {
                    if !map.remove_from_selection(*loc) {
                        map.add_to_selection(*loc);
                    }
                }
            }
            Action::SelectAll => map.select_all(),
            Action::SelectInverse => map.invert_selection(),
            Action::ResizeMap { width, height, x_offset, y_offset, fill } =>
                map.resize(*width, *height, *x_offset, *y_offset, *fill)?,
            Action::FlipX => map.flip_x(),
            Action::FlipY => map.flip_y(),
            Action::RotateMap { quarter_turns } => match quarter_turns.rem_euclid(4) {
                0 => {}
                2 => {
                    map.flip_x();
                    map.flip_y();
                }
                _ => return Err(ActionError::NotImplemented("rotate map by a quarter turn")),
            },
            Action::StartingPosition { player, loc } => {
                check_player(*player)?;
                if let Some(other) = loc.and_then(|l| map.is_starting_position(l)) {
                    map.set_starting_position(other, None);
                }
                map.set_starting_position(*player, *loc);
            }
            Action::MoveUnit { from, to, moves_left } => {
                check_move(map, *from, *to)?;
                if let Some(mut unit) = map.remove_unit(*from) {
                    unit.moves = *moves_left;
                    map.place_unit(*to, unit);
                }
            }
        }
        Ok(())
    }
}

/// Perform the actions in order, collecting their inverses in reverse
/// order. If an action fails, the actions already performed are undone.
fn perform_chain(actions: &[Action], map: &mut Map) -> Result<Action, ActionError> {
    let mut undo = Vec::with_capacity(actions.len());
    for a in actions {
        match a.perform(map) {
            Ok(inverse) => undo.push(inverse),
            Err(e) => {
                for inverse in undo.iter().rev() {
                    if let Err(re) = inverse.perform_without_undo(map) {
                        warn!(action = inverse.name(), error = %re, "chain rollback failed");
                    }
                }
                return Err(e)
            }
        }
    }
    undo.reverse();
    Ok(Action::Chain(undo))
}

fn check_terrain(t: TerrainCode) -> Result<(), ActionError> {
    if t.is_none() {
        Err(ActionError::creation_failed("cannot paint without terrain"))
    } else {
        Ok(())
    }
}

fn check_player(player: usize) -> Result<(), ActionError> {
    if player < 1 || player > MAX_PLAYERS {
        Err(ActionError::creation_failed(format!("invalid player {}", player)))
    } else {
        Ok(())
    }
}

fn check_move(map: &Map, from: HexLocation, to: HexLocation) -> Result<&Unit, ActionError> {
    let unit = map.unit_at(from)
        .ok_or_else(|| ActionError::creation_failed(format!("no unit at {}", from)))?;
    if from != to && map.unit_at(to).is_some() {
        return Err(ActionError::creation_failed(format!("{} is occupied", to)))
    }
    Ok(unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::movement::Side;

    fn loc(x: i32, y: i32) -> HexLocation {
        HexLocation::new(x, y)
    }

    fn map() -> Map {
        Map::new(5, 5, TerrainCode::GRASSLAND, &Config::default())
    }

    /// Perform the action, check that its inverse restores the map and
    /// return the map as it was after the action.
    fn round_trip(before: &Map, action: &Action) -> Map {
        let mut m = before.clone();
        let undo = action.perform(&mut m).expect("perform");
        let after = m.clone();
        undo.perform(&mut m).expect("undo");
        assert_eq!(&m, before, "undo of {}", action.name());
        after
    }

    #[test]
    fn test_paint_hex() {
        let m = map();
        let after = round_trip(&m, &Action::paint_hex(loc(1, 1), TerrainCode::FOREST).unwrap());
        assert_eq!(after.terrain(loc(1, 1)), TerrainCode::FOREST);
    }

    #[test]
    fn test_paint_area_and_paste() {
        let mut m = map();
        m.set_terrain(loc(2, 2), TerrainCode::HILLS);
        let area = vec![loc(1, 1), loc(2, 2), loc(9, 9)];
        let after = round_trip(&m, &Action::paint_area(area, TerrainCode::SHALLOW_WATER).unwrap());
        assert_eq!(after.terrain(loc(2, 2)), TerrainCode::SHALLOW_WATER);

        let fragment = MapFragment::from_items(vec![
            (loc(0, 0), TerrainCode::VILLAGE),
            (loc(0, 1), TerrainCode::FOREST),
        ]).unwrap();
        let after = round_trip(&m, &Action::paste(fragment, loc(2, 1)).unwrap());
        assert_eq!(after.terrain(loc(2, 1)), TerrainCode::VILLAGE);
        assert_eq!(after.terrain(loc(2, 2)), TerrainCode::FOREST);
    }

    #[test]
    fn test_fill() {
        let mut m = map();
        for y in -1 .. 6 {
            m.set_terrain(loc(2, y), TerrainCode::SHALLOW_WATER);
        }
        let after = round_trip(&m, &Action::fill(loc(0, 0), TerrainCode::FOREST).unwrap());
        assert_eq!(after.terrain(loc(1, 4)), TerrainCode::FOREST);
        assert_eq!(after.terrain(loc(-1, -1)), TerrainCode::FOREST);
        assert_eq!(after.terrain(loc(2, 3)), TerrainCode::SHALLOW_WATER);
        assert_eq!(after.terrain(loc(3, 3)), TerrainCode::GRASSLAND);
    }

    #[test]
    fn test_selection_actions() {
        let mut m = map();
        m.add_to_selection(loc(0, 0));
        let area = vec![loc(0, 0), loc(1, 1), loc(20, 20)].into_iter().collect::<BTreeSet<_>>();
        let after = round_trip(&m, &Action::Select(area.clone()));
        assert_eq!(after.selection().len(), 2);
        let after = round_trip(&m, &Action::Deselect(area.clone()));
        assert!(after.selection().is_empty());
        let after = round_trip(&m, &Action::SelectXor(area));
        assert_eq!(after.selection().iter().cloned().collect::<Vec<_>>(), vec![loc(1, 1)]);
        assert!(round_trip(&m, &Action::SelectAll).everything_selected());
        let after = round_trip(&m, &Action::SelectInverse);
        assert!(!after.in_selection(loc(0, 0)));
        assert!(after.in_selection(loc(5, 5)));
    }

    #[test]
    fn test_map_operations() {
        let mut m = map();
        m.set_terrain(loc(0, 0), TerrainCode::MOUNTAINS);
        m.set_starting_position(1, Some(loc(0, 0)));
        let after = round_trip(&m, &Action::resize_map(7, 3, -1, 0, None).unwrap());
        assert_eq!((after.width(), after.height()), (7, 3));
        assert_eq!(after.starting_position(1), Some(loc(1, 0)));
        round_trip(&m, &Action::FlipX);
        let after = round_trip(&m, &Action::FlipY);
        assert_eq!(after.terrain(loc(4, 0)), TerrainCode::MOUNTAINS);
        let after = round_trip(&m, &Action::RotateMap { quarter_turns: 2 });
        assert_eq!(after.starting_position(1), Some(loc(4, 4)));
        assert_eq!(round_trip(&m, &Action::RotateMap { quarter_turns: -4 }), m);
    }

    #[test]
    fn test_failed_resize_leaves_map() {
        let mut m = map();
        let action = Action::resize_map(2, 5, 9, 0, None).unwrap();
        let before = m.clone();
        assert!(matches!(action.perform(&mut m), Err(ActionError::OperationOutOfRange { .. })));
        assert_eq!(m, before);
    }

    #[test]
    fn test_quarter_turn_not_implemented() {
        let mut m = map();
        for n in [1, 3, -1].iter() {
            let res = Action::RotateMap { quarter_turns: *n }.perform(&mut m);
            assert!(matches!(res, Err(ActionError::NotImplemented(_))));
        }
    }

    #[test]
    fn test_starting_position() {
        let mut m = map();
        m.set_starting_position(2, Some(loc(3, 3)));
        let after = round_trip(&m, &Action::starting_position(1, Some(loc(3, 3))).unwrap());
        assert_eq!(after.starting_position(1), Some(loc(3, 3)));
        assert_eq!(after.starting_position(2), None);
        let after = round_trip(&m, &Action::starting_position(2, None).unwrap());
        assert_eq!(after.starting_positions().count(), 0);
    }

    #[test]
    fn test_move_unit() {
        let mut m = map();
        m.place_unit(loc(1, 1), Unit::new(Side(1), 5));
        m.place_unit(loc(3, 3), Unit::new(Side(2), 5));
        let after = round_trip(&m, &Action::MoveUnit { from: loc(1, 1), to: loc(2, 2), moves_left: 1 });
        assert_eq!(after.unit_at(loc(2, 2)).map(|u| u.moves), Some(1));
        let mut m2 = m.clone();
        let occupied = Action::MoveUnit { from: loc(1, 1), to: loc(3, 3), moves_left: 0 };
        assert!(matches!(occupied.perform(&mut m2), Err(ActionError::CreationFailed(_))));
        let nobody = Action::MoveUnit { from: loc(0, 0), to: loc(0, 1), moves_left: 0 };
        assert!(nobody.perform(&mut m2).is_err());
        assert_eq!(m2, m);
    }

    #[test]
    fn test_creation_failed() {
        let none = TerrainCode::NONE;
        assert!(matches!(Action::paint_hex(loc(0, 0), none), Err(ActionError::CreationFailed(_))));
        assert!(Action::paint_area(vec![loc(0, 0)], none).is_err());
        assert!(Action::fill(loc(0, 0), none).is_err());
        assert!(Action::paste(MapFragment::new(), loc(0, 0)).is_err());
        let mut blank = MapFragment::new();
        blank.add_item(loc(0, 0), TerrainCode::FOREST);
        blank.add_item(loc(0, 1), none);
        assert!(matches!(Action::paste(blank, loc(0, 0)), Err(ActionError::CreationFailed(_))));
        assert!(Action::resize_map(0, 5, 0, 0, None).is_err());
        assert!(Action::resize_map(5, 5, 0, 0, Some(none)).is_err());
        assert!(Action::starting_position(0, None).is_err());
        assert!(Action::starting_position(MAX_PLAYERS + 1, None).is_err());
        assert!(Action::starting_position(MAX_PLAYERS, None).is_ok());
    }

    #[test]
    fn test_chain_inverse_order() {
        let mut m = map();
        let a = Action::PaintHex { loc: loc(1, 1), terrain: TerrainCode::FOREST };
        let b = Action::PaintHex { loc: loc(1, 1), terrain: TerrainCode::HILLS };
        let c = Action::PaintHex { loc: loc(2, 2), terrain: TerrainCode::VILLAGE };
        let undo = Action::Chain(vec![a, b, c]).perform(&mut m).expect("perform");
        assert_eq!(undo, Action::Chain(vec![
            Action::PaintHex { loc: loc(2, 2), terrain: TerrainCode::GRASSLAND },
            Action::PaintHex { loc: loc(1, 1), terrain: TerrainCode::FOREST },
            Action::PaintHex { loc: loc(1, 1), terrain: TerrainCode::GRASSLAND },
        ]));
        undo.perform(&mut m).expect("undo");
        assert_eq!(m, map());
    }

    #[test]
    fn test_chain_rollback() {
        let mut m = map();
        let chain = Action::PaintHex { loc: loc(1, 1), terrain: TerrainCode::FOREST }
            .append(Action::SelectAll)
            .append(Action::RotateMap { quarter_turns: 1 });
        assert!(chain.perform(&mut m).is_err());
        assert_eq!(m, map());
    }

    #[test]
    fn test_append_prepend() {
        let a = Action::FlipX;
        let b = Action::FlipY;
        let c = Action::SelectAll;
        let chain = a.clone().append(b.clone()).append(c.clone());
        assert_eq!(chain, Action::Chain(vec![a.clone(), b.clone(), c.clone()]));
        let chain = b.clone().prepend(a.clone()).prepend(c.clone());
        assert_eq!(chain, Action::Chain(vec![c, a, b]));
    }
}
