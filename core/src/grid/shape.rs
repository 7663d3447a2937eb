//! Regions of offset locations.

use super::location::HexLocation;

/// An axis-aligned rectangle of offset locations with its top-left
/// corner at `(x0, y0)`, enumerated column by column.
///
/// With odd columns shifted down the rectangle is "wavy" along its
/// top and bottom edges, which is how rectangular maps are laid out.
pub fn rect(x0: i32, y0: i32, width: i32, height: i32)
    -> impl Iterator<Item=HexLocation> + Clone
{
    let (w, h) = (width.max(0), height.max(0));
    (x0 .. x0 + w).flat_map(move |x| {
        (y0 .. y0 + h).map(move |y| HexLocation::new(x, y))
    })
}
