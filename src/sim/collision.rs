//! Collision detection and response against the solid tile set
//!
//! Movement is resolved one axis at a time: the full horizontal displacement
//! is applied and corrected first, then the full vertical displacement.
//! A body moving diagonally into an inside corner can be caught on the
//! horizontal pass even when a combined move would clear; levels rely on it.

use glam::IVec2;

use super::body::{Rect, SpatialBody};
use super::level::Tile;
use crate::consts::PROBE_DISTANCE;

/// Which axes were blocked by a tile during one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blocked {
    pub x: bool,
    pub y: bool,
}

/// Outcome of the ledge-aware vertical step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgeCheck {
    /// Vertical movement was stopped by a tile
    pub blocked: bool,
    /// Standing on support, but the leading edge has passed its end
    pub at_ledge: bool,
}

/// All solid tiles strictly overlapping `rect`, in tile order
pub fn overlapping<'a>(rect: &'a Rect, tiles: &'a [Tile]) -> impl Iterator<Item = &'a Tile> + 'a {
    tiles.iter().filter(move |t| t.rect.overlaps(rect))
}

/// Probe a couple of pixels below the body without moving it
pub fn is_grounded(rect: &Rect, tiles: &[Tile]) -> bool {
    let probe = rect.translated(IVec2::new(0, PROBE_DISTANCE));
    overlapping(&probe, tiles).next().is_some()
}

/// Apply `vel.x` and push the leading edge flush against every overlapping tile
///
/// Returns true if any tile was hit; `vel.x` is zeroed in that case.
pub fn resolve_horizontal(body: &mut SpatialBody, tiles: &[Tile]) -> bool {
    body.rect.pos.x += body.vel.x;

    let mut hit = false;
    for tile in tiles {
        if !tile.rect.overlaps(&body.rect) {
            continue;
        }
        if body.vel.x > 0 {
            body.rect.set_right(tile.rect.left());
        } else if body.vel.x < 0 {
            body.rect.set_left(tile.rect.right());
        }
        hit = true;
    }

    if hit {
        body.vel.x = 0;
    }
    hit
}

/// Apply `vel.y` and push the leading edge flush against every overlapping tile
///
/// Returns true if any tile was hit; `vel.y` is zeroed in that case.
pub fn resolve_vertical(body: &mut SpatialBody, tiles: &[Tile]) -> bool {
    body.rect.pos.y += body.vel.y;

    let mut hit = false;
    for tile in tiles {
        if !tile.rect.overlaps(&body.rect) {
            continue;
        }
        if body.vel.y > 0 {
            body.rect.set_bottom(tile.rect.top());
        } else if body.vel.y < 0 {
            body.rect.set_top(tile.rect.bottom());
        }
        hit = true;
    }

    if hit {
        body.vel.y = 0;
    }
    hit
}

/// Full two-pass resolution: horizontal first, then vertical
pub fn resolve_movement(body: &mut SpatialBody, tiles: &[Tile]) -> Blocked {
    let x = resolve_horizontal(body, tiles);
    let y = resolve_vertical(body, tiles);
    Blocked { x, y }
}

/// Vertical step for walkers that turn around at platform ends
///
/// `direction` is the sign of the walker's intended horizontal travel. When
/// the support probe finds tiles the body snaps onto them and checks whether
/// its leading edge still lies over one of them. Without support the body
/// falls through ordinary vertical resolution.
pub fn resolve_vertical_ledge_aware(
    body: &mut SpatialBody,
    tiles: &[Tile],
    direction: i32,
) -> LedgeCheck {
    let probe = body.rect.translated(IVec2::new(0, PROBE_DISTANCE));
    let support: Vec<Rect> = overlapping(&probe, tiles).map(|t| t.rect).collect();

    if support.is_empty() {
        return LedgeCheck {
            blocked: resolve_vertical(body, tiles),
            at_ledge: false,
        };
    }

    let mut landed = false;
    let mut over_support = false;
    for tile in &support {
        if body.vel.y >= 0 {
            body.rect.set_bottom(tile.top());
            landed = true;
            if (direction > 0 && body.rect.right() <= tile.right())
                || (direction < 0 && body.rect.left() >= tile.left())
            {
                over_support = true;
            }
        } else {
            body.rect.set_top(tile.bottom());
        }
    }
    body.vel.y = 0;

    LedgeCheck {
        blocked: true,
        at_ledge: landed && direction != 0 && !over_support,
    }
}
