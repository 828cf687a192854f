//! Surface Layers Constants
//!
//! Битовые маски слоёв для ray queries (ground probe + world picker).
//! Те же биты используются как Rapier `Group` memberships в клиенте.
//!
//! ## Layers:
//! - Layer 1 (0b1 = 1): Terrain (земля, по ней камера держит высоту)
//! - Layer 2 (0b10 = 2): Actors (selectable units)
//! - Layer 3 (0b100 = 4): Props (статичные объекты, кликабельны, но не земля)
//!
//! ## Использование:
//! ```rust
//! use tacticam_simulation::surface::*;
//!
//! // Ground probe видит только terrain
//! let ground = SURFACE_MASK_GROUND_PROBE;
//! assert_eq!(ground & SURFACE_LAYER_ACTORS, 0);
//! ```

// ============================================================================
// Layer Битовые Маски (на каком слое объект находится)
// ============================================================================

/// Layer 1: Terrain (heightfield, пол, рампы)
pub const SURFACE_LAYER_TERRAIN: u32 = 0b1; // 1

/// Layer 2: Actors (controllable entities)
pub const SURFACE_LAYER_ACTORS: u32 = 0b10; // 2

/// Layer 3: Props (камни, ящики — можно кликнуть, но камера их не учитывает)
pub const SURFACE_LAYER_PROPS: u32 = 0b100; // 4

// ============================================================================
// Query Masks (что видит конкретный луч)
// ============================================================================

/// Mask: ground probe камеры — только terrain
pub const SURFACE_MASK_GROUND_PROBE: u32 = SURFACE_LAYER_TERRAIN;

/// Mask: click-to-move — terrain + props (actors не блокируют клик по земле)
pub const SURFACE_MASK_PICK: u32 = SURFACE_LAYER_TERRAIN | SURFACE_LAYER_PROPS;
