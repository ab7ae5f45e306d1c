//! Floor-plan editing core for the table-booking admin.
//!
//! This crate owns the spatial editor behind the venue floor-plan screen: a
//! 2D scene of tables, walls, doors and windows spread over one or more
//! floors. It translates pointer, wheel and key input into scene mutations,
//! keeps the viewport (pan/zoom) and the selection, snaps geometry to a grid,
//! and groups or ungroups elements with explicit coordinate-frame changes.
//! Rendering and persistence sit downstream: they read the element snapshot
//! and the [`session::Action`]s this crate emits.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | Top-level [`session::EditorSession`] and its input handlers |
//! | [`element`] | Element sum type, ids, and the wire record |
//! | [`plan`] | Floors, the `FloorPlan` aggregate, and load-time validation |
//! | [`floors`] | Floor switching, creation, renaming and deletion |
//! | [`geometry`] | Points, rectangles, bounds and angle math |
//! | [`grid`] | Grid snapping |
//! | [`viewport`] | Pan/zoom and screen/scene conversions |
//! | [`factory`] | Construction of new elements from a tool and an anchor |
//! | [`selection`] | Single, additive and marquee selection |
//! | [`transform`] | Move/resize/rotate commits |
//! | [`grouping`] | Group, ungroup and group-aware deletion |
//! | [`hit`] | Hit-testing under the pointer |
//! | [`input`] | Tools, modifiers and the gesture state machine |
//! | [`store`] | Plan persistence collaborator |
//! | [`config`] | Editor tunables and environment overrides |
//! | [`consts`] | Reference numeric constants |
//! | [`error`] | Editing precondition errors |

pub mod config;
pub mod consts;
pub mod element;
pub mod error;
pub mod factory;
pub mod floors;
pub mod geometry;
pub mod grid;
pub mod grouping;
pub mod hit;
pub mod input;
pub mod plan;
pub mod selection;
pub mod session;
pub mod store;
pub mod transform;
pub mod viewport;
