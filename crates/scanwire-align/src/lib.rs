//! Rigid alignment of a flange profile onto a tread profile.
//!
//! Both lasers of a wheel-profile rig see the same rail from different
//! mounts. [`align`] runs iterative closest point: each iteration pairs every
//! flange point with its nearest tread point, solves the closed-form 2D rigid
//! transform for those pairs ([`point_based_matching`]) and applies it to the
//! flange, until the step becomes negligible.

pub mod icp;
pub mod matching;

pub use icp::{align, AlignConfig, Alignment, StopReason};
pub use matching::{nearest, point_based_matching, RigidTransform};
