/// Router Module Index
///
/// Splits the gatekeeper's HTTP surface by access rule. The split is applied
/// with Axum layers at the module level, so a route cannot end up on the wrong
/// side of the gatekeeper by accident.

/// The gatekeeper's own endpoints under `/_gate/`. Never gated.
pub mod gate;

/// Every other path: gatekeeper middleware in front of the frontend proxy.
pub mod gated;
