pub mod reconcile;
pub mod shift_assignment;
