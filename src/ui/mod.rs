//! UI layer: side/top panels and the central plot views.

pub mod panels;
pub mod plot;
