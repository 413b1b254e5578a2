//! Data layer: core types and dump-file loading.
//!
//! ```text
//!  whitespace-triple text dump
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse lines → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset  │  name + Vec<Sample>
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
