//! Terminal plotting of the swept response curves.

pub mod ascii;

pub use ascii::*;
