//! Terminal display surface for specviz
//!
//! One widget: a bar-per-bin spectrum view rendered with partial block
//! characters, colored per bin by the visualization mapper.

mod widget;

pub use widget::SpectrumWidget;
