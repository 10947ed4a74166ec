#![doc = "Choromap public API"]
pub mod cli;
pub mod commands;
mod education;
mod error;
mod fetch;
mod map;
mod scale;
mod svg;
mod topo;

#[doc(inline)]
pub use education::{AttainmentIndex, AttainmentRecord};

#[doc(inline)]
pub use error::{ChoroplethError, Result};

#[doc(inline)]
pub use map::{ChoroplethMap, CountyShape, DEFAULT_DESCRIPTION, DEFAULT_TITLE};

#[doc(inline)]
pub use scale::{greens, legend_ticks, QuantizeScale};

#[doc(inline)]
pub use topo::{TopoFeature, TopoGeometry, Topology, Transform};
