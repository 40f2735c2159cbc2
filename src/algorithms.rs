pub mod boolean_operations;
pub mod layers;

#[doc(inline)]
pub use boolean_operations::{intersection, BooleanOperation};

#[doc(inline)]
pub use layers::{
  intersect_all_pairs, intersect_layers, intersect_pair, layer_pairs, translate_layer,
};
