pub mod trail;
pub mod gravsim_vis2d;
