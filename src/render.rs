/// CPU raster surface (`vello_cpu`).
pub mod cpu;
/// Draw-call recording surface.
pub mod record;
/// Drawing surface contract.
pub mod surface;
/// Title text shaping.
pub mod text;
