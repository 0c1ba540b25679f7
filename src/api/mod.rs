/// Remote service API module
///
/// The disease-detection model lives behind an HTTP endpoint; this module
/// only carries images over and interprets what comes back (predict.rs).

pub mod predict;
