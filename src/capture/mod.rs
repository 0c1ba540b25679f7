/// Device camera capture module
///
/// This module handles:
/// - The camera device abstraction (types.rs)
/// - Live camera sessions with guaranteed release (session.rs)
/// - The native backend (device.rs)

pub mod device;
pub mod session;
pub mod types;
