//! Library side of the `tabrep` binary: logging setup and console rendering.

pub mod console;
pub mod logging;
