// Shared helpers: input validation, repeated/windowed evaluation and sample I/O.

pub mod harness;
pub mod io;
pub mod validation;
pub mod windows;
