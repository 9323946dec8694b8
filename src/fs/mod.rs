//! Filesystem utilities for taskroute.
//!
//! Background task state is rewritten on every hook invocation, so it is
//! always replaced atomically.

pub mod atomic;

pub use atomic::atomic_write_file;
