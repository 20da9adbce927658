//! Platform abstraction layer for clock access and memory locking.
//!
//! This module provides a platform abstraction that allows switching between
//! real time sources (system calls and the `cpu_time` package) and fake
//! implementations for testing purposes.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Platform;
pub(crate) use facade::PlatformFacade;
#[cfg(test)]
pub(crate) use fake::FakePlatform;
