//! End to end tests for the SDL pipeline.
//!
//! Fixtures live in `test_data/sdl/`. Tests either compile a fixture through
//! the `sdl` crate or drive the `sdl-analyzer` passes on in-memory sources.

#[cfg(test)]
mod utils;

#[cfg(test)]
mod analysis;
#[cfg(test)]
mod pipeline;
#[cfg(test)]
mod properties;
#[cfg(test)]
mod scenarios;
