//! chromath-core: the numeric heart of chromath.
//!
//! Generates an ordered sequence of semiprimes and a grid of digit-sum
//! "kernel" values, reshapes either with one of four parameterised
//! transforms, and persists the generated datasets between runs.
//!
//! # Modules
//!
//! - [`generator`]: primes, semiprimes, the kernel, the kernel grid
//! - [`grid`]: dense 2D grid with a coordinate origin
//! - [`transform`]: MOD, DIV, GRID_MOD, LINEAR_MOD10
//! - [`params`]: parsing user-supplied numbers and ranges
//! - [`config`]: `chromath.toml`
//! - [`store`]: JSON documents on disk
//! - [`error`]: error types
//!
//! Generation and transforms are pure functions: no shared state, no I/O.
//! Only [`store`] and [`config`] touch the filesystem.

pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod params;
pub mod store;
pub mod transform;

pub use config::{ColorChoice, Config};
pub use error::{ConfigError, ParamError, ParamErrorKind, StoreError, TransformError};
pub use generator::{
    generate_kernel_grid, generate_semiprimes, is_prime, is_semiprime, kernel, Pairing,
    SemiprimeOptions,
};
pub use grid::{CoordRange, Grid};
pub use store::Store;
pub use transform::{Dataset, Transform, TransformKind};
