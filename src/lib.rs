//! Normal-inverse-gamma prior for Gaussians with unknown mean and variance.
//!
//! The crate is built around [`NormalInvGamma`](crate::dist::NormalInvGamma),
//! which provides:
//!
//! - the joint density over `(x, σ²)`,
//! - an i.i.d. sampler, one draw at a time or as a batch,
//! - the closed-form conjugate posterior update,
//! - Monte Carlo percentile intervals from a batch of draws, and closed-form
//!   marginals to check them against.
//!
//! # Example
//!
//! ```
//! use nig::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(0xABCD);
//! let prior = NormalInvGamma::new(0.0, 0.054, 1.12, 0.4).unwrap();
//!
//! // Draw (x, σ²) pairs and estimate the 95% interval of each component
//! let samples = prior.sample_batch(10_000, &mut rng).unwrap();
//! let interval = samples.interval(0.95).unwrap();
//! assert!(interval.sigma2.0 > 0.0);
//!
//! // Update on some data
//! let post = prior.posterior_from_data(&[1.0, 2.0, 3.0, 4.0]).unwrap();
//! assert!((post.v() - 4.054).abs() < 1e-12);
//! assert!((post.a() - 3.12).abs() < 1e-12);
//! ```
#![warn(
    clippy::all,
    clippy::imprecise_flops,
    clippy::suboptimal_flops,
    clippy::unseparated_literal_suffix,
    clippy::unreadable_literal,
    clippy::option_option,
    clippy::implicit_clone
)]

#[cfg(feature = "serde1")]
extern crate serde;

// Test the README
use doc_comment::doctest;
doctest!("../README.md");

mod macros;

pub mod consts;
pub mod data;
pub mod dist;
pub mod misc;
pub mod prelude;
pub mod traits;
