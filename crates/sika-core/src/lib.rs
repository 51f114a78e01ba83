/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the sika codec crates
//!
//! This crate provides the small set of types every crate in the
//! `sika` family agrees on
//!
//! - Colorspace information for raster images
//! - Bit depth information, which drives level shifting and clamping
//! - A logging facade that compiles away when the `log` feature is absent
//!
//! This library is `#[no_std]` with `alloc`.
//!
//! # Features
//!  - `std`: Enables `std` facilities.
//!  - `log`: Forwards the logging macros to the `log` crate instead of
//!     the built-in no-op shim.
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

#[cfg(not(feature = "log"))]
pub mod log;

#[cfg(feature = "log")]
pub use log;

pub mod bit_depth;
pub mod colorspace;
