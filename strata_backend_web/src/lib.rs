// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for strata.
//!
//! [`DomPresenter`] mirrors a [`NodeTree`](strata_core::node::NodeTree) into
//! the DOM: vector layers become `<svg>` surfaces, markup layers and group
//! containers become positioned `<div>`s.

#![no_std]

extern crate alloc;

mod presenter;

pub use presenter::{DomPresenter, SVG_NS};
pub use strata_core::backend::Presenter;
