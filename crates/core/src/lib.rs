//! Volume Discount Core - Shared types library.
//!
//! This crate provides the types shared by the checkout function and the
//! admin tooling:
//! - `function` - The checkout discount function
//! - `cli` - Local runner and admin utilities
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients. Remote metaobject access is abstracted behind
//! [`metaobject::DefinitionSource`].
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for Shopify IDs, prices, discount values and statuses
//! - [`tier`] - Quantity tiers and their validation
//! - [`configuration`] - The configuration stored on the discount node
//! - [`promotion`] - The promotion record persisted as a metaobject
//! - [`metaobject`] - Metaobject definitions and the definition cache
//! - [`preview`] - Per-tier price preview

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod configuration;
pub mod metaobject;
pub mod preview;
pub mod promotion;
pub mod tier;
pub mod types;

pub use configuration::DiscountConfiguration;
pub use promotion::{PromotionError, VolumeDiscount};
pub use tier::{Tier, TierError};
pub use types::*;
