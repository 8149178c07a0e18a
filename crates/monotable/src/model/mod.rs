//! Runtime entity metadata.
//!
//! Types in `model` are constructed once during transformer setup (via the
//! builder-style constructors) and are immutable thereafter. The transformer
//! treats them as the single source of truth for key derivation, expression
//! compilation, and uniqueness expansion.

pub mod attribute;
pub mod autogen;
pub mod entity;
pub mod index;
