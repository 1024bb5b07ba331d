//! Webtx Test Kit
//!
//! Test infrastructure for synthetic transaction checks.
//!
//! This crate provides:
//! - [`MockOrigin`]: a real axum server on an ephemeral local port with a
//!   request counter, so transport and redirect accounting are exercised
//!   end to end
//! - Canned routers for the common probe shapes (healthy endpoint, fixed
//!   status, redirect chains, a self-redirect loop, form echo)
//!
//! # Example
//!
//! ```rust
//! use webtx_testkit::{healthy_origin, MockOrigin};
//!
//! # async fn example() {
//! let origin = MockOrigin::serve(healthy_origin()).await;
//! let url = origin.url("/health");
//! // probe `url`, then assert on origin.request_count()
//! # }
//! ```

pub mod origin;
pub mod routes;

pub use origin::MockOrigin;
pub use routes::{
    absolute_redirect, fixed_status, form_echo, healthy_origin, redirect_chain, redirect_loop,
};
