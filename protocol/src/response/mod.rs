//! # Response Module
//!
//! The inbound path: the fields the gateway posts back to `MerRespURL`.
//!
//! ```text
//! codes.rs        - ResponseCode table and Outcome
//! interpreter.rs  - GatewayResponse, NormalizedResult, interpret_response
//! ```
//!
//! Interpretation checks shape only.
//! [`NormalizedResult::verify_signature`] binds a callback to the order and
//! amount it claims to answer. The signature does not cover the response
//! code, so a `Valid` result is not proof that the payment succeeded.

pub mod codes;
pub mod interpreter;

pub use codes::{classify, Outcome};
pub use interpreter::{interpret_response, GatewayResponse, NormalizedResult};
