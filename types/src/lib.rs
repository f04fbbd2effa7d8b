//! Fundamental types for the BLOOM peg core.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! token and satoshi amounts, millisecond timestamps, proof hashes, and Ed25519
//! key material.

pub mod amount;
pub mod hash;
pub mod keys;
pub mod time;

mod hex;

pub use amount::{BloomAmount, SatAmount};
pub use hash::ProofHash;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use time::Timestamp;
