//! Cryptographic primitives for the BLOOM peg core.
//!
//! - **Ed25519** for attestation signing and signature verification
//! - **Blake2b-256** for deterministic identifiers (simulated settlement ids)
//!
//! Key custody and rotation live outside this crate; only the
//! `sign(bytes, key)` / `verify(bytes, signature, pubkey)` contract is offered.

pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;

pub use error::CryptoError;
pub use hash::{blake2b_256, blake2b_256_multi};
pub use keys::{generate_keypair, keypair_from_hex_seed, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
