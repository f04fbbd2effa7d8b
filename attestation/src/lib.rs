//! Attestations — signed snapshots of the reserve/supply relationship.
//!
//! An [`Attestation`] binds an [`AttestationSnapshot`] to an Ed25519
//! signature and the signer's public key. Trust comes only from signature
//! verification plus a caller-chosen staleness threshold; the identity of
//! the process that produced it does not matter.
//!
//! Signing covers a deterministic byte encoding of the snapshot (fixed field
//! order, integers as decimal strings), so verification re-encodes and checks
//! byte-for-byte.
//!
//! Verification functions return `bool` and never panic, so they can filter
//! untrusted input. [`require_fresh_attestation`] is the asserting form.
//!
//! [`AttestationEnvelope`] is the compact JSON artifact handed to dashboards
//! and governance tooling.

pub mod attestation;
pub mod envelope;
pub mod error;
pub mod snapshot;

mod decimal;

pub use attestation::{
    is_attestation_stale, most_recent_valid_attestation, require_fresh_attestation,
    verify_attestation, verify_signed_bytes, Attestation, AttestationWriter,
};
pub use envelope::{
    is_envelope_stale, verify_envelope, AttestationEnvelope, EnvelopePayload, ENVELOPE_ALG,
    ENVELOPE_VERSION,
};
pub use error::AttestationError;
pub use snapshot::AttestationSnapshot;
