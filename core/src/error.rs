use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("supply error: {0}")]
    Supply(#[from] bloom_supply::SupplyError),

    #[error("reserve error: {0}")]
    Reserve(#[from] bloom_reserve::ReserveError),

    #[error("mint guard: {0}")]
    Guard(#[from] bloom_guard::GuardError),

    #[error("redemption error: {0}")]
    Redemption(#[from] bloom_redemption::RedemptionError),

    #[error("attestation error: {0}")]
    Attestation(#[from] bloom_attestation::AttestationError),

    #[error("peg arithmetic: {0}")]
    Peg(#[from] bloom_peg::PegError),

    #[error("crypto error: {0}")]
    Crypto(#[from] bloom_crypto::CryptoError),

    #[error("config error: {0}")]
    Config(String),

    #[error("logging already initialised or invalid: {0}")]
    Logging(String),

    #[error("redemption engine lock poisoned")]
    LockPoisoned,
}
