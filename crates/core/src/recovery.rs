use alloy_primitives::{keccak256, uint, Address, B256, U256};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, Secp256k1};
use std::sync::OnceLock;

use crate::error::{SignatureError, ValidatorError, ValidatorResult};
use crate::policy::{RecoveredSigners, SignerRole};
use crate::split::{DualSignature, SignatureParts};

/// Half of the secp256k1 group order. Signatures with a larger `s` are rejected.
pub const SECP256K1N_HALF: U256 =
    uint!(0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256);

/// Recover the address that produced `signature` over `digest`.
///
/// The digest is used as-is; no message prefix is applied.
pub fn recover_signer(digest: B256, signature: &SignatureParts) -> Result<Address, SignatureError> {
    let s = signature.s_value();
    if s > SECP256K1N_HALF {
        return Err(SignatureError::HighS(s));
    }

    let recid = match signature.v {
        27 => 0,
        28 => 1,
        v => return Err(SignatureError::InvalidV(v)),
    };
    let recid = RecoveryId::from_i32(recid).map_err(|_| SignatureError::RecoveryFailed)?;

    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(signature.r.as_slice());
    compact[32..].copy_from_slice(signature.s.as_slice());
    let recoverable = RecoverableSignature::from_compact(&compact, recid)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    let msg = Message::from_digest(digest.0);
    let pubkey = secp()
        .recover_ecdsa(&msg, &recoverable)
        .map_err(|_| SignatureError::RecoveryFailed)?;
    let uncompressed = pubkey.serialize_uncompressed();
    let pubkey_payload = uncompressed.get(1..).ok_or(SignatureError::RecoveryFailed)?;
    let hash = keccak256(pubkey_payload);
    let address_bytes = hash
        .as_slice()
        .get(12..)
        .ok_or(SignatureError::RecoveryFailed)?;
    let address = Address::from_slice(address_bytes);

    if address == Address::ZERO {
        return Err(SignatureError::ZeroAddress);
    }
    Ok(address)
}

/// Recover both signers of `signatures` against the same digest.
///
/// The attestor slot is recovered first; the first failure aborts.
pub fn recover_both(digest: B256, signatures: &DualSignature) -> ValidatorResult<RecoveredSigners> {
    Ok(RecoveredSigners {
        attestor: recover_role(digest, signatures, SignerRole::Attestor)?,
        user: recover_role(digest, signatures, SignerRole::User)?,
    })
}

/// Recover the signer occupying `role`'s slot.
pub fn recover_role(
    digest: B256,
    signatures: &DualSignature,
    role: SignerRole,
) -> ValidatorResult<Address> {
    recover_signer(digest, signatures.get(role))
        .map_err(|source| ValidatorError::InvalidSignature { role, source })
}

fn secp() -> &'static Secp256k1<All> {
    static SECP: OnceLock<Secp256k1<All>> = OnceLock::new();
    SECP.get_or_init(Secp256k1::new)
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::unwrap_used)]
mod tests {
    use super::*;
    use k256::ecdsa::{signature::hazmat::PrehashSigner, SigningKey, VerifyingKey};
    use rand::rngs::OsRng;

    fn sign_hash(signing_key: &SigningKey, hash: B256) -> SignatureParts {
        let (sig, recovery_id) = signing_key.sign_prehash(hash.as_ref()).expect("sign");
        SignatureParts {
            r: B256::from_slice(&sig.r().to_bytes()),
            s: B256::from_slice(&sig.s().to_bytes()),
            v: 27 + recovery_id.to_byte(),
        }
    }

    fn get_address(signing_key: &SigningKey) -> Address {
        let verifying_key = VerifyingKey::from(signing_key);
        let public_key = verifying_key.to_encoded_point(false);
        let public_key_bytes = &public_key.as_bytes()[1..];
        let hash = keccak256(public_key_bytes);
        Address::from_slice(&hash[12..])
    }

    #[test]
    fn test_recover_signer_from_valid_signature() {
        let signing_key = SigningKey::random(&mut OsRng);
        let digest = keccak256(b"dual-signature-recovery-test");
        let signature = sign_hash(&signing_key, digest);

        let recovered = recover_signer(digest, &signature).expect("recover");
        assert_eq!(recovered, get_address(&signing_key));
    }

    #[test]
    fn test_recover_rejects_high_s() {
        let signing_key = SigningKey::random(&mut OsRng);
        let digest = keccak256(b"high-s");
        let mut signature = sign_hash(&signing_key, digest);

        // n - s flips to the upper half of the order.
        let n = SECP256K1N_HALF * U256::from(2) + U256::from(1);
        let high_s = n - signature.s_value();
        signature.s = B256::from(high_s.to_be_bytes::<32>());

        let err = recover_signer(digest, &signature).unwrap_err();
        assert_eq!(err, SignatureError::HighS(high_s));
    }

    #[test]
    fn test_recover_rejects_invalid_v() {
        let signing_key = SigningKey::random(&mut OsRng);
        let digest = keccak256(b"invalid-v");
        let mut signature = sign_hash(&signing_key, digest);

        for v in [0u8, 1, 26, 29, 255] {
            signature.v = v;
            assert_eq!(
                recover_signer(digest, &signature).unwrap_err(),
                SignatureError::InvalidV(v)
            );
        }
    }

    #[test]
    fn test_recover_rejects_zeroed_signature() {
        let signature = SignatureParts {
            r: B256::ZERO,
            s: B256::ZERO,
            v: 27,
        };
        let err = recover_signer(keccak256(b"zero"), &signature).unwrap_err();
        assert_eq!(err, SignatureError::RecoveryFailed);
    }

    #[test]
    fn test_recover_detects_flipped_recovery_byte() {
        let signing_key = SigningKey::random(&mut OsRng);
        let digest = keccak256(b"forged-recovery-byte");
        let valid = sign_hash(&signing_key, digest);
        let forged = SignatureParts {
            v: if valid.v == 27 { 28 } else { 27 },
            ..valid
        };

        let recovered_valid = recover_signer(digest, &valid).expect("recover valid");
        match recover_signer(digest, &forged) {
            Ok(recovered_forged) => assert_ne!(recovered_valid, recovered_forged),
            Err(err) => assert_eq!(err, SignatureError::RecoveryFailed),
        }
    }

    #[test]
    fn test_recover_both_reports_failing_role() {
        let attestor = SigningKey::random(&mut OsRng);
        let digest = keccak256(b"role-tagged-error");
        let good = sign_hash(&attestor, digest);
        let bad = SignatureParts { v: 0, ..good };

        let err = recover_both(digest, &DualSignature::from_parts(good, bad)).unwrap_err();
        assert_eq!(
            err,
            ValidatorError::InvalidSignature {
                role: SignerRole::User,
                source: SignatureError::InvalidV(0),
            }
        );

        let err = recover_both(digest, &DualSignature::from_parts(bad, good)).unwrap_err();
        assert!(matches!(
            err,
            ValidatorError::InvalidSignature {
                role: SignerRole::Attestor,
                ..
            }
        ));
    }
}
