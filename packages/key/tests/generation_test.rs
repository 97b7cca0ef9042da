//! Key generation and self-verification tests

use jwkgen_key::{
    Algorithm, EcCurve, EncryptionAlgorithm, EntropySource, KeyError, KeyGenerator, KeySize,
    KeySpec, KeyUse, PrivateKey, PublicKey, SignatureAlgorithm,
};

fn seeded(seed: u8) -> EntropySource {
    EntropySource::from_seed([seed; 32])
}

#[test]
fn test_ec_signature_keys_use_expected_curves() {
    let mut entropy = seeded(1);
    let mut generator = KeyGenerator::new(&mut entropy);

    for (alg, curve) in [
        (SignatureAlgorithm::ES256, EcCurve::P256),
        (SignatureAlgorithm::ES384, EcCurve::P384),
        (SignatureAlgorithm::ES512, EcCurve::P521),
    ] {
        let pair = generator
            .generate_for_signature(alg, KeySize::Default)
            .expect("EC generation should succeed");
        assert_eq!(pair.spec(), KeySpec::Ec(curve));
        assert_eq!(pair.algorithm(), Algorithm::Signature(alg));
        match (pair.private_key(), pair.public_key()) {
            (PrivateKey::Ec(private), PublicKey::Ec(public)) => {
                assert_eq!(private.curve(), curve);
                assert_eq!(public.curve(), curve);
                assert_eq!(private.scalar_bytes().len(), curve.field_size());
                let (x, y) = public.coordinates();
                assert_eq!(x.len(), curve.field_size());
                assert_eq!(y.len(), curve.field_size());
            }
            other => panic!("expected EC pair, got {other:?}"),
        }
        pair.verify().expect("pair should re-verify");
    }
}

#[test]
fn test_ecdh_keys_follow_requested_size() {
    let mut entropy = seeded(2);
    let mut generator = KeyGenerator::new(&mut entropy);

    for (bits, curve) in [(0, EcCurve::P256), (384, EcCurve::P384), (521, EcCurve::P521)] {
        let pair = generator
            .generate_for_encryption(EncryptionAlgorithm::EcdhEsA128Kw, KeySize::from(bits))
            .expect("ECDH generation should succeed");
        assert_eq!(pair.spec(), KeySpec::Ec(curve));
    }
}

#[test]
fn test_ed25519_key_pair() {
    let mut entropy = seeded(3);
    let pair = KeyGenerator::new(&mut entropy)
        .generate(KeyUse::Signature, "EdDSA", KeySize::Bits(256))
        .expect("Ed25519 generation should succeed");

    assert_eq!(pair.spec(), KeySpec::Ed25519);
    let public = pair.public_key().to_bytes().unwrap();
    assert_eq!(public.len(), 32);
    match pair.private_key() {
        PrivateKey::Ed25519(key) => assert_eq!(key.verifying_key().to_bytes().to_vec(), public),
        other => panic!("expected Ed25519 key, got {other:?}"),
    }
}

#[test]
fn test_rsa_default_modulus() {
    let mut entropy = seeded(4);
    let pair = KeyGenerator::new(&mut entropy)
        .generate(KeyUse::Encryption, "RSA-OAEP-256", KeySize::Default)
        .expect("RSA generation should succeed");

    assert_eq!(pair.spec(), KeySpec::Rsa { bits: 2048 });
    let public = pair.public_key().rsa_parts().unwrap().expect("RSA public parts");
    assert_eq!(public.modulus_bits(), 2048);
    assert_eq!(public.e, vec![0x01, 0x00, 0x01]);

    let private = pair.private_key().rsa_parts().unwrap().expect("RSA private parts");
    assert_eq!(private.public, public);
    assert!(private.p.len() <= 128 && private.q.len() <= 128);
}

#[test]
fn test_rejections_happen_before_generation() {
    let mut entropy = seeded(5);
    let mut generator = KeyGenerator::new(&mut entropy);

    assert!(matches!(
        generator.generate(KeyUse::Signature, "RSA-OAEP", KeySize::Default),
        Err(KeyError::UnknownAlgorithm { .. })
    ));
    assert!(matches!(
        generator.generate(KeyUse::Signature, "RS256", KeySize::Bits(1024)),
        Err(KeyError::KeyTooShort { .. })
    ));
    assert!(matches!(
        generator.generate(KeyUse::Signature, "ES256", KeySize::Bits(384)),
        Err(KeyError::UnsupportedKeySize { .. })
    ));
    assert!(matches!(
        generator.generate(KeyUse::Encryption, "ECDH-ES", KeySize::Bits(192)),
        Err(KeyError::UnsupportedCurveSize { .. })
    ));
}

#[test]
fn test_explicit_zero_bits_generates_default_key() {
    let mut entropy = seeded(6);
    let mut generator = KeyGenerator::new(&mut entropy);

    for (key_use, alg, expected) in [
        (KeyUse::Signature, "ES256", KeySpec::Ec(EcCurve::P256)),
        (KeyUse::Signature, "EdDSA", KeySpec::Ed25519),
        (KeyUse::Encryption, "ECDH-ES", KeySpec::Ec(EcCurve::P256)),
    ] {
        let pair = generator
            .generate(key_use, alg, KeySize::Bits(0))
            .expect("zero bits selects the default size");
        assert_eq!(pair.spec(), expected, "{alg}");
    }
}

#[test]
fn test_successive_pairs_differ() {
    let mut entropy = EntropySource::from_os().expect("OS entropy");
    let mut generator = KeyGenerator::new(&mut entropy);

    let first = generator
        .generate_for_signature(SignatureAlgorithm::ES256, KeySize::Default)
        .unwrap();
    let second = generator
        .generate_for_signature(SignatureAlgorithm::ES256, KeySize::Default)
        .unwrap();
    assert_ne!(first.public_key(), second.public_key());
}

#[test]
fn test_same_seed_reproduces_key() {
    let first = KeyGenerator::new(&mut seeded(9))
        .generate_for_signature(SignatureAlgorithm::EdDSA, KeySize::Default)
        .unwrap();
    let second = KeyGenerator::new(&mut seeded(9))
        .generate_for_signature(SignatureAlgorithm::EdDSA, KeySize::Default)
        .unwrap();
    assert_eq!(first.public_key(), second.public_key());
}
