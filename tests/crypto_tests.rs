//! Integration tests for the CredVault crypto module.

use credvault::crypto::{
    decrypt, encrypt, generate_key_material, generate_salt, open, seal, DerivedKey,
};
use credvault::errors::CredVaultError;
use credvault::vault::SecretValue;

// ---------------------------------------------------------------------------
// Password-based encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let salt = generate_salt(8).unwrap();
    let material = generate_key_material(256).unwrap();
    let plaintext = b"correct horse battery staple";

    let ciphertext = encrypt(plaintext, &salt, &material).expect("encrypt should succeed");

    // Ciphertext must be longer than plaintext (12-byte nonce + 16-byte tag).
    assert!(ciphertext.len() > plaintext.len());

    let recovered = decrypt(&ciphertext, &salt, &material).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn decrypt_with_wrong_key_material_is_none() {
    let salt = generate_salt(8).unwrap();
    let ciphertext = encrypt(b"secret", &salt, "material-one").unwrap();

    assert!(decrypt(&ciphertext, &salt, "material-two").is_none());
}

#[test]
fn decrypt_with_wrong_salt_is_none() {
    let ciphertext = encrypt(b"secret", b"saltsalt", "material").unwrap();

    assert!(decrypt(&ciphertext, b"pepperrr", "material").is_none());
}

#[test]
fn decrypt_truncated_or_tampered_data_is_none() {
    let salt = generate_salt(8).unwrap();
    let mut ciphertext = encrypt(b"secret", &salt, "material").unwrap();

    assert!(decrypt(&ciphertext[..5], &salt, "material").is_none());
    assert!(decrypt(&ciphertext[..ciphertext.len() - 1], &salt, "material").is_none());

    let last = ciphertext.len() - 1;
    ciphertext[last] ^= 0x01;
    assert!(decrypt(&ciphertext, &salt, "material").is_none());
}

#[test]
fn seal_open_with_derived_key() {
    let key = DerivedKey::derive(b"process-wide", b"fixedsal");
    let sealed = seal(&key, b"payload").unwrap();

    assert_eq!(open(&key, &sealed).unwrap(), b"payload");

    let other = DerivedKey::derive(b"process-wide", b"othersal");
    assert!(open(&other, &sealed).is_none());
}

#[test]
fn salt_and_key_material_are_fresh() {
    assert_ne!(generate_salt(16).unwrap(), generate_salt(16).unwrap());
    assert_ne!(
        generate_key_material(256).unwrap(),
        generate_key_material(256).unwrap()
    );
}

#[test]
fn invalid_sizes_are_invalid_parameters() {
    assert!(matches!(
        generate_salt(0),
        Err(CredVaultError::InvalidParameter(_))
    ));
    assert!(matches!(
        generate_key_material(100),
        Err(CredVaultError::InvalidParameter(_))
    ));
}

// ---------------------------------------------------------------------------
// SecretValue
// ---------------------------------------------------------------------------

#[test]
fn secret_value_reveals_its_plaintext() {
    let value = SecretValue::create("p@ss").unwrap();
    assert_eq!(value.reveal().unwrap().as_str(), "p@ss");
}

#[test]
fn secret_value_keeps_surrounding_whitespace() {
    let value = SecretValue::create("  spaced pass  ").unwrap();
    assert_eq!(value.reveal().unwrap().as_str(), "  spaced pass  ");
}

#[test]
fn same_plaintext_twice_gives_different_ciphertext() {
    let a = SecretValue::create("same").unwrap();
    let b = SecretValue::create("same").unwrap();

    assert_ne!(a.ciphertext(), b.ciphertext());
    assert_ne!(a.salt(), b.salt());
    assert_ne!(a, b);
}

#[test]
fn blank_secret_is_rejected() {
    for blank in ["", "   ", "\t\n"] {
        assert!(matches!(
            SecretValue::create(blank),
            Err(CredVaultError::InvalidParameter(_))
        ));
    }
}

#[test]
fn secret_value_never_displays_plaintext() {
    let value = SecretValue::create("hunter2").unwrap();
    assert_eq!(value.to_string(), "********");
    assert_eq!(format!("{value:?}"), "********");
}

#[test]
fn corrupted_key_material_fails_to_reveal() {
    let value = SecretValue::create("p@ss").unwrap();

    let mut json = serde_json::to_value(&value).unwrap();
    json["derivation_key"] = serde_json::Value::String("tampered".into());
    let corrupted: SecretValue = serde_json::from_value(json).unwrap();

    assert!(matches!(
        corrupted.reveal(),
        Err(CredVaultError::DecryptionFailed)
    ));
}

#[test]
fn secret_value_survives_json_roundtrip() {
    let value = SecretValue::create("p@ss").unwrap();
    let json = serde_json::to_string(&value).unwrap();
    let back: SecretValue = serde_json::from_str(&json).unwrap();

    assert_eq!(back, value);
    assert_eq!(back.reveal().unwrap().as_str(), "p@ss");
}
