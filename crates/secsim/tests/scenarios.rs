//! End-to-end attack scenarios over layered channels.
//!
//! Each test wires Alice and Bob through a layer stack and lets Mallory work
//! the bare channel underneath.

use proptest::prelude::*;

use secsim::crypto::{
    random_bytes, xor, Aes, Certificate, CertificateAuthority, ChaCha, ChaChaPoly, CryptoError,
    DigitalEnvelope, Ed25519Signer, EncryptedHashMac, Hmac, KeyedCipher, SealedBox, Sha256Digest,
    SymmetricCipher, X25519PublicKey, X25519Secret, XorDigest,
};
use secsim::link::{
    AntiReplayLayer, AuthenticationLayer, Channel, ChannelConfig, Direction, EncryptionLayer,
    FullSlot, LinkError, Transport, Verdict,
};
use secsim::Adversary;
use secsim_testkit::fixtures::{init_tracing, Cast};
use secsim_testkit::generators::payload;

const GREETING: &[u8] = b"Hello, Bob! - Alice";

fn mallory(cast: &Cast) -> Adversary {
    Adversary::new(cast.mallory.clone())
}

/// Same-length substitution of every occurrence of `from`.
fn replace(haystack: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    let mut out = haystack.to_vec();
    let mut i = 0;
    while i + from.len() <= out.len() {
        if &out[i..i + from.len()] == from {
            out[i..i + from.len()].copy_from_slice(to);
            i += from.len();
        } else {
            i += 1;
        }
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Integrity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn truncated_frame_is_flagged_and_still_delivered() {
    init_tracing();
    let cast = Cast::new();
    let (cipher, mac) = (ChaCha::generate(), Hmac::generate());

    let alice_auth = AuthenticationLayer::new(&cast.channel, &mac);
    let alice_stack = EncryptionLayer::new(&alice_auth, &cipher);
    let bob_auth = AuthenticationLayer::new(&cast.channel, &mac);
    let bob_stack = EncryptionLayer::new(&bob_auth, &cipher);

    cast.alice.send(&alice_stack, GREETING).unwrap();
    mallory(&cast)
        .tamper(&cast.channel, |frame| frame[8..].to_vec())
        .unwrap();
    let received = cast.bob.receive(&bob_stack).unwrap();

    assert_eq!(bob_auth.last_verdict(), Some(Verdict::Rejected));
    assert_eq!(bob_auth.rejected_count(), 1);
    // iv(12) || ciphertext(19) lost 8 bytes: 11 bytes of garbage reach Bob.
    assert_eq!(received.len(), GREETING.len() - 8);
    assert_ne!(received, GREETING);
}

#[test]
fn truncated_cbc_frame_fails_decryption_after_integrity_flag() {
    let cast = Cast::new();
    let (cipher, mac) = (Aes::generate(), Hmac::generate());

    let auth = AuthenticationLayer::new(&cast.channel, &mac);
    let stack = EncryptionLayer::new(&auth, &cipher);

    cast.alice.send(&stack, GREETING).unwrap();
    mallory(&cast)
        .tamper(&cast.channel, |frame| frame[8..].to_vec())
        .unwrap();

    assert!(matches!(
        cast.bob.receive(&stack),
        Err(LinkError::Crypto(CryptoError::Decryption(_)))
    ));
    assert_eq!(auth.last_verdict(), Some(Verdict::Rejected));
}

#[test]
fn plaintext_tampering_goes_unnoticed() {
    let cast = Cast::new();

    cast.alice.send(&cast.channel, b"pay Bob 10 coins").unwrap();
    mallory(&cast)
        .tamper(&cast.channel, |m| replace(m, b"Bob", b"Eve"))
        .unwrap();

    assert_eq!(cast.bob.receive(&cast.channel).unwrap(), b"pay Eve 10 coins");
}

#[test]
fn hmac_flags_plaintext_tampering() {
    let cast = Cast::new();
    let auth = AuthenticationLayer::new(&cast.channel, Hmac::generate());

    cast.alice.send(&auth, b"pay Bob 10 coins").unwrap();
    mallory(&cast)
        .tamper(&cast.channel, |m| replace(m, b"Bob", b"Eve"))
        .unwrap();

    assert_eq!(cast.bob.receive(&auth).unwrap(), b"pay Eve 10 coins");
    assert_eq!(auth.last_verdict(), Some(Verdict::Rejected));
}

#[test]
fn stream_cipher_bit_flip_is_silent_but_aead_is_not() {
    let cast = Cast::new();
    let flip = |frame: &[u8]| {
        let mut forged = frame.to_vec();
        // iv(12) || "pay 10 coins": flip '1' into '9'.
        forged[12 + 4] ^= b'1' ^ b'9';
        forged
    };

    let stream = EncryptionLayer::new(&cast.channel, ChaCha::generate());
    cast.alice.send(&stream, b"pay 10 coins").unwrap();
    mallory(&cast).tamper(&cast.channel, flip).unwrap();
    assert_eq!(cast.bob.receive(&stream).unwrap(), b"pay 90 coins");

    let aead = EncryptionLayer::new(&cast.channel, ChaChaPoly::generate());
    cast.alice.send(&aead, b"pay 10 coins").unwrap();
    mallory(&cast).tamper(&cast.channel, flip).unwrap();
    assert!(matches!(
        cast.bob.receive(&aead),
        Err(LinkError::Crypto(CryptoError::Decryption(_)))
    ));
}

#[test]
fn cbc_padding_tamper_is_a_decryption_error() {
    let cast = Cast::new();
    let stack = EncryptionLayer::new(&cast.channel, Aes::generate());

    // 19 bytes pad to two blocks ending in 0x0d; flipping the previous
    // ciphertext block's last byte turns the pad byte into 0xf2.
    cast.alice.send(&stack, GREETING).unwrap();
    mallory(&cast)
        .tamper(&cast.channel, |frame| {
            let mut forged = frame.to_vec();
            forged[16 + 15] ^= 0xff;
            forged
        })
        .unwrap();

    assert!(matches!(
        cast.bob.receive(&stack),
        Err(LinkError::Crypto(CryptoError::Decryption(_)))
    ));
}

#[test]
fn xor_digest_forgery_survives_encryption_of_the_digest() {
    let cast = Cast::new();
    let key = Aes::generate();
    // Shift "Bob" to "Eve" in block one and cancel the change in block two.
    let forge = |frame: &[u8]| {
        let delta = xor(b"pay Bob ", b"pay Eve ");
        let mut forged = frame.to_vec();
        for (i, d) in delta.iter().enumerate() {
            forged[i] ^= d;
            forged[8 + i] ^= d;
        }
        forged
    };

    let weak = AuthenticationLayer::new(&cast.channel, EncryptedHashMac::new(XorDigest::default(), &key));
    cast.alice.send(&weak, b"pay Bob 100 EUR.").unwrap();
    mallory(&cast).tamper(&cast.channel, forge).unwrap();
    let received = cast.bob.receive(&weak).unwrap();
    assert_eq!(&received[..8], b"pay Eve ");
    assert_eq!(weak.last_verdict(), Some(Verdict::Accepted));

    let strong = AuthenticationLayer::new(&cast.channel, EncryptedHashMac::new(Sha256Digest, &key));
    cast.alice.send(&strong, b"pay Bob 100 EUR.").unwrap();
    mallory(&cast).tamper(&cast.channel, forge).unwrap();
    cast.bob.receive(&strong).unwrap();
    assert_eq!(strong.last_verdict(), Some(Verdict::Rejected));
}

// ─────────────────────────────────────────────────────────────────────────────
// Replay
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn mac_alone_accepts_replays() {
    let cast = Cast::new();
    let mallory = mallory(&cast);
    let auth = AuthenticationLayer::new(&cast.channel, Hmac::generate());

    cast.alice.send(&auth, b"transfer 100 coins to Mallory").unwrap();
    let captured = mallory.eavesdrop(&cast.channel).unwrap();
    cast.bob.receive(&auth).unwrap();

    mallory.inject(&cast.channel, &captured).unwrap();
    cast.bob.receive(&auth).unwrap();
    assert_eq!(auth.last_verdict(), Some(Verdict::Accepted));
}

#[test]
fn anti_replay_flags_replayed_frame() {
    let cast = Cast::new();
    let mallory = mallory(&cast);
    let mac = Hmac::generate();

    let alice_auth = AuthenticationLayer::new(&cast.channel, &mac);
    let alice = AntiReplayLayer::new(&alice_auth);
    let bob_auth = AuthenticationLayer::new(&cast.channel, &mac);
    let bob = AntiReplayLayer::new(&bob_auth);

    cast.alice.send(&alice, b"transfer 100 coins to Mallory").unwrap();
    let captured = mallory.eavesdrop(&cast.channel).unwrap();
    cast.bob.receive(&bob).unwrap();
    assert_eq!(bob.last_verdict(), Some(Verdict::Accepted));

    mallory.inject(&cast.channel, &captured).unwrap();
    let replayed = cast.bob.receive(&bob).unwrap();

    assert_eq!(replayed, b"transfer 100 coins to Mallory");
    assert_eq!(bob.last_verdict(), Some(Verdict::Replayed { counter: 0, last: 0 }));
    assert_eq!(bob_auth.last_verdict(), Some(Verdict::Accepted));

    // Rewriting the counter gets past anti-replay but breaks the MAC.
    let mut bumped = captured.clone();
    bumped[..8].copy_from_slice(&1u64.to_be_bytes());
    mallory.inject(&cast.channel, &bumped).unwrap();
    cast.bob.receive(&bob).unwrap();

    assert_eq!(bob.last_verdict(), Some(Verdict::Accepted));
    assert_eq!(bob_auth.last_verdict(), Some(Verdict::Rejected));
}

// ─────────────────────────────────────────────────────────────────────────────
// Key Establishment
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn kdc_distributes_session_key() {
    let cast = Cast::new();
    let kdc = cast.actor("KDC");
    let (alice_kdc, bob_kdc) = (ChaChaPoly::generate(), ChaChaPoly::generate());

    cast.alice.send(&cast.channel, b"Alice,Bob").unwrap();
    assert_eq!(kdc.receive(&cast.channel).unwrap(), b"Alice,Bob");

    let session_key = random_bytes(ChaChaPoly::KEY_SIZE);

    let to_alice = EncryptionLayer::new(&cast.channel, &alice_kdc);
    kdc.send(&to_alice, &session_key).unwrap();
    let captured = mallory(&cast).eavesdrop(&cast.channel).unwrap();
    let alice_key = cast.alice.receive(&to_alice).unwrap();

    // Mallory's own key does not open the delivery.
    let (iv, sealed) = captured.split_at(ChaChaPoly::IV_SIZE);
    assert!(ChaChaPoly::generate().decrypt(sealed, iv).is_err());

    let to_bob = EncryptionLayer::new(&cast.channel, &bob_kdc);
    kdc.send(&to_bob, &session_key).unwrap();
    let bob_key = cast.bob.receive(&to_bob).unwrap();

    let alice_session = EncryptionLayer::new(&cast.channel, ChaChaPoly::from_key(&alice_key).unwrap());
    let bob_session = EncryptionLayer::new(&cast.channel, ChaChaPoly::from_key(&bob_key).unwrap());
    cast.alice.send(&alice_session, GREETING).unwrap();
    assert_eq!(cast.bob.receive(&bob_session).unwrap(), GREETING);
}

/// Exchange X25519 public keys in the clear. Returns what each side received.
fn exchange_public_keys(
    cast: &Cast,
    alice: &X25519Secret,
    bob: &X25519Secret,
    attacker: Option<&X25519Secret>,
) -> (X25519PublicKey, X25519PublicKey, Vec<X25519PublicKey>) {
    let mut stolen = Vec::new();
    let mut hop = |from: &secsim::Actor, to: &secsim::Actor, key: X25519PublicKey| {
        from.send(&cast.channel, key.as_bytes()).unwrap();
        if let Some(attacker) = attacker {
            let original = mallory(cast)
                .tamper(&cast.channel, |_| attacker.public_key().as_bytes().to_vec())
                .unwrap();
            stolen.push(X25519PublicKey::from_slice(&original).unwrap());
        }
        X25519PublicKey::from_slice(&to.receive(&cast.channel).unwrap()).unwrap()
    };

    let bob_sees = hop(&cast.alice, &cast.bob, alice.public_key());
    let alice_sees = hop(&cast.bob, &cast.alice, bob.public_key());
    (alice_sees, bob_sees, stolen)
}

#[test]
fn diffie_hellman_agrees_on_a_key() {
    let cast = Cast::new();
    let (alice, bob) = (X25519Secret::generate(), X25519Secret::generate());

    let (alice_sees, bob_sees, _) = exchange_public_keys(&cast, &alice, &bob, None);
    let alice_cipher: ChaChaPoly = alice.diffie_hellman(&alice_sees).derive_cipher(b"chat").unwrap();
    let bob_cipher: ChaChaPoly = bob.diffie_hellman(&bob_sees).derive_cipher(b"chat").unwrap();

    let alice_layer = EncryptionLayer::new(&cast.channel, alice_cipher);
    let bob_layer = EncryptionLayer::new(&cast.channel, bob_cipher);
    cast.alice.send(&alice_layer, GREETING).unwrap();
    assert_eq!(cast.bob.receive(&bob_layer).unwrap(), GREETING);
}

#[test]
fn key_substitution_lets_mallory_read_and_rewrite() {
    let cast = Cast::new();
    let (alice, bob, eve) = (
        X25519Secret::generate(),
        X25519Secret::generate(),
        X25519Secret::generate(),
    );

    let (alice_sees, bob_sees, stolen) = exchange_public_keys(&cast, &alice, &bob, Some(&eve));
    assert_eq!(alice_sees, eve.public_key());
    assert_eq!(bob_sees, eve.public_key());

    let derive = |secret: &X25519Secret, peer: &X25519PublicKey| -> ChaChaPoly {
        secret.diffie_hellman(peer).derive_cipher(b"chat").unwrap()
    };
    let alice_layer = EncryptionLayer::new(&cast.channel, derive(&alice, &alice_sees));
    let bob_layer = EncryptionLayer::new(&cast.channel, derive(&bob, &bob_sees));
    let mallory_alice = EncryptionLayer::new(&cast.channel, derive(&eve, &stolen[0]));
    let mallory_bob = EncryptionLayer::new(&cast.channel, derive(&eve, &stolen[1]));

    cast.alice.send(&alice_layer, b"the vault code is 1234").unwrap();
    let read = cast.mallory.receive(&mallory_alice).unwrap();
    assert_eq!(read, b"the vault code is 1234");

    cast.mallory.send(&mallory_bob, b"the vault code is 9999").unwrap();
    assert_eq!(cast.bob.receive(&bob_layer).unwrap(), b"the vault code is 9999");
}

#[test]
fn certificates_expose_key_substitution() {
    let cast = Cast::new();
    let ca = CertificateAuthority::generate("CA");
    let bob_key = X25519Secret::generate().public_key();
    let eve_key = X25519Secret::generate().public_key();

    let receive_cert = || Certificate::from_bytes(&cast.alice.receive(&cast.channel).unwrap()).unwrap();

    // Untouched certificate checks out.
    cast.bob.send(&cast.channel, &ca.issue("Bob", bob_key).to_bytes()).unwrap();
    assert_eq!(receive_cert().verify_for(&ca.public_key(), "Bob").unwrap(), bob_key);

    // Swapping the key inside Bob's certificate breaks the signature.
    cast.bob.send(&cast.channel, &ca.issue("Bob", bob_key).to_bytes()).unwrap();
    mallory(&cast)
        .tamper(&cast.channel, |bytes| {
            let mut cert = Certificate::from_bytes(bytes).unwrap();
            cert.public_key = eve_key;
            cert.to_bytes()
        })
        .unwrap();
    assert!(receive_cert().verify_for(&ca.public_key(), "Bob").is_err());

    // Mallory's own valid certificate names the wrong subject.
    let mallory_cert = ca.issue("Mallory", eve_key);
    cast.bob.send(&cast.channel, &ca.issue("Bob", bob_key).to_bytes()).unwrap();
    mallory(&cast)
        .tamper(&cast.channel, |_| mallory_cert.to_bytes())
        .unwrap();
    let cert = receive_cert();
    assert!(cert.verify(&ca.public_key()).is_ok());
    assert!(cert.verify_for(&ca.public_key(), "Bob").is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// Public-Key Confidentiality and Signatures
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn digital_envelope_reaches_only_its_recipient() {
    let cast = Cast::new();
    let bob_box = SealedBox::generate();

    let alice_layer = EncryptionLayer::new(&cast.channel, DigitalEnvelope::<Aes, _>::new(bob_box.to_public()));
    let bob_layer = EncryptionLayer::new(&cast.channel, DigitalEnvelope::<Aes, _>::new(bob_box));
    let mallory_layer =
        EncryptionLayer::new(&cast.channel, DigitalEnvelope::<Aes, _>::new(SealedBox::generate()));

    cast.alice.send(&alice_layer, GREETING).unwrap();
    let captured = mallory(&cast).eavesdrop(&cast.channel).unwrap();
    assert_eq!(cast.bob.receive(&bob_layer).unwrap(), GREETING);

    mallory(&cast).inject(&cast.channel, &captured).unwrap();
    assert!(matches!(
        cast.mallory.receive(&mallory_layer),
        Err(LinkError::Crypto(_))
    ));
}

#[test]
fn signed_envelope_rejects_forged_sender() {
    let cast = Cast::new();
    let bob_box = SealedBox::generate();
    let alice_signer = Ed25519Signer::generate();

    let alice_enc = EncryptionLayer::new(&cast.channel, DigitalEnvelope::<ChaCha, _>::new(bob_box.to_public()));
    let alice = AuthenticationLayer::new(&alice_enc, &alice_signer);

    let bob_enc = EncryptionLayer::new(&cast.channel, DigitalEnvelope::<ChaCha, _>::new(bob_box.clone()));
    let bob = AuthenticationLayer::new(&bob_enc, Ed25519Signer::verifier(alice_signer.public_key()));

    cast.alice.send(&alice, GREETING).unwrap();
    assert_eq!(cast.bob.receive(&bob).unwrap(), GREETING);
    assert_eq!(bob.last_verdict(), Some(Verdict::Accepted));

    // Anyone can encrypt to Bob, but not sign as Alice.
    let mallory_enc = EncryptionLayer::new(&cast.channel, DigitalEnvelope::<ChaCha, _>::new(bob_box.to_public()));
    let forger = AuthenticationLayer::new(&mallory_enc, Ed25519Signer::generate());
    cast.mallory.send(&forger, b"Hello, Bob! - Alice (really)").unwrap();

    assert_eq!(cast.bob.receive(&bob).unwrap(), b"Hello, Bob! - Alice (really)");
    assert_eq!(bob.last_verdict(), Some(Verdict::Rejected));
}

// ─────────────────────────────────────────────────────────────────────────────
// Channel
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn overwrite_channel_lets_a_collision_replace_the_message() {
    let channel = Channel::with_config(ChannelConfig {
        full_slot: FullSlot::Overwrite,
    });
    channel.send(b"from Alice").unwrap();
    channel.send(b"from Mallory").unwrap();
    assert_eq!(channel.receive().unwrap(), b"from Mallory");

    let strict = Channel::new();
    strict.send(b"from Alice").unwrap();
    assert!(matches!(strict.send(b"from Mallory"), Err(LinkError::ChannelFull)));
}

#[test]
fn transcript_shows_what_each_party_saw() {
    let cast = Cast::new();
    let stack = EncryptionLayer::new(&cast.channel, Aes::generate());

    cast.alice.send(&stack, GREETING).unwrap();
    let captured = mallory(&cast).eavesdrop(&cast.channel).unwrap();
    cast.bob.receive(&stack).unwrap();

    let transcript = &cast.transcript;
    assert_eq!(transcript.payloads("Alice", Direction::Sent), vec![GREETING.to_vec()]);
    assert_eq!(transcript.payloads("Mallory", Direction::Received), vec![captured]);
    assert_eq!(transcript.payloads("Bob", Direction::Received), vec![GREETING.to_vec()]);
}

proptest! {
    #[test]
    fn full_stack_roundtrips(data in payload(256)) {
        let channel = Channel::new();
        let encryption = EncryptionLayer::new(&channel, ChaChaPoly::generate());
        let authentication = AuthenticationLayer::new(&encryption, Hmac::generate());
        let replay = AntiReplayLayer::new(&authentication);

        replay.send(&data).unwrap();
        prop_assert_eq!(replay.receive().unwrap(), data);
        prop_assert_eq!(authentication.last_verdict(), Some(Verdict::Accepted));
        prop_assert_eq!(replay.last_verdict(), Some(Verdict::Accepted));
    }

    #[test]
    fn eavesdropping_is_transparent(data in payload(128)) {
        let cast = Cast::new();
        let stack = EncryptionLayer::new(&cast.channel, Aes::generate());

        cast.alice.send(&stack, &data).unwrap();
        mallory(&cast).eavesdrop(&cast.channel).unwrap();
        prop_assert_eq!(cast.bob.receive(&stack).unwrap(), data);
    }
}
