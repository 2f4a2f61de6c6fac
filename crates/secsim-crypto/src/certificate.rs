//! Public-key certificates.
//!
//! A certificate binds a subject name to an X25519 encryption key under the
//! signature of a certificate authority every party already trusts. This is
//! what defeats public-key substitution by a man in the middle.

use serde::{Deserialize, Serialize};

use crate::asymmetric::X25519PublicKey;
use crate::error::{CryptoError, Result};
use crate::signature::{Ed25519PublicKey, Ed25519Signature, Keypair};

/// The signed portion of a certificate.
#[derive(Serialize)]
struct CertificateBody<'a> {
    subject: &'a str,
    public_key: X25519PublicKey,
    issuer: &'a str,
}

/// A CA-signed binding of a subject to an encryption key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Who the key belongs to.
    pub subject: String,

    /// The subject's encryption key.
    pub public_key: X25519PublicKey,

    /// Name of the signing authority.
    pub issuer: String,

    /// Ed25519 signature over the CBOR-encoded body.
    pub signature: Vec<u8>,
}

impl Certificate {
    fn body_bytes(subject: &str, public_key: X25519PublicKey, issuer: &str) -> Vec<u8> {
        let body = CertificateBody {
            subject,
            public_key,
            issuer,
        };
        let mut buf = Vec::new();
        ciborium::into_writer(&body, &mut buf).expect("CBOR serialization failed");
        buf
    }

    /// Check the CA signature and return the certified key.
    pub fn verify(&self, authority: &Ed25519PublicKey) -> Result<X25519PublicKey> {
        let signature = Ed25519Signature::from_slice(&self.signature)?;
        let body = Self::body_bytes(&self.subject, self.public_key, &self.issuer);
        authority.verify(&body, &signature)?;
        Ok(self.public_key)
    }

    /// Check the signature and that the certificate names `subject`.
    pub fn verify_for(
        &self,
        authority: &Ed25519PublicKey,
        subject: &str,
    ) -> Result<X25519PublicKey> {
        let key = self.verify(authority)?;
        if self.subject != subject {
            return Err(CryptoError::InvalidSignature);
        }
        Ok(key)
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf).expect("CBOR serialization failed");
        buf
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ciborium::from_reader(bytes).map_err(|e| CryptoError::Serialization(e.to_string()))
    }
}

/// Issues certificates.
#[derive(Debug)]
pub struct CertificateAuthority {
    name: String,
    keypair: Keypair,
}

impl CertificateAuthority {
    /// A new authority with a fresh signing key.
    pub fn generate(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keypair: Keypair::generate(),
        }
    }

    /// The key every party uses to check certificates.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// Sign a binding of `subject` to `public_key`.
    pub fn issue(&self, subject: impl Into<String>, public_key: X25519PublicKey) -> Certificate {
        let subject = subject.into();
        let body = Certificate::body_bytes(&subject, public_key, &self.name);
        let signature = self.keypair.sign(&body);
        Certificate {
            subject,
            public_key,
            issuer: self.name.clone(),
            signature: signature.as_bytes().to_vec(),
        }
    }
}
