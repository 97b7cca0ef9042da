//! Structural validation of JWK documents

use ed25519_dalek::{SigningKey, VerifyingKey, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};
use zeroize::Zeroizing;

use jwkgen_key::{EcCurve, EcPrivateKey, EcPublicKey, RsaPublicParts, RSA_MIN_BITS};

use crate::document::{decode_member, Jwk, KeyType, ED25519_CURVE};
use crate::error::{JwkError, Result};

impl Jwk {
    /// Check that the document describes a usable key
    ///
    /// Public members must decode to a valid key of the declared type. When a
    /// private member is present the private key must be complete and must
    /// re-derive the published public key.
    ///
    /// # Errors
    ///
    /// Returns [`JwkError::MissingMember`], [`JwkError::Base64`] or
    /// [`JwkError::Invalid`] describing the first failed check.
    pub fn validate(&self) -> Result<()> {
        match self.kty {
            KeyType::Ec => self.validate_ec(),
            KeyType::Okp => self.validate_okp(),
            KeyType::Rsa => self.validate_rsa(),
        }
    }

    fn required(&self, member: &'static str, value: &Option<String>) -> Result<Zeroizing<Vec<u8>>> {
        let value = value.as_deref().ok_or(JwkError::MissingMember {
            kty: self.kty.as_str(),
            member,
        })?;
        decode_member(member, value)
    }

    fn reject_rsa_members(&self) -> Result<()> {
        let foreign = [
            ("n", &self.n),
            ("e", &self.e),
            ("p", &self.p),
            ("q", &self.q),
            ("dp", &self.dp),
            ("dq", &self.dq),
            ("qi", &self.qi),
        ];
        match foreign.iter().find(|(_, value)| value.is_some()) {
            Some((member, _)) => Err(JwkError::invalid(format!(
                "`{}` key must not carry RSA member `{member}`",
                self.kty.as_str()
            ))),
            None => Ok(()),
        }
    }

    fn validate_ec(&self) -> Result<()> {
        self.reject_rsa_members()?;
        let curve = self
            .crv
            .as_deref()
            .and_then(EcCurve::from_jwk_name)
            .ok_or_else(|| JwkError::invalid(format!("unsupported EC curve {:?}", self.crv)))?;

        let x = self.required("x", &self.x)?;
        let y = self.required("y", &self.y)?;
        let public = EcPublicKey::from_coordinates(curve, &x, &y)?;

        if self.d.is_some() {
            let d = self.required("d", &self.d)?;
            let private = EcPrivateKey::from_scalar(curve, &d)?;
            if private.public_key() != public {
                return Err(JwkError::invalid("EC private scalar does not match public point"));
            }
        }
        Ok(())
    }

    fn validate_okp(&self) -> Result<()> {
        self.reject_rsa_members()?;
        if self.crv.as_deref() != Some(ED25519_CURVE) {
            return Err(JwkError::invalid(format!("unsupported OKP curve {:?}", self.crv)));
        }
        if self.y.is_some() {
            return Err(JwkError::invalid("OKP key must not carry `y`"));
        }

        let x = self.required("x", &self.x)?;
        let x: [u8; PUBLIC_KEY_LENGTH] = x.as_slice().try_into().map_err(|_| {
            JwkError::invalid(format!("Ed25519 public key must be {PUBLIC_KEY_LENGTH} bytes"))
        })?;
        let public = VerifyingKey::from_bytes(&x)
            .map_err(|e| JwkError::invalid(format!("Ed25519 public key is invalid: {e}")))?;

        if self.d.is_some() {
            let d = self.required("d", &self.d)?;
            let seed: Zeroizing<[u8; SECRET_KEY_LENGTH]> =
                Zeroizing::new(d.as_slice().try_into().map_err(|_| {
                    JwkError::invalid(format!("Ed25519 seed must be {SECRET_KEY_LENGTH} bytes"))
                })?);
            if SigningKey::from_bytes(&seed).verifying_key() != public {
                return Err(JwkError::invalid("Ed25519 seed does not match public key"));
            }
        }
        Ok(())
    }

    fn validate_rsa(&self) -> Result<()> {
        if self.crv.is_some() || self.x.is_some() || self.y.is_some() {
            return Err(JwkError::invalid("RSA key must not carry curve members"));
        }

        let public = RsaPublicParts {
            n: self.required("n", &self.n)?.to_vec(),
            e: self.required("e", &self.e)?.to_vec(),
        };
        let bits = public.modulus_bits();
        if bits < RSA_MIN_BITS as usize {
            return Err(JwkError::invalid(format!(
                "RSA modulus is {bits} bits, {RSA_MIN_BITS}+ is required"
            )));
        }
        if public.e.iter().all(|&b| b == 0) {
            return Err(JwkError::invalid("RSA public exponent is zero"));
        }

        if self.is_public() {
            return Ok(());
        }
        for (member, value) in self.private_members() {
            self.required(member, value)?;
        }
        Ok(())
    }
}
