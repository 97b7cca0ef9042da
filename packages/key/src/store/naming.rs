//! Output naming policy
//!
//! File names are `<prefix>_<use>_<alg>_<kid>` plus `-pub` for public
//! artifacts and the kind's extension. The algorithm set is closed and the key
//! id may not end in `-pub`, so distinct `(kind, use, alg, kid, visibility)`
//! tuples never share a name.

use crate::algorithm::Algorithm;
use crate::key_id::KeyId;

/// Suffix distinguishing public artifacts from private ones
pub const PUBLIC_SUFFIX: &str = "-pub";

/// Delimiter between name fields
pub const FIELD_DELIMITER: char = '_';

/// Document format of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Single JSON Web Key
    Jwk,
    /// JSON Web Key Set wrapping the single key
    Jwks,
    /// PEM block
    Pem,
}

impl ArtifactKind {
    /// Name prefix, if the kind carries one
    #[must_use]
    pub const fn prefix(self) -> Option<&'static str> {
        match self {
            ArtifactKind::Jwk => Some("jwk"),
            ArtifactKind::Jwks => Some("jwks"),
            ArtifactKind::Pem => None,
        }
    }

    /// File extension including the dot
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Jwk | ArtifactKind::Jwks => ".json",
            ArtifactKind::Pem => ".pem",
        }
    }

    /// Human-readable format name
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ArtifactKind::Jwk => "JWK",
            ArtifactKind::Jwks => "JWKS",
            ArtifactKind::Pem => "PEM",
        }
    }
}

/// Which half of the key pair an artifact holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// World-readable public key
    Public,
    /// Owner-readable private key
    Private,
}

impl Visibility {
    /// Unix permission bits applied at creation
    #[must_use]
    pub const fn mode(self) -> u32 {
        match self {
            Visibility::Public => 0o444,
            Visibility::Private => 0o400,
        }
    }

    /// `public` or `private`
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }

    const fn suffix(self) -> &'static str {
        match self {
            Visibility::Public => PUBLIC_SUFFIX,
            Visibility::Private => "",
        }
    }
}

/// Name of an artifact set for one key id
#[derive(Debug, Clone, Copy)]
pub struct ArtifactName<'a> {
    kind: ArtifactKind,
    algorithm: Algorithm,
    key_id: &'a KeyId,
}

impl<'a> ArtifactName<'a> {
    /// Name artifacts of `kind` for `algorithm` (which fixes the use) and `key_id`
    #[must_use]
    pub const fn new(kind: ArtifactKind, algorithm: Algorithm, key_id: &'a KeyId) -> Self {
        Self {
            kind,
            algorithm,
            key_id,
        }
    }

    /// Shared stem of the public and private file names
    #[must_use]
    pub fn stem(&self) -> String {
        let fields = [
            self.algorithm.key_use().as_str(),
            self.algorithm.as_str(),
            self.key_id.as_str(),
        ];
        let mut stem = self.kind.prefix().map(str::to_string).unwrap_or_default();
        for field in fields {
            if !stem.is_empty() {
                stem.push(FIELD_DELIMITER);
            }
            stem.push_str(field);
        }
        stem
    }

    /// File name for one half of the pair
    #[must_use]
    pub fn file_name(&self, visibility: Visibility) -> String {
        format!("{}{}{}", self.stem(), visibility.suffix(), self.kind.extension())
    }
}

/// Console header used instead of a file when no key id was given
#[must_use]
pub fn console_header(kind: ArtifactKind, algorithm: Algorithm, visibility: Visibility) -> String {
    let name = match kind.prefix() {
        Some(prefix) => format!("{prefix}{FIELD_DELIMITER}{algorithm}"),
        None => algorithm.to_string(),
    };
    format!("==> {name}{}{} <==", visibility.suffix(), kind.extension())
}

/// A named payload ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name (no directory)
    pub file_name: String,
    /// Payload
    pub bytes: Vec<u8>,
    /// Permission class
    pub visibility: Visibility,
    /// Document format
    pub kind: ArtifactKind,
}

impl Artifact {
    /// Name and wrap a payload
    #[must_use]
    pub fn new(name: &ArtifactName<'_>, visibility: Visibility, bytes: Vec<u8>) -> Self {
        Self {
            file_name: name.file_name(visibility),
            bytes,
            visibility,
            kind: name.kind,
        }
    }
}
