//! Keygen orchestration
//!
//! Generation and serialization complete before the first byte of output, so
//! a rejected request never leaves files behind. Artifacts are emitted public
//! before private, JWK before JWKS before PEM.

use std::io::Write;

use jwkgen_jwk::JwkPair;
use jwkgen_key::store::{console_header, write_artifact};
use jwkgen_key::{
    Algorithm, Artifact, ArtifactKind, ArtifactName, EntropySource, KeyGenerator, KeyId, KeyPair,
    Visibility,
};

use crate::config::{KeyIdSource, KeygenRequest, OutputOptions};
use crate::error::Result;

/// One rendered document, not yet named
struct Rendered {
    kind: ArtifactKind,
    visibility: Visibility,
    bytes: Vec<u8>,
}

/// Execute `request`, reporting progress on `out`
///
/// # Errors
///
/// Returns the first failure from key id validation, generation, document
/// construction or output. Artifacts written before a failure are kept.
pub fn run<W: Write>(request: KeygenRequest, entropy: &mut EntropySource, out: &mut W) -> Result<()> {
    let key_id = match request.key_id {
        KeyIdSource::None => None,
        KeyIdSource::Explicit(id) => Some(KeyId::new(id)?),
        KeyIdSource::Random => Some(KeyId::random(entropy)),
    };

    let pair = KeyGenerator::new(entropy).generate(
        request.key_use,
        &request.algorithm,
        request.size,
    )?;
    let documents = JwkPair::from_key_pair(&pair, key_id.as_ref())?;
    let rendered = render_all(&pair, &documents, &request.output)?;

    match key_id {
        None => print_all(pair.algorithm(), &rendered, out),
        Some(key_id) => write_all(pair.algorithm(), &key_id, rendered, &request.output, out),
    }
}

fn render_all(pair: &KeyPair, documents: &JwkPair, options: &OutputOptions) -> Result<Vec<Rendered>> {
    let mut rendered = vec![
        Rendered {
            kind: ArtifactKind::Jwk,
            visibility: Visibility::Public,
            bytes: documents.public.to_json(options.pretty)?,
        },
        Rendered {
            kind: ArtifactKind::Jwk,
            visibility: Visibility::Private,
            bytes: documents.private.to_json(options.pretty)?,
        },
    ];

    if options.emit_jwks {
        let (public, private) = documents.to_sets();
        rendered.push(Rendered {
            kind: ArtifactKind::Jwks,
            visibility: Visibility::Public,
            bytes: public.to_json(options.pretty)?,
        });
        rendered.push(Rendered {
            kind: ArtifactKind::Jwks,
            visibility: Visibility::Private,
            bytes: private.to_json(options.pretty)?,
        });
    }

    if options.emit_pem {
        rendered.push(Rendered {
            kind: ArtifactKind::Pem,
            visibility: Visibility::Public,
            bytes: pair.public_key().to_pem()?.into_bytes(),
        });
        rendered.push(Rendered {
            kind: ArtifactKind::Pem,
            visibility: Visibility::Private,
            bytes: pair.private_key().to_pem()?.into_bytes(),
        });
    }

    Ok(rendered)
}

fn print_all<W: Write>(algorithm: Algorithm, rendered: &[Rendered], out: &mut W) -> Result<()> {
    for document in rendered {
        writeln!(out, "{}", console_header(document.kind, algorithm, document.visibility))?;
        out.write_all(&document.bytes)?;
        if !document.bytes.ends_with(b"\n") {
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_all<W: Write>(
    algorithm: Algorithm,
    key_id: &KeyId,
    rendered: Vec<Rendered>,
    options: &OutputOptions,
    out: &mut W,
) -> Result<()> {
    for document in rendered {
        let name = ArtifactName::new(document.kind, algorithm, key_id);
        let artifact = Artifact::new(&name, document.visibility, document.bytes);
        let path = write_artifact(&options.directory, &artifact)?;
        writeln!(
            out,
            "Written {} key with {} to {}",
            artifact.visibility.label(),
            artifact.kind.label(),
            path.display()
        )?;
    }
    out.flush()?;
    Ok(())
}
