//! Artifact output: deterministic naming and exclusive file creation

pub mod exclusive_file;
pub mod naming;

pub use exclusive_file::{write_artifact, write_new_file};
pub use naming::{Artifact, ArtifactKind, ArtifactName, Visibility, console_header};
