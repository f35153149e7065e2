// ─── Bundle Launcher Core ───
// Starts an application packaged as one self-contained archive.
//
// Architecture:
//   core/
//     archive/   - Zip and directory roots, ordered search path
//     protocol/  - jij: URIs, jar-in-jar resolver, handler registry
//     metadata/  - Bundle metadata record and its lookup on the search path
//     loader/    - Virtual roots and the isolated loading context
//     launch/    - Entry point registry + launch sequence
//     config     - Scheme, record path and bundle location

pub mod archive;
pub mod config;
pub mod error;
pub mod launch;
pub mod loader;
pub mod metadata;
pub mod protocol;

#[cfg(test)]
mod testing;
