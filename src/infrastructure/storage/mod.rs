//! Filesystem adapter for the asset-store port.

mod fs_store;

pub use fs_store::FsAssetStore;
