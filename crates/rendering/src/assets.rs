//! Asset plumbing.
//!
//! Load failures are logged and otherwise ignored: a scene missing a model or
//! a sound keeps animating with whatever did load (the loaded entity simply
//! never shows up). No retries, no fallback assets.

use bevy::asset::UntypedAssetLoadFailedEvent;
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;

/// Load the first scene out of a GLTF file.
pub fn gltf_scene(asset_server: &AssetServer, path: &str) -> Handle<Scene> {
    asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.to_owned()))
}

/// System: log every failed asset load, of any type, and keep running.
pub fn log_asset_load_failures(mut events: EventReader<UntypedAssetLoadFailedEvent>) {
    for event in events.read() {
        warn!(
            "asset '{}' failed to load, continuing without it: {}",
            event.path, event.error
        );
    }
}
