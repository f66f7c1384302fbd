use crate::flight_warning::callouts::Callout;
use fxhash::FxHashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Override value meaning "take this callout from the master pack".
pub const USE_MASTER: &str = "use master";

#[derive(Debug, Error)]
pub enum SoundPackError {
    #[error("failed to list sound packs in {path}: {source}")]
    ListPacks {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("sound pack '{pack}' not found, available: {available}")]
    UnknownPack { pack: String, available: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Wav,
    Ogg,
}

impl AudioFormat {
    /// Formats in the order they are looked up.
    pub const PREFERENCE: [AudioFormat; 2] = [AudioFormat::Wav, AudioFormat::Ogg];

    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Ogg => "ogg",
        }
    }
}

/// A located audio asset. Decoding is left to the host's audio output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetHandle {
    pack: String,
    callout: Callout,
    path: PathBuf,
    format: AudioFormat,
}

impl AssetHandle {
    pub fn new(
        pack: impl Into<String>,
        callout: Callout,
        path: PathBuf,
        format: AudioFormat,
    ) -> Self {
        Self {
            pack: pack.into(),
            callout,
            path,
            format,
        }
    }

    pub fn pack(&self) -> &str {
        &self.pack
    }

    pub fn callout(&self) -> Callout {
        self.callout
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }
}

pub trait AssetStore {
    fn load(&self, pack: &str, callout: Callout) -> Option<AssetHandle>;
    fn list_packs(&self) -> Result<Vec<String>, SoundPackError>;
}

/// Sound packs stored as `<root>/<pack>/<asset name>.<wav|ogg>`.
#[derive(Clone, Debug)]
pub struct DirectoryAssetStore {
    root: PathBuf,
}

impl DirectoryAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetStore for DirectoryAssetStore {
    fn load(&self, pack: &str, callout: Callout) -> Option<AssetHandle> {
        let pack_dir = self.root.join(pack);
        let name = callout.asset_name();
        AudioFormat::PREFERENCE.iter().find_map(|format| {
            let path = pack_dir.join(format!("{}.{}", name, format.extension()));
            if path.is_file() {
                Some(AssetHandle::new(pack, callout, path, *format))
            } else {
                None
            }
        })
    }

    fn list_packs(&self) -> Result<Vec<String>, SoundPackError> {
        let to_error = |source| SoundPackError::ListPacks {
            path: self.root.clone(),
            source,
        };

        let mut packs = Vec::new();
        for entry in std::fs::read_dir(&self.root).map_err(to_error)? {
            let entry = entry.map_err(to_error)?;
            if entry.file_type().map_err(to_error)?.is_dir() {
                packs.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        packs.sort();
        Ok(packs)
    }
}

/// Master pack plus per-callout overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundPackMap {
    master: String,
    overrides: FxHashMap<Callout, String>,
}

impl SoundPackMap {
    pub fn new(master: impl Into<String>) -> Self {
        Self {
            master: master.into(),
            overrides: FxHashMap::default(),
        }
    }

    pub fn master(&self) -> &str {
        &self.master
    }

    pub fn set_master(&mut self, master: impl Into<String>) {
        self.master = master.into();
    }

    /// Setting [`USE_MASTER`] or an empty name removes the override.
    pub fn set_override(&mut self, callout: Callout, pack: &str) {
        let pack = pack.trim();
        if pack.is_empty() || pack.eq_ignore_ascii_case(USE_MASTER) {
            self.overrides.remove(&callout);
        } else {
            self.overrides.insert(callout, pack.to_owned());
        }
    }

    pub fn override_for(&self, callout: Callout) -> Option<&str> {
        self.overrides.get(&callout).map(String::as_str)
    }

    pub fn pack_for(&self, callout: Callout) -> &str {
        self.override_for(callout).unwrap_or(&self.master)
    }
}

impl Default for SoundPackMap {
    fn default() -> Self {
        SoundPackMap::new("Altea")
    }
}

/// Flat callout to asset mapping. Cloning shares the underlying map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedSoundPack {
    assets: Arc<FxHashMap<Callout, AssetHandle>>,
}

impl ResolvedSoundPack {
    pub fn get(&self, callout: Callout) -> Option<&AssetHandle> {
        self.assets.get(&callout)
    }

    pub fn contains(&self, callout: Callout) -> bool {
        self.assets.contains_key(&callout)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl From<FxHashMap<Callout, AssetHandle>> for ResolvedSoundPack {
    fn from(assets: FxHashMap<Callout, AssetHandle>) -> Self {
        Self {
            assets: Arc::new(assets),
        }
    }
}

pub struct SoundPackResolver<'a, S: AssetStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: AssetStore + ?Sized> SoundPackResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Fails only when the store lists its packs and the master pack is not among them. A store
    /// that cannot list its packs is still asked for every asset.
    pub fn resolve(&self, map: &SoundPackMap) -> Result<ResolvedSoundPack, SoundPackError> {
        match self.store.list_packs() {
            Ok(packs) if !packs.iter().any(|p| p == map.master()) => {
                let available = packs.join(", ");
                tracing::error!(pack = map.master(), %available, "sound pack not found");
                return Err(SoundPackError::UnknownPack {
                    pack: map.master().to_owned(),
                    available,
                });
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "could not list sound packs"),
        }

        let mut assets = FxHashMap::default();
        for callout in Callout::all() {
            let pack = map.pack_for(callout);
            match self.store.load(pack, callout) {
                Some(handle) => {
                    assets.insert(callout, handle);
                }
                // The British 2500 is optional in most packs.
                None if callout == Callout::Altitude2500Uk => {}
                None => tracing::debug!(pack, %callout, "sound missing from pack"),
            }
        }

        tracing::info!(pack = map.master(), loaded = assets.len(), "loaded sound pack");
        Ok(assets.into())
    }
}
