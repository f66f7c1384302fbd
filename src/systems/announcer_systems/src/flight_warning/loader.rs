use std::io;
use std::sync::Arc;
use std::thread;
use systems::sound_pack::{
    AssetStore, ResolvedSoundPack, SoundPackError, SoundPackMap, SoundPackResolver,
};
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to spawn sound pack loader: {0}")]
    Spawn(#[source] io::Error),
}

/// Resolves sound packs off the tick thread.
///
/// The previously installed pack stays in use until a newer load completes. Requesting a load
/// while another is in flight abandons the older one. A load whose master pack does not exist
/// installs nothing, so the loader is not ready until a pack that does exist has been loaded.
#[derive(Default)]
pub struct SoundPackLoader {
    pending: Option<oneshot::Receiver<Result<ResolvedSoundPack, SoundPackError>>>,
    current: Option<ResolvedSoundPack>,
}

impl SoundPackLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(
        &mut self,
        store: Arc<dyn AssetStore + Send + Sync>,
        map: SoundPackMap,
    ) -> Result<(), LoaderError> {
        let (sender, receiver) = oneshot::channel();
        thread::Builder::new()
            .name("sound-pack-loader".into())
            .spawn(move || {
                let resolved = SoundPackResolver::new(store.as_ref()).resolve(&map);
                // The receiver is gone when a newer request superseded this one.
                let _ = sender.send(resolved);
            })
            .map_err(|e| {
                tracing::warn!(error = %e, "could not start sound pack loader");
                LoaderError::Spawn(e)
            })?;

        self.pending = Some(receiver);
        Ok(())
    }

    /// Picks up a finished load. Returns true when a new pack was installed.
    pub fn poll(&mut self) -> bool {
        let result = match self.pending.as_mut() {
            Some(receiver) => receiver.try_recv(),
            None => return false,
        };

        match result {
            Ok(Ok(pack)) => {
                self.pending = None;
                self.install(pack);
                true
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "keeping previous sound pack");
                self.pending = None;
                false
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Closed) => {
                tracing::warn!("sound pack loader exited without a result");
                self.pending = None;
                false
            }
        }
    }

    /// Replaces the current pack in a single step.
    pub fn install(&mut self, pack: ResolvedSoundPack) {
        self.current = Some(pack);
    }

    pub fn is_ready(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn sound_pack(&self) -> Option<&ResolvedSoundPack> {
        self.current.as_ref()
    }
}
