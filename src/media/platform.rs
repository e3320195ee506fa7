use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use log::{debug, info};
use symphonia::core::codecs::CodecRegistry;
use symphonia::core::probe::Probe;

/// Process-wide decoder runtime: the format probe and codec registry every
/// probe and stream operation resolves against.
pub(crate) struct MediaRuntime {
    probe: Probe,
    codecs: CodecRegistry,
}

impl MediaRuntime {
    fn new() -> Self {
        let mut probe = Probe::default();
        symphonia::default::register_enabled_formats(&mut probe);

        let mut codecs = CodecRegistry::new();
        symphonia::default::register_enabled_codecs(&mut codecs);

        Self { probe, codecs }
    }

    pub(crate) fn probe(&self) -> &Probe {
        &self.probe
    }

    pub(crate) fn codecs(&self) -> &CodecRegistry {
        &self.codecs
    }
}

static RUNTIME: OnceLock<MediaRuntime> = OnceLock::new();
static STARTED: AtomicBool = AtomicBool::new(false);

/// Bring up the decoder runtime.
///
/// Idempotent; intended to be called once by the hosting application. A
/// failure here is logged rather than raised, since no caller is in a
/// position to catch it. Components that run before `startup` initialize
/// the runtime lazily, so calling this is recommended but not required.
pub fn startup() {
    if STARTED.swap(true, Ordering::SeqCst) {
        debug!("media runtime already started");
        return;
    }
    RUNTIME.get_or_init(MediaRuntime::new);
    info!("media runtime started");
}

/// Tear down the decoder runtime.
///
/// Idempotent counterpart of [`startup`]. The registries themselves live for
/// the remainder of the process; shutdown records that the hosting
/// application no longer intends to use them.
pub fn shutdown() {
    if STARTED.swap(false, Ordering::SeqCst) {
        info!("media runtime shut down");
    }
}

/// Whether [`startup`] has been called without a matching [`shutdown`].
pub fn is_started() -> bool {
    STARTED.load(Ordering::SeqCst)
}

/// Access the runtime, initializing it on first use.
pub(crate) fn runtime() -> &'static MediaRuntime {
    RUNTIME.get_or_init(MediaRuntime::new)
}
