//! Purpose: Load the extract engine shared library and police its status codes.
//! Exports: `Engine`, `global`, `preload`, `LIBRARY_ENV`.
//! Role: Single FFI chokepoint; every engine call goes through `Engine::api`.
//! Invariants: The library is loaded at most once per process and never unloaded.
//! Invariants: Any non-success status becomes an `Error` carrying the engine's
//! own message and the raw status code.
use std::env;
use std::ffi::CStr;
use std::path::PathBuf;
use std::sync::OnceLock;

use libc::c_int;
use libloading::Library;
use tracing::debug;

use crate::core::error::{Error, ErrorKind};

pub mod sys;
pub mod wstr;

/// Environment variable naming the engine shared library path.
pub const LIBRARY_ENV: &str = "DATAEXTRACT_LIB";

#[cfg(target_os = "windows")]
const DEFAULT_LIBRARY: &str = "dataextract.dll";
#[cfg(target_os = "macos")]
const DEFAULT_LIBRARY: &str = "libdataextract.dylib";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const DEFAULT_LIBRARY: &str = "libdataextract.so";

static PRELOAD: OnceLock<PathBuf> = OnceLock::new();
static ENGINE: OnceLock<Result<Engine, Error>> = OnceLock::new();

pub struct Engine {
    api: sys::Api,
    version: String,
    // Keeps the resolved function pointers valid for the process lifetime.
    _lib: Library,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl Engine {
    fn load() -> Result<Self, Error> {
        let path = resolve_library_path();
        debug!(path = %path.display(), "loading extract engine library");
        let lib = unsafe { Library::new(&path) }.map_err(|err| {
            Error::new(ErrorKind::Library)
                .with_message("failed to load extract engine library")
                .with_path(&path)
                .with_hint(format!(
                    "Set {LIBRARY_ENV} to the engine shared library path."
                ))
                .with_source(err)
        })?;
        let api = sys::Api::load(&lib).map_err(|err| {
            Error::new(ErrorKind::Library)
                .with_message("engine library is missing a required symbol")
                .with_path(&path)
                .with_source(err)
        })?;

        let status = unsafe { (api.init)() };
        if status != sys::DXE_RESULT_SUCCESS {
            let mut err = Error::new(ErrorKind::from_status(status)).with_status(status);
            err = match engine_message(&api) {
                Some(message) => err.with_message(message),
                None => err.with_message("engine initialization failed"),
            };
            return Err(err.with_path(&path));
        }

        let version = unsafe {
            let ptr = (api.version)();
            if ptr.is_null() {
                "unknown".to_string()
            } else {
                CStr::from_ptr(ptr).to_string_lossy().into_owned()
            }
        };
        debug!(version = %version, "extract engine initialized");

        Ok(Self {
            api,
            version,
            _lib: lib,
        })
    }

    pub fn api(&self) -> &sys::Api {
        &self.api
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn last_error_message(&self) -> Option<String> {
        engine_message(&self.api)
    }

    /// Success passes through; anything else is translated into an `Error`
    /// with the engine-supplied message. No retries, no recovery.
    pub fn check(&self, status: c_int) -> Result<(), Error> {
        if status == sys::DXE_RESULT_SUCCESS {
            return Ok(());
        }
        let err = Error::new(ErrorKind::from_status(status)).with_status(status);
        Err(match self.last_error_message() {
            Some(message) => err.with_message(message),
            None => err.with_message(format!("engine call failed with status {status}")),
        })
    }

    /// Takes ownership of an engine-allocated wide string and releases it
    /// through the engine's allocator, never Rust's.
    pub fn take_string(&self, ptr: *mut sys::WChar) -> Result<String, Error> {
        let text = unsafe { wstr::from_wide_ptr(ptr) };
        if !ptr.is_null() {
            unsafe { (self.api.string_free)(ptr) };
        }
        text
    }
}

/// Returns the process-wide engine, loading it on first use. The load
/// outcome is cached: a failed load stays failed for the process lifetime.
pub fn global() -> Result<&'static Engine, Error> {
    match ENGINE.get_or_init(Engine::load) {
        Ok(engine) => Ok(engine),
        Err(err) => Err(replay(err)),
    }
}

/// Pins the engine library to an explicit path and loads it eagerly.
/// Must run before any wrapper object touches the engine.
pub fn preload(path: impl Into<PathBuf>) -> Result<(), Error> {
    if ENGINE.get().is_some() {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("engine library load was already attempted"));
    }
    PRELOAD.set(path.into()).map_err(|_| {
        Error::new(ErrorKind::Usage).with_message("engine library path is already set")
    })?;
    global().map(|_| ())
}

fn resolve_library_path() -> PathBuf {
    if let Some(path) = PRELOAD.get() {
        return path.clone();
    }
    if let Ok(path) = env::var(LIBRARY_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    PathBuf::from(DEFAULT_LIBRARY)
}

// `Error` is not `Clone` (it may own a source), so the cached load failure
// is rebuilt field by field each time it is reported.
fn replay(err: &Error) -> Error {
    let mut copy = Error::new(err.kind());
    if let Some(message) = err.message() {
        copy = copy.with_message(message);
    }
    if let Some(path) = err.path() {
        copy = copy.with_path(path);
    }
    if let Some(status) = err.status() {
        copy = copy.with_status(status);
    }
    if let Some(hint) = err.hint() {
        copy = copy.with_hint(hint);
    }
    copy
}

fn engine_message(api: &sys::Api) -> Option<String> {
    let ptr = unsafe { (api.last_error_message)() };
    unsafe { wstr::from_wide_ptr_lossy(ptr) }.filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use crate::core::error::ErrorKind;

    #[test]
    fn load_outcome_is_cached() {
        match super::global() {
            Ok(engine) => assert!(!engine.version().is_empty()),
            Err(err) => {
                let second = super::global().expect_err("unavailable engine stays unavailable");
                assert_eq!(second.kind(), err.kind());
            }
        }
    }

    #[test]
    fn preload_after_load_attempt_is_rejected() {
        let _ = super::global();
        let err = super::preload("/tmp/does-not-matter").expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }
}
