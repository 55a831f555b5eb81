//! Purpose: RAII wrapper for a file-backed extract holding named tables.
//! Exports: `Extract` with create/open, table lookup, and idempotent close.
//! Role: Entry point of the wrapper layer; all other handles derive from it.
//! Invariants: Closing flushes and invalidates the file handle; dropping an
//! open extract closes it best-effort.
use std::path::{Path, PathBuf};
use std::ptr;

use crate::core::engine::{self, Engine, sys, wstr};
use crate::core::error::{Error, ErrorKind};

use super::{ApiResult, Table, TableDefinition};

pub struct Extract {
    engine: &'static Engine,
    handle: *mut sys::dxe_extract_t,
    path: PathBuf,
}

impl std::fmt::Debug for Extract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extract")
            .field("path", &self.path)
            .field("open", &!self.handle.is_null())
            .finish()
    }
}

impl Extract {
    /// Creates a new extract file. Fails with `FileExists` if the path is
    /// already taken.
    pub fn create(path: impl AsRef<Path>) -> ApiResult<Self> {
        Self::acquire(path.as_ref(), |engine, wide, out| unsafe {
            (engine.api().extract_create)(wide, out)
        })
    }

    /// Opens an existing extract file.
    pub fn open(path: impl AsRef<Path>) -> ApiResult<Self> {
        Self::acquire(path.as_ref(), |engine, wide, out| unsafe {
            (engine.api().extract_open)(wide, out)
        })
    }

    fn acquire(
        path: &Path,
        entry: impl Fn(&Engine, *const sys::WChar, *mut *mut sys::dxe_extract_t) -> libc::c_int,
    ) -> ApiResult<Self> {
        let engine = engine::global()?;
        let wide = path_to_wide(path)?;
        let mut handle = ptr::null_mut();
        engine
            .check(entry(engine, wide.as_ptr(), &mut handle))
            .map_err(|err| err.with_path(path))?;
        Ok(Self {
            engine,
            handle,
            path: path.to_path_buf(),
        })
    }

    fn raw(&self) -> ApiResult<*mut sys::dxe_extract_t> {
        if self.handle.is_null() {
            return Err(Error::new(ErrorKind::BadHandle)
                .with_message("extract is closed")
                .with_path(&self.path));
        }
        Ok(self.handle)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Registers a table under `name` with the given schema and returns its
    /// wrapper. The definition stays owned by the caller.
    pub fn add_table(&mut self, name: &str, definition: &TableDefinition) -> ApiResult<Table> {
        let handle = self.raw()?;
        let wide = wstr::to_wide(name)?;
        let mut table = ptr::null_mut();
        self.engine
            .check(unsafe {
                (self.engine.api().extract_add_table)(
                    handle,
                    wide.as_ptr(),
                    definition.raw()?,
                    &mut table,
                )
            })
            .map_err(|err| err.with_path(&self.path))?;
        Ok(Table::from_raw(self.engine, table))
    }

    pub fn open_table(&mut self, name: &str) -> ApiResult<Table> {
        let handle = self.raw()?;
        let wide = wstr::to_wide(name)?;
        let mut table = ptr::null_mut();
        self.engine
            .check(unsafe {
                (self.engine.api().extract_open_table)(handle, wide.as_ptr(), &mut table)
            })
            .map_err(|err| err.with_path(&self.path))?;
        Ok(Table::from_raw(self.engine, table))
    }

    pub fn has_table(&self, name: &str) -> ApiResult<bool> {
        let handle = self.raw()?;
        let wide = wstr::to_wide(name)?;
        let mut present = 0;
        self.engine
            .check(unsafe {
                (self.engine.api().extract_has_table)(handle, wide.as_ptr(), &mut present)
            })
            .map_err(|err| err.with_path(&self.path))?;
        Ok(present != 0)
    }

    /// Flushes queued rows and releases the file. Safe to call more than
    /// once; later calls are no-ops.
    pub fn close(&mut self) -> ApiResult<()> {
        if self.handle.is_null() {
            return Ok(());
        }
        let handle = std::mem::replace(&mut self.handle, ptr::null_mut());
        self.engine
            .check(unsafe { (self.engine.api().extract_close)(handle) })
            .map_err(|err| err.with_path(&self.path))
    }
}

impl Drop for Extract {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            let _ = unsafe { (self.engine.api().extract_close)(self.handle) };
        }
    }
}

fn path_to_wide(path: &Path) -> Result<Vec<sys::WChar>, Error> {
    let text = path.to_str().ok_or_else(|| {
        Error::new(ErrorKind::Usage)
            .with_message("extract path is not valid UTF-8")
            .with_path(path)
    })?;
    wstr::to_wide(text)
}
