//! Purpose: RAII wrapper for a named table inside an extract.
//! Invariants: `insert` hands the row to the engine's buffered writer; the
//! buffering policy lives entirely inside the engine.
use std::ptr;

use crate::core::engine::{Engine, sys};
use crate::core::error::{Error, ErrorKind};

use super::{ApiResult, Row, TableDefinition};

pub struct Table {
    engine: &'static Engine,
    handle: *mut sys::dxe_table_t,
}

impl Table {
    pub(crate) fn from_raw(engine: &'static Engine, handle: *mut sys::dxe_table_t) -> Self {
        Self { engine, handle }
    }

    fn raw(&self) -> ApiResult<*mut sys::dxe_table_t> {
        if self.handle.is_null() {
            return Err(Error::new(ErrorKind::BadHandle).with_message("table is closed"));
        }
        Ok(self.handle)
    }

    /// Queues one row for insertion. The row stays usable and can be
    /// mutated and inserted again.
    pub fn insert(&mut self, row: &Row) -> ApiResult<()> {
        let handle = self.raw()?;
        self.engine
            .check(unsafe { (self.engine.api().table_insert)(handle, row.raw()?) })
    }

    /// Fetches a fresh definition describing this table's schema. The
    /// returned definition owns its own handle.
    pub fn definition(&self) -> ApiResult<TableDefinition> {
        let handle = self.raw()?;
        let mut def = ptr::null_mut();
        self.engine
            .check(unsafe { (self.engine.api().table_get_definition)(handle, &mut def) })?;
        Ok(TableDefinition::from_raw(self.engine, def))
    }

    /// Releases the native handle. Safe to call more than once.
    pub fn close(&mut self) -> ApiResult<()> {
        if self.handle.is_null() {
            return Ok(());
        }
        let handle = std::mem::replace(&mut self.handle, ptr::null_mut());
        self.engine
            .check(unsafe { (self.engine.api().table_close)(handle) })
    }
}

impl Drop for Table {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            let _ = unsafe { (self.engine.api().table_close)(self.handle) };
        }
    }
}
