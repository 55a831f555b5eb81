//! Purpose: RAII wrapper for the engine's table definition handle.
//! Invariants: Column order fixes column numbers; the default collation
//! applies to wide string columns added after it is set (engine-enforced).
use std::ptr;

use crate::core::engine::{self, Engine, sys, wstr};
use crate::core::error::{Error, ErrorKind};
use crate::core::types::{Collation, ColumnType};

use super::{ApiResult, column_index};

pub struct TableDefinition {
    engine: &'static Engine,
    handle: *mut sys::dxe_tabledef_t,
}

impl TableDefinition {
    pub fn new() -> ApiResult<Self> {
        let engine = engine::global()?;
        let mut handle = ptr::null_mut();
        engine.check(unsafe { (engine.api().tabledef_create)(&mut handle) })?;
        Ok(Self { engine, handle })
    }

    pub(crate) fn from_raw(engine: &'static Engine, handle: *mut sys::dxe_tabledef_t) -> Self {
        Self { engine, handle }
    }

    pub(crate) fn raw(&self) -> ApiResult<*mut sys::dxe_tabledef_t> {
        if self.handle.is_null() {
            return Err(Error::new(ErrorKind::BadHandle).with_message("table definition is closed"));
        }
        Ok(self.handle)
    }

    pub(crate) fn engine(&self) -> &'static Engine {
        self.engine
    }

    pub fn set_default_collation(&mut self, collation: Collation) -> ApiResult<()> {
        let handle = self.raw()?;
        self.engine.check(unsafe {
            (self.engine.api().tabledef_set_default_collation)(handle, collation.to_raw())
        })
    }

    pub fn default_collation(&self) -> ApiResult<Collation> {
        let handle = self.raw()?;
        let mut raw = 0;
        self.engine.check(unsafe {
            (self.engine.api().tabledef_get_default_collation)(handle, &mut raw)
        })?;
        Collation::from_raw(raw)
    }

    pub fn add_column(&mut self, name: &str, column_type: ColumnType) -> ApiResult<()> {
        let handle = self.raw()?;
        let wide = wstr::to_wide(name)?;
        self.engine.check(unsafe {
            (self.engine.api().tabledef_add_column)(handle, wide.as_ptr(), column_type.to_raw())
        })
    }

    pub fn add_column_with_collation(
        &mut self,
        name: &str,
        column_type: ColumnType,
        collation: Collation,
    ) -> ApiResult<()> {
        let handle = self.raw()?;
        let wide = wstr::to_wide(name)?;
        self.engine.check(unsafe {
            (self.engine.api().tabledef_add_column_with_collation)(
                handle,
                wide.as_ptr(),
                column_type.to_raw(),
                collation.to_raw(),
            )
        })
    }

    pub fn column_count(&self) -> ApiResult<usize> {
        let handle = self.raw()?;
        let mut count = 0;
        self.engine
            .check(unsafe { (self.engine.api().tabledef_get_column_count)(handle, &mut count) })?;
        usize::try_from(count).map_err(|_| {
            Error::new(ErrorKind::Internal).with_message("engine returned a negative column count")
        })
    }

    pub fn column_name(&self, index: usize) -> ApiResult<String> {
        let handle = self.raw()?;
        let mut name = ptr::null_mut();
        self.engine
            .check(unsafe {
                (self.engine.api().tabledef_get_column_name)(handle, column_index(index)?, &mut name)
            })
            .map_err(|err| err.with_column(index))?;
        self.engine.take_string(name)
    }

    pub fn column_type(&self, index: usize) -> ApiResult<ColumnType> {
        let handle = self.raw()?;
        let mut raw = 0;
        self.engine
            .check(unsafe {
                (self.engine.api().tabledef_get_column_type)(handle, column_index(index)?, &mut raw)
            })
            .map_err(|err| err.with_column(index))?;
        ColumnType::from_raw(raw)
    }

    pub fn column_collation(&self, index: usize) -> ApiResult<Collation> {
        let handle = self.raw()?;
        let mut raw = 0;
        self.engine
            .check(unsafe {
                (self.engine.api().tabledef_get_column_collation)(
                    handle,
                    column_index(index)?,
                    &mut raw,
                )
            })
            .map_err(|err| err.with_column(index))?;
        Collation::from_raw(raw)
    }

    /// Releases the native handle. Safe to call more than once; later calls
    /// are no-ops.
    pub fn close(&mut self) -> ApiResult<()> {
        if self.handle.is_null() {
            return Ok(());
        }
        let handle = std::mem::replace(&mut self.handle, ptr::null_mut());
        self.engine
            .check(unsafe { (self.engine.api().tabledef_close)(handle) })
    }
}

impl Drop for TableDefinition {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            let _ = unsafe { (self.engine.api().tabledef_close)(self.handle) };
        }
    }
}
