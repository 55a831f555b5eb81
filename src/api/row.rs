//! Purpose: RAII wrapper for the engine's row handle with typed cell setters.
//! Invariants: A row is shaped by the definition it was created from (the
//! engine copies the schema); rows are reusable across inserts.
use std::ffi::CString;
use std::ptr;

use time::{Date, PrimitiveDateTime};

use crate::core::engine::{Engine, sys, wstr};
use crate::core::error::{Error, ErrorKind};
use crate::core::types::Interval;

use super::{ApiResult, TableDefinition, column_index};

pub struct Row {
    engine: &'static Engine,
    handle: *mut sys::dxe_row_t,
}

impl Row {
    pub fn new(definition: &TableDefinition) -> ApiResult<Self> {
        let engine = definition.engine();
        let mut handle = ptr::null_mut();
        engine.check(unsafe { (engine.api().row_create)(definition.raw()?, &mut handle) })?;
        Ok(Self { engine, handle })
    }

    pub(crate) fn raw(&self) -> ApiResult<*mut sys::dxe_row_t> {
        if self.handle.is_null() {
            return Err(Error::new(ErrorKind::BadHandle).with_message("row is closed"));
        }
        Ok(self.handle)
    }

    pub fn set_null(&mut self, index: usize) -> ApiResult<()> {
        let handle = self.raw()?;
        self.engine
            .check(unsafe { (self.engine.api().row_set_null)(handle, column_index(index)?) })
            .map_err(|err| err.with_column(index))
    }

    pub fn set_integer(&mut self, index: usize, value: i32) -> ApiResult<()> {
        let handle = self.raw()?;
        self.engine
            .check(unsafe { (self.engine.api().row_set_integer)(handle, column_index(index)?, value) })
            .map_err(|err| err.with_column(index))
    }

    pub fn set_long_integer(&mut self, index: usize, value: i64) -> ApiResult<()> {
        let handle = self.raw()?;
        self.engine
            .check(unsafe {
                (self.engine.api().row_set_long_integer)(handle, column_index(index)?, value)
            })
            .map_err(|err| err.with_column(index))
    }

    pub fn set_double(&mut self, index: usize, value: f64) -> ApiResult<()> {
        let handle = self.raw()?;
        self.engine
            .check(unsafe { (self.engine.api().row_set_double)(handle, column_index(index)?, value) })
            .map_err(|err| err.with_column(index))
    }

    pub fn set_boolean(&mut self, index: usize, value: bool) -> ApiResult<()> {
        let handle = self.raw()?;
        let raw = if value { 1 } else { 0 };
        self.engine
            .check(unsafe { (self.engine.api().row_set_boolean)(handle, column_index(index)?, raw) })
            .map_err(|err| err.with_column(index))
    }

    /// Wide string cell; compared with the column's collation.
    pub fn set_string(&mut self, index: usize, value: &str) -> ApiResult<()> {
        let handle = self.raw()?;
        let wide = wstr::to_wide(value)?;
        self.engine
            .check(unsafe {
                (self.engine.api().row_set_string)(handle, column_index(index)?, wide.as_ptr())
            })
            .map_err(|err| err.with_column(index))
    }

    /// Narrow string cell, bytes passed through unchanged.
    pub fn set_char_string(&mut self, index: usize, value: &str) -> ApiResult<()> {
        let handle = self.raw()?;
        let narrow = narrow_string(value)?;
        self.engine
            .check(unsafe {
                (self.engine.api().row_set_char_string)(handle, column_index(index)?, narrow.as_ptr())
            })
            .map_err(|err| err.with_column(index))
    }

    pub fn set_date(&mut self, index: usize, value: Date) -> ApiResult<()> {
        let handle = self.raw()?;
        self.engine
            .check(unsafe {
                (self.engine.api().row_set_date)(
                    handle,
                    column_index(index)?,
                    value.year(),
                    i32::from(u8::from(value.month())),
                    i32::from(value.day()),
                )
            })
            .map_err(|err| err.with_column(index))
    }

    pub fn set_date_time(&mut self, index: usize, value: PrimitiveDateTime) -> ApiResult<()> {
        let handle = self.raw()?;
        // The engine counts fractions in ten-thousandths of a second.
        let frac = (value.microsecond() / 100) as i32;
        self.engine
            .check(unsafe {
                (self.engine.api().row_set_date_time)(
                    handle,
                    column_index(index)?,
                    value.year(),
                    i32::from(u8::from(value.month())),
                    i32::from(value.day()),
                    i32::from(value.hour()),
                    i32::from(value.minute()),
                    i32::from(value.second()),
                    frac,
                )
            })
            .map_err(|err| err.with_column(index))
    }

    pub fn set_duration(&mut self, index: usize, value: Interval) -> ApiResult<()> {
        let handle = self.raw()?;
        self.engine
            .check(unsafe {
                (self.engine.api().row_set_duration)(
                    handle,
                    column_index(index)?,
                    value.days,
                    value.hours,
                    value.minutes,
                    value.seconds,
                    value.frac,
                )
            })
            .map_err(|err| err.with_column(index))
    }

    /// Geometry cell from well-known text.
    pub fn set_spatial(&mut self, index: usize, wkt: &str) -> ApiResult<()> {
        let handle = self.raw()?;
        let narrow = narrow_string(wkt)?;
        self.engine
            .check(unsafe {
                (self.engine.api().row_set_spatial)(handle, column_index(index)?, narrow.as_ptr())
            })
            .map_err(|err| err.with_column(index))
    }

    /// Releases the native handle. Safe to call more than once.
    pub fn close(&mut self) -> ApiResult<()> {
        if self.handle.is_null() {
            return Ok(());
        }
        let handle = std::mem::replace(&mut self.handle, ptr::null_mut());
        self.engine
            .check(unsafe { (self.engine.api().row_close)(handle) })
    }
}

impl Drop for Row {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            let _ = unsafe { (self.engine.api().row_close)(self.handle) };
        }
    }
}

fn narrow_string(value: &str) -> Result<CString, Error> {
    CString::new(value).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("string contains a null character")
            .with_source(err)
    })
}
