//! Purpose: Define the stable public Rust surface over the extract engine.
//! Exports: Wrapper types (`Extract`, `Table`, `TableDefinition`, `Row`) and
//! the shared error/type vocabulary.
//! Role: Safe RAII layer; one wrapper owns exactly one native handle.
//! Invariants: Every operation forwards to a single engine call and surfaces
//! the engine status unchanged; the wrappers add no policy of their own.
//! Invariants: Internal FFI modules are reachable only through this surface.

mod definition;
mod extract;
mod row;
mod table;

use libc::c_int;

pub use crate::core::engine::{self, Engine, LIBRARY_ENV, preload};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::types::{Collation, ColumnType, Interval};
pub use definition::TableDefinition;
pub use extract::Extract;
pub use row::Row;
pub use table::Table;

pub type ApiResult<T> = Result<T, Error>;

// Column numbers are fixed by column order in the definition; the ABI
// addresses them as c_int.
fn column_index(index: usize) -> Result<c_int, Error> {
    c_int::try_from(index).map_err(|_| {
        Error::new(ErrorKind::BadIndex)
            .with_message("column index exceeds the ABI range")
            .with_column(index)
    })
}
