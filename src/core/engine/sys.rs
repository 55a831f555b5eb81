// Raw ABI surface of the extract engine shared library.
//
// The engine is closed source and reached only through this symbol table;
// every handle is an opaque pointer owned by the engine. Symbols are
// resolved eagerly at load time so a missing function surfaces immediately
// instead of mid-run.
#![allow(non_camel_case_types)]

use libc::{c_char, c_int};
use libloading::Library;

/// Engine strings are null-terminated UTF-16 code units.
pub type WChar = u16;

pub const DXE_RESULT_SUCCESS: c_int = 0;

pub const DXE_TYPE_INTEGER: c_int = 7;
pub const DXE_TYPE_DOUBLE: c_int = 10;
pub const DXE_TYPE_BOOLEAN: c_int = 11;
pub const DXE_TYPE_DATE: c_int = 12;
pub const DXE_TYPE_DATETIME: c_int = 13;
pub const DXE_TYPE_DURATION: c_int = 14;
pub const DXE_TYPE_CHAR_STRING: c_int = 15;
pub const DXE_TYPE_UNICODE_STRING: c_int = 16;
pub const DXE_TYPE_SPATIAL: c_int = 17;

pub const DXE_COLLATION_BINARY: c_int = 0;
pub const DXE_COLLATION_AR: c_int = 1;
pub const DXE_COLLATION_CS: c_int = 2;
pub const DXE_COLLATION_DA: c_int = 3;
pub const DXE_COLLATION_DE: c_int = 4;
pub const DXE_COLLATION_EL: c_int = 5;
pub const DXE_COLLATION_EN_GB: c_int = 6;
pub const DXE_COLLATION_EN_US: c_int = 7;
pub const DXE_COLLATION_EN_US_CI: c_int = 8;
pub const DXE_COLLATION_ES: c_int = 9;
pub const DXE_COLLATION_ES_CI_AI: c_int = 10;
pub const DXE_COLLATION_FI: c_int = 11;
pub const DXE_COLLATION_FR_CA: c_int = 12;
pub const DXE_COLLATION_FR_FR: c_int = 13;
pub const DXE_COLLATION_FR_FR_CI_AI: c_int = 14;
pub const DXE_COLLATION_HE: c_int = 15;
pub const DXE_COLLATION_HU: c_int = 16;
pub const DXE_COLLATION_IS: c_int = 17;
pub const DXE_COLLATION_IT: c_int = 18;
pub const DXE_COLLATION_JA: c_int = 19;
pub const DXE_COLLATION_JA_JIS: c_int = 20;
pub const DXE_COLLATION_KO: c_int = 21;
pub const DXE_COLLATION_LT: c_int = 22;
pub const DXE_COLLATION_NL_NL: c_int = 23;
pub const DXE_COLLATION_NN: c_int = 24;
pub const DXE_COLLATION_PL: c_int = 25;
pub const DXE_COLLATION_PT_BR: c_int = 26;
pub const DXE_COLLATION_PT_BR_CI_AI: c_int = 27;
pub const DXE_COLLATION_PT_PT: c_int = 28;
pub const DXE_COLLATION_ROOT: c_int = 29;
pub const DXE_COLLATION_RU: c_int = 30;
pub const DXE_COLLATION_SL: c_int = 31;
pub const DXE_COLLATION_SV_FI: c_int = 32;
pub const DXE_COLLATION_SV_SE: c_int = 33;
pub const DXE_COLLATION_TR: c_int = 34;
pub const DXE_COLLATION_UK: c_int = 35;
pub const DXE_COLLATION_VI: c_int = 36;
pub const DXE_COLLATION_ZH_HANS_CN: c_int = 37;
pub const DXE_COLLATION_ZH_HANT_TW: c_int = 38;

#[repr(C)]
pub struct dxe_extract_t {
    _private: [u8; 0],
}

#[repr(C)]
pub struct dxe_table_t {
    _private: [u8; 0],
}

#[repr(C)]
pub struct dxe_tabledef_t {
    _private: [u8; 0],
}

#[repr(C)]
pub struct dxe_row_t {
    _private: [u8; 0],
}

/// Resolved engine entry points. Field order follows the ABI header.
pub struct Api {
    pub init: unsafe extern "C" fn() -> c_int,
    pub version: unsafe extern "C" fn() -> *const c_char,
    pub last_error_message: unsafe extern "C" fn() -> *const WChar,
    pub string_free: unsafe extern "C" fn(*mut WChar),

    pub extract_create: unsafe extern "C" fn(*const WChar, *mut *mut dxe_extract_t) -> c_int,
    pub extract_open: unsafe extern "C" fn(*const WChar, *mut *mut dxe_extract_t) -> c_int,
    pub extract_add_table: unsafe extern "C" fn(
        *mut dxe_extract_t,
        *const WChar,
        *mut dxe_tabledef_t,
        *mut *mut dxe_table_t,
    ) -> c_int,
    pub extract_open_table:
        unsafe extern "C" fn(*mut dxe_extract_t, *const WChar, *mut *mut dxe_table_t) -> c_int,
    pub extract_has_table:
        unsafe extern "C" fn(*mut dxe_extract_t, *const WChar, *mut c_int) -> c_int,
    pub extract_close: unsafe extern "C" fn(*mut dxe_extract_t) -> c_int,

    pub table_insert: unsafe extern "C" fn(*mut dxe_table_t, *mut dxe_row_t) -> c_int,
    pub table_get_definition:
        unsafe extern "C" fn(*mut dxe_table_t, *mut *mut dxe_tabledef_t) -> c_int,
    pub table_close: unsafe extern "C" fn(*mut dxe_table_t) -> c_int,

    pub tabledef_create: unsafe extern "C" fn(*mut *mut dxe_tabledef_t) -> c_int,
    pub tabledef_close: unsafe extern "C" fn(*mut dxe_tabledef_t) -> c_int,
    pub tabledef_set_default_collation:
        unsafe extern "C" fn(*mut dxe_tabledef_t, c_int) -> c_int,
    pub tabledef_get_default_collation:
        unsafe extern "C" fn(*mut dxe_tabledef_t, *mut c_int) -> c_int,
    pub tabledef_add_column:
        unsafe extern "C" fn(*mut dxe_tabledef_t, *const WChar, c_int) -> c_int,
    pub tabledef_add_column_with_collation:
        unsafe extern "C" fn(*mut dxe_tabledef_t, *const WChar, c_int, c_int) -> c_int,
    pub tabledef_get_column_count:
        unsafe extern "C" fn(*mut dxe_tabledef_t, *mut c_int) -> c_int,
    pub tabledef_get_column_name:
        unsafe extern "C" fn(*mut dxe_tabledef_t, c_int, *mut *mut WChar) -> c_int,
    pub tabledef_get_column_type:
        unsafe extern "C" fn(*mut dxe_tabledef_t, c_int, *mut c_int) -> c_int,
    pub tabledef_get_column_collation:
        unsafe extern "C" fn(*mut dxe_tabledef_t, c_int, *mut c_int) -> c_int,

    pub row_create: unsafe extern "C" fn(*mut dxe_tabledef_t, *mut *mut dxe_row_t) -> c_int,
    pub row_close: unsafe extern "C" fn(*mut dxe_row_t) -> c_int,
    pub row_set_null: unsafe extern "C" fn(*mut dxe_row_t, c_int) -> c_int,
    pub row_set_integer: unsafe extern "C" fn(*mut dxe_row_t, c_int, i32) -> c_int,
    pub row_set_long_integer: unsafe extern "C" fn(*mut dxe_row_t, c_int, i64) -> c_int,
    pub row_set_double: unsafe extern "C" fn(*mut dxe_row_t, c_int, f64) -> c_int,
    pub row_set_boolean: unsafe extern "C" fn(*mut dxe_row_t, c_int, c_int) -> c_int,
    pub row_set_string: unsafe extern "C" fn(*mut dxe_row_t, c_int, *const WChar) -> c_int,
    pub row_set_char_string:
        unsafe extern "C" fn(*mut dxe_row_t, c_int, *const c_char) -> c_int,
    pub row_set_date:
        unsafe extern "C" fn(*mut dxe_row_t, c_int, c_int, c_int, c_int) -> c_int,
    pub row_set_date_time: unsafe extern "C" fn(
        *mut dxe_row_t,
        c_int,
        c_int,
        c_int,
        c_int,
        c_int,
        c_int,
        c_int,
        c_int,
    ) -> c_int,
    pub row_set_duration: unsafe extern "C" fn(
        *mut dxe_row_t,
        c_int,
        c_int,
        c_int,
        c_int,
        c_int,
        c_int,
    ) -> c_int,
    pub row_set_spatial: unsafe extern "C" fn(*mut dxe_row_t, c_int, *const c_char) -> c_int,
}

macro_rules! sym {
    ($lib:expr, $name:literal) => {
        unsafe { *$lib.get(concat!($name, "\0").as_bytes())? }
    };
}

impl Api {
    pub fn load(lib: &Library) -> Result<Api, libloading::Error> {
        Ok(Api {
            init: sym!(lib, "dxe_init"),
            version: sym!(lib, "dxe_version"),
            last_error_message: sym!(lib, "dxe_last_error_message"),
            string_free: sym!(lib, "dxe_string_free"),

            extract_create: sym!(lib, "dxe_extract_create"),
            extract_open: sym!(lib, "dxe_extract_open"),
            extract_add_table: sym!(lib, "dxe_extract_add_table"),
            extract_open_table: sym!(lib, "dxe_extract_open_table"),
            extract_has_table: sym!(lib, "dxe_extract_has_table"),
            extract_close: sym!(lib, "dxe_extract_close"),

            table_insert: sym!(lib, "dxe_table_insert"),
            table_get_definition: sym!(lib, "dxe_table_get_definition"),
            table_close: sym!(lib, "dxe_table_close"),

            tabledef_create: sym!(lib, "dxe_tabledef_create"),
            tabledef_close: sym!(lib, "dxe_tabledef_close"),
            tabledef_set_default_collation: sym!(lib, "dxe_tabledef_set_default_collation"),
            tabledef_get_default_collation: sym!(lib, "dxe_tabledef_get_default_collation"),
            tabledef_add_column: sym!(lib, "dxe_tabledef_add_column"),
            tabledef_add_column_with_collation: sym!(lib, "dxe_tabledef_add_column_with_collation"),
            tabledef_get_column_count: sym!(lib, "dxe_tabledef_get_column_count"),
            tabledef_get_column_name: sym!(lib, "dxe_tabledef_get_column_name"),
            tabledef_get_column_type: sym!(lib, "dxe_tabledef_get_column_type"),
            tabledef_get_column_collation: sym!(lib, "dxe_tabledef_get_column_collation"),

            row_create: sym!(lib, "dxe_row_create"),
            row_close: sym!(lib, "dxe_row_close"),
            row_set_null: sym!(lib, "dxe_row_set_null"),
            row_set_integer: sym!(lib, "dxe_row_set_integer"),
            row_set_long_integer: sym!(lib, "dxe_row_set_long_integer"),
            row_set_double: sym!(lib, "dxe_row_set_double"),
            row_set_boolean: sym!(lib, "dxe_row_set_boolean"),
            row_set_string: sym!(lib, "dxe_row_set_string"),
            row_set_char_string: sym!(lib, "dxe_row_set_char_string"),
            row_set_date: sym!(lib, "dxe_row_set_date"),
            row_set_date_time: sym!(lib, "dxe_row_set_date_time"),
            row_set_duration: sym!(lib, "dxe_row_set_duration"),
            row_set_spatial: sym!(lib, "dxe_row_set_spatial"),
        })
    }
}
