// Column types and collations as fixed ABI enumerations, plus the
// engine-shaped duration value. Raw codes are part of the engine contract;
// unknown codes coming back from the engine are errors, never panics.
use std::fmt;

use libc::c_int;

use crate::core::engine::sys;
use crate::core::error::{Error, ErrorKind};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColumnType {
    /// 8-byte integer column; set through either the i32 or i64 row setter.
    Integer,
    Double,
    Boolean,
    Date,
    DateTime,
    Duration,
    /// Narrow (single-byte) string, no collation semantics.
    CharString,
    /// Wide string, compared with the column's collation.
    UnicodeString,
    /// Geometry as well-known text.
    Spatial,
}

impl ColumnType {
    pub fn to_raw(self) -> c_int {
        match self {
            ColumnType::Integer => sys::DXE_TYPE_INTEGER,
            ColumnType::Double => sys::DXE_TYPE_DOUBLE,
            ColumnType::Boolean => sys::DXE_TYPE_BOOLEAN,
            ColumnType::Date => sys::DXE_TYPE_DATE,
            ColumnType::DateTime => sys::DXE_TYPE_DATETIME,
            ColumnType::Duration => sys::DXE_TYPE_DURATION,
            ColumnType::CharString => sys::DXE_TYPE_CHAR_STRING,
            ColumnType::UnicodeString => sys::DXE_TYPE_UNICODE_STRING,
            ColumnType::Spatial => sys::DXE_TYPE_SPATIAL,
        }
    }

    pub fn from_raw(raw: c_int) -> Result<Self, Error> {
        Ok(match raw {
            sys::DXE_TYPE_INTEGER => ColumnType::Integer,
            sys::DXE_TYPE_DOUBLE => ColumnType::Double,
            sys::DXE_TYPE_BOOLEAN => ColumnType::Boolean,
            sys::DXE_TYPE_DATE => ColumnType::Date,
            sys::DXE_TYPE_DATETIME => ColumnType::DateTime,
            sys::DXE_TYPE_DURATION => ColumnType::Duration,
            sys::DXE_TYPE_CHAR_STRING => ColumnType::CharString,
            sys::DXE_TYPE_UNICODE_STRING => ColumnType::UnicodeString,
            sys::DXE_TYPE_SPATIAL => ColumnType::Spatial,
            _ => {
                return Err(Error::new(ErrorKind::Unknown)
                    .with_message(format!("unknown column type code {raw}")));
            }
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Double => "double",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::DateTime => "datetime",
            ColumnType::Duration => "duration",
            ColumnType::CharString => "char-string",
            ColumnType::UnicodeString => "unicode-string",
            ColumnType::Spatial => "spatial",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named locale-aware comparison rules for wide string columns. The engine
/// applies the definition's default collation to string columns added
/// after the default is set, unless a column overrides it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Collation {
    Binary,
    Ar,
    Cs,
    Da,
    De,
    El,
    EnGb,
    EnUs,
    EnUsCi,
    Es,
    EsCiAi,
    Fi,
    FrCa,
    FrFr,
    FrFrCiAi,
    He,
    Hu,
    Is,
    It,
    Ja,
    JaJis,
    Ko,
    Lt,
    NlNl,
    Nn,
    Pl,
    PtBr,
    PtBrCiAi,
    PtPt,
    Root,
    Ru,
    Sl,
    SvFi,
    SvSe,
    Tr,
    Uk,
    Vi,
    ZhHansCn,
    ZhHantTw,
}

impl Collation {
    pub fn to_raw(self) -> c_int {
        match self {
            Collation::Binary => sys::DXE_COLLATION_BINARY,
            Collation::Ar => sys::DXE_COLLATION_AR,
            Collation::Cs => sys::DXE_COLLATION_CS,
            Collation::Da => sys::DXE_COLLATION_DA,
            Collation::De => sys::DXE_COLLATION_DE,
            Collation::El => sys::DXE_COLLATION_EL,
            Collation::EnGb => sys::DXE_COLLATION_EN_GB,
            Collation::EnUs => sys::DXE_COLLATION_EN_US,
            Collation::EnUsCi => sys::DXE_COLLATION_EN_US_CI,
            Collation::Es => sys::DXE_COLLATION_ES,
            Collation::EsCiAi => sys::DXE_COLLATION_ES_CI_AI,
            Collation::Fi => sys::DXE_COLLATION_FI,
            Collation::FrCa => sys::DXE_COLLATION_FR_CA,
            Collation::FrFr => sys::DXE_COLLATION_FR_FR,
            Collation::FrFrCiAi => sys::DXE_COLLATION_FR_FR_CI_AI,
            Collation::He => sys::DXE_COLLATION_HE,
            Collation::Hu => sys::DXE_COLLATION_HU,
            Collation::Is => sys::DXE_COLLATION_IS,
            Collation::It => sys::DXE_COLLATION_IT,
            Collation::Ja => sys::DXE_COLLATION_JA,
            Collation::JaJis => sys::DXE_COLLATION_JA_JIS,
            Collation::Ko => sys::DXE_COLLATION_KO,
            Collation::Lt => sys::DXE_COLLATION_LT,
            Collation::NlNl => sys::DXE_COLLATION_NL_NL,
            Collation::Nn => sys::DXE_COLLATION_NN,
            Collation::Pl => sys::DXE_COLLATION_PL,
            Collation::PtBr => sys::DXE_COLLATION_PT_BR,
            Collation::PtBrCiAi => sys::DXE_COLLATION_PT_BR_CI_AI,
            Collation::PtPt => sys::DXE_COLLATION_PT_PT,
            Collation::Root => sys::DXE_COLLATION_ROOT,
            Collation::Ru => sys::DXE_COLLATION_RU,
            Collation::Sl => sys::DXE_COLLATION_SL,
            Collation::SvFi => sys::DXE_COLLATION_SV_FI,
            Collation::SvSe => sys::DXE_COLLATION_SV_SE,
            Collation::Tr => sys::DXE_COLLATION_TR,
            Collation::Uk => sys::DXE_COLLATION_UK,
            Collation::Vi => sys::DXE_COLLATION_VI,
            Collation::ZhHansCn => sys::DXE_COLLATION_ZH_HANS_CN,
            Collation::ZhHantTw => sys::DXE_COLLATION_ZH_HANT_TW,
        }
    }

    pub fn from_raw(raw: c_int) -> Result<Self, Error> {
        Ok(match raw {
            sys::DXE_COLLATION_BINARY => Collation::Binary,
            sys::DXE_COLLATION_AR => Collation::Ar,
            sys::DXE_COLLATION_CS => Collation::Cs,
            sys::DXE_COLLATION_DA => Collation::Da,
            sys::DXE_COLLATION_DE => Collation::De,
            sys::DXE_COLLATION_EL => Collation::El,
            sys::DXE_COLLATION_EN_GB => Collation::EnGb,
            sys::DXE_COLLATION_EN_US => Collation::EnUs,
            sys::DXE_COLLATION_EN_US_CI => Collation::EnUsCi,
            sys::DXE_COLLATION_ES => Collation::Es,
            sys::DXE_COLLATION_ES_CI_AI => Collation::EsCiAi,
            sys::DXE_COLLATION_FI => Collation::Fi,
            sys::DXE_COLLATION_FR_CA => Collation::FrCa,
            sys::DXE_COLLATION_FR_FR => Collation::FrFr,
            sys::DXE_COLLATION_FR_FR_CI_AI => Collation::FrFrCiAi,
            sys::DXE_COLLATION_HE => Collation::He,
            sys::DXE_COLLATION_HU => Collation::Hu,
            sys::DXE_COLLATION_IS => Collation::Is,
            sys::DXE_COLLATION_IT => Collation::It,
            sys::DXE_COLLATION_JA => Collation::Ja,
            sys::DXE_COLLATION_JA_JIS => Collation::JaJis,
            sys::DXE_COLLATION_KO => Collation::Ko,
            sys::DXE_COLLATION_LT => Collation::Lt,
            sys::DXE_COLLATION_NL_NL => Collation::NlNl,
            sys::DXE_COLLATION_NN => Collation::Nn,
            sys::DXE_COLLATION_PL => Collation::Pl,
            sys::DXE_COLLATION_PT_BR => Collation::PtBr,
            sys::DXE_COLLATION_PT_BR_CI_AI => Collation::PtBrCiAi,
            sys::DXE_COLLATION_PT_PT => Collation::PtPt,
            sys::DXE_COLLATION_ROOT => Collation::Root,
            sys::DXE_COLLATION_RU => Collation::Ru,
            sys::DXE_COLLATION_SL => Collation::Sl,
            sys::DXE_COLLATION_SV_FI => Collation::SvFi,
            sys::DXE_COLLATION_SV_SE => Collation::SvSe,
            sys::DXE_COLLATION_TR => Collation::Tr,
            sys::DXE_COLLATION_UK => Collation::Uk,
            sys::DXE_COLLATION_VI => Collation::Vi,
            sys::DXE_COLLATION_ZH_HANS_CN => Collation::ZhHansCn,
            sys::DXE_COLLATION_ZH_HANT_TW => Collation::ZhHantTw,
            _ => {
                return Err(Error::new(ErrorKind::Unknown)
                    .with_message(format!("unknown collation code {raw}")));
            }
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Collation::Binary => "binary",
            Collation::Ar => "ar",
            Collation::Cs => "cs",
            Collation::Da => "da",
            Collation::De => "de",
            Collation::El => "el",
            Collation::EnGb => "en_GB",
            Collation::EnUs => "en_US",
            Collation::EnUsCi => "en_US_CI",
            Collation::Es => "es",
            Collation::EsCiAi => "es_CI_AI",
            Collation::Fi => "fi",
            Collation::FrCa => "fr_CA",
            Collation::FrFr => "fr_FR",
            Collation::FrFrCiAi => "fr_FR_CI_AI",
            Collation::He => "he",
            Collation::Hu => "hu",
            Collation::Is => "is",
            Collation::It => "it",
            Collation::Ja => "ja",
            Collation::JaJis => "ja_JIS",
            Collation::Ko => "ko",
            Collation::Lt => "lt",
            Collation::NlNl => "nl_NL",
            Collation::Nn => "nn",
            Collation::Pl => "pl",
            Collation::PtBr => "pt_BR",
            Collation::PtBrCiAi => "pt_BR_CI_AI",
            Collation::PtPt => "pt_PT",
            Collation::Root => "root",
            Collation::Ru => "ru",
            Collation::Sl => "sl",
            Collation::SvFi => "sv_FI",
            Collation::SvSe => "sv_SE",
            Collation::Tr => "tr",
            Collation::Uk => "uk",
            Collation::Vi => "vi",
            Collation::ZhHansCn => "zh_Hans_CN",
            Collation::ZhHantTw => "zh_Hant_TW",
        }
    }
}

impl fmt::Display for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Duration cell value in the engine's shape. `frac` counts
/// ten-thousandths of a second.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Interval {
    pub days: i32,
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
    pub frac: i32,
}

impl Interval {
    pub fn new(days: i32, hours: i32, minutes: i32, seconds: i32) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
            frac: 0,
        }
    }

    pub fn with_frac(mut self, frac: i32) -> Self {
        self.frac = frac;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Collation, ColumnType, Interval};
    use crate::core::error::ErrorKind;

    #[test]
    fn column_type_codes_round_trip() {
        let types = [
            ColumnType::Integer,
            ColumnType::Double,
            ColumnType::Boolean,
            ColumnType::Date,
            ColumnType::DateTime,
            ColumnType::Duration,
            ColumnType::CharString,
            ColumnType::UnicodeString,
            ColumnType::Spatial,
        ];
        for ty in types {
            assert_eq!(ColumnType::from_raw(ty.to_raw()).expect("known code"), ty);
        }
    }

    #[test]
    fn unknown_column_type_code_is_an_error() {
        let err = ColumnType::from_raw(999).expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert!(err.message().expect("message").contains("999"));
    }

    #[test]
    fn collation_codes_round_trip() {
        for raw in 0..=38 {
            let collation = Collation::from_raw(raw).expect("known code");
            assert_eq!(collation.to_raw(), raw);
        }
    }

    #[test]
    fn unknown_collation_code_is_an_error() {
        let err = Collation::from_raw(39).expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[test]
    fn collation_names_are_locale_tags() {
        assert_eq!(Collation::EnUsCi.as_str(), "en_US_CI");
        assert_eq!(Collation::ZhHansCn.as_str(), "zh_Hans_CN");
        assert_eq!(Collation::Binary.as_str(), "binary");
    }

    #[test]
    fn interval_builder_sets_frac() {
        let interval = Interval::new(1, 2, 3, 4).with_frac(5000);
        assert_eq!(interval.days, 1);
        assert_eq!(interval.frac, 5000);
    }
}
