use derive_more::Display;

/// Type name format of a record, the low 3 bits of the record header
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, Display, uniffi::Enum)]
pub enum NdefType {
    #[display("Empty payload")]
    Empty,
    #[display("NFC Well Known type")]
    WellKnown,
    #[display("Media type")]
    Mime,
    #[display("Absolute URI type")]
    AbsoluteUri,
    #[display("NFC External type")]
    External,
    #[display("Unknown type")]
    Unknown,
    #[display("Unchanged type")]
    Unchanged,
    #[display("Reserved type")]
    Reserved,
}

impl NdefType {
    pub fn from_tnf(tnf: u8) -> Self {
        match tnf & 0b111 {
            0 => Self::Empty,
            1 => Self::WellKnown,
            2 => Self::Mime,
            3 => Self::AbsoluteUri,
            4 => Self::External,
            5 => Self::Unknown,
            6 => Self::Unchanged,
            _ => Self::Reserved,
        }
    }

    pub fn tnf(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::WellKnown => 1,
            Self::Mime => 2,
            Self::AbsoluteUri => 3,
            Self::External => 4,
            Self::Unknown => 5,
            Self::Unchanged => 6,
            Self::Reserved => 7,
        }
    }
}
