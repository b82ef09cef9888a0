use crate::{ndef_type::NdefType, record::NdefRecord};

/// An ordered list of records, as read from or written to a tag
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, uniffi::Record)]
pub struct NdefMessage {
    pub records: Vec<NdefRecord>,
}

impl NdefMessage {
    pub fn new(records: Vec<NdefRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&NdefRecord> {
        self.records.first()
    }

    /// Has at least one record and the first one is not an empty record
    pub fn has_content(&self) -> bool {
        self.first()
            .is_some_and(|record| record.type_name_format != NdefType::Empty)
    }
}

impl From<Vec<NdefRecord>> for NdefMessage {
    fn from(records: Vec<NdefRecord>) -> Self {
        Self::new(records)
    }
}

impl IntoIterator for NdefMessage {
    type Item = NdefRecord;
    type IntoIter = std::vec::IntoIter<NdefRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a NdefMessage {
    type Item = &'a NdefRecord;
    type IntoIter = std::slice::Iter<'a, NdefRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[uniffi::export]
fn ndef_message_is_equal(lhs: NdefMessage, rhs: NdefMessage) -> bool {
    lhs == rhs
}
