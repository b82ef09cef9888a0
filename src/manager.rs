pub mod nfc_manager;

pub use nfc_manager::{
    NfcManagerAction, NfcManagerReconcileMessage, NfcManagerReconciler, RustNfcManager,
};
