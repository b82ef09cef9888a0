pub mod result_ext;

pub use result_ext::ResultExt;
