/// Bindings generator for the taglink library
///
/// Swift goes through the swift specific generator (modulemap + headers for the
/// xcframework), anything mentioning kotlin goes through the regular one
fn main() {
    let wants_kotlin = std::env::args()
        .skip(1)
        .any(|arg| arg.to_ascii_lowercase().contains("kotlin"));

    match wants_kotlin {
        true => uniffi::uniffi_bindgen_main(),
        false => uniffi::uniffi_bindgen_swift(),
    }
}
