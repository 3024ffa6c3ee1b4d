use std::path::Path;

use rtx_remix::ffi::{ReturnCode, StructType, WideString};

#[test]
fn only_zero_is_success() {
    assert!(ReturnCode::SUCCESS.is_success());
    assert!(!ReturnCode::GENERAL_FAILURE.is_success());
    assert!(!ReturnCode::ALREADY_EXISTS.is_success());
    assert!(!ReturnCode::HRESULT_VK_CREATE_DEVICE_FAIL.is_success());
}

#[test]
fn known_codes_format_with_name_and_hex_value() {
    assert_eq!(ReturnCode::SUCCESS.to_string(), "SUCCESS (0x0)");
    assert_eq!(
        ReturnCode::REMIX_DEVICE_WAS_NOT_REGISTERED.to_string(),
        "REMIX_DEVICE_WAS_NOT_REGISTERED (0x7)"
    );
    assert_eq!(
        ReturnCode::HRESULT_NO_REQUIRED_GPU_FEATURES.to_string(),
        "HRESULT_NO_REQUIRED_GPU_FEATURES (0x88960001)"
    );
}

#[test]
fn unknown_codes_still_format() {
    let code = ReturnCode(0x4242);
    assert_eq!(code.name(), "UNKNOWN");
    assert_eq!(code.to_string(), "UNKNOWN (0x4242)");
}

#[test]
fn record_tags_match_the_abi() {
    assert_eq!(StructType::MeshInfo as i32, 12);
    assert_eq!(StructType::MaterialInfoOpaqueExt as i32, 5);
    assert_eq!(StructType::LightInfoSphereExt as i32, 11);
    assert_eq!(StructType::StartupInfo as i32, 22);
    assert_eq!(StructType::PresentInfo as i32, 23);
}

#[test]
fn wide_strings_are_utf16_and_nul_terminated() {
    let s = WideString::new(Path::new("ab"));
    assert_eq!(s.units(), &[u16::from(b'a'), u16::from(b'b'), 0]);
    assert!(!s.as_ptr().is_null());

    let empty = WideString::new(Path::new(""));
    assert_eq!(empty.units(), &[0]);
}
