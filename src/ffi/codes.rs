//! Native status codes returned by every mutating engine call.

use std::fmt;

/// Raw status code as returned over the C ABI.
///
/// The known set mirrors `remixapi_ErrorCode`, plus a family of
/// HRESULT-style graphics-capability codes (`0x8896xxxx`) that are surfaced
/// verbatim, never reinterpreted. Unknown values are preserved as-is.
#[repr(transparent)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReturnCode(pub u32);

impl ReturnCode {
    pub const SUCCESS: ReturnCode = ReturnCode(0);
    pub const GENERAL_FAILURE: ReturnCode = ReturnCode(1);
    /// The engine's `LoadLibrary` of the runtime DLL failed.
    pub const LOAD_LIBRARY_FAILURE: ReturnCode = ReturnCode(2);
    pub const INVALID_ARGUMENTS: ReturnCode = ReturnCode(3);
    /// `remixInitialize` could not be resolved in the DLL.
    pub const GET_PROC_ADDRESS_FAILURE: ReturnCode = ReturnCode(4);
    /// CreateD3D9 / RegisterD3D9Device can be called only once.
    pub const ALREADY_EXISTS: ReturnCode = ReturnCode(5);
    pub const REGISTERING_NON_REMIX_D3D9_DEVICE: ReturnCode = ReturnCode(6);
    /// RegisterD3D9Device was not called on the engine side.
    pub const REMIX_DEVICE_WAS_NOT_REGISTERED: ReturnCode = ReturnCode(7);
    pub const INCOMPATIBLE_VERSION: ReturnCode = ReturnCode(8);
    pub const SET_DLL_DIRECTORY_FAILURE: ReturnCode = ReturnCode(9);
    pub const GET_FULL_PATH_NAME_FAILURE: ReturnCode = ReturnCode(10);
    pub const NOT_INITIALIZED: ReturnCode = ReturnCode(11);
    // HRESULT-encoded codes from the D3D9 bridge, _FACD3D = 0x896.
    pub const HRESULT_NO_REQUIRED_GPU_FEATURES: ReturnCode = ReturnCode(0x8896_0001);
    pub const HRESULT_DRIVER_VERSION_BELOW_MINIMUM: ReturnCode = ReturnCode(0x8896_0002);
    pub const HRESULT_DXVK_INSTANCE_EXTENSION_FAIL: ReturnCode = ReturnCode(0x8896_0003);
    pub const HRESULT_VK_CREATE_INSTANCE_FAIL: ReturnCode = ReturnCode(0x8896_0004);
    pub const HRESULT_VK_CREATE_DEVICE_FAIL: ReturnCode = ReturnCode(0x8896_0005);
    pub const HRESULT_GRAPHICS_QUEUE_FAMILY_MISSING: ReturnCode = ReturnCode(0x8896_0006);

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// Symbolic name of the code, for diagnostics.
    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "SUCCESS",
            1 => "GENERAL_FAILURE",
            2 => "LOAD_LIBRARY_FAILURE",
            3 => "INVALID_ARGUMENTS",
            4 => "GET_PROC_ADDRESS_FAILURE",
            5 => "ALREADY_EXISTS",
            6 => "REGISTERING_NON_REMIX_D3D9_DEVICE",
            7 => "REMIX_DEVICE_WAS_NOT_REGISTERED",
            8 => "INCOMPATIBLE_VERSION",
            9 => "SET_DLL_DIRECTORY_FAILURE",
            10 => "GET_FULL_PATH_NAME_FAILURE",
            11 => "NOT_INITIALIZED",
            0x8896_0001 => "HRESULT_NO_REQUIRED_GPU_FEATURES",
            0x8896_0002 => "HRESULT_DRIVER_VERSION_BELOW_MINIMUM",
            0x8896_0003 => "HRESULT_DXVK_INSTANCE_EXTENSION_FAIL",
            0x8896_0004 => "HRESULT_VK_CREATE_INSTANCE_FAIL",
            0x8896_0005 => "HRESULT_VK_CREATE_DEVICE_FAIL",
            0x8896_0006 => "HRESULT_GRAPHICS_QUEUE_FAMILY_MISSING",
            _ => "UNKNOWN",
        }
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:X})", self.name(), self.0)
    }
}
