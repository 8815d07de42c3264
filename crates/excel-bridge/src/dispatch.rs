//! Minimal late-bound COM helpers for driving Excel through IDispatch.
//!
//! Only the pieces the bridge actually needs are wrapped: property get/set,
//! method invocation, and indexed access (e.g. `Workbooks("name")`). All
//! calls resolve DISPIDs by name at runtime, like VBScript late binding.

#![cfg(windows)]

use std::mem::ManuallyDrop;
use std::ptr;

use windows::{
    core::{BSTR, GUID, HSTRING, PCWSTR},
    Win32::{
        Foundation::{DISP_E_EXCEPTION, VARIANT_BOOL},
        Globalization::GetSystemDefaultLCID,
        System::{
            Com::{
                CLSIDFromProgID, CoCreateInstance, IDispatch, CLSCTX_LOCAL_SERVER,
                DISPATCH_FLAGS, DISPATCH_METHOD, DISPATCH_PROPERTYGET, DISPATCH_PROPERTYPUT,
                DISPPARAMS, EXCEPINFO,
            },
            Ole::DISPID_PROPERTYPUT,
            Variant::{VARIANT, VT_BOOL, VT_BSTR, VT_DISPATCH, VT_EMPTY, VT_I4, VT_NULL},
        },
    },
};

/// Errors from late-bound COM calls.
///
/// `Exception` carries the EXCEPINFO detail Excel fills in for automation
/// failures (e.g. "Open method of Workbooks class failed"); everything else
/// wraps the raw HRESULT.
#[derive(Debug, thiserror::Error)]
pub enum ComError {
    #[error("no COM class registered for '{progid}': {source}")]
    UnknownProgId {
        progid: String,
        source: windows::core::Error,
    },

    #[error("failed to create '{progid}': {source}")]
    CreateFailed {
        progid: String,
        source: windows::core::Error,
    },

    #[error("'{member}' is not a member of this object: {source}")]
    UnknownMember {
        member: String,
        source: windows::core::Error,
    },

    #[error("COM exception in '{member}': {description} (from {application})")]
    Exception {
        member: String,
        description: String,
        application: String,
    },

    #[error("'{member}' failed: {source}")]
    CallFailed {
        member: String,
        source: windows::core::Error,
    },

    #[error("'{member}' returned empty/null instead of an object")]
    NullObject { member: String },

    #[error("'{member}' returned VT={vt}, expected an object")]
    NotAnObject { member: String, vt: u16 },
}

// -- VARIANT construction --
// VARIANT wraps its inner unions in ManuallyDrop; fields are set with
// ptr::write to avoid the DerefMut lint.

/// Create a VARIANT containing a bool.
pub fn variant_bool(val: bool) -> VARIANT {
    unsafe {
        let mut v = VARIANT::default();
        let inner = &mut *v.Anonymous.Anonymous;
        ptr::write(&mut inner.vt, VT_BOOL);
        ptr::write(
            &mut inner.Anonymous.boolVal,
            VARIANT_BOOL(if val { -1 } else { 0 }),
        );
        v
    }
}

/// Create a VARIANT containing an i32.
pub fn variant_i32(val: i32) -> VARIANT {
    unsafe {
        let mut v = VARIANT::default();
        let inner = &mut *v.Anonymous.Anonymous;
        ptr::write(&mut inner.vt, VT_I4);
        ptr::write(&mut inner.Anonymous.lVal, val);
        v
    }
}

/// Create a VARIANT containing a BSTR string.
pub fn variant_str(val: &str) -> VARIANT {
    unsafe {
        let bstr = BSTR::from(val);
        let mut v = VARIANT::default();
        let inner = &mut *v.Anonymous.Anonymous;
        ptr::write(&mut inner.vt, VT_BSTR);
        ptr::write(&mut inner.Anonymous.bstrVal, ManuallyDrop::new(bstr));
        v
    }
}

/// A wrapper around an IDispatch COM object providing ergonomic access.
#[derive(Clone)]
pub struct DispatchObject {
    inner: IDispatch,
}

impl DispatchObject {
    /// Create a COM object from a ProgID string (e.g., "Excel.Application").
    pub fn create_from_progid(progid: &str) -> Result<Self, ComError> {
        let clsid = unsafe { CLSIDFromProgID(&HSTRING::from(progid)) }.map_err(|source| {
            ComError::UnknownProgId {
                progid: progid.to_string(),
                source,
            }
        })?;
        let inner: IDispatch = unsafe { CoCreateInstance(&clsid, None, CLSCTX_LOCAL_SERVER) }
            .map_err(|source| ComError::CreateFailed {
                progid: progid.to_string(),
                source,
            })?;
        Ok(Self { inner })
    }

    /// Get a property value. Equivalent to VB's `obj.Member`.
    pub fn get_property(&self, member: &str) -> Result<VARIANT, ComError> {
        self.invoke_raw(member, DISPATCH_PROPERTYGET, &DISPPARAMS::default())
    }

    /// Set a property value. Equivalent to VB's `obj.Member = value`.
    pub fn set_property(&self, member: &str, value: VARIANT) -> Result<(), ComError> {
        let mut args = [value];
        let mut named = [DISPID_PROPERTYPUT];
        let params = DISPPARAMS {
            rgvarg: args.as_mut_ptr(),
            rgdispidNamedArgs: named.as_mut_ptr(),
            cArgs: 1,
            cNamedArgs: 1,
        };
        self.invoke_raw(member, DISPATCH_PROPERTYPUT, &params)?;
        Ok(())
    }

    /// Invoke a method with arguments in natural order.
    pub fn invoke_method(&self, member: &str, args: &[VARIANT]) -> Result<VARIANT, ComError> {
        // DISPPARAMS wants the arguments reversed
        let mut reversed: Vec<VARIANT> = args.iter().rev().cloned().collect();
        let params = DISPPARAMS {
            rgvarg: if reversed.is_empty() {
                ptr::null_mut()
            } else {
                reversed.as_mut_ptr()
            },
            rgdispidNamedArgs: ptr::null_mut(),
            cArgs: reversed.len() as u32,
            cNamedArgs: 0,
        };
        self.invoke_raw(member, DISPATCH_METHOD, &params)
    }

    /// Get a child object (property that returns an IDispatch).
    pub fn get_child(&self, member: &str) -> Result<DispatchObject, ComError> {
        object_from(self.get_property(member)?, member)
    }

    /// Invoke a method and extract the returned IDispatch object.
    pub fn invoke_child(&self, member: &str, args: &[VARIANT]) -> Result<DispatchObject, ComError> {
        object_from(self.invoke_method(member, args)?, member)
    }

    /// Get an indexed property (e.g., `Worksheets(1)` or `Workbooks("x")`).
    pub fn get_indexed(&self, member: &str, index: &VARIANT) -> Result<DispatchObject, ComError> {
        let mut args = [index.clone()];
        let params = DISPPARAMS {
            rgvarg: args.as_mut_ptr(),
            rgdispidNamedArgs: ptr::null_mut(),
            cArgs: 1,
            cNamedArgs: 0,
        };
        object_from(
            self.invoke_raw(member, DISPATCH_PROPERTYGET, &params)?,
            member,
        )
    }

    /// Look up the DISPID for a member name.
    fn dispid(&self, member: &str) -> Result<i32, ComError> {
        let wide: Vec<u16> = member.encode_utf16().chain(std::iter::once(0)).collect();
        let names = [PCWSTR(wide.as_ptr())];
        let mut dispid = 0i32;
        unsafe {
            self.inner
                .GetIDsOfNames(
                    &GUID::zeroed(),
                    names.as_ptr(),
                    1,
                    GetSystemDefaultLCID(),
                    &mut dispid,
                )
                .map_err(|source| ComError::UnknownMember {
                    member: member.to_string(),
                    source,
                })?;
        }
        Ok(dispid)
    }

    /// One IDispatch::Invoke call, shared by every access style.
    fn invoke_raw(
        &self,
        member: &str,
        flags: DISPATCH_FLAGS,
        params: &DISPPARAMS,
    ) -> Result<VARIANT, ComError> {
        let dispid = self.dispid(member)?;
        let mut result = VARIANT::default();
        let mut except = EXCEPINFO::default();
        unsafe {
            self.inner
                .Invoke(
                    dispid,
                    &GUID::zeroed(),
                    GetSystemDefaultLCID(),
                    flags,
                    params,
                    Some(&mut result),
                    Some(&mut except),
                    None,
                )
                .map_err(|e| invoke_error(e, &except, member))?;
        }
        Ok(result)
    }
}

/// Extract an IDispatch from a VARIANT, with a descriptive error.
fn object_from(variant: VARIANT, member: &str) -> Result<DispatchObject, ComError> {
    unsafe {
        let inner = &variant.Anonymous.Anonymous;
        if inner.vt == VT_DISPATCH {
            // pdispVal is ManuallyDrop<Option<IDispatch>>
            let disp: &Option<IDispatch> = &inner.Anonymous.pdispVal;
            return disp.clone().map(|inner| DispatchObject { inner }).ok_or(
                ComError::NullObject {
                    member: member.to_string(),
                },
            );
        }
        if inner.vt == VT_EMPTY || inner.vt == VT_NULL {
            Err(ComError::NullObject {
                member: member.to_string(),
            })
        } else {
            Err(ComError::NotAnObject {
                member: member.to_string(),
                vt: inner.vt.0,
            })
        }
    }
}

/// Classify an Invoke failure, pulling EXCEPINFO detail when Excel raised.
fn invoke_error(err: windows::core::Error, except: &EXCEPINFO, member: &str) -> ComError {
    if err.code() == DISP_E_EXCEPTION {
        ComError::Exception {
            member: member.to_string(),
            description: if except.bstrDescription.is_empty() {
                "(no description)".to_string()
            } else {
                except.bstrDescription.to_string()
            },
            application: if except.bstrSource.is_empty() {
                "(unknown)".to_string()
            } else {
                except.bstrSource.to_string()
            },
        }
    } else {
        ComError::CallFailed {
            member: member.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exception_display_carries_excel_detail() {
        let err = ComError::Exception {
            member: "Open".to_string(),
            description: "Open method of Workbooks class failed".to_string(),
            application: "Microsoft Excel".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "COM exception in 'Open': Open method of Workbooks class failed (from Microsoft Excel)"
        );
    }
}
