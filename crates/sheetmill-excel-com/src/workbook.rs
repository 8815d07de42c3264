//! Workbook handle — operations on one open workbook via the bridge.

use std::path::Path;

use excel_bridge_protocol::{FixedFormat, SheetRef};

use crate::bridge::{linux_to_wine_path, BridgeError, ExcelBridge};

/// A handle to an open workbook in the Excel COM bridge.
///
/// Dropping the handle closes the COM-side workbook without saving, so a
/// failed operation cannot leave a document open in the background. Call
/// [`Workbook::close`] to control saving and observe close errors.
pub struct Workbook<'a> {
    bridge: &'a ExcelBridge,
    handle: u64,
    closed: bool,
}

impl<'a> Workbook<'a> {
    pub(crate) fn new(bridge: &'a ExcelBridge, handle: u64) -> Self {
        Self {
            bridge,
            handle,
            closed: false,
        }
    }

    /// Get the internal handle ID.
    pub fn handle(&self) -> u64 {
        self.handle
    }

    /// Refresh all external data connections of this workbook.
    pub fn refresh_all(&self) -> Result<(), BridgeError> {
        self.bridge.refresh_all(self.handle)
    }

    /// Export one worksheet to a fixed page format.
    ///
    /// `sheet: None` exports the active sheet. `output` is a Linux path —
    /// it is converted to a WINE path automatically.
    pub fn export_fixed_format(
        &self,
        sheet: Option<SheetRef>,
        format: FixedFormat,
        output: &Path,
    ) -> Result<(), BridgeError> {
        let wine_path = linux_to_wine_path(output);
        self.bridge
            .export_fixed_format(self.handle, sheet, format, &wine_path)
    }

    /// Close the workbook, saving changes if `save` is true.
    pub fn close(mut self, save: bool) -> Result<(), BridgeError> {
        self.closed = true;
        self.bridge.close_workbook(self.handle, save)
    }
}

impl Drop for Workbook<'_> {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.bridge.close_workbook(self.handle, false);
        }
    }
}
