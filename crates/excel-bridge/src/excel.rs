//! Excel-specific COM automation built on the generic IDispatch wrapper.

#![cfg(windows)]

use std::collections::HashMap;

use excel_bridge_protocol::{FixedFormat, InitOptions, SheetRef};

use crate::dispatch::{variant_bool, variant_i32, variant_str, ComError, DispatchObject};

/// Errors from driving Excel.
#[derive(Debug, thiserror::Error)]
pub enum ExcelError {
    #[error(transparent)]
    Com(#[from] ComError),

    #[error("unknown workbook handle: {0}")]
    UnknownWorkbook(u64),
}

/// Manages an Excel.Application COM instance and its open workbooks.
pub struct ExcelApp {
    app: DispatchObject,
    workbooks_collection: DispatchObject,
    /// Map from our handle IDs to workbook dispatch objects.
    workbooks: HashMap<u64, DispatchObject>,
    next_handle: u64,
}

impl ExcelApp {
    /// Create a new Excel.Application instance via COM, applying the
    /// requested UI settings (normally all off for headless automation).
    pub fn new(options: &InitOptions) -> Result<Self, ExcelError> {
        let app = DispatchObject::create_from_progid("Excel.Application")?;

        app.set_property("Visible", variant_bool(options.visible))?;
        app.set_property("ScreenUpdating", variant_bool(options.screen_updating))?;
        app.set_property("DisplayAlerts", variant_bool(options.display_alerts))?;

        let workbooks_collection = app.get_child("Workbooks")?;

        Ok(Self {
            app,
            workbooks_collection,
            workbooks: HashMap::new(),
            next_handle: 1,
        })
    }

    /// Look up an already-open workbook by file name. Returns a handle ID,
    /// or an error if Excel has no workbook of that name open.
    pub fn find_workbook(&mut self, name: &str) -> Result<u64, ExcelError> {
        let wb = self
            .workbooks_collection
            .get_indexed("Item", &variant_str(name))?;
        Ok(self.register(wb))
    }

    /// Open a workbook from a file path. Returns the handle ID.
    pub fn open_workbook(&mut self, path: &str) -> Result<u64, ExcelError> {
        let wb = self
            .workbooks_collection
            .invoke_child("Open", &[variant_str(path)])?;
        Ok(self.register(wb))
    }

    /// Refresh all external data connections of a workbook.
    pub fn refresh_all(&self, wb_handle: u64) -> Result<(), ExcelError> {
        let wb = self.get_workbook(wb_handle)?;
        wb.invoke_method("RefreshAll", &[])?;
        Ok(())
    }

    /// Export one worksheet to a fixed page format (PDF/XPS).
    ///
    /// `sheet: None` exports the workbook's active sheet.
    pub fn export_fixed_format(
        &self,
        wb_handle: u64,
        sheet: Option<&SheetRef>,
        format: FixedFormat,
        path: &str,
    ) -> Result<(), ExcelError> {
        let ws = self.get_sheet(wb_handle, sheet)?;
        ws.invoke_method(
            "ExportAsFixedFormat",
            &[variant_i32(format.code()), variant_str(path)],
        )?;
        Ok(())
    }

    /// Close a workbook, optionally saving changes first.
    pub fn close_workbook(&mut self, wb_handle: u64, save: bool) -> Result<(), ExcelError> {
        let wb = self
            .workbooks
            .remove(&wb_handle)
            .ok_or(ExcelError::UnknownWorkbook(wb_handle))?;
        wb.invoke_method("Close", &[variant_bool(save)])?;
        Ok(())
    }

    /// Shut down: close all workbooks without saving and quit Excel.
    pub fn shutdown(mut self) -> Result<(), ExcelError> {
        let handles: Vec<u64> = self.workbooks.keys().copied().collect();
        for h in handles {
            let _ = self.close_workbook(h, false);
        }
        self.app.invoke_method("Quit", &[])?;
        Ok(())
    }

    fn register(&mut self, wb: DispatchObject) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.workbooks.insert(handle, wb);
        handle
    }

    fn get_workbook(&self, wb_handle: u64) -> Result<&DispatchObject, ExcelError> {
        self.workbooks
            .get(&wb_handle)
            .ok_or(ExcelError::UnknownWorkbook(wb_handle))
    }

    /// Resolve a sheet reference to a Worksheet dispatch object.
    fn get_sheet(
        &self,
        wb_handle: u64,
        sheet: Option<&SheetRef>,
    ) -> Result<DispatchObject, ExcelError> {
        let wb = self.get_workbook(wb_handle)?;

        let ws = match sheet {
            None => wb.get_child("ActiveSheet")?,
            Some(SheetRef::Index(idx)) => {
                // Excel worksheets are 1-based, our protocol uses 0-based
                let excel_index = (*idx as i32) + 1;
                wb.get_child("Worksheets")?
                    .get_indexed("Item", &variant_i32(excel_index))?
            }
            Some(SheetRef::Name(name)) => wb
                .get_child("Worksheets")?
                .get_indexed("Item", &variant_str(name))?,
        };
        Ok(ws)
    }
}
