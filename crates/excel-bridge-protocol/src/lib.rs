//! Shared protocol types for communication between the native Linux client
//! and the Windows COM bridge process running under WINE.
//!
//! The protocol is JSON-over-stdio: one JSON object per line in each direction.

use serde::{Deserialize, Serialize};

/// A command sent from the Linux client to the WINE bridge process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Monotonically increasing request ID for correlating responses.
    pub id: u64,
    /// The command to execute.
    #[serde(flatten)]
    pub command: Command,
}

/// Commands the client can send to the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params")]
pub enum Command {
    /// Initialize COM and create the Excel.Application instance with the
    /// given UI settings.
    Init(InitOptions),

    /// Look up an already-open workbook by file name (e.g. "report.xlsx").
    /// Returns a workbook handle; errors if no such workbook is open.
    FindWorkbook { name: String },

    /// Open a workbook from a file path (Windows path). Returns a handle.
    OpenWorkbook { path: String },

    /// Refresh all external data connections of a workbook.
    RefreshAll { workbook: u64 },

    /// Export one worksheet to a fixed page format (PDF/XPS).
    /// `sheet: None` exports the workbook's active sheet.
    ExportFixedFormat {
        workbook: u64,
        sheet: Option<SheetRef>,
        format: FixedFormat,
        path: String,
    },

    /// Close a workbook, optionally saving changes first.
    CloseWorkbook { workbook: u64, save: bool },

    /// Shut down the bridge: close all workbooks, quit Excel, uninitialize COM.
    Shutdown,
}

/// UI settings applied to Excel.Application on startup.
///
/// All default to off: the application is only ever needed headless.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InitOptions {
    pub visible: bool,
    pub screen_updating: bool,
    pub display_alerts: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            visible: false,
            screen_updating: false,
            display_alerts: false,
        }
    }
}

/// Reference to a worksheet — by 0-based index or by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SheetRef {
    Index(u32),
    Name(String),
}

/// Fixed page-description formats accepted by ExportAsFixedFormat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixedFormat {
    Pdf,
    Xps,
}

impl FixedFormat {
    /// The XlFixedFormatType enumeration value Excel expects.
    pub fn code(&self) -> i32 {
        match self {
            FixedFormat::Pdf => 0,
            FixedFormat::Xps => 1,
        }
    }
}

/// A response sent from the WINE bridge back to the Linux client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// The request ID this response corresponds to.
    pub id: u64,
    /// The result of the command.
    #[serde(flatten)]
    pub result: ResponseResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ResponseResult {
    #[serde(rename = "ok")]
    Ok {
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<ResponseData>,
    },
    #[serde(rename = "error")]
    Error { message: String },
}

/// Data returned in successful responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    /// Handle to a found/opened workbook.
    WorkbookHandle { workbook: u64 },
}
