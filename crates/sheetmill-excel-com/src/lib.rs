//! Native Linux client for Excel automation via a WINE bridge process.
//!
//! The crate spawns a Windows `.exe` under WINE that drives Excel through
//! COM, communicating over JSON-over-stdio. It covers the two operations
//! the file-format libraries cannot: refreshing external data connections
//! and exporting a worksheet to a fixed page format (PDF/XPS).
//!
//! # Architecture
//!
//! ```text
//! Your Rust code (native Linux)
//!     └── ExcelBridge (this crate)
//!           └── spawns: wine excel-bridge.exe
//!                 └── COM: Excel.Application
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use sheetmill_excel_com::{ExcelBridge, ExcelBridgeConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bridge = ExcelBridge::start(ExcelBridgeConfig::default())?;
//!     let refreshed = bridge.refresh_workbook(Path::new("report.xlsx"))?;
//!     if refreshed {
//!         bridge.export_to_pdf(Path::new("report.xlsx"), None, Path::new("report.pdf"))?;
//!     }
//!     bridge.shutdown()?;
//!     Ok(())
//! }
//! ```
//!
//! Teardown is guaranteed: both [`ExcelBridge`] and [`Workbook`] release
//! their COM-side handles on drop, so an early `?` cannot leave a live
//! Excel instance attached.

mod bridge;
mod workbook;

pub use bridge::{linux_to_wine_path, BridgeError, ExcelBridge, ExcelBridgeConfig};
pub use excel_bridge_protocol::{FixedFormat, InitOptions, SheetRef};
pub use workbook::Workbook;
