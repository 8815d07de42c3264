//! Excel COM bridge — a Windows process that automates Excel via COM,
//! controlled by JSON commands over stdin/stdout.
//!
//! Designed to be cross-compiled from Linux and run under WINE.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! - Reads `Request` objects from stdin
//! - Writes `Response` objects to stdout
//! - Diagnostic/log messages go to stderr (never stdout)

#[cfg(windows)]
mod dispatch;
#[cfg(windows)]
mod excel;

#[cfg(not(windows))]
fn main() {
    eprintln!("excel-bridge must be compiled for Windows (--target x86_64-pc-windows-gnu)");
    eprintln!("and run under WINE on Linux.");
    std::process::exit(1);
}

#[cfg(windows)]
fn main() {
    use std::io::{self, BufRead, Write};

    use excel_bridge_protocol::*;

    // stderr carries diagnostics so stdout stays clean for the protocol
    eprintln!("[excel-bridge] Starting up...");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut excel: Option<excel::ExcelApp> = None;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("[excel-bridge] stdin read error: {e}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("[excel-bridge] JSON parse error: {e}");
                eprintln!("[excel-bridge] Line was: {line}");
                // Error response with id=0 since the request could not be parsed
                let resp = Response {
                    id: 0,
                    result: ResponseResult::Error {
                        message: format!("JSON parse error: {e}"),
                    },
                };
                if let Ok(json) = serde_json::to_string(&resp) {
                    let _ = writeln!(out, "{json}");
                    let _ = out.flush();
                }
                continue;
            }
        };

        let response = handle_command(&mut excel, &request);
        match serde_json::to_string(&response) {
            Ok(json) => {
                let _ = writeln!(out, "{json}");
                let _ = out.flush();
            }
            Err(e) => eprintln!("[excel-bridge] response serialize error: {e}"),
        }

        // If it was a shutdown command and it succeeded, exit
        if matches!(request.command, Command::Shutdown)
            && matches!(response.result, ResponseResult::Ok { .. })
        {
            eprintln!("[excel-bridge] Shutdown complete, exiting.");
            break;
        }
    }

    // If Excel is still running when stdin closes, try to clean up
    if let Some(app) = excel {
        eprintln!("[excel-bridge] stdin closed, shutting down Excel...");
        let _ = app.shutdown();
    }

    eprintln!("[excel-bridge] Process exiting.");
}

#[cfg(windows)]
fn handle_command(
    excel: &mut Option<excel::ExcelApp>,
    request: &excel_bridge_protocol::Request,
) -> excel_bridge_protocol::Response {
    use excel_bridge_protocol::*;

    let id = request.id;

    let result = match &request.command {
        Command::Init(options) => init_com_and_excel(excel, options),
        Command::FindWorkbook { name } => with_excel(excel, |app| {
            let handle = app.find_workbook(name)?;
            Ok(ResponseResult::Ok {
                data: Some(ResponseData::WorkbookHandle { workbook: handle }),
            })
        }),
        Command::OpenWorkbook { path } => with_excel(excel, |app| {
            let handle = app.open_workbook(path)?;
            Ok(ResponseResult::Ok {
                data: Some(ResponseData::WorkbookHandle { workbook: handle }),
            })
        }),
        Command::RefreshAll { workbook } => with_excel(excel, |app| {
            app.refresh_all(*workbook)?;
            Ok(ResponseResult::Ok { data: None })
        }),
        Command::ExportFixedFormat {
            workbook,
            sheet,
            format,
            path,
        } => with_excel(excel, |app| {
            app.export_fixed_format(*workbook, sheet.as_ref(), *format, path)?;
            Ok(ResponseResult::Ok { data: None })
        }),
        Command::CloseWorkbook { workbook, save } => with_excel(excel, |app| {
            app.close_workbook(*workbook, *save)?;
            Ok(ResponseResult::Ok { data: None })
        }),
        Command::Shutdown => match excel.take() {
            Some(app) => match app.shutdown() {
                Ok(()) => {
                    uninit_com();
                    ResponseResult::Ok { data: None }
                }
                Err(e) => ResponseResult::Error {
                    message: format!("Shutdown failed: {e}"),
                },
            },
            None => ResponseResult::Ok { data: None },
        },
    };

    Response { id, result }
}

#[cfg(windows)]
fn init_com_and_excel(
    excel: &mut Option<excel::ExcelApp>,
    options: &excel_bridge_protocol::InitOptions,
) -> excel_bridge_protocol::ResponseResult {
    use excel_bridge_protocol::ResponseResult;
    use windows::Win32::System::Com::{CoInitializeEx, COINIT_APARTMENTTHREADED};

    if excel.is_some() {
        return ResponseResult::Ok { data: None }; // Already initialized
    }

    // Excel requires Single-Threaded Apartment mode
    unsafe {
        let hr = CoInitializeEx(None, COINIT_APARTMENTTHREADED);
        if let Err(e) = hr.ok() {
            return ResponseResult::Error {
                message: format!("CoInitializeEx failed: {e}"),
            };
        }
    }

    eprintln!("[excel-bridge] COM initialized (STA)");

    match excel::ExcelApp::new(options) {
        Ok(app) => {
            eprintln!("[excel-bridge] Excel.Application created successfully");
            *excel = Some(app);
            ResponseResult::Ok { data: None }
        }
        Err(e) => ResponseResult::Error {
            message: format!("Failed to create Excel.Application: {e}"),
        },
    }
}

#[cfg(windows)]
fn uninit_com() {
    unsafe {
        windows::Win32::System::Com::CoUninitialize();
    }
    eprintln!("[excel-bridge] COM uninitialized");
}

#[cfg(windows)]
fn with_excel(
    excel: &mut Option<excel::ExcelApp>,
    f: impl FnOnce(
        &mut excel::ExcelApp,
    ) -> Result<excel_bridge_protocol::ResponseResult, excel::ExcelError>,
) -> excel_bridge_protocol::ResponseResult {
    match excel.as_mut() {
        Some(app) => match f(app) {
            Ok(r) => r,
            Err(e) => excel_bridge_protocol::ResponseResult::Error {
                message: e.to_string(),
            },
        },
        None => excel_bridge_protocol::ResponseResult::Error {
            message: "Excel not initialized. Send 'Init' command first.".to_string(),
        },
    }
}
