//! Subprocess management and JSON IPC for the WINE bridge process.

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Stdio};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use excel_bridge_protocol::{
    Command as BridgeCommand, FixedFormat, InitOptions, Request, Response, ResponseData,
    ResponseResult, SheetRef,
};

use crate::workbook::Workbook;

/// Errors from the Excel COM bridge.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Failed to spawn WINE bridge process: {0}")]
    SpawnFailed(#[from] std::io::Error),

    #[error("Bridge process not running")]
    NotRunning,

    #[error("Failed to send command to bridge: {0}")]
    SendFailed(String),

    #[error("Failed to read response from bridge: {0}")]
    ReadFailed(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Bridge returned error: {0}")]
    BridgeError(String),

    #[error("Unexpected response data")]
    UnexpectedResponse,

    #[error("Workbook path has no file name: {0}")]
    NoFileName(String),

    #[error("WINE not found. Install WINE and ensure 'wine' is in PATH.")]
    WineNotFound,

    #[error("Bridge executable not found at: {0}")]
    BridgeExeNotFound(String),
}

/// Configuration for the Excel COM bridge.
pub struct ExcelBridgeConfig {
    /// Path to the `excel-bridge.exe` Windows executable.
    /// If None, will search in common locations relative to the current binary.
    pub bridge_exe_path: Option<PathBuf>,

    /// Path to the WINE executable. Defaults to "wine".
    pub wine_path: PathBuf,

    /// Optional WINEPREFIX to use (for isolating the WINE environment).
    pub wine_prefix: Option<PathBuf>,

    /// UI settings passed to Excel.Application on init.
    pub init: InitOptions,

    /// Timeout for waiting for bridge responses.
    pub timeout: Duration,
}

impl Default for ExcelBridgeConfig {
    fn default() -> Self {
        Self {
            bridge_exe_path: None,
            wine_path: PathBuf::from("wine"),
            wine_prefix: None,
            init: InitOptions::default(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// The main handle for communicating with the Excel COM bridge.
///
/// Manages the WINE subprocess lifecycle. If the bridge is still alive when
/// this handle is dropped, a shutdown is sent and the child is reaped, so
/// the Excel instance never outlives the caller.
#[derive(Debug)]
pub struct ExcelBridge {
    child: Mutex<Child>,
    stdin: Mutex<std::process::ChildStdin>,
    stdout: Mutex<BufReader<std::process::ChildStdout>>,
    next_id: AtomicU64,
    shut_down: AtomicBool,
}

impl ExcelBridge {
    /// Start the bridge process and initialize Excel.
    pub fn start(config: ExcelBridgeConfig) -> Result<Self, BridgeError> {
        let exe_path = config.bridge_exe_path.unwrap_or_else(find_bridge_exe);

        if !exe_path.exists() {
            return Err(BridgeError::BridgeExeNotFound(
                exe_path.display().to_string(),
            ));
        }

        let mut cmd = std::process::Command::new(&config.wine_path);

        if let Some(prefix) = &config.wine_prefix {
            cmd.env("WINEPREFIX", prefix);
        }

        cmd.arg(&exe_path);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::inherit()); // Bridge diagnostics go to our stderr

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BridgeError::WineNotFound
            } else {
                BridgeError::SpawnFailed(e)
            }
        })?;

        let stdin = child.stdin.take().ok_or(BridgeError::NotRunning)?;
        let stdout = child.stdout.take().ok_or(BridgeError::NotRunning)?;

        let bridge = Self {
            child: Mutex::new(child),
            stdin: Mutex::new(stdin),
            stdout: Mutex::new(BufReader::new(stdout)),
            next_id: AtomicU64::new(1),
            shut_down: AtomicBool::new(false),
        };

        // Initialize COM and Excel with UI disabled
        bridge.send_command(BridgeCommand::Init(config.init))?;

        Ok(bridge)
    }

    /// Send a command to the bridge and wait for the response.
    fn send_command(&self, command: BridgeCommand) -> Result<Option<ResponseData>, BridgeError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let request = Request { id, command };
        let json = serde_json::to_string(&request)?;

        {
            let mut stdin = self
                .stdin
                .lock()
                .map_err(|_| BridgeError::SendFailed("stdin poisoned".to_string()))?;
            writeln!(stdin, "{json}").map_err(|e| BridgeError::SendFailed(e.to_string()))?;
            stdin
                .flush()
                .map_err(|e| BridgeError::SendFailed(e.to_string()))?;
        }

        let response: Response = {
            let mut stdout = self
                .stdout
                .lock()
                .map_err(|_| BridgeError::ReadFailed("stdout poisoned".to_string()))?;
            let mut line = String::new();
            stdout
                .read_line(&mut line)
                .map_err(|e| BridgeError::ReadFailed(e.to_string()))?;

            if line.is_empty() {
                return Err(BridgeError::NotRunning);
            }

            serde_json::from_str(&line)?
        };

        match response.result {
            ResponseResult::Ok { data } => Ok(data),
            ResponseResult::Error { message } => Err(BridgeError::BridgeError(message)),
        }
    }

    /// Attach to a workbook that is already open in Excel, by file name.
    pub fn find_workbook(&self, name: &str) -> Result<Workbook<'_>, BridgeError> {
        let data = self.send_command(BridgeCommand::FindWorkbook {
            name: name.to_string(),
        })?;
        match data {
            Some(ResponseData::WorkbookHandle { workbook }) => Ok(Workbook::new(self, workbook)),
            _ => Err(BridgeError::UnexpectedResponse),
        }
    }

    /// Open an existing workbook from a Linux file path.
    pub fn open_workbook(&self, path: &Path) -> Result<Workbook<'_>, BridgeError> {
        let wine_path = linux_to_wine_path(path);
        let data = self.send_command(BridgeCommand::OpenWorkbook { path: wine_path })?;
        match data {
            Some(ResponseData::WorkbookHandle { workbook }) => Ok(Workbook::new(self, workbook)),
            _ => Err(BridgeError::UnexpectedResponse),
        }
    }

    /// Refresh all external data connections of a workbook, then close and
    /// save it.
    ///
    /// Looks the workbook up among Excel's open workbooks first; if it is
    /// not open, falls back to opening it by path. If neither works, the
    /// failure is reported via `log::error!` and `Ok(false)` is returned —
    /// no workbook reference remains for the caller. Returns `Ok(true)`
    /// after a successful refresh-and-save.
    pub fn refresh_workbook(&self, path: &Path) -> Result<bool, BridgeError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| BridgeError::NoFileName(path.display().to_string()))?;

        let workbook = match self.find_workbook(name) {
            Ok(wb) => wb,
            Err(attach_err) => {
                log::debug!("Workbook '{name}' not attached ({attach_err}), opening by path");
                match self.open_workbook(path) {
                    Ok(wb) => wb,
                    Err(open_err) => {
                        log::error!(
                            "Could not attach to or open workbook {}: {open_err}",
                            path.display()
                        );
                        return Ok(false);
                    }
                }
            }
        };

        workbook.refresh_all()?;
        workbook.close(true)?;
        Ok(true)
    }

    /// Export one worksheet of a workbook file to PDF.
    ///
    /// `sheet: None` exports the active sheet. The workbook is closed
    /// without saving on every exit path, including export failure.
    pub fn export_to_pdf(
        &self,
        path: &Path,
        sheet: Option<SheetRef>,
        output: &Path,
    ) -> Result<(), BridgeError> {
        let workbook = self.open_workbook(path)?;
        // An early return here still closes the workbook via Drop.
        workbook.export_fixed_format(sheet, FixedFormat::Pdf, output)?;
        workbook.close(false)?;
        Ok(())
    }

    /// Shut down the bridge: close all workbooks, quit Excel, and terminate
    /// the process.
    pub fn shutdown(self) -> Result<(), BridgeError> {
        self.shutdown_inner();
        Ok(())
    }

    fn shutdown_inner(&self) {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return;
        }

        let _ = self.send_command(BridgeCommand::Shutdown);

        if let Ok(mut child) = self.child.lock() {
            let _ = child.wait();
        }
    }

    // -- Internal methods used by Workbook --

    pub(crate) fn refresh_all(&self, workbook: u64) -> Result<(), BridgeError> {
        self.send_command(BridgeCommand::RefreshAll { workbook })?;
        Ok(())
    }

    pub(crate) fn export_fixed_format(
        &self,
        workbook: u64,
        sheet: Option<SheetRef>,
        format: FixedFormat,
        path: &str,
    ) -> Result<(), BridgeError> {
        self.send_command(BridgeCommand::ExportFixedFormat {
            workbook,
            sheet,
            format,
            path: path.to_string(),
        })?;
        Ok(())
    }

    pub(crate) fn close_workbook(&self, workbook: u64, save: bool) -> Result<(), BridgeError> {
        self.send_command(BridgeCommand::CloseWorkbook { workbook, save })?;
        Ok(())
    }
}

impl Drop for ExcelBridge {
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}

/// Convert a Linux filesystem path to a WINE (Windows) path.
///
/// WINE maps `/` to `Z:\`, so `/home/user/file.xlsx` becomes
/// `Z:\home\user\file.xlsx`.
pub fn linux_to_wine_path(linux_path: &Path) -> String {
    let abs = if linux_path.is_absolute() {
        linux_path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(linux_path)
    };

    format!("Z:{}", abs.display()).replace('/', "\\")
}

/// Attempt to locate the bridge exe relative to the current executable or in
/// common paths.
fn find_bridge_exe() -> PathBuf {
    if let Ok(mut exe) = std::env::current_exe() {
        exe.pop();
        let candidate = exe.join("excel-bridge.exe");
        if candidate.exists() {
            return candidate;
        }
    }

    for dir in ["release", "debug"] {
        let candidate =
            PathBuf::from(format!("target/x86_64-pc-windows-gnu/{dir}/excel-bridge.exe"));
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from("excel-bridge.exe")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wine_path_conversion() {
        assert_eq!(
            linux_to_wine_path(Path::new("/home/user/report.xlsx")),
            "Z:\\home\\user\\report.xlsx"
        );
    }

    #[test]
    fn default_config_disables_ui() {
        let config = ExcelBridgeConfig::default();
        assert!(!config.init.visible);
        assert!(!config.init.screen_updating);
        assert!(!config.init.display_alerts);
    }

    #[test]
    fn missing_bridge_exe_reports_path() {
        let config = ExcelBridgeConfig {
            bridge_exe_path: Some(PathBuf::from("/nonexistent/excel-bridge.exe")),
            ..ExcelBridgeConfig::default()
        };
        let err = ExcelBridge::start(config).unwrap_err();
        assert!(matches!(err, BridgeError::BridgeExeNotFound(_)));
    }

    /// Stand-in for the bridge exe: a shell script that records every
    /// request, answers ok, fails exports, and exits on Shutdown.
    #[cfg(unix)]
    fn write_stub_bridge(script: &Path, capture: &Path) {
        std::fs::write(
            script,
            format!(
                r#"while IFS= read -r line; do
  printf '%s\n' "$line" >> "{capture}"
  id=$(printf '%s' "$line" | sed 's/.*"id":\([0-9]*\).*/\1/')
  case "$line" in
    *ExportFixedFormat*) printf '{{"id":%s,"status":"error","message":"printer on fire"}}\n' "$id" ;;
    *FindWorkbook*|*OpenWorkbook*) printf '{{"id":%s,"status":"ok","data":{{"workbook":1}}}}\n' "$id" ;;
    *Shutdown*) printf '{{"id":%s,"status":"ok"}}\n' "$id"; exit 0 ;;
    *) printf '{{"id":%s,"status":"ok"}}\n' "$id" ;;
  esac
done
"#,
                capture = capture.display()
            ),
        )
        .unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn drop_closes_workbook_and_shuts_the_bridge_down() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("stub-bridge.sh");
        let capture = dir.path().join("commands.ndjson");
        write_stub_bridge(&script, &capture);

        let config = ExcelBridgeConfig {
            bridge_exe_path: Some(script),
            wine_path: PathBuf::from("/bin/sh"),
            ..ExcelBridgeConfig::default()
        };

        {
            let bridge = ExcelBridge::start(config).unwrap();
            let err = bridge
                .export_to_pdf(
                    Path::new("/data/report.xlsx"),
                    None,
                    Path::new("/data/report.pdf"),
                )
                .unwrap_err();
            assert!(matches!(err, BridgeError::BridgeError(_)));
            // No explicit shutdown: Drop must clean up.
        }

        let sent = std::fs::read_to_string(&capture).unwrap();
        let export = sent.find(r#""cmd":"ExportFixedFormat""#).unwrap();
        let close = sent.find(r#""cmd":"CloseWorkbook""#).unwrap();

        // The failed export still closed its workbook, without saving
        assert!(export < close);
        let close_line = sent[close..].lines().next().unwrap();
        assert!(close_line.contains(r#""save":false"#));

        // Dropping the bridge sent Shutdown to the child
        assert!(sent.contains(r#""cmd":"Shutdown""#));
    }

    #[cfg(unix)]
    #[test]
    fn explicit_close_saves_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("stub-bridge.sh");
        let capture = dir.path().join("commands.ndjson");
        write_stub_bridge(&script, &capture);

        let config = ExcelBridgeConfig {
            bridge_exe_path: Some(script),
            wine_path: PathBuf::from("/bin/sh"),
            ..ExcelBridgeConfig::default()
        };

        let bridge = ExcelBridge::start(config).unwrap();
        let workbook = bridge.open_workbook(Path::new("/data/report.xlsx")).unwrap();
        workbook.refresh_all().unwrap();
        workbook.close(true).unwrap();
        bridge.shutdown().unwrap();

        let sent = std::fs::read_to_string(&capture).unwrap();
        assert!(sent.contains(r#""cmd":"RefreshAll""#));
        let close = sent.find(r#""cmd":"CloseWorkbook""#).unwrap();
        let close_line = sent[close..].lines().next().unwrap();
        assert!(close_line.contains(r#""save":true"#));
        // Closed explicitly, so Drop must not close a second time
        assert_eq!(sent.matches(r#""cmd":"CloseWorkbook""#).count(), 1);
    }
}
