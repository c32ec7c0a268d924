//! Attaching to the game process.
//!
//! Locates the process by executable name, opens it for reading and records
//! the base address of its main module.

#[cfg(target_os = "windows")]
use windows::Win32::Foundation::{CloseHandle, HANDLE};

use crate::error::{Error, Result};
use crate::process::ReadMemory;

/// Executable name of the game
pub const GAME_PROCESS_NAME: &str = "GeometryDash.exe";

/// An open handle to the target process
pub struct ProcessHandle {
    #[cfg(target_os = "windows")]
    handle: HANDLE,
    pub pid: u32,
    /// Base address of the main executable module
    pub base_address: u64,
    pub module_size: u32,
}

/// Summary of an attached process, for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub base_address: u64,
    pub module_size: u32,
}

impl ProcessHandle {
    /// Find the game process and open it
    pub fn find_and_open() -> Result<Self> {
        Self::find_and_open_by_name(GAME_PROCESS_NAME)
    }

    pub fn info(&self) -> ProcessInfo {
        ProcessInfo {
            pid: self.pid,
            base_address: self.base_address,
            module_size: self.module_size,
        }
    }
}

#[cfg(target_os = "windows")]
impl ProcessHandle {
    pub fn find_and_open_by_name(process_name: &str) -> Result<Self> {
        let pid = find_pid(process_name)?;
        Self::open(pid, process_name)
    }

    /// Open a process by PID and resolve the base of `module_name`
    pub fn open(pid: u32, module_name: &str) -> Result<Self> {
        use windows::Win32::System::Threading::{
            OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION, PROCESS_VM_READ,
        };

        let (base_address, module_size) = find_module(pid, module_name)?;

        // SAFETY: OpenProcess has no memory-safety preconditions; the handle is
        // closed in Drop.
        let handle = unsafe {
            OpenProcess(
                PROCESS_VM_READ | PROCESS_QUERY_LIMITED_INFORMATION,
                false,
                pid,
            )
        }
        .map_err(|e| Error::ProcessOpenFailed(format!("PID {}: {}", pid, e)))?;

        Ok(Self {
            handle,
            pid,
            base_address,
            module_size,
        })
    }

    pub fn is_alive(&self) -> bool {
        use windows::Win32::Foundation::STILL_ACTIVE;
        use windows::Win32::System::Threading::GetExitCodeProcess;

        let mut code: u32 = 0;
        // SAFETY: the handle stays valid for the lifetime of self.
        match unsafe { GetExitCodeProcess(self.handle, &mut code) } {
            Ok(()) => code == STILL_ACTIVE.0 as u32,
            Err(_) => false,
        }
    }

    fn read_into(&self, address: u64, buffer: &mut [u8]) -> Result<()> {
        use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;

        let mut read = 0usize;
        // SAFETY: the destination buffer is valid for `buffer.len()` bytes; the
        // source address lives in the foreign process and is validated by the OS.
        unsafe {
            ReadProcessMemory(
                self.handle,
                address as *const std::ffi::c_void,
                buffer.as_mut_ptr().cast(),
                buffer.len(),
                Some(&mut read),
            )
        }
        .map_err(|e| Error::read_failed(address, e.to_string()))?;

        if read != buffer.len() {
            return Err(Error::read_failed(
                address,
                format!("short read ({} of {} bytes)", read, buffer.len()),
            ));
        }
        Ok(())
    }
}

#[cfg(target_os = "windows")]
impl Drop for ProcessHandle {
    fn drop(&mut self) {
        // SAFETY: the handle was opened by us and is closed exactly once.
        unsafe {
            let _ = CloseHandle(self.handle);
        }
    }
}

#[cfg(target_os = "windows")]
fn find_pid(process_name: &str) -> Result<u32> {
    use windows::Win32::System::Diagnostics::ToolHelp::{
        CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW,
        TH32CS_SNAPPROCESS,
    };

    // SAFETY: a process snapshot has no preconditions; it is closed below.
    let snapshot = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) }
        .map_err(|e| Error::ProcessNotFound(format!("process snapshot failed: {}", e)))?;

    let mut entry = PROCESSENTRY32W {
        dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
        ..Default::default()
    };

    let mut found = None;
    // SAFETY: entry.dwSize is initialised as the API requires.
    unsafe {
        if Process32FirstW(snapshot, &mut entry).is_ok() {
            loop {
                if wide_to_string(&entry.szExeFile).eq_ignore_ascii_case(process_name) {
                    found = Some(entry.th32ProcessID);
                    break;
                }
                if Process32NextW(snapshot, &mut entry).is_err() {
                    break;
                }
            }
        }
        let _ = CloseHandle(snapshot);
    }

    found.ok_or_else(|| Error::ProcessNotFound(process_name.to_string()))
}

#[cfg(target_os = "windows")]
fn find_module(pid: u32, module_name: &str) -> Result<(u64, u32)> {
    use windows::Win32::System::Diagnostics::ToolHelp::{
        CreateToolhelp32Snapshot, MODULEENTRY32W, Module32FirstW, Module32NextW,
        TH32CS_SNAPMODULE, TH32CS_SNAPMODULE32,
    };

    // SAFETY: a module snapshot has no preconditions; it is closed below.
    let snapshot =
        unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32, pid) }
            .map_err(|e| Error::ProcessOpenFailed(format!("module snapshot failed: {}", e)))?;

    let mut entry = MODULEENTRY32W {
        dwSize: std::mem::size_of::<MODULEENTRY32W>() as u32,
        ..Default::default()
    };

    let mut found = None;
    // SAFETY: entry.dwSize is initialised as the API requires.
    unsafe {
        if Module32FirstW(snapshot, &mut entry).is_ok() {
            loop {
                if wide_to_string(&entry.szModule).eq_ignore_ascii_case(module_name) {
                    found = Some((entry.modBaseAddr as u64, entry.modBaseSize));
                    break;
                }
                if Module32NextW(snapshot, &mut entry).is_err() {
                    break;
                }
            }
        }
        let _ = CloseHandle(snapshot);
    }

    found.ok_or_else(|| {
        Error::ProcessOpenFailed(format!("module {} not found in PID {}", module_name, pid))
    })
}

#[cfg(target_os = "windows")]
fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}

// --- Non-Windows stubs ---

#[cfg(not(target_os = "windows"))]
impl ProcessHandle {
    pub fn find_and_open_by_name(process_name: &str) -> Result<Self> {
        Err(Error::ProcessNotFound(format!(
            "{} (process attachment is only supported on Windows)",
            process_name
        )))
    }

    pub fn open(pid: u32, _module_name: &str) -> Result<Self> {
        Err(Error::ProcessOpenFailed(format!(
            "PID {} (process attachment is only supported on Windows)",
            pid
        )))
    }

    pub fn is_alive(&self) -> bool {
        false
    }

    fn read_into(&self, address: u64, _buffer: &mut [u8]) -> Result<()> {
        Err(Error::read_failed(address, "not supported on this platform"))
    }
}

/// [`ReadMemory`] over an open [`ProcessHandle`]
pub struct MemoryReader<'a> {
    process: &'a ProcessHandle,
}

impl<'a> MemoryReader<'a> {
    pub fn new(process: &'a ProcessHandle) -> Self {
        Self { process }
    }

    pub fn base_address(&self) -> u64 {
        self.process.base_address
    }
}

impl ReadMemory for MemoryReader<'_> {
    fn read_bytes(&self, address: u64, len: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; len];
        self.process.read_into(address, &mut buffer)?;
        Ok(buffer)
    }

    fn is_attached(&self) -> bool {
        self.process.is_alive()
    }
}
