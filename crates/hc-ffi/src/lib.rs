//! C FFI bindings for hc-core
//!
//! This crate provides a C-compatible API for use with Qt or other C/C++ front ends.
//! Categories are passed as their index in `Category::ALL`:
//! 0 players, 1 draft picks, 2 salary cap, 3 coaches, 4 coordinators, 5 scouts.

use hc_core::{
    reassign_draft_pick, safe_swap, scan_directory, Catalog, Category, EditorConfig, ExportPaths,
    Franchise, RecordSet,
};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::PathBuf;
use std::ptr;

/// Status returned when a pointer or argument is invalid
pub const HC_ERR_ARGUMENT: i32 = -1;
/// Status returned when the core operation failed
pub const HC_ERR_OPERATION: i32 = -2;

/// Opaque handle to a loaded franchise
pub struct FfiFranchise {
    inner: Franchise,
    config: EditorConfig,
}

unsafe fn str_arg<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    CStr::from_ptr(s).to_str().ok()
}

fn category_arg(category: u32) -> Option<Category> {
    Category::ALL.get(category as usize).copied()
}

fn into_c_string(s: &str) -> *mut c_char {
    CString::new(s)
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

unsafe fn record_set<'a>(franchise: *const FfiFranchise, category: u32) -> Option<&'a RecordSet> {
    if franchise.is_null() {
        return None;
    }
    Some((*franchise).inner.set(category_arg(category)?))
}

fn load_boxed(paths: &ExportPaths) -> *mut FfiFranchise {
    match Franchise::load(paths, Catalog::global()) {
        Ok(franchise) => Box::into_raw(Box::new(FfiFranchise {
            inner: franchise,
            config: EditorConfig::default(),
        })),
        Err(e) => {
            tracing::warn!("load failed: {}", e);
            ptr::null_mut()
        }
    }
}

/// Load a franchise from explicit file paths
///
/// # Safety
/// - `play` must be a valid C string
/// - `picks` and `cap` must be valid C strings or null
/// - Returns null on error
#[no_mangle]
pub unsafe extern "C" fn hc_load_franchise(
    play: *const c_char,
    picks: *const c_char,
    cap: *const c_char,
) -> *mut FfiFranchise {
    let Some(play) = str_arg(play) else {
        return ptr::null_mut();
    };

    let mut paths = ExportPaths::new(play);
    if let Some(picks) = str_arg(picks) {
        paths.set(Category::DraftPicks, picks);
    }
    if let Some(cap) = str_arg(cap) {
        paths.set(Category::SalaryCap, cap);
    }

    load_boxed(&paths)
}

/// Load a franchise from one path per category
///
/// `paths[i]` is the file for category `i`; entries may be null to skip a
/// category, except entry 0 (players).
///
/// # Safety
/// - `paths` must be a valid pointer to an array of `count` C strings or nulls
/// - Returns null on error
#[no_mangle]
pub unsafe extern "C" fn hc_load_export(paths: *const *const c_char, count: usize) -> *mut FfiFranchise {
    if paths.is_null() || count == 0 {
        return ptr::null_mut();
    }
    let Some(play) = str_arg(*paths) else {
        return ptr::null_mut();
    };

    let mut export = ExportPaths::new(play);
    for i in 1..count {
        let (Some(category), Some(path)) = (category_arg(i as u32), str_arg(*paths.add(i))) else {
            continue;
        };
        export.set(category, path);
    }

    load_boxed(&export)
}

/// Scan a directory for export files and load them
///
/// # Safety
/// - `root` must be a valid C string
/// - Returns null on error or when no players file is found
#[no_mangle]
pub unsafe extern "C" fn hc_load_directory(root: *const c_char) -> *mut FfiFranchise {
    let Some(root) = str_arg(root) else {
        return ptr::null_mut();
    };

    let paths = match scan_directory(PathBuf::from(root), Catalog::global()) {
        Ok(result) => result.export_paths(),
        Err(e) => {
            tracing::warn!("scan failed: {}", e);
            return ptr::null_mut();
        }
    };
    let Some(paths) = paths else {
        return ptr::null_mut();
    };

    load_boxed(&paths)
}

/// Replace the editor settings of a franchise with a JSON settings file
///
/// Returns 0 on success. The previous settings stay in place on failure.
///
/// # Safety
/// - `franchise` must be a valid pointer returned by `hc_load_franchise`
/// - `path` must be a valid C string
#[no_mangle]
pub unsafe extern "C" fn hc_load_config(franchise: *mut FfiFranchise, path: *const c_char) -> i32 {
    let Some(path) = str_arg(path) else {
        return HC_ERR_ARGUMENT;
    };
    if franchise.is_null() {
        return HC_ERR_ARGUMENT;
    }

    match EditorConfig::load(path) {
        Ok(config) => {
            (*franchise).config = config;
            0
        }
        Err(e) => {
            tracing::warn!("config load failed: {}", e);
            HC_ERR_OPERATION
        }
    }
}

/// Free a franchise
///
/// # Safety
/// - `franchise` must be a valid pointer returned by `hc_load_franchise` or null
#[no_mangle]
pub unsafe extern "C" fn hc_free_franchise(franchise: *mut FfiFranchise) {
    if !franchise.is_null() {
        drop(Box::from_raw(franchise));
    }
}

/// Get the record count of a category
///
/// # Safety
/// - `franchise` must be a valid pointer returned by `hc_load_franchise`
#[no_mangle]
pub unsafe extern "C" fn hc_record_count(franchise: *const FfiFranchise, category: u32) -> usize {
    record_set(franchise, category).map_or(0, |set| set.len())
}

/// Get the header count of a category
///
/// # Safety
/// - `franchise` must be a valid pointer returned by `hc_load_franchise`
#[no_mangle]
pub unsafe extern "C" fn hc_header_count(franchise: *const FfiFranchise, category: u32) -> usize {
    record_set(franchise, category).map_or(0, |set| set.headers.len())
}

/// Get a header name by index
///
/// # Safety
/// - `franchise` must be a valid pointer returned by `hc_load_franchise`
/// - Returns null if index is out of bounds
/// - Caller must free the returned string with `hc_free_string`
#[no_mangle]
pub unsafe extern "C" fn hc_header_name(
    franchise: *const FfiFranchise,
    category: u32,
    index: usize,
) -> *mut c_char {
    record_set(franchise, category)
        .and_then(|set| set.headers.get(index))
        .map_or(ptr::null_mut(), |h| into_c_string(h))
}

/// Get a cell value by record index and column name
///
/// # Safety
/// - `franchise` must be a valid pointer returned by `hc_load_franchise`
/// - `column` must be a valid C string
/// - Returns null if the record or column does not exist
/// - Caller must free the returned string with `hc_free_string`
#[no_mangle]
pub unsafe extern "C" fn hc_cell(
    franchise: *const FfiFranchise,
    category: u32,
    row: usize,
    column: *const c_char,
) -> *mut c_char {
    let Some(column) = str_arg(column) else {
        return ptr::null_mut();
    };

    record_set(franchise, category)
        .and_then(|set| set.records.get(row))
        .and_then(|r| r.get(column))
        .map_or(ptr::null_mut(), into_c_string)
}

/// Set a cell value verbatim
///
/// Returns 0 on success.
///
/// # Safety
/// - `franchise` must be a valid pointer returned by `hc_load_franchise`
/// - `column` and `value` must be valid C strings
#[no_mangle]
pub unsafe extern "C" fn hc_set_cell(
    franchise: *mut FfiFranchise,
    category: u32,
    row: usize,
    column: *const c_char,
    value: *const c_char,
) -> i32 {
    let (Some(column), Some(value), Some(category)) =
        (str_arg(column), str_arg(value), category_arg(category))
    else {
        return HC_ERR_ARGUMENT;
    };
    if franchise.is_null() {
        return HC_ERR_ARGUMENT;
    }

    let result = (*franchise)
        .inner
        .set_mut(category)
        .get_mut(row)
        .and_then(|r| r.set(column, value));
    match result {
        Ok(_) => 0,
        Err(e) => {
            tracing::warn!("set cell failed: {}", e);
            HC_ERR_OPERATION
        }
    }
}

/// Get the detected team column of the players table
///
/// # Safety
/// - `franchise` must be a valid pointer returned by `hc_load_franchise`
/// - Returns null when no team column was detected
/// - Caller must free the returned string with `hc_free_string`
#[no_mangle]
pub unsafe extern "C" fn hc_team_column(franchise: *const FfiFranchise) -> *mut c_char {
    if franchise.is_null() {
        return ptr::null_mut();
    }
    (*franchise)
        .inner
        .schema
        .team_column
        .as_deref()
        .map_or(ptr::null_mut(), into_c_string)
}

/// Swap two players, keeping identity and ownership columns in place
///
/// Returns the number of fields exchanged, or a negative status.
///
/// # Safety
/// - `franchise` must be a valid pointer returned by `hc_load_franchise`
#[no_mangle]
pub unsafe extern "C" fn hc_safe_swap(franchise: *mut FfiFranchise, a: usize, b: usize) -> i32 {
    if franchise.is_null() {
        return HC_ERR_ARGUMENT;
    }
    let franchise = &mut *franchise;

    match safe_swap(
        franchise.inner.players_mut(),
        a,
        b,
        &franchise.config.immutable_keys,
    ) {
        Ok(n) => i32::try_from(n).unwrap_or(i32::MAX),
        Err(e) => {
            tracing::warn!("swap failed: {}", e);
            HC_ERR_OPERATION
        }
    }
}

/// Give a draft pick to another team
///
/// Returns 0 on success.
///
/// # Safety
/// - `franchise` must be a valid pointer returned by `hc_load_franchise`
/// - `new_owner` must be a valid C string
#[no_mangle]
pub unsafe extern "C" fn hc_reassign_pick(
    franchise: *mut FfiFranchise,
    pick: usize,
    new_owner: *const c_char,
) -> i32 {
    let Some(new_owner) = str_arg(new_owner) else {
        return HC_ERR_ARGUMENT;
    };
    if franchise.is_null() {
        return HC_ERR_ARGUMENT;
    }

    let result = (*franchise)
        .inner
        .set_mut(Category::DraftPicks)
        .get_mut(pick)
        .and_then(|r| reassign_draft_pick(r, new_owner));
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::warn!("reassign pick failed: {}", e);
            HC_ERR_OPERATION
        }
    }
}

/// Save every loaded table next to its source
///
/// Returns the number of files written, or a negative status.
///
/// # Safety
/// - `franchise` must be a valid pointer returned by `hc_load_franchise`
#[no_mangle]
pub unsafe extern "C" fn hc_save_all(franchise: *const FfiFranchise) -> i32 {
    if franchise.is_null() {
        return HC_ERR_ARGUMENT;
    }

    match (*franchise).inner.save_all() {
        Ok(written) => i32::try_from(written.len()).unwrap_or(i32::MAX),
        Err(e) => {
            tracing::warn!("save failed: {}", e);
            HC_ERR_OPERATION
        }
    }
}

/// Free a string returned by other FFI functions
///
/// # Safety
/// - `s` must be a valid pointer returned by an hc_* function or null
#[no_mangle]
pub unsafe extern "C" fn hc_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PLAY: &str = "TGID,PGID,POID,PFNA,PLNA\r\n1,100,7,Tom,Brady\r\n2,200,8,Drew,Brees\r\n";
    const DRPK: &str = "DPID,DPNM,DPYO\r\n1,0,0\r\n2,1,0\r\n";

    unsafe fn take(s: *mut c_char) -> Option<String> {
        if s.is_null() {
            return None;
        }
        let out = CStr::from_ptr(s).to_string_lossy().into_owned();
        hc_free_string(s);
        Some(out)
    }

    #[test]
    fn test_load_swap_and_save() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("play.csv"), PLAY).unwrap();
        fs::write(dir.path().join("drpk.csv"), DRPK).unwrap();
        let root = CString::new(dir.path().to_str().unwrap()).unwrap();

        unsafe {
            let f = hc_load_directory(root.as_ptr());
            assert!(!f.is_null());
            assert_eq!(hc_record_count(f, 0), 2);
            assert_eq!(hc_record_count(f, 1), 2);
            assert_eq!(hc_header_count(f, 0), 5);
            assert_eq!(take(hc_header_name(f, 0, 3)).as_deref(), Some("PFNA"));
            assert_eq!(take(hc_team_column(f)).as_deref(), Some("TGID"));

            assert_eq!(hc_safe_swap(f, 0, 1), 2);
            assert_eq!(hc_safe_swap(f, 1, 1), HC_ERR_OPERATION);

            let pfna = CString::new("PFNA").unwrap();
            let tgid = CString::new("TGID").unwrap();
            assert_eq!(take(hc_cell(f, 0, 0, pfna.as_ptr())).as_deref(), Some("Drew"));
            assert_eq!(take(hc_cell(f, 0, 0, tgid.as_ptr())).as_deref(), Some("1"));

            let owner = CString::new("2").unwrap();
            assert_eq!(hc_reassign_pick(f, 0, owner.as_ptr()), 0);
            assert_eq!(hc_reassign_pick(f, 9, owner.as_ptr()), HC_ERR_OPERATION);

            assert_eq!(hc_save_all(f), 2);
            hc_free_franchise(f);
        }

        assert!(dir.path().join("play_modified.csv").exists());
        assert!(dir.path().join("drpk_modified.csv").exists());
    }

    #[test]
    fn test_load_export_with_staff_and_config() {
        let dir = tempfile::tempdir().unwrap();
        let play = dir.path().join("play.csv");
        let coaches = dir.path().join("coch.csv");
        let config = dir.path().join("editor.json");
        fs::write(&play, PLAY).unwrap();
        fs::write(&coaches, "CCID,CFNA\r\n1,Bill\r\n").unwrap();
        fs::write(&config, r#"{"immutable_keys": ["PGID"]}"#).unwrap();

        let play = CString::new(play.to_str().unwrap()).unwrap();
        let coaches = CString::new(coaches.to_str().unwrap()).unwrap();
        let config = CString::new(config.to_str().unwrap()).unwrap();
        let missing = CString::new("nope.json").unwrap();
        let paths = [
            play.as_ptr(),
            ptr::null(),
            ptr::null(),
            coaches.as_ptr(),
        ];

        unsafe {
            let f = hc_load_export(paths.as_ptr(), paths.len());
            assert!(!f.is_null());
            assert_eq!(hc_record_count(f, 3), 1);
            assert_eq!(hc_record_count(f, 1), 0);

            assert_eq!(hc_load_config(f, missing.as_ptr()), HC_ERR_OPERATION);
            assert_eq!(hc_load_config(f, config.as_ptr()), 0);

            // only PGID stays put now
            assert_eq!(hc_safe_swap(f, 0, 1), 4);
            let tgid = CString::new("TGID").unwrap();
            assert_eq!(take(hc_cell(f, 0, 0, tgid.as_ptr())).as_deref(), Some("2"));
            hc_free_franchise(f);

            assert!(hc_load_export(ptr::null(), 0).is_null());
        }
    }

    #[test]
    fn test_null_arguments() {
        unsafe {
            assert!(hc_load_franchise(ptr::null(), ptr::null(), ptr::null()).is_null());
            assert_eq!(hc_record_count(ptr::null(), 0), 0);
            assert!(hc_team_column(ptr::null()).is_null());
            assert_eq!(hc_safe_swap(ptr::null_mut(), 0, 1), HC_ERR_ARGUMENT);
            assert_eq!(hc_save_all(ptr::null()), HC_ERR_ARGUMENT);
            hc_free_franchise(ptr::null_mut());
            hc_free_string(ptr::null_mut());
        }
    }

    #[test]
    fn test_set_cell_unknown_column() {
        let dir = tempfile::tempdir().unwrap();
        let play = dir.path().join("play.csv");
        fs::write(&play, PLAY).unwrap();
        let play = CString::new(play.to_str().unwrap()).unwrap();
        let column = CString::new("NOPE").unwrap();
        let value = CString::new("1").unwrap();

        unsafe {
            let f = hc_load_franchise(play.as_ptr(), ptr::null(), ptr::null());
            assert!(!f.is_null());
            assert_eq!(hc_set_cell(f, 0, 0, column.as_ptr(), value.as_ptr()), HC_ERR_OPERATION);
            assert_eq!(hc_set_cell(f, 42, 0, column.as_ptr(), value.as_ptr()), HC_ERR_ARGUMENT);
            hc_free_franchise(f);
        }
    }
}
