#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{tempdir, TempDir};

pub const PLAY_CSV: &str = "\u{feff}TGID,PGID,POID,PFNA,PLNA,PPOS,PAGE,PYRP,PSPD,PSDX,PLSM,PSMx\r\n\
1,100,7,Tom,Brady,0,31,8,85,90,60,70\r\n\
2,200,8,Drew,Bledsoe,0,36,14,60,60,40,45\r\n\
1,101,9,\"Moss, Randy\",Moss,3,30,9,99,99,80,90\r\n";

pub const DRPK_CSV: &str = "DPID,DPNM,DPYO\r\n1,0,0\r\n1,31,0\r\n2,1,1\r\n";

pub const SLRI_CSV: &str = "SCAD,SMIN\r\n150000000,500000\r\n";

/// Scratch directory that cleans up on drop
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, contents).expect("write temp file contents");
        path
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("read output file")
    }
}
