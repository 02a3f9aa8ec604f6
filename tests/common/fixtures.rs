//! On-disk fixtures: connection files, manifests and a fake distant workspace

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Files listed by the default manifest
pub const TEST_FILES: &[&str] = &[
    "file1.txt",
    "file2.txt",
    "dir/file3.txt",
    "dir/file4.txt",
    "file5.txt",
];

/// Distant workspace of every fixture connection
pub const DISTANT_WORKSPACE: &str = "/project/test_data";

/// A temporary tree holding configuration files, hosts and the local workspace
///
/// ```text
/// <root>/conf/            connection files and manifests
/// <root>/<host>/project/  files served by a `file://` host
/// <root>/local/           download destination
/// ```
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("conf")).expect("Failed to create conf dir");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn conf_dir(&self) -> PathBuf {
        self.root().join("conf")
    }

    pub fn host_dir(&self, host: &str) -> PathBuf {
        self.root().join(host)
    }

    pub fn local_root(&self) -> PathBuf {
        self.root().join("local")
    }

    /// Write a connection file serving from `host` and return its path
    pub fn write_connection(&self, name: &str, host: &str, overwrite: &str) -> PathBuf {
        let content = format!(
            "host = WebDAV\n\
             host-url = file://{}\n\
             user = tester\n\
             password = secret\n\
             overwrite = {overwrite}\n\
             distant-workspace = {}\n\
             local-workspace = {}\n\
             tries = 8\n",
            self.host_dir(host).display(),
            DISTANT_WORKSPACE,
            self.local_root().display()
        );
        self.write_conf(name, &content)
    }

    /// Write the default manifest in the conf directory and return its path
    pub fn write_manifest(&self, name: &str) -> PathBuf {
        let mut content = TEST_FILES.join("\n");
        content.push('\n');
        self.write_conf(name, &content)
    }

    pub fn write_conf(&self, name: &str, content: &str) -> PathBuf {
        let path = self.conf_dir().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create conf subdir");
        }
        fs::write(&path, content).expect("Failed to write conf file");
        path
    }

    /// Serve every test file from `host`
    pub fn populate_host(&self, host: &str) {
        for file in TEST_FILES {
            let path = self
                .host_dir(host)
                .join(DISTANT_WORKSPACE.trim_start_matches('/'))
                .join(file);
            fs::create_dir_all(path.parent().expect("file has a parent"))
                .expect("Failed to create distant dir");
            fs::write(&path, format!("content of {file}")).expect("Failed to write distant file");
        }
    }
}
