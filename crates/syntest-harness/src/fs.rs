//! Filesystem helpers shared by the pipeline and backends.

use std::fs;
use std::io;
use std::path::Path;

/// Writes `content` to `dir/name`, creating `dir` first if needed.
///
/// Temp test directories are created implicitly by the first write into
/// them, so callers never pre-create the directory.
pub fn write_file(dir: &Path, name: &str, content: &str) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join(name), content)
}

/// Recursively copies `src` into `dst`, preserving the directory layout.
pub fn copy_directory(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in walkdir::WalkDir::new(src) {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_file_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("run").join("nested");

        write_file(&dir, "input", "1+2\n").unwrap();

        assert_eq!(fs::read_to_string(dir.join("input")).unwrap(), "1+2\n");
    }

    #[test]
    fn test_copy_directory_preserves_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("a.txt"), "a").unwrap();
        fs::write(src.join("sub").join("b.txt"), "b").unwrap();

        let dst = tmp.path().join("dst");
        copy_directory(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "a");
        assert_eq!(
            fs::read_to_string(dst.join("sub").join("b.txt")).unwrap(),
            "b"
        );
    }
}
