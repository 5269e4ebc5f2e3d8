use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::Path,
};

/// Append `lines` to `path`, one per line, creating the file and its parent
/// directories if needed. An empty slice leaves the file system untouched.
pub fn append_lines(path: &Path, lines: &[String]) -> std::io::Result<()> {
    if lines.is_empty() {
        return Ok(());
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut body = String::new();
    for line in lines {
        body.push_str(line);
        body.push('\n');
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(body.as_bytes())
}
