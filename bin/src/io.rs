use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use allowlist::{AllowlistError, AllowlistResult, Bundle};
use log::debug;

fn file_error(path: &Path) -> impl FnOnce(io::Error) -> AllowlistError + '_ {
    move |source| AllowlistError::FileError {
        path: path.to_path_buf(),
        source,
    }
}

pub fn read_to_string(path: &Path) -> AllowlistResult<String> {
    fs::read_to_string(path).map_err(file_error(path))
}

pub fn read(path: &Path) -> AllowlistResult<Vec<u8>> {
    fs::read(path).map_err(file_error(path))
}

pub fn load_bundle(path: &Path) -> AllowlistResult<Bundle> {
    Ok(serde_json::from_str(&read_to_string(path)?)?)
}

/// `dir/.name.tmp` next to `dir/name`, so outputs never share a temp file.
fn temp_path(path: &Path) -> AllowlistResult<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        AllowlistError::InvalidInput(format!("{} is not a file path", path.display()))
    })?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

fn stage(path: &Path, contents: &[u8]) -> AllowlistResult<PathBuf> {
    let temp = temp_path(path)?;
    let written = File::create(&temp).and_then(|mut file| {
        file.write_all(contents)?;
        file.sync_all()
    });
    if let Err(source) = written {
        let _ = fs::remove_file(&temp);
        return Err(file_error(&temp)(source));
    }
    Ok(temp)
}

/// Writes every file through a sibling temp file. Nothing is renamed into
/// place until all temp files are written, so a failure leaves no output.
pub fn write_files_atomic(files: &[(&Path, &[u8])]) -> AllowlistResult<()> {
    let mut staged: Vec<PathBuf> = Vec::with_capacity(files.len());
    for (path, contents) in files {
        match stage(path, contents) {
            Ok(temp) => staged.push(temp),
            Err(err) => {
                for temp in &staged {
                    let _ = fs::remove_file(temp);
                }
                return Err(err);
            }
        }
    }

    for (temp, (path, contents)) in staged.iter().zip(files) {
        fs::rename(temp, path).map_err(file_error(path))?;
        debug!("wrote {} bytes to {}", contents.len(), path.display());
    }
    Ok(())
}
