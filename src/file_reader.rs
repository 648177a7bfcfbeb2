use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use memmap2::Mmap;

use crate::candidate::InputError;

pub const MMAP_THRESHOLD: u64 = 64 * 1024;

/// Where candidate text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(String),
}

impl InputSource {
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(arg.to_owned())
        }
    }
}

pub fn read_input(source: &InputSource) -> Result<String, InputError> {
    match source {
        InputSource::Stdin => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            into_string(buf)
        }
        InputSource::File(path) => read_file(Path::new(path)),
    }
}

pub fn read_file(path: &Path) -> Result<String, InputError> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() == 0 {
        return Ok(String::new());
    }
    if metadata.len() >= MMAP_THRESHOLD {
        read_file_mmap(path)
    } else {
        read_file_buffered(path)
    }
}

fn read_file_mmap(path: &Path) -> Result<String, InputError> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file) }?;
    let s = std::str::from_utf8(&mmap[..]).map_err(|_| InputError::Utf8)?;
    Ok(s.to_owned())
}

fn read_file_buffered(path: &Path) -> Result<String, InputError> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(64 * 1024, file);
    let mut all = Vec::new();
    reader.read_to_end(&mut all)?;
    into_string(all)
}

fn into_string(bytes: Vec<u8>) -> Result<String, InputError> {
    String::from_utf8(bytes).map_err(|_| InputError::Utf8)
}
