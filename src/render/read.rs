use std::fs::File;
use std::io::Read;
use std::path::Path;

const MMAP_THRESHOLD: u64 = 64 * 1024;

/// Reads a file as text, replacing invalid UTF-8 instead of failing.
pub fn read_text_lossy(path: &Path) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let size = file.metadata()?.len();

    if size > MMAP_THRESHOLD {
        read_mmap(&file)
    } else {
        let mut bytes = Vec::with_capacity(size as usize);
        file.read_to_end(&mut bytes)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn read_mmap(file: &File) -> std::io::Result<String> {
    // SAFETY: the documentation tree is never written while we hold the map.
    let mmap = unsafe { memmap2::Mmap::map(file)? };
    Ok(String::from_utf8_lossy(&mmap).into_owned())
}
