//! Memory-Mapped Binson Documents
//!
//! Dokumen Binson di-mmap langsung ke virtual memory:
//! - Zero-copy read: Decoder membaca langsung dari page cache
//! - Write: Encoder menulis ke mmap berkapasitas tetap, lalu file
//!   dipotong ke panjang hasil encode
//!
//! Seluruh dokumen harus resident di map, tidak ada streaming parsial.

use memmap2::{Mmap, MmapOptions};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::protocol::{Decoder, Encoder, ErrorCode};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("encode failed: {0}")]
    Encode(ErrorCode),
    #[error("document is empty")]
    Empty,
}

/// Dokumen Binson read-only yang di-mmap dari file
pub struct MappedDocument {
    mmap: Mmap,
}

impl MappedDocument {
    /// Membuka file dan mmap seluruh isinya
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let file = File::open(path.as_ref())?;
        let len = file.metadata()?.len();
        if len == 0 {
            return Err(StorageError::Empty);
        }

        // SAFETY: File dibuka read-only; caller tidak boleh memodifikasi
        // file selama MappedDocument masih hidup.
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        log::debug!(
            "binson: mapped {} bytes from {}",
            mmap.len(),
            path.as_ref().display()
        );

        Ok(Self { mmap })
    }

    /// Encode dokumen baru ke file lewat mmap berkapasitas `capacity`
    ///
    /// Returns panjang hasil encode. File dipotong ke panjang tersebut.
    pub fn create<P, F>(path: P, capacity: usize, write: F) -> Result<usize, StorageError>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut Encoder<'_>),
    {
        if capacity == 0 {
            return Err(StorageError::Empty);
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.as_ref())?;
        file.set_len(capacity as u64)?;

        // SAFETY: File baru saja dibuat/di-truncate dengan read/write permission
        let mut mmap = unsafe { MmapOptions::new().len(capacity).map_mut(&file)? };

        let encoded = {
            let mut encoder = Encoder::new(&mut mmap[..]);
            write(&mut encoder);
            encoder.finish().map(<[u8]>::len)
        };
        let len = match encoded {
            Ok(len) => len,
            Err(code) => {
                drop(mmap);
                file.set_len(0)?;
                return Err(StorageError::Encode(code));
            }
        };

        mmap.flush()?;
        drop(mmap);
        file.set_len(len as u64)?;
        log::debug!(
            "binson: wrote {} of {} bytes to {}",
            len,
            capacity,
            path.as_ref().display()
        );

        Ok(len)
    }

    /// Decoder di atas isi mmap (zero-copy)
    #[inline(always)]
    pub fn decoder(&self) -> Decoder<'_> {
        Decoder::new(&self.mmap)
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }
}
