//! In-memory archive builders for tests, benches and doc examples.
//!
//! # Panics
//!
//! Everything here panics on I/O errors; it is only meant for test code.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use zip::write::SimpleFileOptions;

/// Builds a zip archive of stored (uncompressed) files, in the given order.
///
/// # Examples
///
/// ```
/// use vaultex_core::test_utils::create_test_zip;
///
/// let bytes = create_test_zip(vec![("week1/notes.md", b"# notes"), ("syllabus.pdf", b"%PDF")]);
/// ```
#[must_use]
pub fn create_test_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    entries
        .into_iter()
        .fold(ZipTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Builds an uncompressed tar archive of regular files, in the given order.
#[must_use]
pub fn create_test_tar(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    entries
        .into_iter()
        .fold(TarTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Builds a gzip-compressed tar archive of regular files.
#[must_use]
pub fn create_test_tar_gz(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    let tar = create_test_tar(entries);
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&tar).unwrap();
    encoder.finish().unwrap()
}

/// Rewrites the compression method of entry `name` in both its local header
/// and its central directory record, leaving the data untouched.
///
/// Used to produce archives that declare a method the decoder cannot read.
pub fn set_zip_compression_method(zip: &mut [u8], name: &str, method: u16) {
    const LOCAL: &[u8] = b"PK\x03\x04";
    const CENTRAL: &[u8] = b"PK\x01\x02";

    // (signature, method offset, name length offset, name offset)
    for (signature, method_at, len_at, name_at) in [(LOCAL, 8, 26, 30), (CENTRAL, 10, 28, 46)] {
        let mut pos = 0;
        while let Some(found) = zip[pos..].windows(4).position(|w| w == signature) {
            let start = pos + found;
            pos = start + 4;
            if start + name_at > zip.len() {
                break;
            }
            let len_bytes = [zip[start + len_at], zip[start + len_at + 1]];
            let len = usize::from(u16::from_le_bytes(len_bytes));
            if zip.get(start + name_at..start + name_at + len) == Some(name.as_bytes()) {
                let field = start + method_at;
                zip[field..field + 2].copy_from_slice(&method.to_le_bytes());
            }
        }
    }
}

/// Tar archive builder supporting files, directories and symlinks.
///
/// ```
/// use vaultex_core::test_utils::TarTestBuilder;
///
/// let bytes = TarTestBuilder::new()
///     .add_directory("week1/")
///     .add_file("week1/notes.md", b"# notes")
///     .add_symlink("latest", "week1/notes.md")
///     .build();
/// ```
pub struct TarTestBuilder {
    builder: tar::Builder<Vec<u8>>,
}

impl TarTestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(Vec::new()),
        }
    }

    /// Appends a regular file.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        let mut header = header(tar::EntryType::Regular, data.len() as u64, 0o644);
        self.builder.append_data(&mut header, path, data).unwrap();
        self
    }

    /// Appends a directory record.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let mut header = header(tar::EntryType::Directory, 0, 0o755);
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Appends a symlink record pointing at `target`.
    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        let mut header = header(tar::EntryType::Symlink, 0, 0o777);
        header.set_link_name(target).unwrap();
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Finishes the archive.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.builder.into_inner().unwrap()
    }
}

impl Default for TarTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn header(kind: tar::EntryType, size: u64, mode: u32) -> tar::Header {
    let mut header = tar::Header::new_gnu();
    header.set_entry_type(kind);
    header.set_size(size);
    header.set_mode(mode);
    header.set_cksum();
    header
}

/// Zip archive builder supporting stored and deflated files, directories
/// and symlinks.
pub struct ZipTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Appends a stored file.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_with_method(path, data, zip::CompressionMethod::Stored)
    }

    /// Appends a deflate-compressed file.
    #[must_use]
    pub fn add_deflated_file(self, path: &str, data: &[u8]) -> Self {
        self.add_with_method(path, data, zip::CompressionMethod::Deflated)
    }

    fn add_with_method(mut self, path: &str, data: &[u8], method: zip::CompressionMethod) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(method)
            .unix_permissions(0o644);
        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Appends a directory record.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Appends a symlink record pointing at `target`.
    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        self.zip
            .add_symlink(path, target, SimpleFileOptions::default())
            .unwrap();
        self
    }

    /// Finishes the archive.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
