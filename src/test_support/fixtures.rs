//! Test fixtures: source archives and installed-library layouts.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tar::Builder;

/// Build an in-memory `.tar.gz` shaped like a Clustal Omega release.
///
/// Everything lives under `prefix/`, with an executable `configure`.
pub fn source_tarball(prefix: &str) -> Vec<u8> {
    let files: [(&str, &[u8], u32); 3] = [
        ("configure", b"#!/bin/sh\nexit 0\n", 0o755),
        ("Makefile.in", b"all:\n", 0o644),
        ("src/clustal-omega.h", b"/* clustal-omega */\n", 0o644),
    ];

    let mut data = Vec::new();
    {
        let encoder = GzEncoder::new(&mut data, Compression::default());
        let mut builder = Builder::new(encoder);

        for (name, content, mode) in files {
            let mut header = tar::Header::new_gnu();
            header
                .set_path(format!("{}/{}", prefix, name))
                .expect("valid tar path");
            header.set_size(content.len() as u64);
            header.set_mode(mode);
            header.set_cksum();
            builder
                .append(&header, Cursor::new(content))
                .expect("append tar entry");
        }

        builder
            .into_inner()
            .expect("finish tar")
            .finish()
            .expect("finish gzip");
    }

    data
}

/// Write a release-shaped source archive into `dir` and return its path.
pub fn write_source_archive(dir: &Path) -> PathBuf {
    let path = dir.join("clustal-omega.tar.gz");
    fs::write(&path, source_tarball("clustal-omega-1.2.4")).expect("write archive");
    path
}

/// Lay out an installed libclustalo and return the library path.
pub fn install_native_library(include_dir: &Path, lib_dir: &Path) -> PathBuf {
    fs::create_dir_all(include_dir).expect("create include dir");
    fs::create_dir_all(lib_dir).expect("create lib dir");
    fs::write(include_dir.join("clustal-omega.h"), "/* clustal-omega */\n")
        .expect("write header");

    let lib = lib_dir.join("libclustalo.a");
    fs::write(&lib, b"!<arch>\n").expect("write library");
    lib
}
