// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Filesystem-related utility functions.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// An iterator that recursively walks through a directory structure and yields a tuple `(path,
/// dirs, files)` for each directory it visits.
///
/// This struct is created by [`walk_dir`]. See its documentation for more.
#[derive(Debug)]
pub struct DirWalk {
    /// Queued paths that will be visited next.
    queue: VecDeque<PathBuf>,
}

impl Iterator for DirWalk {
    type Item = io::Result<(PathBuf, Vec<PathBuf>, Vec<PathBuf>)>;

    fn next(&mut self) -> Option<Self::Item> {
        let queued_path = self.queue.pop_front();
        queued_path.map(move |path| {
            log::debug!("Visiting directory: {}", path.display());
            fs::read_dir(&path).and_then(move |entries| {
                let mut files = vec![];
                let mut dirs = vec![];
                for entry in entries {
                    let entry_path = entry?.path();

                    if entry_path.is_dir() {
                        dirs.push(entry_path);
                    } else {
                        files.push(entry_path);
                    }
                }

                dirs.sort_unstable();
                files.sort_unstable();

                self.queue.extend(dirs.iter().cloned());
                Ok((path, dirs, files))
            })
        })
    }
}

/// Creates an iterator that walks through a directory structure recursively and yields a tuple
/// consisting of the path of current directory and the files and directories in that directory.
///
/// Directories are visited breadth-first, entries of each directory in sorted order.
#[must_use]
pub fn walk_dir(path: PathBuf) -> DirWalk {
    let mut queue = VecDeque::new();
    queue.push_back(path);
    DirWalk { queue }
}

/// Check whether the path has one of the given extensions (case-insensitive).
#[must_use]
pub fn has_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension()
        .and_then(std::ffi::OsStr::to_str)
        .is_some_and(|extension| {
            extensions
                .iter()
                .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(extension))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        let extensions = ["mp3", "flac", "ogg"];
        assert!(has_extension(Path::new("a/b.mp3"), &extensions));
        assert!(has_extension(Path::new("a/b.FLAC"), &extensions));
        assert!(has_extension(Path::new("b.Ogg"), &extensions));
        assert!(!has_extension(Path::new("b.m3u"), &extensions));
        assert!(!has_extension(Path::new("mp3"), &extensions));
    }

    #[test]
    fn test_walk_dir() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("b/c")).unwrap();
        fs::create_dir_all(root.path().join("a")).unwrap();
        fs::write(root.path().join("z.mp3"), b"").unwrap();
        fs::write(root.path().join("a/2.flac"), b"").unwrap();
        fs::write(root.path().join("a/1.flac"), b"").unwrap();
        fs::write(root.path().join("b/c/x.ogg"), b"").unwrap();

        let files: Vec<PathBuf> = walk_dir(root.path().to_path_buf())
            .map(Result::unwrap)
            .flat_map(|(_path, _dirs, files)| files)
            .map(|file| file.strip_prefix(root.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            files,
            vec![
                PathBuf::from("z.mp3"),
                PathBuf::from("a/1.flac"),
                PathBuf::from("a/2.flac"),
                PathBuf::from("b/c/x.ogg"),
            ]
        );
    }
}
