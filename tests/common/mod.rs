#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use pollwatch::glob::IgnoreSet;
use pollwatch_test_utils::TreeBuilder;
use tempfile::TempDir;

/// Fixture tree exercised by the glob correctness table.
pub fn glob_testdata() -> TempDir {
    let builder = TreeBuilder::new()
        .file("a/abc")
        .file("a/b/c/d")
        .file("a/c/b")
        .file("abc/b")
        .file("abcd")
        .file("abcde")
        .file("abxbbxdbxebxczzx")
        .file("abxbbxdbxebxczzy")
        .file("axbxcxdxe/f")
        .file("axbxcxdxe/xxx/f")
        .file("axbxcxdxexxx/f")
        .file("axbxcxdxexxx/fff")
        .file("b/c")
        .file("c")
        .file("x")
        .file("xxx")
        .file("z")
        .file("α")
        .file("-")
        .file("]");

    #[cfg(unix)]
    let builder = builder
        .symlink("broken-symlink", "does-not-exist")
        .symlink("working-symlink", "a/b")
        .symlink("b/symlink-dir", "../axbxcxdxe");

    builder.build()
}

/// Absolute ignore set from root-relative paths.
pub fn ignore_set(root: &Path, ignores: &[&str]) -> IgnoreSet {
    ignores.iter().map(|i| root.join(i)).collect::<HashSet<PathBuf>>()
}

pub fn patterns(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
