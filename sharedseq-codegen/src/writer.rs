// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::{CodegenError, Result};
use crate::specializer::GeneratedModule;
use std::fs;
use std::path::Path;

/// Write `modules` into `out_dir`, creating it if needed.
///
/// A file whose content already matches is left untouched, so its modification
/// time does not trigger a rebuild. Returns the number of files written.
pub fn write_modules(out_dir: &Path, modules: &[GeneratedModule]) -> Result<usize> {
    fs::create_dir_all(out_dir).map_err(|source| CodegenError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut written = 0;
    for module in modules {
        let path = out_dir.join(&module.file_name);
        if fs::read_to_string(&path).is_ok_and(|existing| existing == module.source) {
            continue;
        }

        fs::write(&path, &module.source).map_err(|source| CodegenError::Io {
            path: path.clone(),
            source,
        })?;
        written += 1;
    }
    Ok(written)
}
