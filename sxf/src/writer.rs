// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Saving documents to disk.

use crate::{
    SxfResult, config::Config, document::Document, encode::encode_to_vec, error::Details,
};
use log::debug;
use std::{fs, path::Path};

/// Encode `document` with the default [`Config`] and write it to `path`.
pub fn save_document(path: impl AsRef<Path>, document: &Document) -> SxfResult<usize> {
    save_document_with(path, document, &Config::default())
}

/// Encode `document` and write it to `path`, replacing any existing file.
///
/// Encoding happens in memory first. An encoding error leaves the target untouched.
pub fn save_document_with(
    path: impl AsRef<Path>,
    document: &Document,
    config: &Config,
) -> SxfResult<usize> {
    let path = path.as_ref();
    let bytes = encode_to_vec(document, config)?;
    fs::write(path, &bytes).map_err(|source| Details::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len())
}
