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

//! Loading documents from disk.

use crate::{SxfResult, config::Config, decode::decode_document, document::Document, error::Details};
use log::debug;
use std::{fs, path::Path};

/// Read and decode the file at `path` with the default [`Config`].
pub fn load_document(path: impl AsRef<Path>) -> SxfResult<Document> {
    load_document_with(path, &Config::default())
}

/// Read and decode the file at `path`.
///
/// The whole file is read before decoding starts, so a decoding error never leaves a
/// half-filled document behind.
pub fn load_document_with(path: impl AsRef<Path>, config: &Config) -> SxfResult<Document> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| Details::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    decode_document(&bytes, config)
}
