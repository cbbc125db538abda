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

//! A `log` implementation that records messages so tests can assert on them.

use log::{LevelFilter, Log, Metadata, Record};
use std::{cell::RefCell, sync::Once};

thread_local! {
    static LOG_MESSAGES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

static INIT: Once = Once::new();

struct TestLogger;

impl Log for TestLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("{}", record.args());
            LOG_MESSAGES.with(|messages| messages.borrow_mut().push(message));
        }
    }

    fn flush(&self) {}
}

static LOGGER: TestLogger = TestLogger;

/// Installs the capturing logger once per process.
///
/// Messages are recorded per thread, so parallel tests do not see each other's output.
pub(crate) fn install() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER)
            .map(|()| log::set_max_level(LevelFilter::Trace))
            .expect("Failed to install the test logger");
    });
}

/// Forgets every message captured on the current thread.
pub fn clear_log_messages() {
    LOG_MESSAGES.with(|messages| messages.borrow_mut().clear());
}

/// Asserts that a message containing `needle` was logged on the current thread.
#[track_caller]
pub fn assert_logged(needle: &str) {
    LOG_MESSAGES.with(|messages| {
        let messages = messages.borrow();
        assert!(
            messages.iter().any(|message| message.contains(needle)),
            "Expected a log message containing {needle:?}, got: {messages:?}"
        );
    });
}

/// Asserts that no message containing `needle` was logged on the current thread.
#[track_caller]
pub fn assert_not_logged(needle: &str) {
    LOG_MESSAGES.with(|messages| {
        let messages = messages.borrow();
        assert!(
            !messages.iter().any(|message| message.contains(needle)),
            "Unexpected log message containing {needle:?}: {messages:?}"
        );
    });
}
