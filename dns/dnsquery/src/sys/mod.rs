// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Platform access to the OS resolver.

#[cfg_attr(windows, path = "windows.rs")]
#[cfg_attr(not(windows), path = "unsupported.rs")]
mod imp;

pub(crate) use imp::query;
